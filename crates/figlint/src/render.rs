//! Rasterizes a checked document into a PNG.
//!
//! The image is drawn from the shapes the checker extracted, not from the
//! original markup: rectangles are filled and stroked, polygons and
//! polylines are drawn as their bounding outline, lines are stroked at their
//! width and text is rasterized through the shared font system. It is meant
//! as a faithful-enough preview for feedback, not a general SVG renderer.

use std::io::Cursor;

use image::{ImageFormat, Pixel, Rgba, RgbaImage};
use imageproc::{
    drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut, draw_polygon_mut},
    point::Point as PixelPoint,
    rect::Rect,
};
use log::debug;
use thiserror::Error;

use figlint_core::{
    color::Color,
    document::Document,
    geometry::{Bounds, Point},
    shape::{BoxOrigin, BoxShape, LineShape, Shape, TextShape},
    text::{FontMetrics, MetricsError},
};

/// Largest accepted image side, in pixels.
const MAX_SIDE: u32 = 16_384;

/// Errors raised while rasterizing a document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("figure has no drawing area")]
    EmptyFigure,

    #[error("invalid render scale {0}")]
    InvalidScale(f32),

    #[error("rendered image would be {width}x{height} pixels")]
    TooLarge { width: u32, height: u32 },

    #[error("failed to rasterize text: {0}")]
    Text(#[from] MetricsError),

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
}

/// Draws documents at a fixed scale on a white background.
#[derive(Debug, Clone, Copy)]
pub struct Rasterizer {
    scale: f32,
    background: Rgba<u8>,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl Rasterizer {
    /// Creates a rasterizer producing `scale` pixels per user unit.
    pub fn new(scale: f32) -> Self {
        Self {
            scale,
            background: Rgba([255, 255, 255, 255]),
        }
    }

    /// Renders the document's canvas, or the extent of its shapes when the
    /// figure declares no size.
    ///
    /// # Errors
    ///
    /// Fails when there is nothing to draw, when the image would be
    /// unreasonably large, or when text cannot be rasterized.
    pub fn render(&self, document: &Document) -> Result<RgbaImage, RenderError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(RenderError::InvalidScale(self.scale));
        }

        let view = document
            .canvas()
            .map(|canvas| canvas.view())
            .or_else(|| document.extent())
            .filter(|view| !view.is_empty())
            .ok_or(RenderError::EmptyFigure)?;

        let width = (view.width() * self.scale).ceil() as u32;
        let height = (view.height() * self.scale).ceil() as u32;
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyFigure);
        }
        if width > MAX_SIDE || height > MAX_SIDE {
            return Err(RenderError::TooLarge { width, height });
        }

        debug!(width, height, scale = self.scale; "Rasterizing figure");
        let mut canvas = Canvas {
            image: RgbaImage::from_pixel(width, height, self.background),
            origin: view.min_point(),
            scale: self.scale,
        };

        for shape in document.shapes() {
            match shape {
                Shape::Box(shape) => canvas.draw_box(shape),
                Shape::Line(line) => canvas.draw_line(line),
                Shape::Text(text) => canvas.draw_text(text)?,
            }
        }

        Ok(canvas.image)
    }
}

/// Encodes an image as PNG bytes.
///
/// # Errors
///
/// Returns [`RenderError::Encode`] if encoding fails.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

struct Canvas {
    image: RgbaImage,
    origin: Point,
    scale: f32,
}

impl Canvas {
    fn to_pixel(&self, point: Point) -> (f32, f32) {
        let local = point.sub_point(self.origin).scale(self.scale);
        (local.x(), local.y())
    }

    /// Converts bounds to a pixel rectangle at least one pixel wide and high.
    fn to_rect(&self, bounds: Bounds) -> Rect {
        let (x0, y0) = self.to_pixel(bounds.min_point());
        let (x1, y1) = self.to_pixel(Point::new(bounds.max_x(), bounds.max_y()));
        let (x0, y0) = (x0.round() as i32, y0.round() as i32);
        let width = (x1.round() as i32 - x0).max(1) as u32;
        let height = (y1.round() as i32 - y0).max(1) as u32;
        Rect::at(x0, y0).of_size(width, height)
    }

    fn draw_box(&mut self, shape: &BoxShape) {
        let rect = self.to_rect(shape.bounds());
        let paint = shape.paint();

        match shape.origin() {
            BoxOrigin::Rect => {
                if let Some(fill) = paint.fill() {
                    draw_filled_rect_mut(&mut self.image, rect, pixel(fill));
                }
                if let Some(stroke) = paint.stroke() {
                    draw_hollow_rect_mut(&mut self.image, rect, pixel(stroke));
                }
            }
            BoxOrigin::Polygon | BoxOrigin::Polyline => {
                if let Some(color) = paint.stroke().or(paint.fill()) {
                    draw_hollow_rect_mut(&mut self.image, rect, pixel(color));
                }
            }
        }
    }

    fn draw_line(&mut self, line: &LineShape) {
        let Some(stroke) = line.stroke() else {
            return;
        };
        let color = pixel(stroke);
        let segment = line.segment();
        let start = self.to_pixel(segment.start());
        let end = self.to_pixel(segment.end());
        let width = line.stroke_width() * self.scale;

        let Some(direction) = segment.direction().filter(|_| width >= 2.0) else {
            draw_line_segment_mut(&mut self.image, start, end, color);
            return;
        };

        // Thick strokes are drawn as a quad around the center line
        let half = Point::new(-direction.y(), direction.x()).scale(width / 2.0);
        let corner = |(x, y): (f32, f32), sign: f32| {
            PixelPoint::new(
                (x + sign * half.x()).round() as i32,
                (y + sign * half.y()).round() as i32,
            )
        };
        let quad = [corner(start, 1.0), corner(end, 1.0), corner(end, -1.0), corner(start, -1.0)];
        if quad[0] == quad[3] {
            draw_line_segment_mut(&mut self.image, start, end, color);
        } else {
            draw_polygon_mut(&mut self.image, &quad, color);
        }
    }

    fn draw_text(&mut self, text: &TextShape) -> Result<(), MetricsError> {
        let Some(fill) = text.fill() else {
            return Ok(());
        };
        let (left, top) = self.to_pixel(text.bounds().min_point());
        let (left, top) = (left.round() as i32, top.round() as i32);
        let image = &mut self.image;

        FontMetrics.draw(
            text.content(),
            text.font(),
            self.scale,
            fill.to_rgba8(),
            |x, y, w, h, rgba| {
                let color = Rgba(rgba);
                for dy in 0..h as i32 {
                    for dx in 0..w as i32 {
                        blend(image, left + x + dx, top + y + dy, color);
                    }
                }
            },
        )
    }
}

fn pixel(color: Color) -> Rgba<u8> {
    Rgba(color.to_rgba8())
}

fn blend(image: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
    if x < 0 || y < 0 {
        return;
    }
    if let Some(target) = image.get_pixel_mut_checked(x as u32, y as u32) {
        target.blend(&color);
    }
}
