//! Text measurement for figure labels.
//!
//! Text elements only carry an anchor point in the markup. Their extent on
//! the page depends on the font, so the shape model asks a [`TextMetrics`]
//! provider for the rendered size before any collision check runs.
//!
//! # Overview
//!
//! - [`FontSpec`] - Font family and size of a text run
//! - [`TextAnchor`] - Horizontal alignment relative to the anchor point
//! - [`TextExtent`] - Measured width, ascent and descent
//! - [`TextMetrics`] - The measurement seam
//! - [`FontMetrics`] - Real font shaping through `cosmic-text`
//! - [`EstimatedMetrics`] - Font-independent estimate
//!
//! # Quick Start
//!
//! ```
//! # use figlint_core::text::{EstimatedMetrics, FontSpec, TextAnchor, TextMetrics};
//! # use figlint_core::geometry::Point;
//! let font = FontSpec::new("sans-serif", 10.0);
//! let extent = EstimatedMetrics.measure("label", &font).unwrap();
//!
//! let bounds = TextAnchor::Middle.bounds(Point::new(100.0, 50.0), extent);
//! assert!(bounds.min_x() < 100.0 && bounds.max_x() > 100.0);
//! assert!(bounds.max_y() > 50.0);
//! ```

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache};
use log::{debug, info};
use serde::Deserialize;

use crate::geometry::{Bounds, Point};

/// Line height used for shaping, relative to the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Estimated horizontal advance per character, in ems.
const ESTIMATED_ADVANCE: f32 = 0.55;

/// Estimated ascent, in ems.
const ESTIMATED_ASCENT: f32 = 0.8;

/// Estimated descent, in ems.
const ESTIMATED_DESCENT: f32 = 0.2;

/// Errors raised while measuring text.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("no fonts are available for text measurement")]
    NoFonts,

    #[error("failed to shape text `{content}` with font `{family}`")]
    Shaping { content: String, family: String },
}

/// Font family and size of a text run.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    family: String,
    size: f32,
}

impl FontSpec {
    /// Creates a font spec. `size` is in user units (pixels).
    pub fn new(family: &str, size: f32) -> Self {
        Self {
            family: family.to_string(),
            size,
        }
    }

    /// Returns the font family name
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Returns the font size in pixels
    pub fn size(&self) -> f32 {
        self.size
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: String::from("sans-serif"),
            size: 12.0,
        }
    }
}

/// Horizontal alignment of a text run relative to its anchor point
/// (`text-anchor`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    /// Parses an SVG `text-anchor` keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim() {
            "start" => Some(Self::Start),
            "middle" => Some(Self::Middle),
            "end" => Some(Self::End),
            _ => None,
        }
    }

    /// Places a measured extent at `origin`, where `origin.y` is the baseline.
    pub fn bounds(self, origin: Point, extent: TextExtent) -> Bounds {
        let min_x = match self {
            Self::Start => origin.x(),
            Self::Middle => origin.x() - extent.width / 2.0,
            Self::End => origin.x() - extent.width,
        };
        Bounds::from_corners(
            Point::new(min_x, origin.y() - extent.ascent),
            Point::new(min_x + extent.width, origin.y() + extent.descent),
        )
    }
}

/// Measured size of a single line of text.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextExtent {
    width: f32,
    ascent: f32,
    descent: f32,
}

impl TextExtent {
    pub fn new(width: f32, ascent: f32, descent: f32) -> Self {
        Self {
            width,
            ascent,
            descent,
        }
    }

    /// Returns the advance width
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the distance from the baseline to the top of the line box
    pub fn ascent(self) -> f32 {
        self.ascent
    }

    /// Returns the distance from the baseline to the bottom of the line box
    pub fn descent(self) -> f32 {
        self.descent
    }

    /// Returns the full line height
    pub fn height(self) -> f32 {
        self.ascent + self.descent
    }
}

/// Computes rendered text extents.
///
/// Implementations must be pure: the same content and font always yield the
/// same extent.
pub trait TextMetrics {
    /// Measures `content` set in `font`.
    ///
    /// # Errors
    ///
    /// Returns a [`MetricsError`] when the backend cannot measure the text.
    fn measure(&self, content: &str, font: &FontSpec) -> Result<TextExtent, MetricsError>;
}

/// Selects the [`TextMetrics`] implementation used by a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricsBackend {
    /// Shape text with the system fonts.
    #[default]
    Font,
    /// Use the font-independent estimate.
    Estimated,
}

impl MetricsBackend {
    /// Returns the provider for this backend.
    pub fn provider(self) -> &'static dyn TextMetrics {
        match self {
            Self::Font => &FontMetrics,
            Self::Estimated => &EstimatedMetrics,
        }
    }
}

/// Deterministic, font-independent text metrics.
///
/// Every character advances by 0.55 em; the line box spans 0.8 em above and
/// 0.2 em below the baseline. Useful where no fonts are installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedMetrics;

impl TextMetrics for EstimatedMetrics {
    fn measure(&self, content: &str, font: &FontSpec) -> Result<TextExtent, MetricsError> {
        let em = font.size();
        Ok(TextExtent::new(
            content.chars().count() as f32 * ESTIMATED_ADVANCE * em,
            ESTIMATED_ASCENT * em,
            ESTIMATED_DESCENT * em,
        ))
    }
}

/// Text metrics from real font shaping.
///
/// Measurement goes through a process-wide font system that is loaded the
/// first time it is needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontMetrics;

impl FontMetrics {
    /// Rasterizes `content` and reports every covered pixel to `plot`.
    ///
    /// Coordinates passed to `plot` are relative to the top-left corner of
    /// the line box, in pixels at the given `scale`. The color is `[r, g, b, a]`.
    pub fn draw<F>(
        &self,
        content: &str,
        font: &FontSpec,
        scale: f32,
        rgba: [u8; 4],
        plot: F,
    ) -> Result<(), MetricsError>
    where
        F: FnMut(i32, i32, u32, u32, [u8; 4]),
    {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .draw(content, font, scale, rgba, plot)
    }
}

impl TextMetrics for FontMetrics {
    fn measure(&self, content: &str, font: &FontSpec) -> Result<TextExtent, MetricsError> {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .measure(content, font)
    }
}

/// TextManager owns the font database and glyph cache shared by all
/// measurements.
struct TextManager {
    font_system: Mutex<FontSystem>,
    swash_cache: Mutex<SwashCache>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
            swash_cache: Mutex::new(SwashCache::new()),
        }
    }

    fn lock_font_system(&self) -> Result<std::sync::MutexGuard<'_, FontSystem>, MetricsError> {
        let font_system = self
            .font_system
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if font_system.db().faces().next().is_none() {
            return Err(MetricsError::NoFonts);
        }
        Ok(font_system)
    }

    /// Shapes a single line of text and returns its extent.
    fn measure(&self, content: &str, font: &FontSpec) -> Result<TextExtent, MetricsError> {
        if content.is_empty() {
            return Ok(TextExtent::default());
        }

        let mut font_system = self.lock_font_system()?;
        let metrics = Metrics::new(font.size(), font.size() * LINE_HEIGHT_FACTOR);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);
        let attrs = Attrs::new().family(family(font.family()));
        buffer.set_size(None, None);
        buffer.set_text(content, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut runs = buffer.layout_runs().peekable();
        let Some(first) = runs.peek() else {
            return Err(MetricsError::Shaping {
                content: content.to_string(),
                family: font.family().to_string(),
            });
        };
        let ascent = first.line_y - first.line_top;
        let descent = first.line_height - ascent;

        let width = runs
            .filter_map(|run| run.glyphs.last().map(|last| last.x + last.w))
            .fold(0.0f32, f32::max);

        debug!(content = content, width = width, ascent = ascent; "Measured text");
        Ok(TextExtent::new(width, ascent, descent))
    }

    fn draw<F>(
        &self,
        content: &str,
        font: &FontSpec,
        scale: f32,
        rgba: [u8; 4],
        mut plot: F,
    ) -> Result<(), MetricsError>
    where
        F: FnMut(i32, i32, u32, u32, [u8; 4]),
    {
        let mut font_system = self.lock_font_system()?;
        let mut swash_cache = self
            .swash_cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let size = font.size() * scale;
        let mut buffer = Buffer::new(&mut font_system, Metrics::new(size, size * LINE_HEIGHT_FACTOR));
        let mut buffer = buffer.borrow_with(&mut font_system);
        let attrs = Attrs::new().family(family(font.family()));
        buffer.set_size(None, None);
        buffer.set_text(content, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let [r, g, b, a] = rgba;
        buffer.draw(
            &mut swash_cache,
            cosmic_text::Color::rgba(r, g, b, a),
            |x, y, w, h, color| {
                plot(x, y, w, h, [color.r(), color.g(), color.b(), color.a()]);
            },
        );
        Ok(())
    }
}

/// Maps CSS generic family keywords onto cosmic-text families.
fn family(name: &str) -> Family<'_> {
    match name {
        "serif" => Family::Serif,
        "sans-serif" => Family::SansSerif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        other => Family::Name(other),
    }
}

// Created on first use so runs with estimated metrics never load fonts
static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
