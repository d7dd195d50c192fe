//! Typed shape primitives checked for collisions.
//!
//! Every rendered element of interest becomes one [`Shape`]: a box, a line
//! segment or a measured text run. Each shape carries a unique [`Id`] and
//! its geometric extent in figure coordinates.

use std::fmt;

use crate::{
    color::Color,
    geometry::{Bounds, Segment},
    identifier::Id,
    text::FontSpec,
};

/// Kind of a [`Shape`], used for rule dispatch and per-kind counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    Text,
    Box,
    Line,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Box => write!(f, "box"),
            Self::Line => write!(f, "line"),
        }
    }
}

/// Element a box was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxOrigin {
    Rect,
    Polygon,
    Polyline,
}

impl fmt::Display for BoxOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rect => write!(f, "rect"),
            Self::Polygon => write!(f, "polygon"),
            Self::Polyline => write!(f, "polyline"),
        }
    }
}

/// Stroke and fill paint. `None` means the paint is `none` or unset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Paint {
    stroke: Option<Color>,
    fill: Option<Color>,
}

impl Paint {
    pub fn new(stroke: Option<Color>, fill: Option<Color>) -> Self {
        Self { stroke, fill }
    }

    pub fn stroke(&self) -> Option<Color> {
        self.stroke
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }
}

/// An axis-aligned box: a `rect`, or the extent of a polygon or polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxShape {
    id: Id,
    bounds: Bounds,
    origin: BoxOrigin,
    paint: Paint,
}

impl BoxShape {
    pub fn new(id: Id, bounds: Bounds, origin: BoxOrigin, paint: Paint) -> Self {
        Self {
            id,
            bounds,
            origin,
            paint,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn origin(&self) -> BoxOrigin {
        self.origin
    }

    pub fn paint(&self) -> Paint {
        self.paint
    }
}

/// A straight stroke between two points.
///
/// Lines flattened from a path share the path's `source` id, which is what
/// lets marker rules skip a path's own segments.
#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    id: Id,
    segment: Segment,
    stroke_width: f32,
    marker_end: Option<Id>,
    source: Id,
    stroke: Option<Color>,
}

impl LineShape {
    /// Creates a standalone line whose source is itself.
    pub fn new(id: Id, segment: Segment, stroke_width: f32) -> Self {
        Self {
            id,
            segment,
            stroke_width,
            marker_end: None,
            source: id,
            stroke: None,
        }
    }

    /// Sets the id of the element this line was flattened from.
    pub fn with_source(mut self, source: Id) -> Self {
        self.source = source;
        self
    }

    /// Sets the marker referenced by `marker-end`.
    pub fn with_marker_end(mut self, marker: Option<Id>) -> Self {
        self.marker_end = marker;
        self
    }

    /// Sets the stroke color.
    pub fn with_stroke(mut self, stroke: Option<Color>) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn marker_end(&self) -> Option<Id> {
        self.marker_end
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn stroke(&self) -> Option<Color> {
        self.stroke
    }
}

/// A text run whose bounding box has been measured.
///
/// Only [`Figure::resolve`](crate::figure::Figure::resolve) creates these.
#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    id: Id,
    bounds: Bounds,
    content: String,
    font: FontSpec,
    fill: Option<Color>,
}

impl TextShape {
    pub(crate) fn new(
        id: Id,
        bounds: Bounds,
        content: String,
        font: FontSpec,
        fill: Option<Color>,
    ) -> Self {
        Self {
            id,
            bounds,
            content,
            font,
            fill,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }
}

/// A typed shape primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Box(BoxShape),
    Line(LineShape),
    Text(TextShape),
}

impl Shape {
    /// Returns the shape's unique identifier
    pub fn id(&self) -> Id {
        match self {
            Self::Box(shape) => shape.id(),
            Self::Line(shape) => shape.id(),
            Self::Text(shape) => shape.id(),
        }
    }

    /// Returns the kind of this shape
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Box(_) => ShapeKind::Box,
            Self::Line(_) => ShapeKind::Line,
            Self::Text(_) => ShapeKind::Text,
        }
    }

    /// Returns the axis-aligned extent of the shape
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Box(shape) => shape.bounds(),
            Self::Line(shape) => shape.segment().bounds(),
            Self::Text(shape) => shape.bounds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};

    #[test]
    fn test_line_defaults_to_own_source() {
        let id = Id::new("shape_test_line");
        let line = LineShape::new(
            id,
            Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0)),
            1.0,
        );
        assert_eq!(line.source(), id);
        assert!(line.marker_end().is_none());

        let path = Id::new("shape_test_path");
        let segment = line.with_source(path).with_marker_end(Some(Id::new("arrow")));
        assert_eq!(segment.source(), path);
        assert_eq!(segment.marker_end(), Some(Id::new("arrow")));
    }

    #[test]
    fn test_shape_accessors() {
        let bounds = Bounds::new_from_top_left(Point::new(5.0, 5.0), Size::new(10.0, 20.0));
        let shape = Shape::Box(BoxShape::new(
            Id::new("shape_test_box"),
            bounds,
            BoxOrigin::Polygon,
            Paint::default(),
        ));
        assert_eq!(shape.kind(), ShapeKind::Box);
        assert_eq!(shape.id(), "shape_test_box");
        assert_eq!(shape.bounds(), bounds);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ShapeKind::Text.to_string(), "text");
        assert_eq!(ShapeKind::Box.to_string(), "box");
        assert_eq!(ShapeKind::Line.to_string(), "line");
        assert_eq!(BoxOrigin::Polyline.to_string(), "polyline");
    }
}
