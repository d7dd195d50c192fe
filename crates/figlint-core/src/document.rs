//! The measured shape collection checked by the rule evaluator.
//!
//! A [`Document`] is produced once per input file by
//! [`Figure::resolve`](crate::figure::Figure::resolve) and is read-only
//! afterwards.

use std::{collections::BTreeMap, fmt};

use crate::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
    shape::{LineShape, Shape, ShapeKind},
};

/// Parser warning about element identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    /// The element has no `id` attribute.
    MissingId,
    /// The element repeats an `id` already used earlier in the document.
    DuplicateId { original: String },
}

/// An identifier notice with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    kind: NoticeKind,
    tag: String,
    line: u32,
    name: Id,
}

impl Notice {
    /// Creates a notice for `<tag>` at 1-based source `line`, temporarily named `name`.
    pub fn new(kind: NoticeKind, tag: &str, line: u32, name: Id) -> Self {
        Self {
            kind,
            tag: tag.to_string(),
            line,
            name,
        }
    }

    pub fn kind(&self) -> &NoticeKind {
        &self.kind
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the synthesized name given to the element
    pub fn name(&self) -> Id {
        self.name
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NoticeKind::MissingId => write!(
                f,
                "line {}: <{}> has no id, temporarily named '{}'",
                self.line, self.tag, self.name
            ),
            NoticeKind::DuplicateId { original } => write!(
                f,
                "line {}: <{}> repeats id '{}', temporarily named '{}'",
                self.line, self.tag, original, self.name
            ),
        }
    }
}

/// An arrowhead template declared with `<marker>` under `<defs>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerDef {
    width: f32,
    height: f32,
    ref_x: f32,
    ref_y: f32,
}

impl MarkerDef {
    pub fn new(width: f32, height: f32, ref_x: f32, ref_y: f32) -> Self {
        Self {
            width,
            height,
            ref_x,
            ref_y,
        }
    }

    /// Returns `markerWidth` in marker units
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns `markerHeight` in marker units
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns the axis-aligned extent of this marker drawn at the end of `line`.
    ///
    /// The marker rectangle is scaled by the stroke width, rotated to the
    /// line direction and positioned so that `(refX, refY)` lands on the end
    /// point. Degenerate lines get the marker centered on the end point.
    ///
    /// # Examples
    ///
    /// ```
    /// # use figlint_core::document::MarkerDef;
    /// # use figlint_core::geometry::{Point, Segment};
    /// # use figlint_core::identifier::Id;
    /// # use figlint_core::shape::LineShape;
    /// let marker = MarkerDef::new(10.0, 7.0, 9.0, 3.5);
    /// let line = LineShape::new(
    ///     Id::new("arrow"),
    ///     Segment::new(Point::new(0.0, 50.0), Point::new(100.0, 50.0)),
    ///     1.0,
    /// );
    ///
    /// let bounds = marker.placed_bounds(&line);
    /// assert_eq!(bounds.min_x(), 91.0);
    /// assert_eq!(bounds.max_x(), 101.0);
    /// assert_eq!(bounds.min_y(), 46.5);
    /// assert_eq!(bounds.max_y(), 53.5);
    /// ```
    pub fn placed_bounds(&self, line: &LineShape) -> Bounds {
        let scale = line.stroke_width();
        let size = Size::new(self.width, self.height).scale(scale);
        let reference = Point::new(self.ref_x, self.ref_y).scale(scale);
        let tip = line.segment().end();

        let Some(along) = line.segment().direction() else {
            let half = Point::new(size.width() / 2.0, size.height() / 2.0);
            return Bounds::from_corners(tip.sub_point(half), tip.add_point(half));
        };
        let across = Point::new(-along.y(), along.x());

        let corners = [
            Point::new(0.0, 0.0),
            Point::new(size.width(), 0.0),
            Point::new(size.width(), size.height()),
            Point::new(0.0, size.height()),
        ]
        .map(|local| {
            let offset = local.sub_point(reference);
            tip.add_point(along.scale(offset.x()))
                .add_point(across.scale(offset.y()))
        });

        Bounds::enclosing(corners).unwrap_or_default()
    }
}

impl Default for MarkerDef {
    fn default() -> Self {
        Self::new(10.0, 7.0, 0.0, 0.0)
    }
}

/// Drawing area of the figure from the root `<svg>` element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    view: Bounds,
}

impl Canvas {
    pub fn new(view: Bounds) -> Self {
        Self { view }
    }

    /// Returns the user-space rectangle shown by the figure
    pub fn view(&self) -> Bounds {
        self.view
    }
}

/// Measured shapes of one figure, with parse notices and marker definitions.
#[derive(Debug, Clone, Default)]
pub struct Document {
    shapes: Vec<Shape>,
    notices: Vec<Notice>,
    markers: BTreeMap<Id, MarkerDef>,
    canvas: Option<Canvas>,
}

impl Document {
    pub(crate) fn new(
        shapes: Vec<Shape>,
        notices: Vec<Notice>,
        markers: BTreeMap<Id, MarkerDef>,
        canvas: Option<Canvas>,
    ) -> Self {
        Self {
            shapes,
            notices,
            markers,
            canvas,
        }
    }

    /// Returns the shapes in document order
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Returns identifier notices in document order
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Looks up a marker definition by id
    pub fn marker(&self, id: Id) -> Option<&MarkerDef> {
        self.markers.get(&id)
    }

    pub fn canvas(&self) -> Option<Canvas> {
        self.canvas
    }

    /// Counts the shapes of the given kind
    pub fn count(&self, kind: ShapeKind) -> usize {
        self.shapes
            .iter()
            .filter(|shape| shape.kind() == kind)
            .count()
    }

    /// Returns the smallest rectangle enclosing every shape
    pub fn extent(&self) -> Option<Bounds> {
        self.shapes
            .iter()
            .map(Shape::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }
}
