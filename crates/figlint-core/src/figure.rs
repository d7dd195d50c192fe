//! The parsed figure, before text is measured.
//!
//! The parser emits a [`Figure`] whose text elements are unmeasured
//! [`TextRun`]s. The only way to obtain a [`Document`] is
//! [`Figure::resolve`], which measures every run with a [`TextMetrics`]
//! provider. Checks therefore never see text without a bounding box.

use std::collections::BTreeMap;

use log::debug;

use crate::{
    color::Color,
    document::{Canvas, Document, MarkerDef, Notice},
    geometry::Point,
    identifier::Id,
    shape::{BoxShape, LineShape, Shape, TextShape},
    text::{FontSpec, MetricsError, TextAnchor, TextMetrics},
};

/// A text element whose extent is not known yet.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    id: Id,
    content: String,
    origin: Point,
    font: FontSpec,
    anchor: TextAnchor,
    fill: Option<Color>,
}

impl TextRun {
    /// Creates a text run anchored at `origin`, where `origin.y` is the baseline.
    pub fn new(id: Id, content: &str, origin: Point, font: FontSpec, anchor: TextAnchor) -> Self {
        Self {
            id,
            content: content.to_string(),
            origin,
            font,
            anchor,
            fill: None,
        }
    }

    /// Sets the fill color.
    pub fn with_fill(mut self, fill: Option<Color>) -> Self {
        self.fill = fill;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    fn measure(self, metrics: &dyn TextMetrics) -> Result<TextShape, MetricsError> {
        let extent = metrics.measure(&self.content, &self.font)?;
        let bounds = self.anchor.bounds(self.origin, extent);
        Ok(TextShape::new(
            self.id,
            bounds,
            self.content,
            self.font,
            self.fill,
        ))
    }
}

/// A parsed element of interest.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Box(BoxShape),
    Line(LineShape),
    Text(TextRun),
}

impl Element {
    pub fn id(&self) -> Id {
        match self {
            Self::Box(shape) => shape.id(),
            Self::Line(shape) => shape.id(),
            Self::Text(run) => run.id(),
        }
    }
}

/// Parser output: elements in document order, identifier notices, marker
/// definitions and the canvas.
#[derive(Debug, Clone, Default)]
pub struct Figure {
    elements: Vec<Element>,
    notices: Vec<Notice>,
    markers: BTreeMap<Id, MarkerDef>,
    canvas: Option<Canvas>,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element.
    pub fn push_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Records an identifier notice.
    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Registers a marker definition. A later definition with the same id wins.
    pub fn insert_marker(&mut self, id: Id, marker: MarkerDef) {
        self.markers.insert(id, marker);
    }

    pub fn set_canvas(&mut self, canvas: Canvas) {
        self.canvas = Some(canvas);
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn markers(&self) -> &BTreeMap<Id, MarkerDef> {
        &self.markers
    }

    pub fn canvas(&self) -> Option<Canvas> {
        self.canvas
    }

    /// Measures every text run and produces the checked [`Document`].
    ///
    /// # Errors
    ///
    /// Returns the first [`MetricsError`] raised by `metrics`; no partial
    /// document is produced.
    ///
    /// # Examples
    ///
    /// ```
    /// # use figlint_core::figure::{Element, Figure, TextRun};
    /// # use figlint_core::geometry::Point;
    /// # use figlint_core::identifier::Id;
    /// # use figlint_core::text::{EstimatedMetrics, FontSpec, TextAnchor};
    /// let mut figure = Figure::new();
    /// figure.push_element(Element::Text(TextRun::new(
    ///     Id::new("title"),
    ///     "Title",
    ///     Point::new(10.0, 20.0),
    ///     FontSpec::default(),
    ///     TextAnchor::Start,
    /// )));
    ///
    /// let document = figure.resolve(&EstimatedMetrics).unwrap();
    /// assert_eq!(document.shapes().len(), 1);
    /// assert!(document.shapes()[0].bounds().width() > 0.0);
    /// ```
    pub fn resolve(self, metrics: &dyn TextMetrics) -> Result<Document, MetricsError> {
        let shapes = self
            .elements
            .into_iter()
            .map(|element| match element {
                Element::Box(shape) => Ok(Shape::Box(shape)),
                Element::Line(shape) => Ok(Shape::Line(shape)),
                Element::Text(run) => run.measure(metrics).map(Shape::Text),
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(shapes = shapes.len(); "Resolved figure");
        Ok(Document::new(
            shapes,
            self.notices,
            self.markers,
            self.canvas,
        ))
    }
}
