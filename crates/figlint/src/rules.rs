//! Pairwise collision rules.
//!
//! Every unordered pair of shapes is classified by the rule keyed by the two
//! shape kinds. Pairs are evaluated independently, so the result does not
//! depend on document order. Supplementary rules look at lines with
//! arrowheads and at clearances between lines and boxes.

use log::{debug, trace};

use figlint_core::{
    document::Document,
    geometry::{Bounds, Contact, ContactTolerance, Segment},
    shape::{BoxShape, LineShape, Shape, ShapeKind, TextShape},
};

use crate::{
    config::AppConfig,
    finding::{Finding, PairKey, Rule, Subject},
};

/// Evaluates collision rules over a [`Document`].
///
/// # Examples
///
/// ```
/// # use figlint::rules::Evaluator;
/// # use figlint_core::text::EstimatedMetrics;
/// let source = r#"<svg xmlns="http://www.w3.org/2000/svg">
///     <rect id="outer" x="0" y="0" width="100" height="100"/>
///     <rect id="inner" x="10" y="10" width="20" height="20"/>
/// </svg>"#;
/// let document = figlint_parser::parse(source)
///     .unwrap()
///     .resolve(&EstimatedMetrics)
///     .unwrap();
///
/// assert!(Evaluator::default().evaluate(&document).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Evaluator {
    overlap_tolerance: f32,
    contact: ContactTolerance,
    marker_segments: bool,
    marker_collisions: bool,
    line_spacing: bool,
    edge_clearance: bool,
    marker_ratio: f32,
    clearance_factor: f32,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl Evaluator {
    /// Creates an evaluator from the `[check]` and `[rules]` sections.
    pub fn from_config(config: &AppConfig) -> Self {
        let check = config.check();
        let rules = config.rules();
        Self {
            overlap_tolerance: check.overlap_tolerance(),
            contact: check.contact(),
            marker_segments: rules.marker_segments(),
            marker_collisions: rules.marker_collisions(),
            line_spacing: rules.line_spacing(),
            edge_clearance: rules.edge_clearance(),
            marker_ratio: rules.marker_ratio(),
            clearance_factor: rules.clearance_factor(),
        }
    }

    /// Sets the overlap tolerance used for box and text comparisons.
    pub fn with_overlap_tolerance(mut self, tolerance: f32) -> Self {
        self.overlap_tolerance = tolerance;
        self
    }

    /// Sets the line/box contact tolerances.
    pub fn with_contact(mut self, contact: ContactTolerance) -> Self {
        self.contact = contact;
        self
    }

    /// Enables or disables the parallel line spacing rule.
    pub fn with_line_spacing(mut self, enabled: bool) -> Self {
        self.line_spacing = enabled;
        self
    }

    /// Enables or disables the box edge clearance rule.
    pub fn with_edge_clearance(mut self, enabled: bool) -> Self {
        self.edge_clearance = enabled;
        self
    }

    /// Runs every enabled rule and returns the findings sorted by severity,
    /// rule and subject.
    pub fn evaluate(&self, document: &Document) -> Vec<Finding> {
        let shapes = document.shapes();
        let mut findings = Vec::new();

        for (index, a) in shapes.iter().enumerate() {
            for b in &shapes[index + 1..] {
                findings.extend(self.evaluate_pair(a, b));
            }
        }

        if self.marker_segments {
            findings.extend(self.short_marker_segments(document));
        }
        if self.marker_collisions {
            findings.extend(self.marker_collisions(document));
        }

        findings.sort();
        findings.dedup();
        debug!(shapes = shapes.len(), findings = findings.len(); "Evaluated rules");
        findings
    }

    /// Classifies a single pair of shapes.
    ///
    /// The result is the same for `(a, b)` and `(b, a)`.
    pub fn evaluate_pair(&self, a: &Shape, b: &Shape) -> Option<Finding> {
        let finding = match (a, b) {
            (Shape::Text(t1), Shape::Text(t2)) => self.text_text(t1, t2),
            (Shape::Text(text), Shape::Line(line)) | (Shape::Line(line), Shape::Text(text)) => {
                self.text_line(text, line)
            }
            (Shape::Text(text), Shape::Box(shape)) | (Shape::Box(shape), Shape::Text(text)) => {
                self.text_box(text, shape)
            }
            (Shape::Box(b1), Shape::Box(b2)) => self.box_box(b1, b2),
            (Shape::Line(line), Shape::Box(shape)) | (Shape::Box(shape), Shape::Line(line)) => {
                self.line_box(line, shape)
            }
            (Shape::Line(l1), Shape::Line(l2)) => self.line_line(l1, l2),
        };

        if let Some(finding) = &finding {
            trace!(finding:%; "Pair finding");
        }
        finding
    }

    fn text_text(&self, t1: &TextShape, t2: &TextShape) -> Option<Finding> {
        t1.bounds()
            .overlaps(&t2.bounds(), self.overlap_tolerance)
            .then(|| {
                Finding::pair(
                    Rule::TextOverlap,
                    PairKey::new((ShapeKind::Text, t1.id()), (ShapeKind::Text, t2.id())),
                )
            })
    }

    fn text_line(&self, text: &TextShape, line: &LineShape) -> Option<Finding> {
        let glyphs = text.bounds().inflate(-self.overlap_tolerance);
        line.segment()
            .intersects(&glyphs)
            .then(|| Finding::pair(Rule::LineThroughText, PairKey::with_roles(line.id(), text.id())))
    }

    /// Text must not straddle a box border. Either one may enclose the other.
    fn text_box(&self, text: &TextShape, shape: &BoxShape) -> Option<Finding> {
        let text_bounds = text.bounds();
        let box_bounds = shape.bounds();
        let tolerance = self.overlap_tolerance;
        let crosses = text_bounds.overlaps(&box_bounds, tolerance)
            && !box_bounds.contains(&text_bounds, tolerance)
            && !text_bounds.contains(&box_bounds, tolerance);

        crosses.then(|| Finding::pair(Rule::TextCrossesBox, PairKey::with_roles(text.id(), shape.id())))
    }

    fn box_box(&self, b1: &BoxShape, b2: &BoxShape) -> Option<Finding> {
        let (a, b) = (b1.bounds(), b2.bounds());
        let tolerance = self.overlap_tolerance;
        let partial =
            a.overlaps(&b, tolerance) && !a.contains(&b, tolerance) && !b.contains(&a, tolerance);

        partial.then(|| {
            Finding::pair(
                Rule::BoxOverlap,
                PairKey::new((ShapeKind::Box, b1.id()), (ShapeKind::Box, b2.id())),
            )
        })
    }

    fn line_box(&self, line: &LineShape, shape: &BoxShape) -> Option<Finding> {
        let pair = PairKey::with_roles(line.id(), shape.id());
        let rule = match line.segment().contact_with(&shape.bounds(), self.contact) {
            Contact::Crossing => Some(Rule::LineThroughBox),
            Contact::Corner => Some(Rule::LineTouchesCorner),
            Contact::Edge => Some(Rule::LineTouchesEdge),
            Contact::Contained | Contact::Terminal | Contact::Clear => None,
        };

        rule.map(|rule| Finding::pair(rule, pair))
            .or_else(|| self.edge_clearance(line, shape, pair))
    }

    fn edge_clearance(&self, line: &LineShape, shape: &BoxShape, pair: PairKey) -> Option<Finding> {
        if !self.edge_clearance {
            return None;
        }
        let clearance = self.clearance_factor * line.stroke_width();
        let distance = distance_to_box_edge(line.segment(), &shape.bounds())?;
        (distance < clearance).then(|| Finding::pair(Rule::LineNearBoxEdge, pair))
    }

    /// Lines only interact with each other through the spacing rule.
    fn line_line(&self, l1: &LineShape, l2: &LineShape) -> Option<Finding> {
        if !self.line_spacing {
            return None;
        }
        // Distances are measured from the first line of the canonical pair
        let (l1, l2) = if l1.id() <= l2.id() { (l1, l2) } else { (l2, l1) };
        let (s1, s2) = (l1.segment(), l2.segment());
        if !s1.is_parallel_to(s2) || !s1.overlaps_along(s2) {
            return None;
        }

        let clearance = self.clearance_factor * l1.stroke_width().max(l2.stroke_width());
        (s1.perpendicular_distance_to(s2) < clearance).then(|| {
            Finding::pair(
                Rule::ParallelLines,
                PairKey::new((ShapeKind::Line, l1.id()), (ShapeKind::Line, l2.id())),
            )
        })
    }

    /// Lines carrying an arrowhead must be long enough to show a shaft.
    fn short_marker_segments(&self, document: &Document) -> Vec<Finding> {
        lines(document)
            .filter_map(|line| {
                let marker = document.marker(line.marker_end()?)?;
                let minimum = marker.width() * self.marker_ratio;
                let length = line.segment().length();
                (length < minimum).then(|| {
                    Finding::new(
                        Rule::ShortMarkerSegment,
                        Subject::Shape {
                            id: line.id(),
                            detail: format!("{length:.0}px < {minimum:.0}px"),
                        },
                    )
                })
            })
            .collect()
    }

    /// Lines must not cross an arrowhead drawn at the end of another line.
    fn marker_collisions(&self, document: &Document) -> Vec<Finding> {
        let mut findings = Vec::new();

        for owner in lines(document) {
            let Some(marker) = owner.marker_end().and_then(|id| document.marker(id)) else {
                continue;
            };
            let arrowhead = marker.placed_bounds(owner);
            let marker_id = owner.id().marker();

            for line in lines(document).filter(|line| line.source() != owner.source()) {
                let rule = match line.segment().contact_with(&arrowhead, self.contact) {
                    Contact::Crossing => Rule::LineThroughMarker,
                    Contact::Corner => Rule::LineTouchesMarkerCorner,
                    _ => continue,
                };
                findings.push(Finding::pair(rule, PairKey::with_roles(line.id(), marker_id)));
            }
        }

        findings
    }
}

fn lines(document: &Document) -> impl Iterator<Item = &LineShape> {
    document.shapes().iter().filter_map(|shape| match shape {
        Shape::Line(line) => Some(line),
        _ => None,
    })
}

/// Distance from an axis-aligned segment to the nearest parallel edge of
/// `bounds`, when their spans overlap along the segment's axis.
fn distance_to_box_edge(segment: Segment, bounds: &Bounds) -> Option<f32> {
    let direction = segment.direction()?;
    let (start, end) = (segment.start(), segment.end());

    if direction.y().abs() < AXIS_EPSILON {
        let (min_x, max_x) = (start.x().min(end.x()), start.x().max(end.x()));
        if max_x <= bounds.min_x() || min_x >= bounds.max_x() {
            return None;
        }
        let y = start.y();
        Some((y - bounds.min_y()).abs().min((y - bounds.max_y()).abs()))
    } else if direction.x().abs() < AXIS_EPSILON {
        let (min_y, max_y) = (start.y().min(end.y()), start.y().max(end.y()));
        if max_y <= bounds.min_y() || min_y >= bounds.max_y() {
            return None;
        }
        let x = start.x();
        Some((x - bounds.min_x()).abs().min((x - bounds.max_x()).abs()))
    } else {
        None
    }
}

/// Direction components below this count as axis-aligned.
const AXIS_EPSILON: f32 = 0.001;
