//! Findings produced by the collision rules.
//!
//! A [`Finding`] names the [`Rule`] that fired and its [`Subject`]: usually an
//! unordered pair of shapes, sometimes a single shape. Pairs are stored in a
//! canonical order so the same collision found from either side compares
//! equal.

use std::fmt;

use figlint_core::{identifier::Id, shape::ShapeKind};

/// How serious a finding is. Issues fail the check; warnings do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Issue,
    Warning,
}

impl Severity {
    pub fn is_issue(self) -> bool {
        matches!(self, Self::Issue)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Issue => write!(f, "issue"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A collision rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rule {
    TextOverlap,
    LineThroughText,
    TextCrossesBox,
    BoxOverlap,
    LineThroughBox,
    ShortMarkerSegment,
    LineThroughMarker,
    ParallelLines,
    LineNearBoxEdge,
    LineTouchesCorner,
    LineTouchesEdge,
    LineTouchesMarkerCorner,
}

impl Rule {
    /// Returns the severity every finding of this rule carries.
    pub fn severity(self) -> Severity {
        match self {
            Self::LineTouchesCorner | Self::LineTouchesEdge | Self::LineTouchesMarkerCorner => {
                Severity::Warning
            }
            _ => Severity::Issue,
        }
    }

    /// Returns the short human-readable name used in reports.
    pub fn description(self) -> &'static str {
        match self {
            Self::TextOverlap => "text overlap",
            Self::LineThroughText => "line through text",
            Self::TextCrossesBox => "text crosses box",
            Self::BoxOverlap => "box overlap",
            Self::LineThroughBox => "line through box",
            Self::ShortMarkerSegment => "short marker segment",
            Self::LineThroughMarker => "line through marker",
            Self::ParallelLines => "parallel lines too close",
            Self::LineNearBoxEdge => "line too close to box edge",
            Self::LineTouchesCorner => "line touches corner",
            Self::LineTouchesEdge => "line touches edge",
            Self::LineTouchesMarkerCorner => "line touches marker corner",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// An unordered pair of shapes in canonical order.
///
/// Shapes of different kinds are ordered by kind (text, box, line) so the
/// report reads in the rule's terms; shapes of the same kind are ordered by
/// identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    first: Id,
    second: Id,
}

impl PairKey {
    /// Creates the canonical key for two shapes, regardless of argument order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use figlint::finding::PairKey;
    /// # use figlint_core::{identifier::Id, shape::ShapeKind};
    /// let a = PairKey::new((ShapeKind::Line, Id::new("arrow")), (ShapeKind::Box, Id::new("node")));
    /// let b = PairKey::new((ShapeKind::Box, Id::new("node")), (ShapeKind::Line, Id::new("arrow")));
    /// assert_eq!(a, b);
    /// assert_eq!(a.first(), Id::new("node"));
    /// ```
    pub fn new(a: (ShapeKind, Id), b: (ShapeKind, Id)) -> Self {
        let (first, second) = if a <= b { (a.1, b.1) } else { (b.1, a.1) };
        Self { first, second }
    }

    /// Creates a key whose order is fixed by role rather than by kind.
    pub(crate) fn with_roles(first: Id, second: Id) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> Id {
        self.first
    }

    pub fn second(&self) -> Id {
        self.second
    }
}

/// What a finding is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subject {
    /// Two shapes that collide.
    Pair(PairKey),
    /// A single shape, with a short explanation.
    Shape { id: Id, detail: String },
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pair(pair) => write!(f, "{} / {}", pair.first, pair.second),
            Self::Shape { id, detail } => write!(f, "{id} ({detail})"),
        }
    }
}

/// A rule violation found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Finding {
    rule: Rule,
    subject: Subject,
}

impl Finding {
    pub fn new(rule: Rule, subject: Subject) -> Self {
        Self { rule, subject }
    }

    /// Creates a finding about two shapes.
    pub fn pair(rule: Rule, pair: PairKey) -> Self {
        Self::new(rule, Subject::Pair(pair))
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    pub fn severity(&self) -> Severity {
        self.rule.severity()
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Returns the human-readable message, e.g. `text overlap: title / subtitle`.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns `true` if the finding involves the shape `id`.
    pub fn involves(&self, id: Id) -> bool {
        match &self.subject {
            Subject::Pair(pair) => pair.first == id || pair.second == id,
            Subject::Shape { id: shape, .. } => *shape == id,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.rule, self.subject)
    }
}

impl PartialOrd for Finding {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Finding {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.severity(), self.rule, &self.subject).cmp(&(other.severity(), other.rule, &other.subject))
    }
}
