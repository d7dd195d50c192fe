//! Geometric primitives for collision checks.
//!
//! This module provides the small set of geometric types figlint needs to
//! reason about figure layout.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in figure space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned rectangle defined by minimum and maximum coordinates
//! - [`Segment`] - A straight line segment between two points
//! - [`Contact`] - How a segment meets a rectangle
//!
//! # Coordinate System
//!
//! Figlint uses the SVG user coordinate system:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Transforms are not applied; coordinates are taken as written.

/// Segments shorter than this are treated as points.
const DEGENERATE_LENGTH: f32 = 0.001;

/// Cross products below this magnitude count as parallel.
const PARALLEL_EPSILON: f32 = 0.001;

/// A 2D point in figure coordinate space.
///
/// # Examples
///
/// ```
/// # use figlint_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Dot product of the two points taken as vectors
    pub fn dot(self, other: Point) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the cross product of the two points taken as vectors
    pub fn cross(self, other: Point) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Euclidean length of the point taken as a vector
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point
    pub fn distance_to(self, other: Point) -> f32 {
        self.sub_point(other).hypot()
    }
}

/// Width and height of an element
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// An axis-aligned rectangle with minimum and maximum coordinates.
///
/// Bounds built through the constructors are always normalized
/// (`min <= max`). [`Bounds::inflate`] with a negative amount may produce
/// an empty rectangle, which [`Bounds::is_empty`] reports.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds spanning two opposite corners, in any order
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Creates new bounds from a top-left point and a size.
    ///
    /// Negative sizes are normalized so the result still spans the two
    /// corners.
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self::from_corners(
            top_left,
            Point::new(top_left.x + size.width, top_left.y + size.height),
        )
    }

    /// Creates the smallest bounds enclosing every point, or `None` if the
    /// iterator is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use figlint_core::geometry::{Bounds, Point};
    /// let triangle = [Point::new(0.0, 0.0), Point::new(10.0, 3.5), Point::new(0.0, 7.0)];
    /// let bounds = Bounds::enclosing(triangle).unwrap();
    /// assert_eq!(bounds.width(), 10.0);
    /// assert_eq!(bounds.height(), 7.0);
    /// ```
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let initial = Self::from_corners(first, first);
        Some(points.fold(initial, |acc, p| acc.merge(&Self::from_corners(p, p))))
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Returns the four corners: top-left, top-right, bottom-left, bottom-right
    pub fn corners(self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.min_x, self.max_y),
            Point::new(self.max_x, self.max_y),
        ]
    }

    /// Returns `true` when the rectangle has no area left (after shrinking)
    pub fn is_empty(self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Grows the bounds by `amount` on every side; negative amounts shrink.
    pub fn inflate(self, amount: f32) -> Self {
        Self {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }

    /// Merges two bounds into the smallest bounds containing both
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Returns `true` if the two rectangles interpenetrate by more than
    /// `tolerance` along both axes.
    ///
    /// Rectangles that merely touch, or overlap by less than the tolerance,
    /// do not overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// # use figlint_core::geometry::{Bounds, Point, Size};
    /// let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
    /// let touching = Bounds::new_from_top_left(Point::new(10.0, 0.0), Size::new(10.0, 10.0));
    /// let overlapping = Bounds::new_from_top_left(Point::new(5.0, 5.0), Size::new(10.0, 10.0));
    ///
    /// assert!(!a.overlaps(&touching, 0.5));
    /// assert!(a.overlaps(&overlapping, 0.5));
    /// ```
    pub fn overlaps(&self, other: &Self, tolerance: f32) -> bool {
        if self.max_x <= other.min_x + tolerance || other.max_x <= self.min_x + tolerance {
            return false;
        }
        if self.max_y <= other.min_y + tolerance || other.max_y <= self.min_y + tolerance {
            return false;
        }
        true
    }

    /// Returns `true` if `other` lies inside these bounds, allowing it to
    /// stick out by up to `tolerance` on any side.
    pub fn contains(&self, other: &Self, tolerance: f32) -> bool {
        self.min_x <= other.min_x + tolerance
            && self.min_y <= other.min_y + tolerance
            && self.max_x + tolerance >= other.max_x
            && self.max_y + tolerance >= other.max_y
    }

    /// Returns `true` if the point lies inside or on the edge of the bounds
    pub fn contains_point(&self, point: Point) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_y..=self.max_y).contains(&point.y)
    }
}

/// Tolerances used when classifying how a [`Segment`] meets a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactTolerance {
    /// Depth of the boundary band around a rectangle's edges.
    touch: f32,
    /// Distance from a corner under which contact counts as corner contact.
    corner: f32,
}

impl ContactTolerance {
    pub fn new(touch: f32, corner: f32) -> Self {
        Self { touch, corner }
    }

    /// Returns the boundary band depth
    pub fn touch(self) -> f32 {
        self.touch
    }

    /// Returns the corner contact distance
    pub fn corner(self) -> f32 {
        self.corner
    }
}

impl Default for ContactTolerance {
    fn default() -> Self {
        Self {
            touch: 1.0,
            corner: 2.0,
        }
    }
}

/// How a segment meets a rectangle.
///
/// The rectangle is split into an *interior* (shrunk by the touch
/// tolerance) and a boundary band of twice that depth around its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contact {
    /// The segment enters the interior without being contained by the rectangle.
    Crossing,
    /// The segment enters the interior but lives inside the rectangle.
    ///
    /// Both end points are within the rectangle and at least one of them is
    /// in the interior, so the segment is drawn inside rather than across.
    Contained,
    /// The segment passes a corner within the corner tolerance.
    Corner,
    /// The segment ends on the boundary band without entering the interior.
    Terminal,
    /// The segment runs along or grazes an edge without ending on it.
    Edge,
    /// No contact.
    Clear,
}

/// A straight segment between two points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Segment {
    start: Point,
    end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Returns the start point
    pub fn start(self) -> Point {
        self.start
    }

    /// Returns the end point
    pub fn end(self) -> Point {
        self.end
    }

    /// Returns the vector from start to end
    pub fn delta(self) -> Point {
        self.end.sub_point(self.start)
    }

    /// Returns the length of the segment
    pub fn length(self) -> f32 {
        self.delta().hypot()
    }

    /// Returns `true` if the segment is too short to have a direction
    pub fn is_degenerate(self) -> bool {
        self.length() < DEGENERATE_LENGTH
    }

    /// Returns the unit direction vector, or `None` for degenerate segments
    pub fn direction(self) -> Option<Point> {
        let length = self.length();
        (length >= DEGENERATE_LENGTH).then(|| self.delta().scale(1.0 / length))
    }

    /// Returns the point at parameter `t`, where 0 is the start and 1 the end
    pub fn point_at(self, t: f32) -> Point {
        self.start.add_point(self.delta().scale(t))
    }

    /// Returns the bounding box of the segment
    pub fn bounds(self) -> Bounds {
        Bounds::from_corners(self.start, self.end)
    }

    /// Clips the segment against a closed rectangle (Liang–Barsky).
    ///
    /// Returns the parameter interval `(t0, t1)` of the part of the segment
    /// inside the rectangle, or `None` if the segment misses it. Touching
    /// the boundary counts as inside.
    ///
    /// # Examples
    ///
    /// ```
    /// # use figlint_core::geometry::{Bounds, Point, Segment, Size};
    /// let bounds = Bounds::new_from_top_left(Point::new(50.0, 50.0), Size::new(50.0, 50.0));
    /// let through = Segment::new(Point::new(0.0, 75.0), Point::new(150.0, 75.0));
    ///
    /// let (t0, t1) = through.clip(&bounds).unwrap();
    /// assert!((t0 - 1.0 / 3.0).abs() < 1e-6);
    /// assert!((t1 - 2.0 / 3.0).abs() < 1e-6);
    /// ```
    pub fn clip(self, bounds: &Bounds) -> Option<(f32, f32)> {
        if bounds.is_empty() {
            return None;
        }

        let delta = self.delta();
        let checks = [
            (-delta.x, self.start.x - bounds.min_x),
            (delta.x, bounds.max_x - self.start.x),
            (-delta.y, self.start.y - bounds.min_y),
            (delta.y, bounds.max_y - self.start.y),
        ];

        let mut t0 = 0.0f32;
        let mut t1 = 1.0f32;
        for (p, q) in checks {
            if p == 0.0 {
                // Parallel to this edge: reject only when fully outside it
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        Some((t0, t1))
    }

    /// Returns `true` if any part of the segment lies in the closed rectangle
    pub fn intersects(self, bounds: &Bounds) -> bool {
        self.clip(bounds).is_some()
    }

    /// Shortest distance from the segment to a point
    pub fn distance_to_point(self, point: Point) -> f32 {
        let delta = self.delta();
        let length_sq = delta.dot(delta);
        if length_sq == 0.0 {
            return self.start.distance_to(point);
        }
        let t = (point.sub_point(self.start).dot(delta) / length_sq).clamp(0.0, 1.0);
        self.point_at(t).distance_to(point)
    }

    /// Returns `true` if both segments are non-degenerate and parallel
    pub fn is_parallel_to(self, other: Segment) -> bool {
        match (self.direction(), other.direction()) {
            (Some(d1), Some(d2)) => d1.cross(d2).abs() < PARALLEL_EPSILON,
            _ => false,
        }
    }

    /// Distance between the infinite lines through two parallel segments
    pub fn perpendicular_distance_to(self, other: Segment) -> f32 {
        match self.direction() {
            Some(direction) => other.start.sub_point(self.start).cross(direction).abs(),
            None => self.start.distance_to(other.start),
        }
    }

    /// Returns `true` if the projections of both segments onto this
    /// segment's direction overlap by a positive length.
    pub fn overlaps_along(self, other: Segment) -> bool {
        let Some(direction) = self.direction() else {
            return false;
        };
        let project = |segment: Segment| {
            let a = segment.start.dot(direction);
            let b = segment.end.dot(direction);
            (a.min(b), a.max(b))
        };
        let (min1, max1) = project(self);
        let (min2, max2) = project(other);
        max1 > min2 && max2 > min1
    }

    /// Classifies how the segment meets a rectangle.
    ///
    /// The checks run in a fixed order: interior entry, corner proximity,
    /// boundary contact. See [`Contact`] for the meaning of each outcome.
    ///
    /// # Examples
    ///
    /// ```
    /// # use figlint_core::geometry::{Bounds, Contact, ContactTolerance, Point, Segment, Size};
    /// let bounds = Bounds::new_from_top_left(Point::new(50.0, 50.0), Size::new(50.0, 50.0));
    /// let tolerance = ContactTolerance::default();
    ///
    /// let connector = Segment::new(Point::new(0.0, 75.0), Point::new(50.0, 75.0));
    /// assert_eq!(connector.contact_with(&bounds, tolerance), Contact::Terminal);
    ///
    /// let grazing = Segment::new(Point::new(0.0, 100.0), Point::new(100.0, 0.0));
    /// assert_eq!(grazing.contact_with(&bounds, tolerance), Contact::Corner);
    /// ```
    pub fn contact_with(self, bounds: &Bounds, tolerance: ContactTolerance) -> Contact {
        let interior = bounds.inflate(-tolerance.touch);
        let band = bounds.inflate(tolerance.touch);

        if self.intersects(&interior) {
            let start_within = band.contains_point(self.start);
            let end_within = band.contains_point(self.end);
            let start_inside = interior.contains_point(self.start);
            let end_inside = interior.contains_point(self.end);
            if start_within && end_within && (start_inside || end_inside) {
                return Contact::Contained;
            }
            return Contact::Crossing;
        }

        if bounds
            .corners()
            .iter()
            .any(|corner| self.distance_to_point(*corner) <= tolerance.corner)
        {
            return Contact::Corner;
        }

        if !self.intersects(&band) {
            return Contact::Clear;
        }

        if band.contains_point(self.start) || band.contains_point(self.end) {
            Contact::Terminal
        } else {
            Contact::Edge
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn square() -> Bounds {
        Bounds::new_from_top_left(Point::new(50.0, 50.0), Size::new(50.0, 50.0))
    }

    fn segment(x1: f32, y1: f32, x2: f32, y2: f32) -> Segment {
        Segment::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[test]
    fn test_point_arithmetic() {
        let p1 = Point::new(3.0, 4.0);
        let p2 = Point::new(1.0, 2.0);

        assert_eq!(p1.add_point(p2), Point::new(4.0, 6.0));
        assert_eq!(p1.sub_point(p2), Point::new(2.0, 2.0));
        assert_eq!(p1.scale(2.0), Point::new(6.0, 8.0));
        assert_approx_eq!(f32, p1.hypot(), 5.0);
        assert_approx_eq!(f32, p1.dot(p2), 11.0);
        assert_approx_eq!(f32, p1.cross(p2), 2.0);
    }

    #[test]
    fn test_bounds_from_corners_normalizes() {
        let bounds = Bounds::from_corners(Point::new(10.0, 20.0), Point::new(0.0, 5.0));
        assert_eq!(bounds.min_x(), 0.0);
        assert_eq!(bounds.min_y(), 5.0);
        assert_eq!(bounds.max_x(), 10.0);
        assert_eq!(bounds.max_y(), 20.0);
    }

    #[test]
    fn test_bounds_negative_size() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 10.0), Size::new(-5.0, -5.0));
        assert_eq!(bounds.min_point(), Point::new(5.0, 5.0));
        assert_eq!(bounds.to_size(), Size::new(5.0, 5.0));
    }

    #[test]
    fn test_bounds_enclosing_empty() {
        assert!(Bounds::enclosing(std::iter::empty()).is_none());
    }

    #[test]
    fn test_bounds_inflate_and_empty() {
        let bounds = square();
        let grown = bounds.inflate(1.0);
        assert_eq!(grown.min_x(), 49.0);
        assert_eq!(grown.max_y(), 101.0);

        let collapsed = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(1.0, 10.0))
            .inflate(-1.0);
        assert!(collapsed.is_empty());
        assert!(!bounds.is_empty());
    }

    #[test]
    fn test_bounds_overlap_tolerance() {
        let a = square();
        let barely = Bounds::new_from_top_left(Point::new(99.7, 50.0), Size::new(20.0, 20.0));
        let clearly = Bounds::new_from_top_left(Point::new(90.0, 60.0), Size::new(20.0, 20.0));

        assert!(!a.overlaps(&barely, 0.5));
        assert!(a.overlaps(&barely, 0.0));
        assert!(a.overlaps(&clearly, 0.5));
        assert!(clearly.overlaps(&a, 0.5));
    }

    #[test]
    fn test_bounds_contains() {
        let outer = square();
        let inner = Bounds::new_from_top_left(Point::new(60.0, 60.0), Size::new(10.0, 10.0));
        let sticking_out = Bounds::new_from_top_left(Point::new(60.0, 60.0), Size::new(40.3, 10.0));

        assert!(outer.contains(&inner, 0.0));
        assert!(!inner.contains(&outer, 0.0));
        assert!(!outer.contains(&sticking_out, 0.0));
        assert!(outer.contains(&sticking_out, 0.5));
        assert!(outer.contains(&outer, 0.0));
    }

    #[test]
    fn test_corners_order() {
        let [tl, tr, bl, br] = square().corners();
        assert_eq!(tl, Point::new(50.0, 50.0));
        assert_eq!(tr, Point::new(100.0, 50.0));
        assert_eq!(bl, Point::new(50.0, 100.0));
        assert_eq!(br, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_segment_direction_and_length() {
        let s = segment(0.0, 0.0, 3.0, 4.0);
        assert_approx_eq!(f32, s.length(), 5.0);
        let direction = s.direction().unwrap();
        assert_approx_eq!(f32, direction.x(), 0.6);
        assert_approx_eq!(f32, direction.y(), 0.8);

        let point = segment(1.0, 1.0, 1.0, 1.0);
        assert!(point.is_degenerate());
        assert!(point.direction().is_none());
    }

    #[test]
    fn test_clip_misses() {
        assert!(segment(0.0, 10.0, 200.0, 10.0).clip(&square()).is_none());
        // Diagonal whose bounding box overlaps the square but which passes outside
        assert!(segment(90.0, 30.0, 130.0, 70.0).clip(&square()).is_none());
    }

    #[test]
    fn test_clip_touching_edge_is_inside() {
        let (t0, t1) = segment(0.0, 75.0, 50.0, 75.0).clip(&square()).unwrap();
        assert_approx_eq!(f32, t0, 1.0);
        assert_approx_eq!(f32, t1, 1.0);
    }

    #[test]
    fn test_clip_parallel_outside() {
        assert!(segment(40.0, 0.0, 40.0, 200.0).clip(&square()).is_none());
        assert!(segment(60.0, 0.0, 60.0, 200.0).clip(&square()).is_some());
    }

    #[test]
    fn test_clip_empty_bounds() {
        let empty = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(1.0, 1.0)).inflate(-1.0);
        assert!(segment(-10.0, 0.5, 10.0, 0.5).clip(&empty).is_none());
    }

    #[test]
    fn test_distance_to_point() {
        let s = segment(0.0, 0.0, 10.0, 0.0);
        assert_approx_eq!(f32, s.distance_to_point(Point::new(5.0, 3.0)), 3.0);
        assert_approx_eq!(f32, s.distance_to_point(Point::new(13.0, 4.0)), 5.0);
        assert_approx_eq!(f32, s.distance_to_point(Point::new(-3.0, -4.0)), 5.0);
    }

    #[test]
    fn test_parallel_and_distance() {
        let a = segment(10.0, 50.0, 100.0, 50.0);
        let b = segment(10.0, 51.0, 100.0, 51.0);
        let c = segment(10.0, 51.0, 100.0, 60.0);

        assert!(a.is_parallel_to(b));
        assert!(!a.is_parallel_to(c));
        assert_approx_eq!(f32, a.perpendicular_distance_to(b), 1.0);
    }

    #[test]
    fn test_overlaps_along() {
        let a = segment(10.0, 50.0, 50.0, 50.0);
        let b = segment(60.0, 51.0, 100.0, 51.0);
        let c = segment(40.0, 51.0, 100.0, 51.0);

        assert!(!a.overlaps_along(b));
        assert!(a.overlaps_along(c));
        // Reversed direction does not matter
        assert!(a.overlaps_along(segment(100.0, 51.0, 40.0, 51.0)));
    }

    #[test]
    fn test_contact_crossing() {
        let tolerance = ContactTolerance::default();
        assert_eq!(
            segment(0.0, 75.0, 200.0, 75.0).contact_with(&square(), tolerance),
            Contact::Crossing
        );
        assert_eq!(
            segment(0.0, 60.0, 120.0, 90.0).contact_with(&square(), tolerance),
            Contact::Crossing
        );
        assert_eq!(
            segment(25.0, 25.0, 125.0, 125.0).contact_with(&square(), tolerance),
            Contact::Crossing
        );
    }

    #[test]
    fn test_contact_edge_to_edge_is_crossing() {
        let tolerance = ContactTolerance::default();
        assert_eq!(
            segment(50.0, 75.0, 100.0, 75.0).contact_with(&square(), tolerance),
            Contact::Crossing
        );
    }

    #[test]
    fn test_contact_contained() {
        let tolerance = ContactTolerance::default();
        assert_eq!(
            segment(60.0, 75.0, 90.0, 75.0).contact_with(&square(), tolerance),
            Contact::Contained
        );
        // From the interior out to the edge
        assert_eq!(
            segment(75.0, 75.0, 100.0, 75.0).contact_with(&square(), tolerance),
            Contact::Contained
        );
    }

    #[test]
    fn test_contact_terminal() {
        let tolerance = ContactTolerance::default();
        assert_eq!(
            segment(0.0, 75.0, 50.0, 75.0).contact_with(&square(), tolerance),
            Contact::Terminal
        );
        assert_eq!(
            segment(75.0, 0.0, 75.0, 50.0).contact_with(&square(), tolerance),
            Contact::Terminal
        );
    }

    #[test]
    fn test_contact_corner() {
        let tolerance = ContactTolerance::default();
        assert_eq!(
            segment(0.0, 100.0, 100.0, 0.0).contact_with(&square(), tolerance),
            Contact::Corner
        );
        assert_eq!(
            segment(150.0, 50.0, 100.0, 0.0).contact_with(&square(), tolerance),
            Contact::Clear
        );
        // Ending exactly on a corner is corner contact, whatever the direction
        assert_eq!(
            segment(0.0, 0.0, 50.0, 50.0).contact_with(&square(), tolerance),
            Contact::Corner
        );
    }

    #[test]
    fn test_contact_edge_graze() {
        let tolerance = ContactTolerance::default();
        assert_eq!(
            segment(0.0, 50.0, 200.0, 50.0).contact_with(&square(), tolerance),
            Contact::Corner
        );
        // Ends inside the boundary band above the top edge
        assert_eq!(
            segment(60.0, 49.5, 90.0, 49.5).contact_with(&square(), tolerance),
            Contact::Terminal
        );

        let tight_corners = ContactTolerance::new(1.0, 0.5);
        assert_eq!(
            segment(0.0, 49.2, 200.0, 49.2).contact_with(&square(), tight_corners),
            Contact::Edge
        );
    }

    #[test]
    fn test_contact_clear() {
        let tolerance = ContactTolerance::default();
        assert_eq!(
            segment(0.0, 10.0, 200.0, 10.0).contact_with(&square(), tolerance),
            Contact::Clear
        );
    }
}
