use std::fmt;

use ordered_float::OrderedFloat;

use crate::idx::IdxDisplay;

/// A two-dimensional point with `f64` coordinates.
///
/// The derived ordering is lexicographic on (x, y), which is the order used
/// to pick the left and right endpoint of a segment.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Point2d {
    x: f64,
    y: f64,
}

impl Point2d {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 { self.x }
    pub fn y(&self) -> f64 { self.y }

    /// Hashable key for the deduplication map.
    pub(crate) fn key(&self) -> (OrderedFloat<f64>, OrderedFloat<f64>) {
        (OrderedFloat(self.x), OrderedFloat(self.y))
    }
}

impl fmt::Display for Point2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point2d {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl IdxDisplay for Point2d {
    fn fmt(f: &mut fmt::Formatter<'_>, idx: usize) -> fmt::Result {
        write!(f, "p{}", idx)
    }
}

/// Axis-aligned bounding rectangle. The map seeds it with the two corner
/// points and grows it to cover every stored point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox2d {
    min: Point2d,
    max: Point2d,
}

impl BoundingBox2d {
    pub fn new(min: Point2d, max: Point2d) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> Point2d { self.min }
    pub fn max(&self) -> Point2d { self.max }

    pub(crate) fn expand(&mut self, p: Point2d) {
        self.min = Point2d::new(self.min.x.min(p.x), self.min.y.min(p.y));
        self.max = Point2d::new(self.max.x.max(p.x), self.max.y.max(p.y));
    }
}

impl fmt::Display for BoundingBox2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} - {}]", self.min, self.max)
    }
}
