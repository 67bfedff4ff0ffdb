use std::fmt;

use crate::{idx::{Idx, IdxDisplay}, point::Point2d};

/// A line segment given by its two endpoints, in no particular order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2d {
    p1: Point2d,
    p2: Point2d,
}

impl Segment2d {
    pub fn new(p1: Point2d, p2: Point2d) -> Self {
        Self { p1, p2 }
    }

    pub fn p1(&self) -> Point2d { self.p1 }
    pub fn p2(&self) -> Point2d { self.p2 }

    /// The same segment with its endpoints in lexicographic (x, y) order.
    pub(crate) fn ordered(&self) -> Segment2d {
        if self.p2 < self.p1 {
            Segment2d::new(self.p2, self.p1)
        } else {
            *self
        }
    }
}

impl fmt::Display for Segment2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.p1, self.p2)
    }
}

/// A stored segment: an ordered pair of point indices, with `left`
/// lexicographically before `right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexedSegment {
    left: Idx<Point2d>,
    right: Idx<Point2d>,
}

impl IndexedSegment {
    pub fn new(left: Idx<Point2d>, right: Idx<Point2d>) -> Self {
        Self { left, right }
    }

    pub fn left(&self) -> Idx<Point2d> { self.left }
    pub fn right(&self) -> Idx<Point2d> { self.right }
}

impl fmt::Display for IndexedSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.left, self.right)
    }
}

impl IdxDisplay for IndexedSegment {
    fn fmt(f: &mut fmt::Formatter<'_>, idx: usize) -> fmt::Result {
        write!(f, "s{}", idx)
    }
}
