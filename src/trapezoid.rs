use std::fmt;

use crate::{idx::{Idx, IdxDisplay}, node::Node, point::Point2d, segment::IndexedSegment};

/// One cell of the vertical decomposition: bounded above and below by stored
/// segments (`None` means the bounding box edge), and on the left and right
/// by the vertical walls through its two defining points.
///
/// `leaf` is the back-edge into the search structure. The four neighbor
/// fields follow the wall-sharing convention: `ul`/`ur` are the neighbors
/// across the part of the left/right wall above that wall's defining point,
/// `ll`/`lr` across the part below it. A wall part of zero height has no
/// neighbor.
#[derive(Debug, Clone, PartialEq)]
pub struct Trapezoid {
    top: Option<Idx<IndexedSegment>>,
    bottom: Option<Idx<IndexedSegment>>,
    left_pt: Idx<Point2d>,
    right_pt: Idx<Point2d>,
    leaf: Idx<Node>,
    ul: Option<Idx<Trapezoid>>,
    ur: Option<Idx<Trapezoid>>,
    ll: Option<Idx<Trapezoid>>,
    lr: Option<Idx<Trapezoid>>,
}

impl Trapezoid {
    pub(crate) fn new(top: Option<Idx<IndexedSegment>>, bottom: Option<Idx<IndexedSegment>>, left_pt: Idx<Point2d>, right_pt: Idx<Point2d>, leaf: Idx<Node>) -> Self {
        Self {
            top,
            bottom,
            left_pt,
            right_pt,
            leaf,
            ul: None,
            ur: None,
            ll: None,
            lr: None,
        }
    }

    pub fn top(&self) -> Option<Idx<IndexedSegment>> { self.top }
    pub fn bottom(&self) -> Option<Idx<IndexedSegment>> { self.bottom }
    pub fn left_pt(&self) -> Idx<Point2d> { self.left_pt }
    pub fn right_pt(&self) -> Idx<Point2d> { self.right_pt }

    pub fn leaf(&self) -> Idx<Node> { self.leaf }

    pub fn ul(&self) -> Option<Idx<Trapezoid>> { self.ul }
    pub fn ur(&self) -> Option<Idx<Trapezoid>> { self.ur }
    pub fn ll(&self) -> Option<Idx<Trapezoid>> { self.ll }
    pub fn lr(&self) -> Option<Idx<Trapezoid>> { self.lr }

    pub(crate) fn set_ul(&mut self, ti: Option<Idx<Trapezoid>>) { self.ul = ti; }
    pub(crate) fn set_ur(&mut self, ti: Option<Idx<Trapezoid>>) { self.ur = ti; }
    pub(crate) fn set_ll(&mut self, ti: Option<Idx<Trapezoid>>) { self.ll = ti; }
    pub(crate) fn set_lr(&mut self, ti: Option<Idx<Trapezoid>>) { self.lr = ti; }
}

impl fmt::Display for Trapezoid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(top) = self.top {
            writeln!(f, "-{}-", top)?;
        }
        write!(f, "[{}]", self.left_pt)?;
        fmt::Display::fmt(&self.leaf, f)?;
        writeln!(f, "[{}]", self.right_pt)?;
        if let Some(bottom) = self.bottom {
            writeln!(f, "-{}-", bottom)?;
        }
        Ok(())
    }
}

impl IdxDisplay for Trapezoid {
    fn fmt(f: &mut fmt::Formatter<'_>, idx: usize) -> fmt::Result {
        write!(f, "t{}", idx)
    }
}
