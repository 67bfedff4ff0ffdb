use num_traits::Zero;

use crate::{point::Point2d, segment::Segment2d};

/// Strict orientation test: is `p` to the left of the directed line through
/// `s.p1() -> s.p2()`? For a segment stored left-to-right this means
/// strictly above. Points on the line report `false`.
pub fn is_point_at_left(s: &Segment2d, p: Point2d) -> bool {
    let (a, b) = (s.p1(), s.p2());
    (b.x() - a.x()) * (p.y() - a.y()) - (b.y() - a.y()) * (p.x() - a.x()) > f64::zero()
}

/// Slope of the segment. Under general position no stored segment is
/// vertical, so the division is well defined.
pub fn slope(s: &Segment2d) -> f64 {
    (s.p1().y() - s.p2().y()) / (s.p1().x() - s.p2().x())
}

/// The point where the segment's supporting line crosses the vertical line
/// at `x`.
pub fn vertical_line_intersection(s: &Segment2d, x: f64) -> Point2d {
    let (a, b) = (s.p1(), s.p2());
    let t = (x - a.x()) / (b.x() - a.x());
    Point2d::new(x, a.y() + t * (b.y() - a.y()))
}
