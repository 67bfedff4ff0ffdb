use crate::{is_point_at_left, slope, vertical_line_intersection, Point2d, Segment2d};

#[test]
fn orientation_is_strict() {
    let s = Segment2d::new(Point2d::new(0.0, 0.0), Point2d::new(4.0, 4.0));
    assert!(is_point_at_left(&s, Point2d::new(0.0, 1.0)));
    assert!(!is_point_at_left(&s, Point2d::new(1.0, 0.0)));
    // collinear points are not strictly at left
    assert!(!is_point_at_left(&s, Point2d::new(2.0, 2.0)));
}

#[test]
fn slope_ignores_endpoint_order() {
    let up = Segment2d::new(Point2d::new(0.0, 0.0), Point2d::new(2.0, 4.0));
    let down = Segment2d::new(Point2d::new(0.0, 4.0), Point2d::new(2.0, 0.0));
    assert_eq!(slope(&up), 2.0);
    assert_eq!(slope(&down), -2.0);
    assert_eq!(slope(&Segment2d::new(up.p2(), up.p1())), 2.0);
}

#[test]
fn vertical_intersection_interpolates() {
    let s = Segment2d::new(Point2d::new(1.0, 1.0), Point2d::new(5.0, 3.0));
    assert_eq!(vertical_line_intersection(&s, 3.0), Point2d::new(3.0, 2.0));
    assert_eq!(vertical_line_intersection(&s, 1.0), s.p1());
}
