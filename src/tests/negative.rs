use crate::insert;

use super::util;

#[test]
fn degenerate_segment_is_rejected() {
    let (mut map, mut dag) = util::standard_map();
    let before = util::snapshot(&map, &dag);
    let result = insert(&mut map, &mut dag, &util::seg((3.0, 3.0), (3.0, 3.0))).expect("insertion failed");
    assert_eq!(result, None);
    assert_eq!(util::snapshot(&map, &dag), before);
}

#[test]
fn duplicate_segment_is_rejected_in_either_orientation() {
    let (mut map, mut dag) = util::standard_map();
    insert(&mut map, &mut dag, &util::seg((2.0, 5.0), (8.0, 5.0)))
        .expect("insertion failed")
        .expect("segment rejected");

    let before = util::snapshot(&map, &dag);
    assert_eq!(insert(&mut map, &mut dag, &util::seg((2.0, 5.0), (8.0, 5.0))).expect("insertion failed"), None);
    assert_eq!(insert(&mut map, &mut dag, &util::seg((8.0, 5.0), (2.0, 5.0))).expect("insertion failed"), None);
    assert_eq!(util::snapshot(&map, &dag), before);
}

#[test]
fn vertical_segment_is_rejected_without_leaking_points() {
    let (mut map, mut dag) = util::standard_map();
    let points_before = map.points().len();
    let result = insert(&mut map, &mut dag, &util::seg((4.0, 1.0), (4.0, 9.0))).expect("insertion failed");
    assert_eq!(result, None);
    assert_eq!(map.points().len(), points_before);
    assert!(map.segments().is_empty());
}

#[test]
fn endpoint_colliding_with_stored_x_is_rejected() {
    let (mut map, mut dag) = util::standard_map();
    insert(&mut map, &mut dag, &util::seg((2.0, 5.0), (8.0, 5.0)))
        .expect("insertion failed")
        .expect("segment rejected");

    let before = util::snapshot(&map, &dag);
    // (2.0, 9.0) is a new point at the taken x = 2.
    assert_eq!(insert(&mut map, &mut dag, &util::seg((2.0, 9.0), (6.0, 9.0))).expect("insertion failed"), None);
    assert_eq!(util::snapshot(&map, &dag), before);
}

#[test]
fn clear_restores_the_bootstrap_state() {
    let (mut map, mut dag) = util::standard_map();
    insert(&mut map, &mut dag, &util::seg((2.0, 5.0), (8.0, 5.0)))
        .expect("insertion failed")
        .expect("segment rejected");
    insert(&mut map, &mut dag, &util::seg((1.0, 7.0), (9.0, 7.0)))
        .expect("insertion failed")
        .expect("segment rejected");

    map.clear();
    dag.clear();

    let (fresh_map, fresh_dag) = util::standard_map();
    assert_eq!(util::snapshot(&map, &dag), util::snapshot(&fresh_map, &fresh_dag));
    assert_eq!(map.bounding_box(), fresh_map.bounding_box());
}
