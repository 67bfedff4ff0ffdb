use crate::{algorithms::check_consistency, find, follow_segment, insert, query, Idx, Trapezoid};

use super::util;

#[test]
fn single_interior_segment() {
    let (mut map, mut dag) = util::standard_map();
    let si = insert(&mut map, &mut dag, &util::seg((2.0, 5.0), (8.0, 5.0)))
        .expect("insertion failed")
        .expect("segment rejected");

    assert_eq!(map.trapezoids().len(), 4);

    let left = query(&map, &dag, (1.0, 5.0).into());
    let right = query(&map, &dag, (9.0, 5.0).into());
    let upper = query(&map, &dag, (5.0, 7.0).into());
    let lower = query(&map, &dag, (5.0, 3.0).into());

    let mut all = vec![left, right, upper, lower];
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 4);

    assert_eq!(map.trapezoid(upper).bottom(), Some(si));
    assert_eq!(map.trapezoid(lower).top(), Some(si));
    assert_eq!(map.trapezoid(left).top(), None);
    assert_eq!(map.trapezoid(left).bottom(), None);
    assert_eq!(map.trapezoid(right).top(), None);
    assert_eq!(map.trapezoid(right).bottom(), None);
}

#[test]
fn second_segment_sharing_left_endpoint() {
    let (mut map, mut dag) = util::standard_map();
    let s1 = util::seg((2.0, 5.0), (8.0, 5.0));
    let s2 = util::seg((2.0, 5.0), (6.0, 8.0));
    let i1 = insert(&mut map, &mut dag, &s1).expect("insertion failed").expect("segment rejected");
    let i2 = insert(&mut map, &mut dag, &s2).expect("insertion failed").expect("segment rejected");

    let above = query(&map, &dag, (4.0, 7.0).into());
    assert_eq!(map.trapezoid(above).bottom(), Some(i2));

    let between = query(&map, &dag, (4.0, 6.0).into());
    assert_eq!(map.trapezoid(between).top(), Some(i2));
    assert_eq!(map.trapezoid(between).bottom(), Some(i1));

    // The slope tie-break enters each segment's strip from its own side:
    // descending for a stored segment lands just below it.
    let f1 = find(&map, &dag, &s1).expect("segment not stored");
    let f2 = find(&map, &dag, &s2).expect("segment not stored");
    assert_eq!(map.trapezoid(f1).top(), Some(i1));
    assert_eq!(map.trapezoid(f2).top(), Some(i2));
}

#[test]
fn chain_across_many_trapezoids() {
    let (mut map, mut dag) = util::standard_map();
    let a = util::seg((2.0, 8.0), (5.0, 8.0));
    let b = util::seg((6.0, 8.0), (9.0, 8.0));
    let ai = insert(&mut map, &mut dag, &a).expect("insertion failed").expect("segment rejected");
    insert(&mut map, &mut dag, &b).expect("insertion failed").expect("segment rejected");

    // A long low segment passing under both: its walk crosses the walls
    // hanging from all four endpoints above.
    let c = util::seg((1.0, 5.0), (9.5, 5.0));
    let ci = map.add_segment(&c).expect("segment rejected");
    let run = follow_segment(&map, &dag, ci).expect("walk failed");
    assert!(run.len() >= 3, "expected a multi-trapezoid run, got {}", run.len());

    // Finish the insertion the way `insert` does.
    let indexed = map.indexed_segment(ci);
    let plan = map.plan_multi(&run, indexed.left(), indexed.right(), ci);
    let leaves = dag.split_multi(&plan);
    map.apply_multi(&plan, &leaves);
    check_consistency(&map, &dag);

    let between = query(&map, &dag, (3.0, 6.0).into());
    assert_eq!(map.trapezoid(between).bottom(), Some(ci));
    assert_eq!(map.trapezoid(between).top(), Some(ai));
    let below = query(&map, &dag, (5.5, 2.0).into());
    assert_eq!(map.trapezoid(below).top(), Some(ci));
    assert_eq!(map.trapezoid(below).bottom(), None);
}

#[test]
fn duplicate_x_coordinate_is_rejected() {
    let (mut map, mut dag) = util::standard_map();
    insert(&mut map, &mut dag, &util::seg((2.0, 5.0), (8.0, 5.0)))
        .expect("insertion failed")
        .expect("segment rejected");

    // Both endpoints would add new points at already-taken x coordinates.
    let before = util::snapshot(&map, &dag);
    let rejected = insert(&mut map, &mut dag, &util::seg((2.0, 1.0), (8.0, 1.0))).expect("insertion failed");
    assert_eq!(rejected, None);
    assert_eq!(util::snapshot(&map, &dag), before);

    // Reusing the stored endpoints themselves is fine.
    let ok = insert(&mut map, &mut dag, &util::seg((2.0, 5.0), (6.0, 8.0))).expect("insertion failed");
    assert!(ok.is_some());
}

#[test]
fn reinserting_existing_segment_changes_nothing() {
    let (mut map, mut dag) = util::standard_map();
    let s = util::seg((2.0, 5.0), (8.0, 5.0));
    insert(&mut map, &mut dag, &s).expect("insertion failed").expect("segment rejected");

    let before = util::snapshot(&map, &dag);
    assert_eq!(insert(&mut map, &mut dag, &s).expect("insertion failed"), None);
    assert_eq!(util::snapshot(&map, &dag), before);
}

#[test]
fn boundary_query_near_origin() {
    let (map, dag) = util::standard_map();
    assert_eq!(query(&map, &dag, (0.0001, 0.0001).into()), Idx::<Trapezoid>::new(0));

    let (mut map, mut dag) = util::standard_map();
    insert(&mut map, &mut dag, &util::seg((2.0, 5.0), (8.0, 5.0)))
        .expect("insertion failed")
        .expect("segment rejected");
    let t = map.trapezoid(query(&map, &dag, (0.0001, 0.0001).into()));
    // still the cell hanging off the bounding box's bottom-left corner
    assert_eq!(t.left_pt(), Idx::new(0));
    assert_eq!(t.top(), None);
    assert_eq!(t.bottom(), None);
}
