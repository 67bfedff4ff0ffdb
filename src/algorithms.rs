use rand::prelude::SliceRandom;
use smallvec::{smallvec, SmallVec};

use crate::{
    dag::SearchDag,
    errors::InternalError,
    idx::Idx,
    map::TrapezoidalMap,
    math::is_point_at_left,
    point::Point2d,
    segment::{IndexedSegment, Segment2d},
    trapezoid::Trapezoid,
};

/// The trapezoid containing the query point. Points on a stored segment or
/// on a wall resolve to the trapezoid below/right of it; callers honoring
/// general position never ask about those.
pub fn query(map: &TrapezoidalMap, dag: &SearchDag, p: Point2d) -> Idx<Trapezoid> {
    dag.locate(map, p).1
}

/// The trapezoid containing a stored segment's left endpoint, entered from
/// the segment's own side. Unlike [query] this stays well defined when
/// several stored segments share that endpoint.
pub fn find(map: &TrapezoidalMap, dag: &SearchDag, s: &Segment2d) -> Option<Idx<Trapezoid>> {
    let si = map.find_segment(s)?;
    Some(dag.locate_segment(map, si).1)
}

/// The ordered run of trapezoids a stored segment passes through, walking
/// right from the one containing its left endpoint. Stepping onto an absent
/// neighbor means the structures disagree with the input, which well-formed
/// input cannot produce.
pub fn follow_segment(map: &TrapezoidalMap, dag: &SearchDag, si: Idx<IndexedSegment>) -> Result<SmallVec<[Idx<Trapezoid>; 8]>, InternalError> {
    let s = map.segment(si);
    let right = map.point(map.indexed_segment(si).right());

    let (_, mut ti) = dag.locate_segment(map, si);
    let mut run = smallvec![ti];
    while right.x() > map.point(map.trapezoid(ti).right_pt()).x() {
        let t = map.trapezoid(ti);
        let w = map.point(t.right_pt());
        // The segment leaves through the wall part on the other side of the
        // wall's defining point.
        let next = if is_point_at_left(&s, w) { t.lr() } else { t.ur() };
        ti = next.ok_or_else(|| InternalError::new(format!("follow-segment stepped off the map at {} for {}", ti, si)))?;
        run.push(ti);
    }
    Ok(run)
}

/// Inserts a segment, updating the map and the search structure together.
///
/// Returns the stored segment's index, or `Ok(None)` when the input was
/// filtered at the boundary (degenerate, duplicate, or breaking general
/// position); neither structure is touched in that case. The search
/// structure is rewritten first: it allocates the leaf indices the map
/// needs for the new trapezoids' back-pointers.
pub fn insert(map: &mut TrapezoidalMap, dag: &mut SearchDag, s: &Segment2d) -> Result<Option<Idx<IndexedSegment>>, InternalError> {
    let si = match map.add_segment(s) {
        Some(si) => si,
        None => return Ok(None),
    };

    let run = follow_segment(map, dag, si)?;
    let indexed = map.indexed_segment(si);
    let (lp, rp) = (indexed.left(), indexed.right());

    if run.len() == 1 {
        let plan = map.plan_single(run[0], lp, rp, si);
        let leaves = dag.split_single(&plan);
        map.apply_single(&plan, &leaves);
    } else {
        let plan = map.plan_multi(&run, lp, rp, si);
        let leaves = dag.split_multi(&plan);
        map.apply_multi(&plan, &leaves);
    }

    check_consistency(map, dag);

    Ok(Some(si))
}

/// Inserts a batch in random order. Shuffling is what makes the expected
/// O(log n) query depth hold regardless of how the caller produced the
/// batch. Returns how many segments were actually stored.
pub fn insert_all(map: &mut TrapezoidalMap, dag: &mut SearchDag, segments: &[Segment2d]) -> Result<usize, InternalError> {
    let mut order: Vec<usize> = (0..segments.len()).collect();
    order.shuffle(&mut rand::thread_rng());

    let mut inserted = 0;
    for i in order {
        if insert(map, dag, &segments[i])?.is_some() {
            inserted += 1;
        }
    }
    Ok(inserted)
}

#[cfg(debug_assertions)]
pub(crate) fn check_consistency(map: &TrapezoidalMap, dag: &SearchDag) {
    use crate::idx::SliceExt;
    use crate::node::Node;

    for ti in map.trapezoids().iter_index() {
        let t = map.trapezoid(ti);

        match dag.node(t.leaf()) {
            Node::Leaf(other) if *other == ti => {}
            n => panic!("inconsistent trapezoid-leaf connection: {}->{} ({})", ti, t.leaf(), n),
        }

        if map.point(t.left_pt()).x() > map.point(t.right_pt()).x() {
            panic!("inverted walls: {}", ti);
        }

        for (neighbor, name) in [(t.ul(), "ul"), (t.ur(), "ur"), (t.ll(), "ll"), (t.lr(), "lr")] {
            if let Some(u) = neighbor {
                let back = match name {
                    "ul" => map.trapezoid(u).ur(),
                    "ur" => map.trapezoid(u).ul(),
                    "ll" => map.trapezoid(u).lr(),
                    _ => map.trapezoid(u).ll(),
                };
                if back != Some(ti) {
                    panic!("asymmetric {} neighbor: {}->{}", name, ti, u);
                }
            }
        }
    }

    // Every leaf reachable from the root must agree with its trapezoid's
    // back-pointer (several leaves may stand for one trapezoid after merges).
    let mut stack = vec![dag.root()];
    while let Some(qi) = stack.pop() {
        match dag.node(qi) {
            Node::Branch(left, right, _) => {
                stack.push(*left);
                stack.push(*right);
            }
            Node::Leaf(ti) => match dag.node(map.trapezoid(*ti).leaf()) {
                Node::Leaf(other) if other == ti => {}
                n => panic!("leaf {} references {} whose back-pointer resolves to {}", qi, ti, n),
            },
        }
    }
}

#[cfg(not(debug_assertions))]
pub(crate) fn check_consistency(_map: &TrapezoidalMap, _dag: &SearchDag) { }
