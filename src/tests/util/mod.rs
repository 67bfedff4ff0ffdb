//! Shared builders for tests and benchmarks.

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{
    dag::SearchDag,
    map::TrapezoidalMap,
    node::Node,
    point::Point2d,
    segment::{IndexedSegment, Segment2d},
    trapezoid::Trapezoid,
};

/// A fresh map and search structure over the (0,0)-(10,10) rectangle.
pub fn standard_map() -> (TrapezoidalMap, SearchDag) {
    (
        TrapezoidalMap::new(Point2d::new(0.0, 0.0), Point2d::new(10.0, 10.0)),
        SearchDag::new(),
    )
}

pub fn seg(p1: (f64, f64), p2: (f64, f64)) -> Segment2d {
    Segment2d::new(p1.into(), p2.into())
}

/// `n` non-crossing segments in general position inside the standard
/// rectangle: every segment lives in its own horizontal band and every
/// endpoint takes a distinct x slot, so the batch is valid regardless of
/// insertion order.
pub fn banded_segments(n: usize, seed: u64) -> Vec<Segment2d> {
    let mut rng = StdRng::seed_from_u64(seed);

    let slot = 10.0 / (2 * n + 2) as f64;
    let mut xs: Vec<f64> = (1..=2 * n)
        .map(|i| i as f64 * slot + rng.gen_range(0.0..slot * 0.4))
        .collect();
    xs.shuffle(&mut rng);

    let band = 10.0 / n as f64;
    let mut segments = Vec::with_capacity(n);
    for i in 0..n {
        let y_low = i as f64 * band + band * 0.2;
        let y_high = i as f64 * band + band * 0.8;
        segments.push(Segment2d::new(
            Point2d::new(xs[2 * i], rng.gen_range(y_low..y_high)),
            Point2d::new(xs[2 * i + 1], rng.gen_range(y_low..y_high)),
        ));
    }
    segments
}

/// Query points strictly inside the standard rectangle, away from its
/// boundary.
pub fn query_points(n: usize, seed: u64) -> Vec<Point2d> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Point2d::new(rng.gen_range(0.01..9.99), rng.gen_range(0.01..9.99)))
        .collect()
}

/// Everything an insertion may touch, for exact before/after comparisons.
pub fn snapshot(map: &TrapezoidalMap, dag: &SearchDag) -> (Vec<Point2d>, Vec<IndexedSegment>, Vec<Trapezoid>, Vec<Node>) {
    (
        map.points().to_vec(),
        map.segments().to_vec(),
        map.trapezoids().to_vec(),
        dag.nodes().to_vec(),
    )
}
