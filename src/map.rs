use std::collections::{HashMap, HashSet};

use ordered_float::OrderedFloat;

use crate::{
    dag::{MultiLeaves, SingleLeaves},
    idx::{Idx, VecExt},
    math::is_point_at_left,
    node::Node,
    point::{BoundingBox2d, Point2d},
    segment::{IndexedSegment, Segment2d},
    trapezoid::Trapezoid,
};

/// Allocation plan for a single-trapezoid split: the intersected trapezoid's
/// slot is reused for the piece above the segment, and up to three new slots
/// are appended (lower, then left, then right). The search structure
/// allocates its leaves against the same plan before the map rewrites
/// anything.
pub(crate) struct SingleSplit {
    pub seg: Idx<IndexedSegment>,
    pub lp: Idx<Point2d>,
    pub rp: Idx<Point2d>,
    /// Reused in place for the piece above the segment.
    pub target: Idx<Trapezoid>,
    pub lower: Idx<Trapezoid>,
    pub left: Option<Idx<Trapezoid>>,
    pub right: Option<Idx<Trapezoid>>,
    pub old_leaf: Idx<Node>,
}

/// Allocation plan for a run of k > 1 intersected trapezoids. Each wall
/// between consecutive run entries survives on exactly one side of the new
/// segment; the merged piece ending at wall i reuses `run[i]`'s slot, the
/// last run slot goes to the final piece on the side of the last wall, and
/// the one remaining piece gets a fresh slot.
pub(crate) struct MultiSplit {
    pub seg: Idx<IndexedSegment>,
    pub lp: Idx<Point2d>,
    pub rp: Idx<Point2d>,
    pub run: Vec<Idx<Trapezoid>>,
    /// `above[i]`/`below[i]`: slot of the merged piece covering `run[i]`'s
    /// span on that side. Equal consecutive entries are one merged piece.
    pub above: Vec<Idx<Trapezoid>>,
    pub below: Vec<Idx<Trapezoid>>,
    pub left: Option<Idx<Trapezoid>>,
    pub right: Option<Idx<Trapezoid>>,
    pub old_leaves: Vec<Idx<Node>>,
}

/// The trapezoidal map: deduplicated points, stored segments, and the
/// trapezoids of the vertical decomposition of the bounding rectangle.
///
/// All three arenas are append-only between [TrapezoidalMap::clear] calls;
/// trapezoid slots are rewritten in place across splits so that search-
/// structure leaves stay valid. Queries and updates live in the
/// [crate::algorithms] module; this type owns the storage, the input
/// filters, and the split bookkeeping.
pub struct TrapezoidalMap {
    points: Vec<Point2d>,
    segments: Vec<IndexedSegment>,
    trapezoids: Vec<Trapezoid>,

    point_ids: HashMap<(OrderedFloat<f64>, OrderedFloat<f64>), Idx<Point2d>>,
    segment_ids: HashMap<IndexedSegment, Idx<IndexedSegment>>,
    /// Guards general position: one stored point per x coordinate.
    x_coords: HashSet<OrderedFloat<f64>>,

    bounding_box: BoundingBox2d,
}

impl TrapezoidalMap {
    /// Creates the map of the empty subdivision: points 0 and 1 are the
    /// bounding-box corners and trapezoid 0 is the whole rectangle, already
    /// wired to the bootstrap leaf at search-structure index 0.
    pub fn new(min: Point2d, max: Point2d) -> Self {
        let mut map = Self {
            points: Vec::new(),
            segments: Vec::new(),
            trapezoids: Vec::new(),
            point_ids: HashMap::new(),
            segment_ids: HashMap::new(),
            x_coords: HashSet::new(),
            bounding_box: BoundingBox2d::new(min, max),
        };
        map.initialize(min, max);
        map
    }

    fn initialize(&mut self, min: Point2d, max: Point2d) {
        self.bounding_box = BoundingBox2d::new(min, max);
        let lp = self.add_point(min);
        let rp = self.add_point(max);
        debug_assert_eq!(lp, Some(Idx::new(0)));
        debug_assert_eq!(rp, Some(Idx::new(1)));
        if let (Some(lp), Some(rp)) = (lp, rp) {
            self.trapezoids.push(Trapezoid::new(None, None, lp, rp, Idx::new(0)));
        }
    }

    /// Drops every point, segment and trapezoid and re-seeds the map from
    /// its own corners. The search structure must be cleared alongside.
    pub fn clear(&mut self) {
        let min = self.points[Idx::new(0)];
        let max = self.points[Idx::new(1)];
        self.points.clear();
        self.segments.clear();
        self.trapezoids.clear();
        self.point_ids.clear();
        self.segment_ids.clear();
        self.x_coords.clear();
        self.initialize(min, max);
    }

    /// Stores `p` if it is new and keeps general position, returning its
    /// index. An already-stored point returns its existing index; a new
    /// point whose x coordinate is already taken returns `None` and leaves
    /// the map untouched.
    pub fn add_point(&mut self, p: Point2d) -> Option<Idx<Point2d>> {
        if let Some(&id) = self.point_ids.get(&p.key()) {
            return Some(id);
        }
        if self.x_coords.contains(&OrderedFloat(p.x())) {
            return None;
        }
        let id = self.points.push_get_index(p);
        self.point_ids.insert(p.key(), id);
        self.x_coords.insert(OrderedFloat(p.x()));
        self.bounding_box.expand(p);
        Some(id)
    }

    /// Stores `s` with its endpoints in lexicographic order. Degenerate
    /// segments, duplicates, and segments that would break general position
    /// (a new endpoint reusing a taken x coordinate, or a vertical segment)
    /// are rejected with `None`; nothing is stored in that case.
    pub fn add_segment(&mut self, s: &Segment2d) -> Option<Idx<IndexedSegment>> {
        let ordered = s.ordered();
        let (a, b) = (ordered.p1(), ordered.p2());
        if a == b {
            return None;
        }
        if self.find_segment(&ordered).is_some() {
            return None;
        }

        let fa = self.find_point(a);
        let fb = self.find_point(b);
        if fa.is_none() && self.x_coords.contains(&OrderedFloat(a.x())) {
            return None;
        }
        if fb.is_none() && self.x_coords.contains(&OrderedFloat(b.x())) {
            return None;
        }
        if fa.is_none() && fb.is_none() && a.x() == b.x() {
            return None;
        }

        let ia = match fa {
            Some(ia) => ia,
            None => self.add_point(a)?,
        };
        let ib = match fb {
            Some(ib) => ib,
            None => self.add_point(b)?,
        };

        let indexed = IndexedSegment::new(ia, ib);
        let id = self.segments.push_get_index(indexed);
        self.segment_ids.insert(indexed, id);
        Some(id)
    }

    pub fn find_point(&self, p: Point2d) -> Option<Idx<Point2d>> {
        self.point_ids.get(&p.key()).copied()
    }

    /// Looks up a segment by its endpoint coordinates, in either order.
    pub fn find_segment(&self, s: &Segment2d) -> Option<Idx<IndexedSegment>> {
        let ordered = s.ordered();
        let left = self.find_point(ordered.p1())?;
        let right = self.find_point(ordered.p2())?;
        self.find_indexed_segment(IndexedSegment::new(left, right))
    }

    /// Looks up a stored segment by its point indices, in either order.
    pub fn find_indexed_segment(&self, s: IndexedSegment) -> Option<Idx<IndexedSegment>> {
        let ordered = if s.right() < s.left() {
            IndexedSegment::new(s.right(), s.left())
        } else {
            s
        };
        self.segment_ids.get(&ordered).copied()
    }

    pub fn point(&self, pi: Idx<Point2d>) -> Point2d {
        self.points[pi]
    }

    pub fn indexed_segment(&self, si: Idx<IndexedSegment>) -> IndexedSegment {
        self.segments[si]
    }

    /// The stored segment as a coordinate pair, left endpoint first.
    pub fn segment(&self, si: Idx<IndexedSegment>) -> Segment2d {
        let s = self.segments[si];
        Segment2d::new(self.points[s.left()], self.points[s.right()])
    }

    pub fn trapezoid(&self, ti: Idx<Trapezoid>) -> &Trapezoid {
        &self.trapezoids[ti]
    }

    pub fn points(&self) -> &[Point2d] { &self.points }
    pub fn segments(&self) -> &[IndexedSegment] { &self.segments }
    pub fn trapezoids(&self) -> &[Trapezoid] { &self.trapezoids }
    pub fn bounding_box(&self) -> BoundingBox2d { self.bounding_box }

    fn shares_left(&self, seg: Option<Idx<IndexedSegment>>, pi: Idx<Point2d>) -> bool {
        seg.map_or(false, |si| self.segments[si].left() == pi)
    }

    fn shares_right(&self, seg: Option<Idx<IndexedSegment>>, pi: Idx<Point2d>) -> bool {
        seg.map_or(false, |si| self.segments[si].right() == pi)
    }

    pub(crate) fn plan_single(&self, target: Idx<Trapezoid>, lp: Idx<Point2d>, rp: Idx<Point2d>, seg: Idx<IndexedSegment>) -> SingleSplit {
        let t = &self.trapezoids[target];
        let mut next = self.trapezoids.next_index();
        let lower = next;
        next = next + 1;
        let left = (lp != t.left_pt()).then(|| {
            let i = next;
            next = next + 1;
            i
        });
        let right = (rp != t.right_pt()).then(|| next);
        SingleSplit {
            seg,
            lp,
            rp,
            target,
            lower,
            left,
            right,
            old_leaf: t.leaf(),
        }
    }

    pub(crate) fn plan_multi(&self, run: &[Idx<Trapezoid>], lp: Idx<Point2d>, rp: Idx<Point2d>, seg: Idx<IndexedSegment>) -> MultiSplit {
        let k = run.len();
        debug_assert!(k > 1);
        let s = self.segment(seg);

        let mut next = self.trapezoids.next_index();
        let left = (lp != self.trapezoids[run[0]].left_pt()).then(|| {
            let i = next;
            next = next + 1;
            i
        });
        let right = (rp != self.trapezoids[run[k - 1]].right_pt()).then(|| {
            let i = next;
            next = next + 1;
            i
        });
        let extra = next;

        // Which side of the segment does each wall of the run survive on?
        let wall_above: Vec<bool> = (0..k - 1)
            .map(|i| is_point_at_left(&s, self.point(self.trapezoids[run[i]].right_pt())))
            .collect();

        // The final pieces end at the segment's right endpoint; the last run
        // slot goes to the side its left wall survives on, the other final
        // piece takes the fresh slot.
        let (fin_above, fin_below) = if wall_above[k - 2] {
            (run[k - 1], extra)
        } else {
            (extra, run[k - 1])
        };
        let mut above = vec![fin_above; k];
        let mut below = vec![fin_below; k];
        for i in (0..k - 1).rev() {
            above[i] = if wall_above[i] { run[i] } else { above[i + 1] };
            below[i] = if wall_above[i] { below[i + 1] } else { run[i] };
        }

        let old_leaves = run.iter().map(|&ti| self.trapezoids[ti].leaf()).collect();

        MultiSplit {
            seg,
            lp,
            rp,
            run: run.to_vec(),
            above,
            below,
            left,
            right,
            old_leaves,
        }
    }

    /// Rewrites the map for a segment contained in a single trapezoid: the
    /// slot is split into upper and lower pieces, plus a left and/or right
    /// remainder wherever an endpoint falls strictly inside the slot's span.
    pub(crate) fn apply_single(&mut self, plan: &SingleSplit, leaves: &SingleLeaves) {
        let old = self.trapezoids[plan.target].clone();

        let mut upper = Trapezoid::new(old.top(), Some(plan.seg), plan.lp, plan.rp, leaves.upper);
        let mut lower = Trapezoid::new(Some(plan.seg), old.bottom(), plan.lp, plan.rp, leaves.lower);
        let mut left_piece = None;
        let mut right_piece = None;

        if let (Some(li), Some(ql)) = (plan.left, leaves.left) {
            let mut left = Trapezoid::new(old.top(), old.bottom(), old.left_pt(), plan.lp, ql);
            left.set_ul(old.ul());
            left.set_ll(old.ll());
            left.set_ur(Some(plan.target));
            left.set_lr(Some(plan.lower));
            upper.set_ul(Some(li));
            lower.set_ll(Some(li));
            if let Some(ti) = old.ul() {
                self.trapezoids[ti].set_ur(Some(li));
            }
            if let Some(ti) = old.ll() {
                self.trapezoids[ti].set_lr(Some(li));
            }
            left_piece = Some(left);
        } else {
            // The endpoint reuses the old left wall's defining point; each
            // piece keeps the wall part on its own side of the segment.
            if !self.shares_left(old.top(), plan.lp) {
                upper.set_ul(old.ul());
                if let Some(ti) = old.ul() {
                    self.trapezoids[ti].set_ur(Some(plan.target));
                }
            }
            if !self.shares_left(old.bottom(), plan.lp) {
                lower.set_ll(old.ll());
                if let Some(ti) = old.ll() {
                    self.trapezoids[ti].set_lr(Some(plan.lower));
                }
            }
        }

        if let (Some(ri), Some(qr)) = (plan.right, leaves.right) {
            let mut right = Trapezoid::new(old.top(), old.bottom(), plan.rp, old.right_pt(), qr);
            right.set_ur(old.ur());
            right.set_lr(old.lr());
            right.set_ul(Some(plan.target));
            right.set_ll(Some(plan.lower));
            upper.set_ur(Some(ri));
            lower.set_lr(Some(ri));
            if let Some(ti) = old.ur() {
                self.trapezoids[ti].set_ul(Some(ri));
            }
            if let Some(ti) = old.lr() {
                self.trapezoids[ti].set_ll(Some(ri));
            }
            right_piece = Some(right);
        } else {
            if !self.shares_right(old.top(), plan.rp) {
                upper.set_ur(old.ur());
                if let Some(ti) = old.ur() {
                    self.trapezoids[ti].set_ul(Some(plan.target));
                }
            }
            if !self.shares_right(old.bottom(), plan.rp) {
                lower.set_lr(old.lr());
                if let Some(ti) = old.lr() {
                    self.trapezoids[ti].set_ll(Some(plan.lower));
                }
            }
        }

        self.trapezoids[plan.target] = upper;
        debug_assert_eq!(plan.lower, self.trapezoids.next_index());
        self.trapezoids.push(lower);
        if let Some(left) = left_piece {
            self.trapezoids.push(left);
        }
        if let Some(right) = right_piece {
            self.trapezoids.push(right);
        }
    }

    /// Rewrites the map for a segment crossing a run of trapezoids: end
    /// splits first, then a left-to-right walk that grows one merged piece
    /// above the segment and one below, emitting a piece whenever its side's
    /// wall survives.
    pub(crate) fn apply_multi(&mut self, plan: &MultiSplit, leaves: &MultiLeaves) {
        struct Running {
            left_pt: Idx<Point2d>,
            ul: Option<Idx<Trapezoid>>,
            ll: Option<Idx<Trapezoid>>,
        }

        let k = plan.run.len();
        let olds: Vec<Trapezoid> = plan.run.iter().map(|&ti| self.trapezoids[ti].clone()).collect();
        let first = &olds[0];
        let last = &olds[k - 1];

        let mut staged: Vec<(Idx<Trapezoid>, Trapezoid)> = Vec::with_capacity(k + 3);

        let mut above;
        let mut below;
        if let (Some(li), Some(ql)) = (plan.left, leaves.left) {
            let mut left = Trapezoid::new(first.top(), first.bottom(), first.left_pt(), plan.lp, ql);
            left.set_ul(first.ul());
            left.set_ll(first.ll());
            left.set_ur(Some(plan.above[0]));
            left.set_lr(Some(plan.below[0]));
            if let Some(ti) = first.ul() {
                self.trapezoids[ti].set_ur(Some(li));
            }
            if let Some(ti) = first.ll() {
                self.trapezoids[ti].set_lr(Some(li));
            }
            staged.push((li, left));
            above = Running { left_pt: plan.lp, ul: Some(li), ll: None };
            below = Running { left_pt: plan.lp, ul: None, ll: Some(li) };
        } else {
            above = Running { left_pt: plan.lp, ul: None, ll: None };
            below = Running { left_pt: plan.lp, ul: None, ll: None };
            if !self.shares_left(first.top(), plan.lp) {
                above.ul = first.ul();
                if let Some(ti) = first.ul() {
                    self.trapezoids[ti].set_ur(Some(plan.above[0]));
                }
            }
            if !self.shares_left(first.bottom(), plan.lp) {
                below.ll = first.ll();
                if let Some(ti) = first.ll() {
                    self.trapezoids[ti].set_lr(Some(plan.below[0]));
                }
            }
        }

        for i in 0..k - 1 {
            let w = olds[i].right_pt();
            if plan.above[i] != plan.above[i + 1] {
                // The wall at w survives above the segment: emit the piece
                // accumulating there and start the next one. The old upper
                // right neighbor already references this slot.
                let mut t = Trapezoid::new(olds[i].top(), Some(plan.seg), above.left_pt, w, leaves.above[i]);
                t.set_ul(above.ul);
                t.set_ll(above.ll);
                t.set_ur(olds[i].ur());
                t.set_lr(Some(plan.above[i + 1]));
                staged.push((plan.above[i], t));
                above = Running { left_pt: w, ul: olds[i + 1].ul(), ll: Some(plan.above[i]) };
                if let Some(ti) = olds[i + 1].ul() {
                    self.trapezoids[ti].set_ur(Some(plan.above[i + 1]));
                }
            } else {
                let mut t = Trapezoid::new(Some(plan.seg), olds[i].bottom(), below.left_pt, w, leaves.below[i]);
                t.set_ul(below.ul);
                t.set_ll(below.ll);
                t.set_lr(olds[i].lr());
                t.set_ur(Some(plan.below[i + 1]));
                staged.push((plan.below[i], t));
                below = Running { left_pt: w, ul: Some(plan.below[i]), ll: olds[i + 1].ll() };
                if let Some(ti) = olds[i + 1].ll() {
                    self.trapezoids[ti].set_lr(Some(plan.below[i + 1]));
                }
            }
        }

        let mut fin_above = Trapezoid::new(last.top(), Some(plan.seg), above.left_pt, plan.rp, leaves.above[k - 1]);
        fin_above.set_ul(above.ul);
        fin_above.set_ll(above.ll);
        let mut fin_below = Trapezoid::new(Some(plan.seg), last.bottom(), below.left_pt, plan.rp, leaves.below[k - 1]);
        fin_below.set_ul(below.ul);
        fin_below.set_ll(below.ll);

        if let (Some(ri), Some(qr)) = (plan.right, leaves.right) {
            let mut right = Trapezoid::new(last.top(), last.bottom(), plan.rp, last.right_pt(), qr);
            right.set_ur(last.ur());
            right.set_lr(last.lr());
            right.set_ul(Some(plan.above[k - 1]));
            right.set_ll(Some(plan.below[k - 1]));
            fin_above.set_ur(Some(ri));
            fin_below.set_lr(Some(ri));
            if let Some(ti) = last.ur() {
                self.trapezoids[ti].set_ul(Some(ri));
            }
            if let Some(ti) = last.lr() {
                self.trapezoids[ti].set_ll(Some(ri));
            }
            staged.push((ri, right));
        } else {
            if !self.shares_right(last.top(), plan.rp) {
                fin_above.set_ur(last.ur());
                if let Some(ti) = last.ur() {
                    self.trapezoids[ti].set_ul(Some(plan.above[k - 1]));
                }
            }
            if !self.shares_right(last.bottom(), plan.rp) {
                fin_below.set_lr(last.lr());
                if let Some(ti) = last.lr() {
                    self.trapezoids[ti].set_ll(Some(plan.below[k - 1]));
                }
            }
        }
        staged.push((plan.above[k - 1], fin_above));
        staged.push((plan.below[k - 1], fin_below));

        // Run slots are overwritten in place; the fresh slots were allocated
        // contiguously at the end, so sorting puts their pushes in order.
        staged.sort_by_key(|&(ti, _)| ti);
        for (ti, t) in staged {
            if ti == self.trapezoids.next_index() {
                self.trapezoids.push(t);
            } else {
                self.trapezoids[ti] = t;
            }
        }
    }
}
