use crate::{
    idx::{Idx, VecExt},
    map::{MultiSplit, SingleSplit, TrapezoidalMap},
    math::{is_point_at_left, slope},
    node::{BranchKind, Node},
    point::Point2d,
    segment::IndexedSegment,
    trapezoid::Trapezoid,
};

/// Leaf indices allocated by [SearchDag::split_single], in the order the map
/// consumes them to set the new trapezoids' back-pointers.
pub(crate) struct SingleLeaves {
    pub upper: Idx<Node>,
    pub lower: Idx<Node>,
    pub left: Option<Idx<Node>>,
    pub right: Option<Idx<Node>>,
}

/// Leaf indices allocated by [SearchDag::split_multi]. `above[i]`/`below[i]`
/// is the leaf of the merged trapezoid covering the i-th run entry on that
/// side; consecutive entries repeat the index where runs of the walk share a
/// leaf.
pub(crate) struct MultiLeaves {
    pub above: Vec<Idx<Node>>,
    pub below: Vec<Idx<Node>>,
    pub left: Option<Idx<Node>>,
    pub right: Option<Idx<Node>>,
}

/// The point-location structure: an arena of [Node]s forming a directed
/// acyclic graph rooted at index 0. Splits rewrite leaves in place so that
/// indices held by trapezoids and by shared parents stay valid.
pub struct SearchDag {
    nodes: Vec<Node>,
}

impl SearchDag {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::root(Idx::new(0))],
        }
    }

    pub fn root(&self) -> Idx<Node> {
        Idx::new(0)
    }

    pub fn nodes(&self) -> &[Node] { &self.nodes }

    pub fn node(&self, qi: Idx<Node>) -> &Node {
        &self.nodes[qi]
    }

    /// Drops every node and restores the bootstrap state: a single leaf for
    /// the bounding-box trapezoid.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Node::root(Idx::new(0)));
    }

    /// Descends from the root to the leaf whose trapezoid contains `c`.
    #[inline(never)]
    pub(crate) fn locate(&self, map: &TrapezoidalMap, c: Point2d) -> (Idx<Node>, Idx<Trapezoid>) {
        let mut qi = self.root();
        loop {
            match &self.nodes[qi] {
                Node::Branch(left, right, kind) => {
                    let use_left = match *kind {
                        BranchKind::X(pi) => map.point(pi).x() > c.x(),
                        BranchKind::Y(si) => is_point_at_left(&map.segment(si), c),
                    };
                    qi = if use_left { *left } else { *right };
                }
                Node::Leaf(ti) => return (qi, *ti),
            }
        }
    }

    /// Descent specialized for the left endpoint of a stored segment. Where
    /// a Y node's segment starts at the same point as the one being located,
    /// the orientation test degenerates; the steeper segment is the one that
    /// lies above immediately to the right, so slopes break the tie.
    #[inline(never)]
    pub(crate) fn locate_segment(&self, map: &TrapezoidalMap, si: Idx<IndexedSegment>) -> (Idx<Node>, Idx<Trapezoid>) {
        let lp = map.indexed_segment(si).left();
        let c = map.point(lp);
        let s = map.segment(si);
        let mut qi = self.root();
        loop {
            match &self.nodes[qi] {
                Node::Branch(left, right, kind) => {
                    let use_left = match *kind {
                        BranchKind::X(pi) => map.point(pi).x() > c.x(),
                        BranchKind::Y(si_y) => {
                            if map.indexed_segment(si_y).left() == lp {
                                slope(&s) > slope(&map.segment(si_y))
                            } else {
                                is_point_at_left(&map.segment(si_y), c)
                            }
                        }
                    };
                    qi = if use_left { *left } else { *right };
                }
                Node::Leaf(ti) => return (qi, *ti),
            }
        }
    }

    /// Replaces the leaf of a trapezoid intersected along its whole segment
    /// span by the subgraph for the 2-4 way split. The subgraph root
    /// overwrites the old leaf slot, so parents elsewhere in the graph keep
    /// pointing at the right region.
    pub(crate) fn split_single(&mut self, plan: &SingleSplit) -> SingleLeaves {
        let upper = self.nodes.push_get_index(Node::Leaf(plan.target));
        let lower = self.nodes.push_get_index(Node::Leaf(plan.lower));
        let left = plan.left.map(|ti| self.nodes.push_get_index(Node::Leaf(ti)));
        let right = plan.right.map(|ti| self.nodes.push_get_index(Node::Leaf(ti)));

        let y = Node::Branch(upper, lower, BranchKind::Y(plan.seg));
        match (left, right) {
            (None, None) => {
                self.nodes[plan.old_leaf] = y;
            }
            (None, Some(right_leaf)) => {
                let yi = self.nodes.push_get_index(y);
                self.nodes[plan.old_leaf] = Node::Branch(yi, right_leaf, BranchKind::X(plan.rp));
            }
            (Some(left_leaf), None) => {
                let yi = self.nodes.push_get_index(y);
                self.nodes[plan.old_leaf] = Node::Branch(left_leaf, yi, BranchKind::X(plan.lp));
            }
            (Some(left_leaf), Some(right_leaf)) => {
                let yi = self.nodes.push_get_index(y);
                let xi = self.nodes.push_get_index(Node::Branch(yi, right_leaf, BranchKind::X(plan.rp)));
                self.nodes[plan.old_leaf] = Node::Branch(left_leaf, xi, BranchKind::X(plan.lp));
            }
        }

        SingleLeaves { upper, lower, left, right }
    }

    /// Rewrites the leaves of a run of intersected trapezoids. Every run
    /// entry's old leaf slot ends up holding a Y node for the new segment
    /// (behind an X node at the ends when an endpoint splits off a new
    /// trapezoid there), and consecutive Y nodes on the same side of the
    /// segment share the leaf of the merged trapezoid.
    pub(crate) fn split_multi(&mut self, plan: &MultiSplit) -> MultiLeaves {
        let k = plan.run.len();

        let mut above = Vec::with_capacity(k);
        let mut below = Vec::with_capacity(k);
        for i in 0..k {
            if i == 0 || plan.above[i] != plan.above[i - 1] {
                above.push(self.nodes.push_get_index(Node::Leaf(plan.above[i])));
            } else {
                above.push(above[i - 1]);
            }
            if i == 0 || plan.below[i] != plan.below[i - 1] {
                below.push(self.nodes.push_get_index(Node::Leaf(plan.below[i])));
            } else {
                below.push(below[i - 1]);
            }
        }
        let left = plan.left.map(|ti| self.nodes.push_get_index(Node::Leaf(ti)));
        let right = plan.right.map(|ti| self.nodes.push_get_index(Node::Leaf(ti)));

        for i in 0..k {
            let slot = plan.old_leaves[i];
            let y = Node::Branch(above[i], below[i], BranchKind::Y(plan.seg));
            match (left.filter(|_| i == 0), right.filter(|_| i + 1 == k)) {
                (Some(left_leaf), _) => {
                    let yi = self.nodes.push_get_index(y);
                    self.nodes[slot] = Node::Branch(left_leaf, yi, BranchKind::X(plan.lp));
                }
                (_, Some(right_leaf)) => {
                    let yi = self.nodes.push_get_index(y);
                    self.nodes[slot] = Node::Branch(yi, right_leaf, BranchKind::X(plan.rp));
                }
                _ => {
                    self.nodes[slot] = y;
                }
            }
        }

        MultiLeaves { above, below, left, right }
    }
}

impl Default for SearchDag {
    fn default() -> Self {
        Self::new()
    }
}
