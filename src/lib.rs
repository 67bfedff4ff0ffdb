mod idx;
mod point;
mod segment;
mod math;
mod node;
mod trapezoid;
mod dag;
mod map;
mod algorithms;
mod errors;

#[cfg(feature = "debugging")]
pub mod debug;

#[cfg(any(test, feature = "benchmarking"))]
pub mod tests;

pub use algorithms::{find, follow_segment, insert, insert_all, query};
pub use dag::SearchDag;
pub use errors::InternalError;
pub use idx::{Idx, SliceExt, SliceIndexIter};
pub use map::TrapezoidalMap;
pub use math::{is_point_at_left, slope, vertical_line_intersection};
pub use node::{BranchKind, Node};
pub use point::{BoundingBox2d, Point2d};
pub use segment::{IndexedSegment, Segment2d};
pub use trapezoid::Trapezoid;
