//! Binary Space Partitioning over a polygon's edge set.
//!
//! Each node claims one edge and partitions the remaining edges by that
//! edge's own half-plane (through its begin point, oriented by its outward
//! normal). For a convex, counterclockwise polygon the interior equals the
//! intersection of the non-positive half-planes of its edges, so the tree
//! answers "which part of an arbitrary edge lies inside the polygon?" by
//! clipping the query edge against each half-plane on the way down.
//!
//! Trees are one-shot: built once per polygon from an owned edge list and
//! never updated afterwards.
//!
//! # Architecture
//!
//! - [`BspTree`]: the container holding the root node
//! - [`BspNode`]: internal nodes storing one edge, its partition plane, and
//!   optional inside/outside subtrees

mod node;
mod tree;

pub use node::BspNode;
pub use tree::BspTree;
