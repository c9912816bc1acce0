//! Parallel construction of succinct representations of triangulated
//! plane graphs.
//!
//! Given an embedded plane graph, a spanning tree rooted at vertex 0
//! whose adjacency lists are consistent with the embedding, and a
//! canonical ordering of the vertices, [`construct::build_succinct_graph`]
//! produces three bitstrings that encode the graph's connectivity in
//! `O(n)` bits:
//!
//! - `S1` interleaves the balanced-parenthesis word of the tree with
//!   the brackets of the non-tree edges, in Euler-tour order,
//! - `S2` is the balanced-parenthesis word of the tree alone,
//! - `S3` is the bracket word of the non-tree edges alone.
//!
//! Each bitstring is handed to a [`rmm::RangeMinMaxTree`] that serves
//! as the navigation index over the finished encoding.
//!
//! The construction is a fixed pipeline of data-parallel phases built
//! on [rayon](https://github.com/rayon-rs/rayon): per-vertex counters
//! accumulated with atomic fetch-and-add, a classification of every
//! tree half-edge into its Euler-tour successor and symbol weight,
//! a parallel list-ranking pass over the tour, and an atomic-or
//! scatter of the final bits. The parallel primitives live in
//! [`prefix_sum`] and [`list_ranking`] and are usable on their own.

pub mod bits;
pub mod construct;
mod euler;
pub mod list_ranking;
pub mod prefix_sum;
pub mod rmm;

pub mod prelude {
    pub use crate::bits::BitVec;
    pub use crate::construct::{build_succinct_graph, SuccinctGraph};
    pub use crate::list_ranking::{list_rank, EulerNode, Link};
    pub use crate::prefix_sum::prefix_sum;
    pub use crate::rmm::RangeMinMaxTree;
    pub use planar_builder::prelude::*;
}
