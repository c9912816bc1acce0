//! A building block for algorithms over embedded plane graphs.
//!
//! The crate provides an index-based representation of a plane graph
//! together with a spanning tree whose adjacency lists are consistent
//! with the graph's embedding. Both structures store their adjacency
//! lists as one contiguous array of directed half-edges; a vertex owns
//! an inclusive `[first, last]` range into that array. The two
//! half-edges of an undirected edge are linked through the plain index
//! `twin`, never through references.
//!
//! Graphs can be created programmatically from adjacency lists or read
//! from text files in the adjacency-list format described in
//! [`input`].
//!
//! ```
//! use planar_builder::prelude::*;
//!
//! // A triangle, embedded counter-clockwise.
//! let graph = PlaneGraph::from_adjacency(vec![
//!     vec![1, 2],
//!     vec![2, 0],
//!     vec![0, 1],
//! ])
//! .unwrap();
//!
//! assert_eq!(graph.node_count(), 3);
//! assert_eq!(graph.edge_count(), 3);
//! assert_eq!(graph.half_edge(graph.half_edge(0).twin).tgt, 0);
//! ```

pub mod graph;
pub mod input;

pub use crate::graph::{check_consistent, HalfEdge, PlaneGraph, SpanningTree, TreeNode, Vertex};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("error while loading input")]
    IoError {
        #[from]
        source: std::io::Error,
    },
    #[error("malformed number in line {line}")]
    InvalidNumber { line: usize },
    #[error("unexpected end of input after line {line}")]
    UnexpectedEof { line: usize },
    #[error("graph must have at least one vertex")]
    EmptyGraph,
    #[error("{m} edges cannot span {n} vertices")]
    NotEnoughEdges { n: usize, m: usize },
    #[error("vertex {vertex} out of range (node count {node_count})")]
    VertexOutOfRange { vertex: u32, node_count: usize },
    #[error("expected {expected} half-edges, found {actual}")]
    EdgeCountMismatch { expected: usize, actual: usize },
    #[error("vertex {vertex} has an empty adjacency list")]
    EmptyAdjacency { vertex: u32 },
    #[error("adjacency lists for {actual} of {expected} vertices")]
    MissingAdjacency { expected: usize, actual: usize },
    #[error("half-edge {src} -> {tgt} has no twin in the adjacency of {tgt}")]
    MissingTwin { src: u32, tgt: u32 },
    #[error("canonical order is not a permutation of the vertex ids")]
    OrderNotAPermutation,
    #[error("canonical order covers {actual} vertices, graph has {expected}")]
    OrderLengthMismatch { expected: usize, actual: usize },
    #[error("spanning tree has {tree} nodes, graph has {graph}")]
    NodeCountMismatch { graph: usize, tree: usize },
}

/// A sendable raw pointer into a shared slice.
///
/// Parallel phases that scatter writes across a slice use this to hand
/// each worker the base pointer. Callers must guarantee that concurrent
/// writes target disjoint elements.
pub struct SharedMut<T>(*mut T);
unsafe impl<T: Send> Send for SharedMut<T> {}
unsafe impl<T: Sync> Sync for SharedMut<T> {}

impl<T> SharedMut<T> {
    pub fn new(ptr: *mut T) -> Self {
        SharedMut(ptr)
    }

    delegate::delegate! {
        to self.0 {
            /// # Safety
            ///
            /// Ensure that `count` does not exceed the capacity of the
            /// underlying allocation.
            pub unsafe fn add(&self, count: usize) -> *mut T;
        }
    }
}

pub mod prelude {
    pub use crate::graph::{
        check_consistent, HalfEdge, PlaneGraph, SpanningTree, TreeNode, Vertex,
    };
    pub use crate::input::{read_canonical_order, read_plane_graph, read_spanning_tree};
    pub use crate::{Error, SharedMut};
}
