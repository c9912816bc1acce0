use std::io::Write;

use rayon::prelude::*;

use crate::Error;

/// One of the two directed instances of an undirected edge.
///
/// `twin` is the position of the reverse half-edge in the adjacency
/// range of `tgt`. The position of a half-edge in the adjacency range
/// of its own source is its index in the half-edge array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HalfEdge {
    pub src: u32,
    pub tgt: u32,
    pub twin: u32,
}

/// A vertex of a plane graph: the inclusive `[first, last]` range of
/// its incident half-edges (in counter-clockwise order) and its
/// position in the canonical ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Vertex {
    pub first: u32,
    pub last: u32,
    pub order: u32,
}

/// A node of a spanning tree: the inclusive `[first, last]` range of
/// its incident tree half-edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeNode {
    pub first: u32,
    pub last: u32,
}

/// An embedded plane graph with `n` vertices and `m` undirected edges,
/// stored as `2m` directed half-edges grouped into per-vertex
/// contiguous adjacency ranges.
pub struct PlaneGraph {
    vertices: Box<[Vertex]>,
    half_edges: Box<[HalfEdge]>,
}

impl PlaneGraph {
    /// Builds a plane graph from one counter-clockwise adjacency list
    /// per vertex. The canonical order defaults to the vertex ids; use
    /// [`PlaneGraph::assign_order`] to install a different one.
    pub fn from_adjacency(adjacency: Vec<Vec<u32>>) -> Result<Self, Error> {
        let (ranges, mut half_edges) = flatten_adjacency(&adjacency)?;

        let n = ranges.len();
        if half_edges.len() % 2 != 0 || half_edges.len() / 2 + 1 < n {
            return Err(Error::NotEnoughEdges {
                n,
                m: half_edges.len() / 2,
            });
        }

        link_twins(&mut half_edges, |v| ranges[v as usize])?;

        let vertices = ranges
            .into_iter()
            .enumerate()
            .map(|(i, (first, last))| Vertex {
                first,
                last,
                order: i as u32,
            })
            .collect();

        Ok(Self {
            vertices,
            half_edges: half_edges.into_boxed_slice(),
        })
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of undirected edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.half_edges.len() / 2
    }

    #[inline]
    pub fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    #[inline]
    pub fn vertex(&self, v: u32) -> Vertex {
        self.vertices[v as usize]
    }

    #[inline]
    pub fn half_edge(&self, e: u32) -> HalfEdge {
        self.half_edges[e as usize]
    }

    #[inline]
    pub fn degree(&self, v: u32) -> usize {
        let v = self.vertices[v as usize];
        (v.last - v.first + 1) as usize
    }

    /// Position of vertex `v` in the canonical ordering.
    #[inline]
    pub fn order(&self, v: u32) -> u32 {
        self.vertices[v as usize].order
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }

    /// Installs a canonical ordering. `order[v]` is the position of
    /// vertex `v`; the positions must form a permutation of the vertex
    /// ids.
    pub fn assign_order(&mut self, order: &[u32]) -> Result<(), Error> {
        let n = self.node_count();
        if order.len() != n {
            return Err(Error::OrderLengthMismatch {
                expected: n,
                actual: order.len(),
            });
        }

        let mut seen = vec![false; n];
        for &position in order {
            if position as usize >= n || std::mem::replace(&mut seen[position as usize], true) {
                return Err(Error::OrderNotAPermutation);
            }
        }

        for (vertex, &position) in self.vertices.iter_mut().zip(order) {
            vertex.order = position;
        }

        Ok(())
    }

    /// Writes the graph in the adjacency-list text format understood
    /// by [`crate::input::read_plane_graph`].
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", self.node_count())?;
        writeln!(out, "{}", self.edge_count())?;
        write_adjacency(out, &self.half_edges, self.vertices.iter().map(|v| (v.first, v.last)))
    }
}

/// A spanning tree of a plane graph, rooted at node 0, with `2(n-1)`
/// half-edges. The adjacency lists are expected to be consistent with
/// the graph's embedding: each tree edge appears at the same cyclic
/// position around each endpoint as in the graph.
pub struct SpanningTree {
    nodes: Box<[TreeNode]>,
    half_edges: Box<[HalfEdge]>,
}

impl SpanningTree {
    /// Builds a spanning tree from one adjacency list per node.
    pub fn from_adjacency(adjacency: Vec<Vec<u32>>) -> Result<Self, Error> {
        let (ranges, mut half_edges) = flatten_adjacency(&adjacency)?;

        let n = ranges.len();
        if half_edges.len() != 2 * (n - 1) {
            return Err(Error::EdgeCountMismatch {
                expected: 2 * (n - 1),
                actual: half_edges.len(),
            });
        }

        link_twins(&mut half_edges, |v| ranges[v as usize])?;

        let nodes = ranges
            .into_iter()
            .map(|(first, last)| TreeNode { first, last })
            .collect();

        Ok(Self {
            nodes,
            half_edges: half_edges.into_boxed_slice(),
        })
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    #[inline]
    pub fn node(&self, v: u32) -> TreeNode {
        self.nodes[v as usize]
    }

    #[inline]
    pub fn half_edge(&self, e: u32) -> HalfEdge {
        self.half_edges[e as usize]
    }

    #[inline]
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    #[inline]
    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }

    /// Writes the tree in the adjacency-list text format understood by
    /// [`crate::input::read_spanning_tree`].
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", self.node_count())?;
        write_adjacency(out, &self.half_edges, self.nodes.iter().map(|v| (v.first, v.last)))
    }
}

/// Checks that `tree` can be a spanning tree of `graph`.
pub fn check_consistent(graph: &PlaneGraph, tree: &SpanningTree) -> Result<(), Error> {
    if graph.node_count() != tree.node_count() {
        return Err(Error::NodeCountMismatch {
            graph: graph.node_count(),
            tree: tree.node_count(),
        });
    }
    Ok(())
}

fn flatten_adjacency(adjacency: &[Vec<u32>]) -> Result<(Vec<(u32, u32)>, Vec<HalfEdge>), Error> {
    let n = adjacency.len();
    if n == 0 {
        return Err(Error::EmptyGraph);
    }

    let mut ranges = Vec::with_capacity(n);
    let mut half_edges = Vec::new();

    for (src, targets) in adjacency.iter().enumerate() {
        if targets.is_empty() {
            return Err(Error::EmptyAdjacency { vertex: src as u32 });
        }
        let first = half_edges.len() as u32;
        for &tgt in targets {
            if tgt as usize >= n {
                return Err(Error::VertexOutOfRange {
                    vertex: tgt,
                    node_count: n,
                });
            }
            half_edges.push(HalfEdge {
                src: src as u32,
                tgt,
                twin: 0,
            });
        }
        ranges.push((first, half_edges.len() as u32 - 1));
    }

    Ok((ranges, half_edges))
}

/// Fills the `twin` pointer of every half-edge by scanning the
/// adjacency range of its target for the half-edge pointing back.
/// The scan is unambiguous on simple graphs.
fn link_twins(
    half_edges: &mut [HalfEdge],
    range_of: impl Fn(u32) -> (u32, u32) + Sync,
) -> Result<(), Error> {
    let twins = {
        let edges = &*half_edges;
        (0..edges.len())
            .into_par_iter()
            .map(|i| {
                let e = edges[i];
                let (first, last) = range_of(e.tgt);
                (first..=last)
                    .find(|&j| edges[j as usize].tgt == e.src)
                    .ok_or(Error::MissingTwin {
                        src: e.src,
                        tgt: e.tgt,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    for (e, twin) in half_edges.iter_mut().zip(twins) {
        e.twin = twin;
    }

    Ok(())
}

fn write_adjacency<W: Write>(
    out: &mut W,
    half_edges: &[HalfEdge],
    ranges: impl Iterator<Item = (u32, u32)>,
) -> std::io::Result<()> {
    for (src, (first, last)) in ranges.enumerate() {
        write!(out, "{}", src)?;
        for e in &half_edges[first as usize..=last as usize] {
            write!(out, " {}", e.tgt)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> PlaneGraph {
        PlaneGraph::from_adjacency(vec![vec![1, 2], vec![2, 0], vec![0, 1]]).unwrap()
    }

    #[test]
    fn twin_pointers_are_an_involution() {
        let graph = triangle();

        for i in 0..graph.half_edge_count() as u32 {
            let e = graph.half_edge(i);
            let back = graph.half_edge(e.twin);
            assert_eq!(back.src, e.tgt);
            assert_eq!(back.tgt, e.src);
            assert_eq!(back.twin, i);
        }
    }

    #[test]
    fn adjacency_ranges_are_contiguous() {
        let graph = triangle();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.degree(1), 2);

        let v = graph.vertex(1);
        assert_eq!((v.first, v.last), (2, 3));
        assert_eq!(graph.half_edge(v.first).tgt, 2);
        assert_eq!(graph.half_edge(v.last).tgt, 0);
    }

    #[test]
    fn default_order_is_the_vertex_id() {
        let graph = triangle();
        assert_eq!(graph.order(0), 0);
        assert_eq!(graph.order(2), 2);
    }

    #[test]
    fn assign_order_rejects_non_permutations() {
        let mut graph = triangle();

        assert!(matches!(
            graph.assign_order(&[0, 1]),
            Err(Error::OrderLengthMismatch { .. })
        ));
        assert!(matches!(
            graph.assign_order(&[0, 1, 1]),
            Err(Error::OrderNotAPermutation)
        ));
        assert!(matches!(
            graph.assign_order(&[0, 1, 3]),
            Err(Error::OrderNotAPermutation)
        ));

        graph.assign_order(&[0, 2, 1]).unwrap();
        assert_eq!(graph.order(1), 2);
        assert_eq!(graph.order(2), 1);
    }

    #[test]
    fn tree_edge_count_is_checked() {
        let result = SpanningTree::from_adjacency(vec![vec![1, 2], vec![0, 2], vec![0, 1]]);
        assert!(matches!(result, Err(Error::EdgeCountMismatch { .. })));
    }

    #[test]
    fn missing_twin_is_reported() {
        // 0 lists 1 as a neighbor, but not the other way around.
        let result = PlaneGraph::from_adjacency(vec![vec![1, 1], vec![0, 0]]);
        assert!(result.is_ok());

        let result = SpanningTree::from_adjacency(vec![vec![1], vec![1]]);
        assert!(matches!(result, Err(Error::MissingTwin { .. })));
    }

    #[test]
    fn spanning_tree_of_a_star() {
        let tree =
            SpanningTree::from_adjacency(vec![vec![1, 2, 3], vec![0], vec![0], vec![0]]).unwrap();

        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.half_edge_count(), 6);
        assert_eq!(tree.node(0), TreeNode { first: 0, last: 2 });

        let e = tree.half_edge(1);
        assert_eq!((e.src, e.tgt), (0, 2));
        assert_eq!(tree.half_edge(e.twin).tgt, 0);
    }
}
