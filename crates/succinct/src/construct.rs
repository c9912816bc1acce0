use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Instant;

use log::info;
use num_format::{Locale, ToFormattedString};
use rayon::prelude::*;

use planar_builder::{PlaneGraph, SpanningTree};

use crate::bits::BitVec;
use crate::euler;
use crate::list_ranking::{list_rank, EulerNode};
use crate::rmm::RangeMinMaxTree;

/// The succinct representation of a triangulated plane graph: three
/// bitstrings, each indexed by a range-min-max tree.
pub struct SuccinctGraph {
    node_count: usize,
    edge_count: usize,
    s1: RangeMinMaxTree,
    s2: RangeMinMaxTree,
    s3: RangeMinMaxTree,
}

impl SuccinctGraph {
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Parentheses of the tree interleaved with the brackets of the
    /// non-tree edges, length `2m + 2`.
    #[inline]
    pub fn s1(&self) -> &RangeMinMaxTree {
        &self.s1
    }

    /// The balanced-parenthesis word of the tree, length `2n`.
    #[inline]
    pub fn s2(&self) -> &RangeMinMaxTree {
        &self.s2
    }

    /// The bracket word of the non-tree edges, length `2(m - n + 1)`.
    #[inline]
    pub fn s3(&self) -> &RangeMinMaxTree {
        &self.s3
    }
}

/// Builds the succinct representation of `graph` from its spanning
/// tree `tree` and the canonical ordering installed on the vertices.
///
/// The input is assumed to be validated: `tree` spans `graph` rooted at
/// vertex 0 with embedding-consistent adjacency lists, and the
/// canonical ordering places vertex 0 first. Internal invariant
/// violations abort the process.
pub fn build_succinct_graph(graph: &PlaneGraph, tree: &SpanningTree) -> SuccinctGraph {
    assert_eq!(
        graph.node_count(),
        tree.node_count(),
        "spanning tree does not match the graph"
    );

    let n = graph.node_count();
    let m = graph.edge_count();
    let num_parentheses = 2 * n;
    let num_brackets = 2 * (m - n + 1);
    let num_total = num_parentheses + num_brackets;

    let start = Instant::now();
    let (lower, higher) = vertex_counters(graph, tree);
    info!("Computed vertex counters in {:?}", start.elapsed());

    let start = Instant::now();
    let (mut et, mut et2) = euler_tours(graph, tree, &lower, &higher);
    info!("Classified tree edges in {:?}", start.elapsed());

    let start = Instant::now();
    rayon::join(|| list_rank(&mut et), || list_rank(&mut et2));
    info!("Ranked Euler tours in {:?}", start.elapsed());

    let start = Instant::now();
    let (s1, s2, s3) = emit_bitstrings(tree, &et, &et2, &higher, num_parentheses, num_brackets);
    info!("Emitted bitstrings in {:?}", start.elapsed());

    info!(
        "Encoded {} symbols for {} nodes and {} edges",
        num_total.to_formatted_string(&Locale::en),
        n.to_formatted_string(&Locale::en),
        m.to_formatted_string(&Locale::en)
    );

    let start = Instant::now();
    let (s1, (s2, s3)) = rayon::join(
        || RangeMinMaxTree::new(s1),
        || {
            rayon::join(
                || RangeMinMaxTree::new(s2),
                || RangeMinMaxTree::new(s3),
            )
        },
    );
    info!("Built range-min-max trees in {:?}", start.elapsed());

    SuccinctGraph {
        node_count: n,
        edge_count: m,
        s1,
        s2,
        s3,
    }
}

/// Counts, for every vertex, the incident edges towards lower and
/// higher canonical positions, then corrects both counts for the tree
/// edges: the parent edge leaves `lower`, the child edges leave
/// `higher`. What remains is the number of closing respectively
/// opening brackets the vertex contributes.
pub(crate) fn vertex_counters(graph: &PlaneGraph, tree: &SpanningTree) -> (Vec<u16>, Vec<u16>) {
    let n = graph.node_count();

    let lower = (0..n).map(|_| AtomicU16::new(0)).collect::<Vec<_>>();
    let higher = (0..n).map(|_| AtomicU16::new(0)).collect::<Vec<_>>();

    // Half-edge 0 is the root-adjacent edge reserved by the input
    // format and stays out of the counts.
    graph.half_edges()[1..].par_iter().for_each(|e| {
        if graph.order(e.src) > graph.order(e.tgt) {
            lower[e.src as usize].fetch_add(1, Ordering::AcqRel);
        } else {
            higher[e.src as usize].fetch_add(1, Ordering::AcqRel);
        }
    });

    let mut lower = lower
        .into_iter()
        .map(AtomicU16::into_inner)
        .collect::<Vec<_>>();
    let mut higher = higher
        .into_iter()
        .map(AtomicU16::into_inner)
        .collect::<Vec<_>>();

    lower[1..]
        .par_iter_mut()
        .zip(higher[1..].par_iter_mut())
        .zip(tree.nodes()[1..].par_iter())
        .for_each(|((lower, higher), node)| {
            *lower -= 1;
            *higher -= (node.last - node.first) as u16;
        });

    (lower, higher)
}

fn euler_tours(
    graph: &PlaneGraph,
    tree: &SpanningTree,
    lower: &[u16],
    higher: &[u16],
) -> (Vec<EulerNode>, Vec<EulerNode>) {
    (0..tree.half_edge_count() as u32)
        .into_par_iter()
        .map(|i| euler::classify(graph, tree, lower, higher, i))
        .unzip()
}

fn emit_bitstrings(
    tree: &SpanningTree,
    et: &[EulerNode],
    et2: &[EulerNode],
    higher: &[u16],
    num_parentheses: usize,
    num_brackets: usize,
) -> (BitVec, BitVec, BitVec) {
    let num_total = num_parentheses + num_brackets;
    let mut s1 = BitVec::new(num_total);
    let mut s2 = BitVec::new(num_parentheses);
    let mut s3 = BitVec::new(num_brackets);

    et.par_iter()
        .zip(et2.par_iter())
        .zip(tree.half_edges().par_iter())
        .for_each(|((node, node2), e)| {
            s1.set_atomic(node.rank as usize + 1);

            if node2.value {
                s2.set_atomic(node2.rank as usize + 1);
            } else {
                let lower_bound = (node.rank - node2.rank) as usize;
                let upper_bound = lower_bound + higher[e.src as usize] as usize;
                for j in lower_bound..upper_bound {
                    s3.set_atomic(j);
                }
            }
        });

    s1.set(0);
    s1.set(num_total - 1);
    s2.set(0);

    (s1, s2, s3)
}
