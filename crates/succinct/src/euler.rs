use planar_builder::{PlaneGraph, SpanningTree};

use crate::list_ranking::{EulerNode, Link};

/// Classifies tree half-edge `i` and returns its entries for the two
/// Euler-tour arrays (symbol positions for S1, respectively S2/S3).
///
/// A half-edge is *forward* when its source precedes its target in the
/// canonical ordering, i.e. the tour descends along it; otherwise it is
/// *backward* and the tour ascends. The successor rules trace the tour
/// through the consistent adjacency lists: descend into the first
/// child, walk sibling lists left to right, and close each node's list
/// by jumping to its parent edge. Exactly one half-edge, the backward
/// edge closing the root's list, terminates the tour.
pub(crate) fn classify(
    graph: &PlaneGraph,
    tree: &SpanningTree,
    lower: &[u16],
    higher: &[u16],
    i: u32,
) -> (EulerNode, EulerNode) {
    let e = tree.half_edge(i);

    if graph.order(e.src) < graph.order(e.tgt) {
        // Forward: one parenthesis plus the closing brackets of tgt.
        let tgt = tree.node(e.tgt);
        let next = if tgt.first == tgt.last {
            // Leaf, bounce back along the twin.
            Link::Node(e.twin)
        } else {
            // Descend into the first child of tgt.
            Link::Node(tgt.first + 1)
        };

        (
            EulerNode {
                next,
                value: true,
                rank: lower[e.tgt as usize] as u32 + 1,
            },
            EulerNode {
                next,
                value: true,
                rank: 1,
            },
        )
    } else {
        // Backward: one parenthesis plus the opening brackets of src.
        let tgt = tree.node(e.tgt);
        let next = if e.tgt == 0 && e.twin == tree.node(0).last {
            Link::End
        } else if e.twin == tgt.last {
            // Last sibling, continue with the parent edge of tgt.
            Link::Node(tgt.first)
        } else {
            // Next sibling edge at tgt.
            Link::Node(e.twin + 1)
        };

        (
            EulerNode {
                next,
                value: false,
                rank: higher[e.src as usize] as u32 + 1,
            },
            EulerNode {
                next,
                value: false,
                rank: 1,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The triangle: vertices 0, 1, 2 in canonical order, spanning tree
    // {0-1, 0-2}. Tree half-edges: 0:(0,1), 1:(0,2), 2:(1,0), 3:(2,0).
    fn triangle() -> (PlaneGraph, SpanningTree) {
        let graph =
            PlaneGraph::from_adjacency(vec![vec![1, 2], vec![2, 0], vec![0, 1]]).unwrap();
        let tree =
            SpanningTree::from_adjacency(vec![vec![1, 2], vec![0], vec![0]]).unwrap();
        (graph, tree)
    }

    #[test]
    fn tour_visits_every_half_edge_once() {
        let (graph, tree) = triangle();
        let lower = [0, 0, 1];
        let higher = [1, 1, 0];

        let tour = (0..4)
            .map(|i| classify(&graph, &tree, &lower, &higher, i).0)
            .collect::<Vec<_>>();

        // 0 -> (1,0) -> (0,2) -> (2,0) -> end
        assert_eq!(tour[0].next, Link::Node(2));
        assert_eq!(tour[2].next, Link::Node(1));
        assert_eq!(tour[1].next, Link::Node(3));
        assert_eq!(tour[3].next, Link::End);
    }

    #[test]
    fn weights_count_parentheses_and_brackets() {
        let (graph, tree) = triangle();
        let lower = [0, 0, 1];
        let higher = [1, 1, 0];

        let (et, et2) = classify(&graph, &tree, &lower, &higher, 1);
        assert!(et.value);
        assert_eq!(et.rank, 2); // '(' plus one closing bracket at vertex 2
        assert_eq!(et2.rank, 1);

        let (et, et2) = classify(&graph, &tree, &lower, &higher, 2);
        assert!(!et.value);
        assert_eq!(et.rank, 2); // ')' plus one opening bracket at vertex 1
        assert_eq!(et2.rank, 1);
    }
}
