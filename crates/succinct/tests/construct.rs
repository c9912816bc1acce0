use succinct_planar::prelude::*;

/// The triangle: smallest triangulated input. Spanning tree {0-1, 0-2}.
fn triangle() -> (PlaneGraph, SpanningTree) {
    let graph = PlaneGraph::from_adjacency(vec![vec![1, 2], vec![2, 0], vec![0, 1]]).unwrap();
    let tree = SpanningTree::from_adjacency(vec![vec![1, 2], vec![0], vec![0]]).unwrap();
    (graph, tree)
}

/// The star K1,3, tree = graph: no non-tree edges, no brackets.
fn star() -> (PlaneGraph, SpanningTree) {
    let adjacency = vec![vec![1, 2, 3], vec![0], vec![0], vec![0]];
    let graph = PlaneGraph::from_adjacency(adjacency.clone()).unwrap();
    let tree = SpanningTree::from_adjacency(adjacency).unwrap();
    (graph, tree)
}

/// A fan: vertex 0 adjacent to everything, the rim vertices chained by
/// non-tree edges. Spanning tree = the star at 0.
fn fan(n: usize) -> (PlaneGraph, SpanningTree) {
    let rim = |i: usize| -> Vec<u32> {
        let mut targets = vec![0];
        if i > 1 {
            targets.push(i as u32 - 1);
        }
        if i < n - 1 {
            targets.push(i as u32 + 1);
        }
        targets
    };

    let mut adjacency = vec![(1..n as u32).collect::<Vec<_>>()];
    adjacency.extend((1..n).map(rim));
    let graph = PlaneGraph::from_adjacency(adjacency).unwrap();

    let mut tree_adjacency = vec![(1..n as u32).collect::<Vec<_>>()];
    tree_adjacency.extend((1..n).map(|_| vec![0]));
    let tree = SpanningTree::from_adjacency(tree_adjacency).unwrap();

    (graph, tree)
}

fn bit_string(tree: &RangeMinMaxTree) -> String {
    format!("{:?}", tree.bits())
}

#[test]
fn triangle_encoding() {
    let (graph, tree) = triangle();
    let sg = build_succinct_graph(&graph, &tree);

    assert_eq!(sg.node_count(), 3);
    assert_eq!(sg.edge_count(), 3);

    assert_eq!(sg.s1().len(), 8);
    assert_eq!(sg.s2().len(), 6);
    assert_eq!(sg.s3().len(), 2);

    assert_eq!(bit_string(sg.s2()), "110100");
    assert_eq!(bit_string(sg.s3()), "10");
    assert_eq!(bit_string(sg.s1()), "11101011");

    assert!(sg.s2().is_balanced());
    assert_eq!(sg.s3().bits().count_ones(), 1);
}

#[test]
fn star_has_no_brackets() {
    let (graph, tree) = star();
    let sg = build_succinct_graph(&graph, &tree);

    assert_eq!(sg.s1().len(), 8);
    assert_eq!(sg.s2().len(), 8);
    assert!(sg.s3().is_empty());

    assert_eq!(bit_string(sg.s2()), "11010100");
    assert!(sg.s2().is_balanced());
    assert_eq!(sg.s2().max_excess(), 2);
}

#[test]
fn bitstring_lengths_and_ones() {
    for (graph, tree) in [triangle(), star(), fan(64)] {
        let n = graph.node_count();
        let m = graph.edge_count();

        let sg = build_succinct_graph(&graph, &tree);

        assert_eq!(sg.s1().len(), 2 * m + 2);
        assert_eq!(sg.s2().len(), 2 * n);
        assert_eq!(sg.s3().len(), 2 * (m - n + 1));

        // One marker per tree half-edge plus the two framing bits.
        assert_eq!(sg.s1().bits().count_ones(), 2 * n);
        // One opening parenthesis per node.
        assert_eq!(sg.s2().bits().count_ones(), n);
        // One opening bracket per non-tree edge.
        assert_eq!(sg.s3().bits().count_ones(), m - n + 1);

        assert!(sg.s1().bits().get(0));
        assert!(sg.s1().bits().get(2 * m + 1));
        assert!(sg.s2().bits().get(0));

        assert!(sg.s2().is_balanced());
        assert!(sg.s2().max_excess() <= n as i64);
    }
}

#[test]
fn parenthesis_word_follows_the_tree_shape() {
    // In the fan every rim vertex is a child of the root, so the
    // parenthesis word is n - 1 repetitions of "10" inside the root
    // pair.
    let (graph, tree) = fan(17);
    let sg = build_succinct_graph(&graph, &tree);

    let expected = format!("1{}0", "10".repeat(16));
    assert_eq!(bit_string(sg.s2()), expected);
    assert_eq!(sg.s2().max_excess(), 2);
}

#[test]
fn identical_results_for_any_worker_count() {
    let encode = |threads: usize| {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap();
        pool.install(|| {
            let (graph, tree) = fan(300);
            let sg = build_succinct_graph(&graph, &tree);
            (
                bit_string(sg.s1()),
                bit_string(sg.s2()),
                bit_string(sg.s3()),
            )
        })
    };

    let sequential = encode(1);
    assert_eq!(encode(2), sequential);
    assert_eq!(encode(8), sequential);
}
