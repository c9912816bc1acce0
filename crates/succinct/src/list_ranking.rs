use planar_builder::SharedMut;
use rayon::prelude::*;

/// Successor of a node in the linked list laid out in an array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Link {
    /// Index of the next node.
    Node(u32),
    /// The node was the last one visited by the given sublist; written
    /// while ranking runs.
    Sublist(u32),
    /// Terminates the list.
    End,
}

/// One entry of an Euler-tour array: the successor half-edge, the
/// forward/backward flag of the underlying tree edge, and the rank
/// seed (before ranking) respectively the accumulated rank (after).
#[derive(Clone, Copy, Debug)]
pub struct EulerNode {
    pub next: Link,
    pub value: bool,
    pub rank: u32,
}

struct Sublist {
    /// Seed rank of the splitter, later the global offset of the
    /// sublist.
    value: u32,
    /// Cached outgoing link of the splitter.
    scratch: Link,
    successor: Option<u32>,
}

/// Ranks the linked list starting at `nodes[0]` in parallel.
///
/// On entry every `next` field is either `Link::Node` or, for the last
/// node, `Link::End`, and the links form a single simple path from
/// index 0 through all remaining nodes. On exit `nodes[i].rank` is the
/// sum of the original ranks of all nodes strictly before `i` in list
/// order, with `nodes[0].rank == 0`; the `next` fields are consumed.
///
/// Wyllie-style pointer jumping would be `O(N log N)` work. This is
/// the split-rank-combine scheme: `s` splitters cut the list into
/// independently ranked sublists which are then linked at their
/// junctions by a sequential scan over the (small) sublist table.
pub fn list_rank(nodes: &mut [EulerNode]) {
    let len = nodes.len();
    if len == 0 {
        return;
    }

    let threads = rayon::current_num_threads();
    let sublist_count = usize::max(1, usize::min(len, ceil_log2(len) * threads));
    let chunk = len / sublist_count;

    let nodes_ptr = SharedMut::new(nodes.as_mut_ptr());

    // Cut the list: record each splitter's seed and outgoing link, then
    // replace the link with the sublist id.
    //
    // SAFETY: splitter positions `i * chunk` are pairwise distinct.
    let mut sublists = (0..sublist_count)
        .into_par_iter()
        .map(|i| {
            let node = unsafe { &mut *nodes_ptr.add(i * chunk) };
            let scratch = node.next;
            node.next = Link::Sublist(i as u32);

            Sublist {
                value: node.rank,
                scratch,
                successor: None,
            }
        })
        .collect::<Vec<_>>();

    // Rank each sublist independently with an exclusive scan, tagging
    // every visited node with its sublist. A traversal ends at the
    // splitter of the next sublist (whose link became `Link::Sublist`)
    // and publishes its accumulated weight there, linking the two
    // sublists at the junction.
    //
    // SAFETY: the links form a simple path, so each node is visited by
    // exactly one traversal; a traversal never touches its own
    // splitter. Each sublist's `value` is published by at most one
    // predecessor, and no traversal reads it.
    let sublists_ptr = SharedMut::new(sublists.as_mut_ptr());
    (0..sublist_count).into_par_iter().for_each(|i| {
        let mut curr = unsafe { (*sublists_ptr.add(i)).scratch };
        let mut acc = 0;

        while let Link::Node(j) = curr {
            let node = unsafe { &mut *nodes_ptr.add(j as usize) };
            let weight = node.rank;
            node.rank = acc;
            acc += weight;

            curr = node.next;
            node.next = Link::Sublist(i as u32);
        }

        if let Link::Sublist(successor) = curr {
            unsafe {
                (*sublists_ptr.add(i)).successor = Some(successor);
                (*sublists_ptr.add(successor as usize)).value = acc;
            }
        }
    });

    // Scan the sublist table along the junction links. Afterwards each
    // sublist's `value` holds the weight of everything up to and
    // including its splitter, which is exactly the offset its members
    // are missing.
    let mut acc = 0;
    let mut visited = 0;
    let mut curr = 0_usize;
    loop {
        visited += 1;
        let weight = sublists[curr].value;
        sublists[curr].value += acc;
        acc += weight;

        match sublists[curr].successor {
            Some(next) => curr = next as usize,
            None => break,
        }
    }
    assert_eq!(
        visited, sublist_count,
        "sublist chain does not cover the list"
    );

    // Add each sublist's global offset to its members.
    nodes
        .par_chunks_mut(chunk)
        .enumerate()
        .for_each(|(c, chunk_nodes)| {
            for (i, node) in chunk_nodes.iter_mut().enumerate() {
                if c == 0 && i == 0 {
                    continue;
                }
                let owner = match node.next {
                    Link::Sublist(owner) => owner as usize,
                    Link::Node(_) | Link::End => {
                        panic!("list ranking did not reach every node")
                    }
                };
                node.rank += sublists[owner].value;
            }
        });

    nodes[0].rank = 0;
}

fn ceil_log2(n: usize) -> usize {
    let bits = usize::BITS - n.leading_zeros();
    if n.is_power_of_two() {
        usize::max(bits as usize - 1, 1)
    } else {
        bits as usize
    }
}
