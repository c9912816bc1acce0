use rayon::prelude::*;

use crate::bits::BitVec;
use crate::prefix_sum::prefix_sum;

/// Bits covered by one leaf block.
const BLOCK_BITS: usize = 512;
const WORD_BITS: usize = u64::BITS as usize;

/// Minimum and maximum running excess over a range of positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Excess {
    min: i64,
    max: i64,
}

const EMPTY: Excess = Excess {
    min: i64::MAX,
    max: i64::MIN,
};

impl Excess {
    fn combine(self, other: Excess) -> Excess {
        Excess {
            min: i64::min(self.min, other.min),
            max: i64::max(self.max, other.max),
        }
    }
}

/// A block-aggregated excess index over a parenthesis bitstring,
/// interpreting 1 as an opening and 0 as a closing symbol.
///
/// Leaf blocks summarize the minimum and maximum running excess of
/// `BLOCK_BITS` positions; inner nodes of the implicit binary tree
/// aggregate their children. The index owns the bitstring it was built
/// from.
pub struct RangeMinMaxTree {
    bits: BitVec,
    tree: Box<[Excess]>,
    blocks: usize,
}

impl RangeMinMaxTree {
    pub fn new(bits: BitVec) -> Self {
        let blocks = (bits.len() + BLOCK_BITS - 1) / BLOCK_BITS;
        if blocks == 0 {
            return Self {
                bits,
                tree: Box::new([]),
                blocks: 0,
            };
        }

        // Ones per block, then their prefix sums: the absolute excess
        // in front of block `b` is `2 * ones_before - position`.
        let mut ones = (0..blocks)
            .into_par_iter()
            .map(|b| {
                let words = block_words(&bits, b);
                words.map(|w| bits.word(w).count_ones()).sum::<u32>()
            })
            .collect::<Vec<_>>();
        prefix_sum(&mut ones);

        let leaves = blocks.next_power_of_two();
        let mut tree = vec![EMPTY; 2 * leaves].into_boxed_slice();

        tree[leaves..leaves + blocks]
            .par_iter_mut()
            .enumerate()
            .for_each(|(b, leaf)| {
                let before = if b == 0 {
                    0
                } else {
                    2 * ones[b - 1] as i64 - (b * BLOCK_BITS) as i64
                };
                *leaf = block_excess(&bits, b, before);
            });

        for i in (1..leaves).rev() {
            tree[i] = tree[2 * i].combine(tree[2 * i + 1]);
        }

        Self { bits, tree, blocks }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The encoded bitstring.
    #[inline]
    pub fn bits(&self) -> &BitVec {
        &self.bits
    }

    /// Excess after the final position.
    pub fn total_excess(&self) -> i64 {
        2 * self.bits.count_ones() as i64 - self.bits.len() as i64
    }

    /// Minimum running excess over the whole string, 0 for the empty
    /// string.
    pub fn min_excess(&self) -> i64 {
        match self.tree.get(1) {
            Some(root) => root.min,
            None => 0,
        }
    }

    /// Maximum running excess over the whole string, 0 for the empty
    /// string.
    pub fn max_excess(&self) -> i64 {
        match self.tree.get(1) {
            Some(root) => root.max,
            None => 0,
        }
    }

    /// Whether the string is a balanced parenthesis sequence.
    pub fn is_balanced(&self) -> bool {
        self.total_excess() == 0 && self.min_excess() >= 0
    }

    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks
    }
}

fn block_words(bits: &BitVec, b: usize) -> std::ops::Range<usize> {
    let first = b * (BLOCK_BITS / WORD_BITS);
    let last = usize::min(first + BLOCK_BITS / WORD_BITS, bits.word_count());
    first..last
}

fn block_excess(bits: &BitVec, b: usize, before: i64) -> Excess {
    let first = b * BLOCK_BITS;
    let last = usize::min(first + BLOCK_BITS, bits.len());

    let mut excess = before;
    let mut summary = EMPTY;
    for i in first..last {
        excess += if bits.get(i) { 1 } else { -1 };
        summary = summary.combine(Excess {
            min: excess,
            max: excess,
        });
    }

    summary
}
