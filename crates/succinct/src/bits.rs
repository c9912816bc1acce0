use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

const WORD_BITS: usize = u64::BITS as usize;

/// A fixed-length bit vector backed by 64-bit words.
///
/// Bits are set either through `&mut self` ([`BitVec::set`]) or, from
/// concurrent workers, through [`BitVec::set_atomic`], which performs a
/// lock-free fetch-or on the enclosing word. Concurrent sets of
/// adjacent bits sharing a word do not lose updates.
pub struct BitVec {
    words: Box<[AtomicU64]>,
    len: usize,
}

impl BitVec {
    /// Creates a zeroed bit vector of `len` bits.
    pub fn new(len: usize) -> Self {
        let mut words = Vec::new();
        words.resize_with((len + WORD_BITS - 1) / WORD_BITS, || AtomicU64::new(0));

        Self {
            words: words.into_boxed_slice(),
            len,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sets bit `i` without synchronization.
    #[inline]
    pub fn set(&mut self, i: usize) {
        assert!(i < self.len, "bit {} out of bounds ({})", i, self.len);
        *self.words[i / WORD_BITS].get_mut() |= 1 << (i % WORD_BITS);
    }

    /// Sets bit `i` with an atomic fetch-or on the enclosing word.
    #[inline]
    pub fn set_atomic(&self, i: usize) {
        assert!(i < self.len, "bit {} out of bounds ({})", i, self.len);
        self.words[i / WORD_BITS].fetch_or(1 << (i % WORD_BITS), Ordering::AcqRel);
    }

    #[inline]
    pub fn get(&self, i: usize) -> bool {
        assert!(i < self.len, "bit {} out of bounds ({})", i, self.len);
        self.words[i / WORD_BITS].load(Ordering::SeqCst) >> (i % WORD_BITS) & 1 == 1
    }

    pub fn count_ones(&self) -> usize {
        self.words
            .iter()
            .map(|word| word.load(Ordering::SeqCst).count_ones() as usize)
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }

    /// The `w`-th backing word. Bits past `len` are zero.
    #[inline]
    pub fn word(&self, w: usize) -> u64 {
        self.words[w].load(Ordering::SeqCst)
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

impl fmt::Debug for BitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
