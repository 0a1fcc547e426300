//! # Fixed-width Bitset
//!
//! Component membership and signature masks are bitsets of width C,
//! where C is the registered component type count. The width is fixed
//! when the registry is built and never changes afterwards.
//!
//! At 64 bits per `u64` word, any realistic component set fits in one
//! or two words, so every test is a handful of AND/compare operations.

/// A fixed-width bit-vector backed by `u64` words.
///
/// Bit `i` of an entity's bitset is set iff component type `i` is
/// currently attached to that entity. Signature masks use the same
/// representation, which makes the superset test a word-wise
/// `(entity & mask) == mask`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitset {
    /// Bit storage, 64 bits per word.
    words: Box<[u64]>,
    /// Width in bits.
    width: usize,
}

impl Bitset {
    /// Creates an empty bitset of the given width.
    ///
    /// # Arguments
    ///
    /// * `width` - Number of addressable bits (the component count)
    #[must_use]
    pub fn empty(width: usize) -> Self {
        let word_count = width.div_ceil(64);
        Self {
            words: vec![0u64; word_count].into_boxed_slice(),
            width,
        }
    }

    /// Returns the width in bits.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Sets bit `bit`.
    #[inline]
    pub fn set(&mut self, bit: usize) {
        debug_assert!(bit < self.width, "bit {bit} out of width {}", self.width);
        self.words[bit / 64] |= 1u64 << (bit % 64);
    }

    /// Clears bit `bit`.
    #[inline]
    pub fn clear(&mut self, bit: usize) {
        debug_assert!(bit < self.width, "bit {bit} out of width {}", self.width);
        self.words[bit / 64] &= !(1u64 << (bit % 64));
    }

    /// Tests bit `bit`.
    #[inline]
    #[must_use]
    pub fn test(&self, bit: usize) -> bool {
        debug_assert!(bit < self.width, "bit {bit} out of width {}", self.width);
        (self.words[bit / 64] >> (bit % 64)) & 1 == 1
    }

    /// Clears every bit. Keeps the allocation.
    #[inline]
    pub fn clear_all(&mut self) {
        for word in self.words.iter_mut() {
            *word = 0;
        }
    }

    /// Returns `true` if no bit is set.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Superset test: `(self & required) == required`.
    ///
    /// An entity matches a signature iff its bitset contains every bit
    /// of the signature's mask.
    ///
    /// # Panics
    ///
    /// Panics if the widths differ; a truncated comparison would report
    /// a match that ignores part of the mask.
    #[inline]
    #[must_use]
    pub fn contains_all(&self, required: &Bitset) -> bool {
        assert_eq!(self.width, required.width, "bitset width mismatch");
        self.words
            .iter()
            .zip(required.words.iter())
            .all(|(&have, &need)| have & need == need)
    }
}
