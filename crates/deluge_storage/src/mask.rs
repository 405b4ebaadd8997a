//! Presence bitset shared by every component type.
//!
//! Conceptually a 2-D bit matrix addressed by `(entity, component type)`.
//! Physically it is one flat array of words where each entity owns a row of
//! `stride` words, and `stride = ceil(type_count / WORD_BITS)` is derived from
//! the number of registered types at call time.
//!
//! Because the stride depends on the live type count, registering a type that
//! pushes the count over a word boundary moves every row. [`PresenceMask::relayout`]
//! migrates the existing rows to the new stride so previously set bits stay put.

use crate::growth::ensure_capacity;

/// Number of bits in one mask word.
pub const WORD_BITS: usize = u64::BITS as usize;

/// Returns the row stride, in words, for the given number of component types.
#[must_use]
pub const fn stride(type_count: usize) -> usize {
    type_count.div_ceil(WORD_BITS)
}

/// Flattened presence bit matrix.
#[derive(Debug, Clone, Default)]
pub struct PresenceMask {
    words: Vec<u64>,
}

impl PresenceMask {
    /// Creates an empty mask.
    #[must_use]
    pub fn new() -> Self {
        Self { words: Vec::new() }
    }

    fn locate(entity: usize, component: usize, type_count: usize) -> (usize, u64) {
        let word = entity * stride(type_count) + component / WORD_BITS;
        let bit = 1u64 << (component % WORD_BITS);
        (word, bit)
    }

    /// Returns the number of words currently allocated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if no word has ever been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns true if any bit is set.
    #[must_use]
    pub fn any(&self) -> bool {
        self.words.iter().any(|word| *word != 0)
    }

    /// Returns true if the word holding `(entity, component)` is allocated.
    #[must_use]
    pub fn is_addressable(&self, entity: usize, component: usize, type_count: usize) -> bool {
        let (word, _) = Self::locate(entity, component, type_count);
        word < self.words.len()
    }

    /// Sets the bit for `(entity, component)`, growing the word array as needed.
    pub fn insert(&mut self, entity: usize, component: usize, type_count: usize) {
        let (word, bit) = Self::locate(entity, component, type_count);
        ensure_capacity(&mut self.words, word);
        self.words[word] |= bit;
    }

    /// Clears the bit for `(entity, component)`.
    ///
    /// Returns `false` if the bit is not addressable, `true` otherwise,
    /// regardless of whether it was set.
    pub fn remove(&mut self, entity: usize, component: usize, type_count: usize) -> bool {
        let (word, bit) = Self::locate(entity, component, type_count);
        match self.words.get_mut(word) {
            Some(slot) => {
                *slot &= !bit;
                true
            }
            None => false,
        }
    }

    /// Returns whether the bit for `(entity, component)` is set.
    ///
    /// Out-of-range addresses read as unset.
    #[must_use]
    pub fn contains(&self, entity: usize, component: usize, type_count: usize) -> bool {
        let (word, bit) = Self::locate(entity, component, type_count);
        self.words.get(word).is_some_and(|slot| slot & bit != 0)
    }

    /// Clears every bit in the row for `entity`.
    pub fn clear_row(&mut self, entity: usize, type_count: usize) {
        let stride = stride(type_count);
        let start = (entity * stride).min(self.words.len());
        let end = (start + stride).min(self.words.len());
        self.words[start..end].fill(0);
    }

    /// Moves every row from the stride of `old_count` types to the stride of
    /// `new_count` types.
    ///
    /// Returns `true` if the rows were moved. Nothing happens when the stride
    /// is unchanged or when no row could hold data yet.
    pub fn relayout(&mut self, old_count: usize, new_count: usize) -> bool {
        let old_stride = stride(old_count);
        let new_stride = stride(new_count);
        if old_stride == new_stride || old_stride == 0 || self.words.is_empty() {
            return false;
        }

        let rows = self.words.len().div_ceil(old_stride);
        let mut words = vec![0u64; rows * new_stride];
        for (row, chunk) in self.words.chunks(old_stride).enumerate() {
            let keep = chunk.len().min(new_stride);
            let start = row * new_stride;
            words[start..start + keep].copy_from_slice(&chunk[..keep]);
        }

        self.words = words;
        true
    }
}
