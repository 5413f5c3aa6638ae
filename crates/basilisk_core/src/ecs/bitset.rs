//! # Component Mask
//!
//! Fixed-width bitset tracking which component types an entity carries and
//! which types a system requires or excludes.

/// Maximum number of component types a world can register.
///
/// Fixed at build time; it sets the width of every [`ComponentMask`].
pub const MAX_COMPONENT_TYPES: usize = 256;

/// Words backing one mask, 64 bits each.
const WORDS: usize = MAX_COMPONENT_TYPES / 64;

/// A fixed-width bit vector over component type ids.
///
/// Pure value semantics: `Copy`, no allocation, 64 component types per word.
/// Equality is derived, which is the `equal` operation. Bit indices must be
/// below [`MAX_COMPONENT_TYPES`]; that is the caller's contract and only
/// checked by debug assertions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComponentMask {
    /// The bit words, lowest indices in word 0.
    bits: [u64; WORDS],
}

impl ComponentMask {
    /// The all-zero mask.
    pub const EMPTY: Self = Self { bits: [0; WORDS] };

    /// Checks whether `bit` is set.
    #[inline]
    #[must_use]
    pub const fn test(&self, bit: usize) -> bool {
        debug_assert!(bit < MAX_COMPONENT_TYPES);
        (self.bits[bit / 64] >> (bit % 64)) & 1 == 1
    }

    /// Sets or clears `bit`.
    #[inline]
    pub fn set(&mut self, bit: usize, on: bool) {
        debug_assert!(bit < MAX_COMPONENT_TYPES);
        let word = bit / 64;
        let mask = 1u64 << (bit % 64);
        if on {
            self.bits[word] |= mask;
        } else {
            self.bits[word] &= !mask;
        }
    }

    /// Returns the bitwise AND of two masks.
    #[inline]
    #[must_use]
    pub const fn and(&self, other: &Self) -> Self {
        let mut out = [0u64; WORDS];
        let mut word = 0;
        while word < WORDS {
            out[word] = self.bits[word] & other.bits[word];
            word += 1;
        }
        Self { bits: out }
    }

    /// Returns the bitwise OR of two masks.
    #[inline]
    #[must_use]
    pub const fn or(&self, other: &Self) -> Self {
        let mut out = [0u64; WORDS];
        let mut word = 0;
        while word < WORDS {
            out[word] = self.bits[word] | other.bits[word];
            word += 1;
        }
        Self { bits: out }
    }

    /// Returns the bitwise complement.
    #[inline]
    #[must_use]
    pub const fn not(&self) -> Self {
        let mut out = [0u64; WORDS];
        let mut word = 0;
        while word < WORDS {
            out[word] = !self.bits[word];
            word += 1;
        }
        Self { bits: out }
    }

    /// Checks whether any bit is set.
    #[inline]
    #[must_use]
    pub const fn any_set(&self) -> bool {
        let mut word = 0;
        while word < WORDS {
            if self.bits[word] != 0 {
                return true;
            }
            word += 1;
        }
        false
    }

    /// Zeroes the mask in place.
    #[inline]
    pub fn clear(&mut self) {
        self.bits = [0; WORDS];
    }

    /// Iterates the set bit indices in ascending order.
    ///
    /// O(set bits), one `trailing_zeros` per step.
    pub fn iter_set_bits(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter().enumerate().flat_map(|(word_index, &word)| {
            let mut remaining = word;
            std::iter::from_fn(move || {
                if remaining == 0 {
                    return None;
                }
                let bit = remaining.trailing_zeros() as usize;
                remaining &= remaining - 1;
                Some(word_index * 64 + bit)
            })
        })
    }
}
