//! # Component Arena
//!
//! One growable record buffer per registered component type, indexed
//! directly by entity id.

use super::{grown_capacity, OutOfMemory};

/// A growable, never-shrinking buffer of fixed-size records.
///
/// Records are addressed by entity id, NOT packed: one slot per id the arena
/// has ever grown to cover. This deliberately trades memory for O(1) payload
/// access, while filtered iteration goes through the packed sparse sets
/// instead. Packing this storage would change the growth and invalidation
/// contract, so don't.
///
/// The backing store is a `u64` word buffer with each record starting on a
/// word boundary. That keeps every slot 8-byte aligned, which is what lets
/// callers take `bytemuck` views of payloads without any `unsafe`.
///
/// # Thread Safety
///
/// NOT thread-safe. The ECS is single-threaded by design.
#[derive(Debug)]
pub struct ComponentArena {
    /// Record size in bytes, fixed at registration.
    stride: usize,
    /// Whole `u64` words per record.
    stride_words: usize,
    /// Capacity in records.
    capacity: usize,
    /// Highest record index ever touched, plus one.
    high_water: usize,
    /// Word-aligned backing storage, `capacity * stride_words` long.
    data: Vec<u64>,
}

impl ComponentArena {
    /// Creates an empty arena for records of `stride` bytes.
    ///
    /// A zero stride is legal: tag components carry no payload and their
    /// slots are empty byte slices.
    #[must_use]
    pub const fn new(stride: usize) -> Self {
        Self {
            stride,
            stride_words: stride.div_ceil(8),
            capacity: 0,
            high_water: 0,
            data: Vec::new(),
        }
    }

    /// Returns the record size in bytes.
    #[inline]
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the capacity in records.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the highest record index ever ensured, plus one.
    #[inline]
    #[must_use]
    pub const fn records(&self) -> usize {
        self.high_water
    }

    /// Grows the arena so the record at `index` exists.
    ///
    /// Applies the growth rule (`cap += cap / 2 + 2`) until `cap > index`,
    /// zero-filling new slots and preserving existing bytes. Never shrinks.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfMemory`] if the reservation fails; the arena is
    /// unchanged in that case.
    pub fn ensure_capacity(&mut self, index: usize) -> Result<(), OutOfMemory> {
        if index + 1 > self.high_water {
            self.high_water = index + 1;
        }
        if index < self.capacity {
            return Ok(());
        }
        let new_capacity = grown_capacity(self.capacity, index);
        let new_len = new_capacity * self.stride_words;
        self.data
            .try_reserve_exact(new_len - self.data.len())
            .map_err(|_| OutOfMemory)?;
        self.data.resize(new_len, 0);
        self.capacity = new_capacity;
        Ok(())
    }

    /// Returns the record at `index` as a `stride`-byte slice.
    ///
    /// `None` if the arena has not grown to cover `index`. Attachment is a
    /// world-level concept; the arena only knows about storage.
    #[inline]
    #[must_use]
    pub fn bytes(&self, index: usize) -> Option<&[u8]> {
        if index >= self.capacity {
            return None;
        }
        if self.stride == 0 {
            return Some(&[]);
        }
        let words = &self.data[index * self.stride_words..(index + 1) * self.stride_words];
        Some(&bytemuck::cast_slice(words)[..self.stride])
    }

    /// Returns the record at `index` as a mutable `stride`-byte slice.
    ///
    /// `None` if the arena has not grown to cover `index`.
    #[inline]
    pub fn bytes_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        if index >= self.capacity {
            return None;
        }
        if self.stride == 0 {
            return Some(&mut []);
        }
        let words = &mut self.data[index * self.stride_words..(index + 1) * self.stride_words];
        Some(&mut bytemuck::cast_slice_mut(words)[..self.stride])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_slot_isolation() {
        let mut arena = ComponentArena::new(3);
        arena.ensure_capacity(2).unwrap();

        arena.bytes_mut(0).unwrap().copy_from_slice(&[1, 2, 3]);
        arena.bytes_mut(2).unwrap().copy_from_slice(&[7, 8, 9]);

        assert_eq!(arena.bytes(0).unwrap(), &[1, 2, 3]);
        assert_eq!(arena.bytes(1).unwrap(), &[0, 0, 0]);
        assert_eq!(arena.bytes(2).unwrap(), &[7, 8, 9]);
    }

    #[test]
    fn test_arena_growth_preserves_bytes() {
        let mut arena = ComponentArena::new(4);
        let mut growths = 0;
        let mut last_capacity = arena.capacity();

        for index in 0..64usize {
            arena.ensure_capacity(index).unwrap();
            if arena.capacity() != last_capacity {
                growths += 1;
                last_capacity = arena.capacity();
            }
            let value = u32::try_from(index).unwrap().wrapping_mul(0x9E37_79B9);
            arena
                .bytes_mut(index)
                .unwrap()
                .copy_from_slice(&value.to_le_bytes());
        }
        assert!(growths >= 3, "expected at least 3 growths, saw {growths}");

        for index in 0..64usize {
            let value = u32::try_from(index).unwrap().wrapping_mul(0x9E37_79B9);
            assert_eq!(arena.bytes(index).unwrap(), &value.to_le_bytes());
        }
    }

    #[test]
    fn test_arena_never_shrinks() {
        let mut arena = ComponentArena::new(8);
        arena.ensure_capacity(100).unwrap();
        let grown = arena.capacity();

        arena.ensure_capacity(0).unwrap();
        assert_eq!(arena.capacity(), grown);
        assert_eq!(arena.records(), 101);
    }

    #[test]
    fn test_arena_out_of_range_is_none() {
        let mut arena = ComponentArena::new(8);
        assert!(arena.bytes(0).is_none());

        arena.ensure_capacity(0).unwrap();
        assert!(arena.bytes(0).is_some());
        assert!(arena.bytes(arena.capacity()).is_none());
    }

    #[test]
    fn test_arena_zero_stride() {
        let mut arena = ComponentArena::new(0);
        arena.ensure_capacity(10).unwrap();
        assert_eq!(arena.bytes(10).unwrap(), &[] as &[u8]);
    }

    #[test]
    fn test_arena_unaligned_stride_pads_to_words() {
        let arena = ComponentArena::new(13);
        assert_eq!(arena.stride(), 13);
        // 13 bytes occupy two words per record.
        assert_eq!(arena.stride_words, 2);
    }
}
