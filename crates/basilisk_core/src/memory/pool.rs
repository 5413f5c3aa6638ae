//! # Id Pool
//!
//! LIFO stack of small integer ids, used for free-entity recycling and for
//! the deferred command queues.

use super::{grown_capacity, OutOfMemory};

/// A growable LIFO stack of `u32` ids.
///
/// The world keeps three of these: the free-entity-id pool, the destroy
/// queue, and the remove queue. The remove queue stores interleaved
/// entity-id/component-id pairs, which is why [`IdPool::push_pair`] exists:
/// it reserves room for both values before writing either, so a failed
/// reservation can never leave half a pair behind.
///
/// Capacity follows the engine-wide growth rule (`cap += cap / 2 + 2`) and
/// is tracked explicitly so the sequence is deterministic regardless of what
/// the allocator rounds reservations up to.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. The ECS is single-threaded by design.
#[derive(Debug, Default)]
pub struct IdPool {
    /// The stack storage. `len()` is the live size.
    ids: Vec<u32>,
    /// Logical capacity under the growth rule.
    capacity: usize,
}

impl IdPool {
    /// Creates an empty pool with no reserved capacity.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ids: Vec::new(),
            capacity: 0,
        }
    }

    /// Creates an empty pool with room for `capacity` ids.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfMemory`] if the reservation fails.
    pub fn with_capacity(capacity: usize) -> Result<Self, OutOfMemory> {
        let mut pool = Self::new();
        pool.reserve(capacity)?;
        Ok(pool)
    }

    /// Returns the number of ids currently in the pool.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the pool holds no ids.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the logical capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Grows the logical capacity to at least `capacity`.
    ///
    /// Pre-reserving lets hot paths (entity destruction returning ids to the
    /// free pool) push without ever hitting a growth step.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfMemory`] if the reservation fails.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), OutOfMemory> {
        if capacity <= self.capacity {
            return Ok(());
        }
        self.ids
            .try_reserve_exact(capacity - self.ids.len())
            .map_err(|_| OutOfMemory)?;
        self.capacity = capacity;
        Ok(())
    }

    /// Pushes an id onto the stack, growing if full.
    ///
    /// Amortized O(1).
    ///
    /// # Errors
    ///
    /// Returns [`OutOfMemory`] if a growth step fails to reserve.
    #[inline]
    pub fn push(&mut self, id: u32) -> Result<(), OutOfMemory> {
        self.grow_for(1)?;
        self.ids.push(id);
        Ok(())
    }

    /// Pushes two ids as an atomic pair.
    ///
    /// Room for both is reserved before either is written.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfMemory`] if a growth step fails to reserve; the pool
    /// is unchanged in that case.
    #[inline]
    pub fn push_pair(&mut self, first: u32, second: u32) -> Result<(), OutOfMemory> {
        self.grow_for(2)?;
        self.ids.push(first);
        self.ids.push(second);
        Ok(())
    }

    /// Pops the most recently pushed id.
    ///
    /// Returns `None` when the pool is empty; callers that treat an empty
    /// pool as a bug (the free-entity pool grows before popping) decide for
    /// themselves.
    #[inline]
    pub fn pop(&mut self) -> Option<u32> {
        self.ids.pop()
    }

    /// Returns the pooled ids in push order, oldest first.
    ///
    /// The command queues drain through this view.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.ids
    }

    /// Empties the pool without releasing its storage.
    #[inline]
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Applies growth steps until `extra` more ids fit.
    fn grow_for(&mut self, extra: usize) -> Result<(), OutOfMemory> {
        while self.ids.len() + extra > self.capacity {
            let new_capacity = grown_capacity(self.capacity, self.capacity);
            self.ids
                .try_reserve_exact(new_capacity - self.ids.len())
                .map_err(|_| OutOfMemory)?;
            self.capacity = new_capacity;
        }
        Ok(())
    }
}
