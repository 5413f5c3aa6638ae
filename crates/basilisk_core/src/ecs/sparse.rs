//! # Sparse Set
//!
//! Packed membership index over entity ids: O(1) test, insert, and remove,
//! with swap-based removal that does not preserve iteration order.

use crate::memory::{grown_capacity, OutOfMemory};

use super::entity::EntityId;

/// A sparse set of entity ids.
///
/// Two arrays: `dense` packs the member ids contiguously for iteration;
/// `sparse` maps an id to its position in `dense`. An id is a member iff
/// `sparse[id] < len && dense[sparse[id]] == id`, which is why stale sparse
/// entries never need scrubbing.
///
/// Removal swaps the last dense element into the vacated position, so
/// **iteration order is not preserved across removals**. Callers must not
/// rely on it.
#[derive(Debug, Default)]
pub struct SparseSet {
    /// Packed member ids.
    dense: Vec<EntityId>,
    /// id -> dense position. Length is the capacity, zero-filled.
    sparse: Vec<u32>,
}

impl SparseSet {
    /// Creates an empty set with no reserved capacity.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dense: Vec::new(),
            sparse: Vec::new(),
        }
    }

    /// Returns the number of member ids.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Returns `true` if the set has no members.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Returns the capacity in ids (the sparse array's reach).
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.sparse.len()
    }

    /// Returns the packed member ids.
    ///
    /// Order is unspecified after any removal.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[EntityId] {
        &self.dense
    }

    /// Finds the dense position of `id`, or `None` if absent.
    #[inline]
    #[must_use]
    pub fn find(&self, id: EntityId) -> Option<usize> {
        let position = *self.sparse.get(id.index() as usize)? as usize;
        if position < self.dense.len() && self.dense[position] == id {
            Some(position)
        } else {
            None
        }
    }

    /// Checks membership of `id`.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.find(id).is_some()
    }

    /// Inserts `id`, growing both arrays if it exceeds the capacity.
    ///
    /// Returns `true` if the id was actually inserted, `false` if it was
    /// already a member. Callers key exactly-once "added" hooks off this.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfMemory`] if growth fails; the set is unchanged.
    pub fn add(&mut self, id: EntityId) -> Result<bool, OutOfMemory> {
        let index = id.index() as usize;
        if index >= self.capacity() {
            let new_capacity = grown_capacity(self.capacity(), index);
            self.sparse
                .try_reserve_exact(new_capacity - self.sparse.len())
                .map_err(|_| OutOfMemory)?;
            self.dense
                .try_reserve_exact(new_capacity - self.dense.len())
                .map_err(|_| OutOfMemory)?;
            self.sparse.resize(new_capacity, 0);
        }
        if self.contains(id) {
            return Ok(false);
        }
        self.sparse[index] = self.dense.len() as u32;
        self.dense.push(id);
        Ok(true)
    }

    /// Removes `id` by swapping the last dense element into its position.
    ///
    /// Returns `true` if the id was a member, `false` for a no-op.
    pub fn remove(&mut self, id: EntityId) -> bool {
        let Some(position) = self.find(id) else {
            return false;
        };
        self.dense.swap_remove(position);
        if let Some(&moved) = self.dense.get(position) {
            self.sparse[moved.index() as usize] = position as u32;
        }
        true
    }

    /// Empties the set without releasing storage.
    ///
    /// Stale sparse entries are harmless: the membership test re-validates
    /// against the dense array.
    #[inline]
    pub fn clear(&mut self) {
        self.dense.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u32) -> EntityId {
        EntityId::new(raw)
    }

    #[test]
    fn test_sparse_add_find_remove() {
        let mut set = SparseSet::new();
        assert!(set.add(id(3)).unwrap());
        assert!(set.add(id(7)).unwrap());

        assert_eq!(set.len(), 2);
        assert!(set.contains(id(3)));
        assert!(set.contains(id(7)));
        assert!(!set.contains(id(4)));

        assert!(set.remove(id(3)));
        assert!(!set.contains(id(3)));
        assert!(!set.remove(id(3)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_sparse_duplicate_add_reports_false() {
        let mut set = SparseSet::new();
        assert!(set.add(id(5)).unwrap());
        assert!(!set.add(id(5)).unwrap());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_sparse_swap_remove_fixes_moved_entry() {
        let mut set = SparseSet::new();
        for raw in [10, 20, 30] {
            set.add(id(raw)).unwrap();
        }

        // Removing the first member swaps 30 into its slot.
        assert!(set.remove(id(10)));
        assert_eq!(set.len(), 2);
        assert!(set.contains(id(20)));
        assert!(set.contains(id(30)));
        assert_eq!(set.find(id(30)), Some(0));
    }

    #[test]
    fn test_sparse_growth_zero_fills() {
        let mut set = SparseSet::new();
        set.add(id(100)).unwrap();
        assert!(set.capacity() > 100);

        // Zero-filled sparse slots must not produce false members.
        assert!(!set.contains(id(0)));
        assert!(!set.contains(id(99)));
        assert!(set.contains(id(100)));
    }

    #[test]
    fn test_sparse_clear_keeps_membership_test_sound() {
        let mut set = SparseSet::new();
        set.add(id(5)).unwrap();
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(id(5)));

        // A stale sparse[5] = 0 entry must not alias a new member at dense 0.
        set.add(id(7)).unwrap();
        assert!(!set.contains(id(5)));
        assert!(set.contains(id(7)));
    }

    #[test]
    fn test_sparse_remove_last_member() {
        let mut set = SparseSet::new();
        set.add(id(1)).unwrap();
        set.add(id(2)).unwrap();

        assert!(set.remove(id(2)));
        assert!(set.contains(id(1)));
        assert!(!set.contains(id(2)));
    }
}
