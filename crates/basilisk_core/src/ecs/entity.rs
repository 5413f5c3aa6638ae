//! # Entity Management
//!
//! Entities are recyclable integer identities. A live entity owns nothing
//! but a component-membership mask; validity is the slot's `ready` flag, and
//! an id that has been destroyed aliases its future reissue by design.

use super::bitset::ComponentMask;

/// Unique identifier for an entity.
///
/// A plain index into the world's entity table. Unlike generation-tagged
/// handles, a recycled id compares equal to its earlier incarnation; callers
/// that hold ids across destruction use [`World::is_ready`] as the validity
/// probe.
///
/// [`World::is_ready`]: super::world::World::is_ready
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates an entity id from a raw table index.
    ///
    /// Ids are normally minted by [`World::create`]; constructing one by
    /// hand is only useful for tests and bindings that round-trip raw ids.
    ///
    /// [`World::create`]: super::world::World::create
    #[inline]
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw table index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// One slot of the entity table.
///
/// Invariant: `ready == false` implies `mask` is all-zero; the id is then
/// either in the free pool or pending a queued destruction.
#[derive(Clone, Copy, Debug, Default)]
pub struct EntitySlot {
    /// Bitmask of attached component types.
    pub mask: ComponentMask,
    /// Whether this slot currently holds a live entity.
    pub ready: bool,
}

impl EntitySlot {
    /// Checks if this entity has the component type at `bit`.
    #[inline]
    #[must_use]
    pub const fn has_component(&self, bit: usize) -> bool {
        self.mask.test(bit)
    }

    /// Returns the slot to its free state: not ready, mask zeroed.
    #[inline]
    pub fn reset(&mut self) {
        self.mask.clear();
        self.ready = false;
    }
}
