//! # System Registry Types
//!
//! A system is a require/exclude filter over component masks plus a set of
//! callbacks. The world maintains, for every system, the packed sparse set
//! of entity ids currently matching its filter, so update never scans the
//! entity table.

use super::bitset::ComponentMask;
use super::entity::EntityId;
use super::sparse::SparseSet;
use super::world::World;

/// Maximum number of systems a world can register.
pub const MAX_SYSTEMS: usize = 64;

/// Identifier of a registered system.
///
/// Assigned sequentially by [`World::register_system`], bounded by
/// [`MAX_SYSTEMS`].
///
/// [`World::register_system`]: super::world::World::register_system
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct SystemId(u16);

impl SystemId {
    /// Creates a system id from its raw registration index.
    #[inline]
    #[must_use]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the raw registration index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u16 {
        self.0
    }
}

/// Update hook: the world, the ids matching the filter this tick, and the
/// delta time. Returns a status code; zero continues, anything else stops
/// [`World::update_systems`] and propagates to the caller.
///
/// The id slice is a snapshot: structural changes made through the world
/// during the call do not alias it. Destroying entities or removing
/// components that this same pass iterates must still go through
/// [`World::queue_destroy`] / [`World::queue_remove`].
///
/// [`World::update_systems`]: super::world::World::update_systems
/// [`World::queue_destroy`]: super::world::World::queue_destroy
/// [`World::queue_remove`]: super::world::World::queue_remove
pub type UpdateHook = Box<dyn FnMut(&mut World, &[EntityId], f32) -> i32>;

/// Membership hook, fired exactly once per first-match or last-match
/// transition. No world access: these fire while the world is mid-mutation.
pub type MembershipHook = Box<dyn FnMut(EntityId)>;

/// Registration-time description of a system.
///
/// # Example
///
/// ```rust,ignore
/// let descriptor = SystemDescriptor::new(|world, entities, dt| {
///     for &entity in entities {
///         // ... integrate, then maybe world.queue_destroy(entity) ...
///     }
///     0
/// })
/// .with_added(|entity| println!("{entity:?} entered"))
/// .with_removed(|entity| println!("{entity:?} left"));
/// ```
pub struct SystemDescriptor {
    /// The per-tick update hook.
    pub(crate) update: UpdateHook,
    /// Optional first-match hook.
    pub(crate) on_added: Option<MembershipHook>,
    /// Optional last-match hook.
    pub(crate) on_removed: Option<MembershipHook>,
}

impl SystemDescriptor {
    /// Describes a system with the given update hook and no membership
    /// hooks.
    #[must_use]
    pub fn new<F>(update: F) -> Self
    where
        F: FnMut(&mut World, &[EntityId], f32) -> i32 + 'static,
    {
        Self {
            update: Box::new(update),
            on_added: None,
            on_removed: None,
        }
    }

    /// Attaches a hook fired when an entity starts matching the filter.
    #[must_use]
    pub fn with_added<F>(mut self, hook: F) -> Self
    where
        F: FnMut(EntityId) + 'static,
    {
        self.on_added = Some(Box::new(hook));
        self
    }

    /// Attaches a hook fired when an entity stops matching the filter.
    #[must_use]
    pub fn with_removed<F>(mut self, hook: F) -> Self
    where
        F: FnMut(EntityId) + 'static,
    {
        self.on_removed = Some(Box::new(hook));
        self
    }
}

/// A registered system: filter, matching set, and callbacks.
pub(crate) struct SystemRecord {
    /// Gates update only; membership is maintained while disabled.
    pub(crate) active: bool,
    /// Component types an entity must carry to match.
    pub(crate) require: ComponentMask,
    /// Component types that disqualify an entity.
    pub(crate) exclude: ComponentMask,
    /// The ids currently matching the filter.
    pub(crate) entities: SparseSet,
    /// Per-tick hook. `None` exactly while the hook runs, which is how
    /// same-system re-entry is detected.
    pub(crate) update: Option<UpdateHook>,
    /// Optional first-match hook.
    pub(crate) on_added: Option<MembershipHook>,
    /// Optional last-match hook.
    pub(crate) on_removed: Option<MembershipHook>,
}

impl SystemRecord {
    /// Builds the record for a freshly registered descriptor.
    pub(crate) fn from_descriptor(descriptor: SystemDescriptor) -> Self {
        Self {
            active: true,
            require: ComponentMask::EMPTY,
            exclude: ComponentMask::EMPTY,
            entities: SparseSet::new(),
            update: Some(descriptor.update),
            on_added: descriptor.on_added,
            on_removed: descriptor.on_removed,
        }
    }

    /// The filter predicate: no excluded bit present, all required bits
    /// present.
    #[inline]
    pub(crate) fn matches(&self, mask: &ComponentMask) -> bool {
        !mask.and(&self.exclude).any_set() && mask.and(&self.require) == self.require
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SystemRecord {
        SystemRecord::from_descriptor(SystemDescriptor::new(|_, _, _| 0))
    }

    #[test]
    fn test_filter_requires_all_bits() {
        let mut sys = record();
        sys.require.set(0, true);
        sys.require.set(2, true);

        let mut mask = ComponentMask::EMPTY;
        mask.set(0, true);
        assert!(!sys.matches(&mask));

        mask.set(2, true);
        assert!(sys.matches(&mask));

        mask.set(5, true);
        assert!(sys.matches(&mask), "extra bits must not disqualify");
    }

    #[test]
    fn test_filter_exclusion_wins() {
        let mut sys = record();
        sys.require.set(0, true);
        sys.exclude.set(1, true);

        let mut mask = ComponentMask::EMPTY;
        mask.set(0, true);
        assert!(sys.matches(&mask));

        mask.set(1, true);
        assert!(!sys.matches(&mask));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let sys = record();
        assert!(sys.matches(&ComponentMask::EMPTY));

        let mut mask = ComponentMask::EMPTY;
        mask.set(40, true);
        assert!(sys.matches(&mask));
    }
}
