//! # Component Types
//!
//! Components are opaque fixed-size payloads registered at runtime. The
//! world knows their size and their lifecycle hooks; it never knows their
//! Rust type. Typed access is an opt-in `bytemuck` view on top.

use std::any::Any;
use std::mem::{align_of, size_of};

use crate::memory::ComponentArena;

use super::entity::EntityId;

/// Identifier of a registered component type.
///
/// Assigned sequentially by [`World::register_component`], bounded by
/// [`MAX_COMPONENT_TYPES`](super::bitset::MAX_COMPONENT_TYPES). It doubles
/// as the entity-mask bit index.
///
/// [`World::register_component`]: super::world::World::register_component
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ComponentTypeId(u16);

impl ComponentTypeId {
    /// Creates a type id from its raw registration index.
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

/// Constructor hook: entity, zero-filled payload bytes, and the opaque
/// args value passed through [`World::add`].
///
/// Hooks fire while the world is mid-mutation and therefore get no world
/// access; a closure captures whatever external state it needs.
///
/// [`World::add`]: super::world::World::add
pub type ConstructorHook = Box<dyn FnMut(EntityId, &mut [u8], Option<&dyn Any>)>;

/// Destructor hook: entity and payload bytes about to be detached.
pub type DestructorHook = Box<dyn FnMut(EntityId, &mut [u8])>;

/// Registration-time description of a component type.
///
/// # Example
///
/// ```rust,ignore
/// let descriptor = ComponentDescriptor::new(8)
///     .with_constructor(|_entity, bytes, _args| bytes.fill(0))
///     .with_destructor(|entity, _bytes| println!("detached from {entity:?}"));
/// let position = world.register_component(descriptor)?;
/// ```
pub struct ComponentDescriptor {
    /// Payload size in bytes.
    pub(crate) size: usize,
    /// Optional in-place constructor.
    pub(crate) constructor: Option<ConstructorHook>,
    /// Optional in-place destructor.
    pub(crate) destructor: Option<DestructorHook>,
}

impl ComponentDescriptor {
    /// Describes a payload of `size` raw bytes with no hooks.
    ///
    /// Zero is legal and registers a tag component with an empty payload.
    #[must_use]
    pub const fn new(size: usize) -> Self {
        Self {
            size,
            constructor: None,
            destructor: None,
        }
    }

    /// Describes a payload sized for `T`, for use with the typed accessors
    /// [`World::get_as`] and [`World::get_mut_as`].
    ///
    /// # Panics
    ///
    /// Panics if `T` needs alignment above 8; arena slots sit on `u64` word
    /// boundaries and cannot hold wider alignments.
    ///
    /// [`World::get_as`]: super::world::World::get_as
    /// [`World::get_mut_as`]: super::world::World::get_mut_as
    #[must_use]
    pub fn for_type<T: bytemuck::Pod>() -> Self {
        assert!(
            align_of::<T>() <= 8,
            "component payloads are word-aligned; alignment above 8 is unsupported"
        );
        Self::new(size_of::<T>())
    }

    /// Attaches a constructor hook, invoked by `add` after zero-filling.
    #[must_use]
    pub fn with_constructor<F>(mut self, hook: F) -> Self
    where
        F: FnMut(EntityId, &mut [u8], Option<&dyn Any>) + 'static,
    {
        self.constructor = Some(Box::new(hook));
        self
    }

    /// Attaches a destructor hook, invoked by `remove` and `destroy`.
    #[must_use]
    pub fn with_destructor<F>(mut self, hook: F) -> Self
    where
        F: FnMut(EntityId, &mut [u8]) + 'static,
    {
        self.destructor = Some(Box::new(hook));
        self
    }
}

/// A registered component type: its arena plus its hooks.
pub(crate) struct ComponentRecord {
    /// Payload storage, indexed by entity id.
    pub(crate) arena: ComponentArena,
    /// Optional in-place constructor.
    pub(crate) constructor: Option<ConstructorHook>,
    /// Optional in-place destructor.
    pub(crate) destructor: Option<DestructorHook>,
}

impl ComponentRecord {
    /// Builds the record for a freshly registered descriptor.
    pub(crate) fn from_descriptor(descriptor: ComponentDescriptor) -> Self {
        Self {
            arena: ComponentArena::new(descriptor.size),
            constructor: descriptor.constructor,
            destructor: descriptor.destructor,
        }
    }
}
