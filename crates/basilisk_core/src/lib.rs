//! # BASILISK Core
//!
//! The simulation state store: recyclable entities, opaque fixed-size
//! component payloads, and bitmask-filtered systems that iterate exactly the
//! entities matching their filter each tick.
//!
//! ## Architecture Rules
//!
//! 1. **Single-threaded by design** - no locks, no atomics, no async
//! 2. **Payloads are opaque bytes** - sized at registration, typed views
//!    are an opt-in `bytemuck` convenience
//! 3. **Exact matching sets** - every structural change re-tests system
//!    filters, so updates never scan the entity table
//! 4. **Fallible growth** - every growing container surfaces allocation
//!    failure as a typed error instead of aborting
//!
//! ## Example
//!
//! ```rust,ignore
//! use basilisk_core::{ComponentDescriptor, SystemDescriptor, World};
//!
//! let mut world = World::new(1024)?;
//! let position = world.register_component(ComponentDescriptor::new(8))?;
//! let mover = world.register_system(SystemDescriptor::new(|world, ids, dt| {
//!     // ... integrate every matching entity by dt ...
//!     0
//! }))?;
//! world.require_component(mover, position)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod ecs;
pub mod memory;

pub use ecs::{
    ComponentDescriptor, ComponentMask, ComponentTypeId, ConstructorHook, DestructorHook,
    EcsError, EcsResult, EntityId, EntitySlot, MembershipHook, SparseSet, SystemDescriptor,
    SystemId, UpdateHook, World, MAX_COMPONENT_TYPES, MAX_SYSTEMS,
};
pub use memory::{ComponentArena, IdPool, OutOfMemory};
