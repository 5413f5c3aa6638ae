//! # Entity Component System
//!
//! A bitmask-filtered ECS for game-object state.
//!
//! ## Design Philosophy
//!
//! - Entity ids are recyclable indices; the `ready` flag is the liveness test
//! - Component payloads are opaque byte records, one arena per registered type
//! - Systems keep packed matching sets, re-tested on every structural change
//! - Structural changes during an update go through deferred command queues

mod bitset;
mod component;
mod entity;
mod error;
mod sparse;
mod system;
mod world;

pub use bitset::{ComponentMask, MAX_COMPONENT_TYPES};
pub use component::{ComponentDescriptor, ComponentTypeId, ConstructorHook, DestructorHook};
pub use entity::{EntityId, EntitySlot};
pub use error::{EcsError, EcsResult};
pub use sparse::SparseSet;
pub use system::{MembershipHook, SystemDescriptor, SystemId, UpdateHook, MAX_SYSTEMS};
pub use world::World;
