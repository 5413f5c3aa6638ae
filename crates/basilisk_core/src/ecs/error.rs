//! # ECS Errors
//!
//! The source of truth for every way a world operation can fail. All
//! failures are local and synchronous; everything except `OutOfMemory` is a
//! programming error on the caller's side.

use thiserror::Error;

use super::component::ComponentTypeId;
use super::entity::EntityId;
use super::system::SystemId;
use crate::memory::OutOfMemory;

/// Errors produced by world operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The entity id is out of range or its slot is not ready.
    #[error("entity {} is out of range or not ready", .id.index())]
    InvalidEntity {
        /// The offending id.
        id: EntityId,
    },

    /// The component type id exceeds the registered count.
    #[error("component type {} is not registered", .id.index())]
    UnknownComponentType {
        /// The offending type id.
        id: ComponentTypeId,
    },

    /// The system id exceeds the registered count.
    #[error("system {} is not registered", .id.index())]
    UnknownSystem {
        /// The offending system id.
        id: SystemId,
    },

    /// Registration would exceed the compile-time component maximum.
    #[error("component registry is full: at most {max} types")]
    ComponentLimitExceeded {
        /// The compile-time maximum.
        max: usize,
    },

    /// Registration would exceed the compile-time system maximum.
    #[error("system registry is full: at most {max} systems")]
    SystemLimitExceeded {
        /// The compile-time maximum.
        max: usize,
    },

    /// `add` on a component type the entity already carries.
    #[error("component {} is already attached to entity {}", .component.index(), .entity.index())]
    DuplicateComponent {
        /// The target entity.
        entity: EntityId,
        /// The doubly-attached type.
        component: ComponentTypeId,
    },

    /// `remove`/`queue_remove` on a component the entity does not carry.
    #[error("component {} is not attached to entity {}", .component.index(), .entity.index())]
    ComponentNotAttached {
        /// The target entity.
        entity: EntityId,
        /// The absent type.
        component: ComponentTypeId,
    },

    /// A growth path failed to reserve memory.
    #[error(transparent)]
    OutOfMemory(#[from] OutOfMemory),

    /// `update_system` on a system that is already mid-update.
    #[error("system {} is already mid-update", .system.index())]
    ReentrantUpdate {
        /// The re-entered system.
        system: SystemId,
    },
}

/// Result alias used across the ECS surface.
pub type EcsResult<T> = Result<T, EcsError>;
