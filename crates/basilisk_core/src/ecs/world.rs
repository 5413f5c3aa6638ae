//! # ECS World
//!
//! The central container for all simulation state: the entity table, one
//! payload arena per registered component type, the system registry, and the
//! deferred command queues that make structural changes safe during updates.

use std::any::Any;

use crate::memory::{grown_capacity, IdPool, OutOfMemory};

use super::bitset::MAX_COMPONENT_TYPES;
use super::component::{ComponentDescriptor, ComponentRecord, ComponentTypeId};
use super::entity::{EntityId, EntitySlot};
use super::error::{EcsError, EcsResult};
use super::system::{SystemDescriptor, SystemId, SystemRecord, MAX_SYSTEMS};

/// The ECS World - container for all game-object state.
///
/// Entities are recyclable `u32` ids. Components are opaque byte payloads,
/// sized at registration and stored one arena per type. Systems are
/// require/exclude filters over the per-entity component masks; the world
/// keeps each system's matching set packed and exact after every structural
/// change, so updates iterate without scanning.
///
/// Dropping the world releases storage without firing destructor hooks.
/// Call [`World::reset`] first when payload cleanup matters.
///
/// # Capacity
///
/// The entity table starts at the capacity given to [`World::new`] and grows
/// on demand, so the initial value is a sizing hint rather than a limit.
///
/// # Example
///
/// ```rust,ignore
/// let mut world = World::new(1024)?;
///
/// let position = world.register_component(ComponentDescriptor::new(8))?;
/// let mover = world.register_system(SystemDescriptor::new(|world, ids, dt| {
///     for &id in ids {
///         // ... integrate world.get_mut(id, position) by dt ...
///     }
///     0
/// }))?;
/// world.require_component(mover, position)?;
///
/// let player = world.create()?;
/// world.add(player, position, None)?;
/// world.update_systems(0.016)?;
/// ```
pub struct World {
    /// One slot per allocated id; `ready` distinguishes live from recycled.
    entities: Vec<EntitySlot>,
    /// Recycled and never-issued entity ids, popped LIFO by `create`.
    free: IdPool,
    /// Registered component types, indexed by `ComponentTypeId`.
    components: Vec<ComponentRecord>,
    /// Registered systems, indexed by `SystemId`.
    systems: Vec<SystemRecord>,
    /// Entities waiting to be destroyed at the next flush point.
    destroy_queue: IdPool,
    /// Interleaved (entity, component) pairs waiting to be detached.
    remove_queue: IdPool,
    /// Number of currently ready entities.
    live_count: usize,
    /// Reused buffer for the per-update snapshot of matching ids.
    scratch: Vec<EntityId>,
}

impl World {
    /// Creates a world with `capacity` preallocated entity slots.
    ///
    /// The free-id pool is filled in reverse so the first `create` hands out
    /// id 0. The table grows past `capacity` on demand.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::OutOfMemory`] if the initial allocation fails.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> EcsResult<Self> {
        assert!(capacity > 0, "entity capacity must be greater than zero");

        let mut entities = Vec::new();
        entities
            .try_reserve_exact(capacity)
            .map_err(|_| OutOfMemory)?;
        entities.resize(capacity, EntitySlot::default());

        let mut free = IdPool::with_capacity(capacity)?;
        for id in (0..capacity as u32).rev() {
            free.push(id)?;
        }

        tracing::debug!("world created with {} entity slots", capacity);

        Ok(Self {
            entities,
            free,
            components: Vec::new(),
            systems: Vec::new(),
            destroy_queue: IdPool::new(),
            remove_queue: IdPool::new(),
            live_count: 0,
            scratch: Vec::new(),
        })
    }

    // =========================================================================
    // Entity operations
    // =========================================================================

    /// Creates an entity, reusing the most recently destroyed id if any.
    ///
    /// The fresh entity carries no components. Systems whose filters accept
    /// an empty mask acquire it immediately, add hooks included.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::OutOfMemory`] if the entity table or a matching
    /// set has to grow and the allocation fails.
    pub fn create(&mut self) -> EcsResult<EntityId> {
        let index = match self.free.pop() {
            Some(index) => index,
            None => self.grow_entities()?,
        };
        let id = EntityId::new(index);

        let slot = &mut self.entities[index as usize];
        slot.mask.clear();
        slot.ready = true;
        self.live_count += 1;

        self.refresh_entity(id)?;
        Ok(id)
    }

    /// Checks whether `id` refers to a live entity.
    #[inline]
    #[must_use]
    pub fn is_ready(&self, id: EntityId) -> bool {
        self.entities
            .get(id.index() as usize)
            .is_some_and(|slot| slot.ready)
    }

    /// Destroys an entity immediately.
    ///
    /// Teardown order: every system holding the entity drops it and fires
    /// its remove hook first, so the hooks observe payloads still intact.
    /// Then the destructor of each attached component runs, the id returns
    /// to the free pool, and the record zeroes.
    ///
    /// Must not be called for ids the current update pass still iterates;
    /// use [`World::queue_destroy`] there.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidEntity`] if `id` is out of range or not
    /// ready.
    pub fn destroy(&mut self, id: EntityId) -> EcsResult<()> {
        let index = id.index() as usize;
        let mask = self.ready_slot(id)?.mask;

        for system in &mut self.systems {
            if system.entities.remove(id) {
                if let Some(hook) = system.on_removed.as_mut() {
                    hook(id);
                }
            }
        }

        for bit in mask.iter_set_bits() {
            let record = &mut self.components[bit];
            if let Some(hook) = record.destructor.as_mut() {
                if let Some(bytes) = record.arena.bytes_mut(index) {
                    hook(id, bytes);
                }
            }
        }

        // The pool was sized with the table, so this push cannot grow.
        self.free.push(id.index())?;
        self.entities[index].reset();
        self.live_count -= 1;
        Ok(())
    }

    /// Queues an entity for destruction at the next flush point.
    ///
    /// The entity stays fully live and visible until the running update
    /// returns; the flush skips ids already destroyed by then.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidEntity`] if `id` is not ready, or
    /// [`EcsError::OutOfMemory`] if the queue fails to grow.
    pub fn queue_destroy(&mut self, id: EntityId) -> EcsResult<()> {
        self.ready_slot(id)?;
        self.destroy_queue.push(id.index())?;
        Ok(())
    }

    // =========================================================================
    // Component operations
    // =========================================================================

    /// Registers a component type and returns its id.
    ///
    /// Ids are sequential. Types are never unregistered.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentLimitExceeded`] when the registry is
    /// full, or [`EcsError::OutOfMemory`].
    pub fn register_component(
        &mut self,
        descriptor: ComponentDescriptor,
    ) -> EcsResult<ComponentTypeId> {
        if self.components.len() >= MAX_COMPONENT_TYPES {
            return Err(EcsError::ComponentLimitExceeded {
                max: MAX_COMPONENT_TYPES,
            });
        }
        self.components.try_reserve(1).map_err(|_| OutOfMemory)?;

        let id = ComponentTypeId::new(self.components.len() as u16);
        let stride = descriptor.size;
        self.components.push(ComponentRecord::from_descriptor(descriptor));

        tracing::debug!(
            "registered component type {} with stride {}",
            id.index(),
            stride
        );
        Ok(id)
    }

    /// Checks whether `component` is attached to `id`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidEntity`] or
    /// [`EcsError::UnknownComponentType`] on a bad id.
    pub fn has(&self, id: EntityId, component: ComponentTypeId) -> EcsResult<bool> {
        let bit = self.component_bit(component)?;
        Ok(self.ready_slot(id)?.mask.test(bit))
    }

    /// Returns the payload bytes of `component` on `id`.
    ///
    /// Attachment is NOT checked: a detached slot still reads back (stale or
    /// zeroed). Combine with [`World::has`] when that matters.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidEntity`],
    /// [`EcsError::UnknownComponentType`], or
    /// [`EcsError::ComponentNotAttached`] when the type was never added to
    /// this entity at all (its arena does not cover the id).
    pub fn get(&self, id: EntityId, component: ComponentTypeId) -> EcsResult<&[u8]> {
        let bit = self.component_bit(component)?;
        self.ready_slot(id)?;
        self.components[bit]
            .arena
            .bytes(id.index() as usize)
            .ok_or(EcsError::ComponentNotAttached {
                entity: id,
                component,
            })
    }

    /// Returns the payload bytes of `component` on `id`, mutably.
    ///
    /// Same contract as [`World::get`].
    ///
    /// # Errors
    ///
    /// As [`World::get`].
    pub fn get_mut(&mut self, id: EntityId, component: ComponentTypeId) -> EcsResult<&mut [u8]> {
        let bit = self.component_bit(component)?;
        self.ready_slot(id)?;
        self.components[bit]
            .arena
            .bytes_mut(id.index() as usize)
            .ok_or(EcsError::ComponentNotAttached {
                entity: id,
                component,
            })
    }

    /// Returns the payload of `component` on `id` as a typed reference.
    ///
    /// # Errors
    ///
    /// As [`World::get`].
    ///
    /// # Panics
    ///
    /// Panics if `T` is larger than the registered payload or its alignment
    /// exceeds 8.
    pub fn get_as<T: bytemuck::Pod>(
        &self,
        id: EntityId,
        component: ComponentTypeId,
    ) -> EcsResult<&T> {
        let bytes = self.get(id, component)?;
        Ok(bytemuck::from_bytes(&bytes[..std::mem::size_of::<T>()]))
    }

    /// Returns the payload of `component` on `id` as a typed mutable
    /// reference.
    ///
    /// # Errors
    ///
    /// As [`World::get`].
    ///
    /// # Panics
    ///
    /// Panics if `T` is larger than the registered payload or its alignment
    /// exceeds 8.
    pub fn get_mut_as<T: bytemuck::Pod>(
        &mut self,
        id: EntityId,
        component: ComponentTypeId,
    ) -> EcsResult<&mut T> {
        let bytes = self.get_mut(id, component)?;
        Ok(bytemuck::from_bytes_mut(
            &mut bytes[..std::mem::size_of::<T>()],
        ))
    }

    /// Attaches `component` to `id` and returns the fresh payload slot.
    ///
    /// The slot is zero-filled, then the constructor hook runs with `args`
    /// passed through untouched, then the attachment bit is set and every
    /// system filter is re-tested, firing add hooks on first-match
    /// transitions.
    ///
    /// # Arguments
    ///
    /// * `args` - opaque constructor arguments; `None` when the constructor
    ///   needs nothing or the type has no constructor.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::DuplicateComponent`] when already attached,
    /// [`EcsError::InvalidEntity`], [`EcsError::UnknownComponentType`], or
    /// [`EcsError::OutOfMemory`].
    pub fn add(
        &mut self,
        id: EntityId,
        component: ComponentTypeId,
        args: Option<&dyn Any>,
    ) -> EcsResult<&mut [u8]> {
        let bit = self.component_bit(component)?;
        if self.ready_slot(id)?.mask.test(bit) {
            return Err(EcsError::DuplicateComponent {
                entity: id,
                component,
            });
        }
        let index = id.index() as usize;

        let record = &mut self.components[bit];
        record.arena.ensure_capacity(index)?;
        if let Some(bytes) = record.arena.bytes_mut(index) {
            bytes.fill(0);
            if let Some(hook) = record.constructor.as_mut() {
                hook(id, bytes, args);
            }
        }

        self.entities[index].mask.set(bit, true);
        self.refresh_entity(id)?;

        self.components[bit]
            .arena
            .bytes_mut(index)
            .ok_or(EcsError::ComponentNotAttached {
                entity: id,
                component,
            })
    }

    /// Detaches `component` from `id`.
    ///
    /// Ordering: systems that stop matching drop the entity and fire their
    /// remove hooks against the old mask first, then the destructor runs on
    /// the still-attached payload, then the bit clears. Clearing a bit can
    /// lift an exclusion, so systems that start matching acquire the entity
    /// last.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentNotAttached`] when not attached,
    /// [`EcsError::InvalidEntity`], [`EcsError::UnknownComponentType`], or
    /// [`EcsError::OutOfMemory`].
    pub fn remove(&mut self, id: EntityId, component: ComponentTypeId) -> EcsResult<()> {
        let bit = self.component_bit(component)?;
        let old_mask = self.ready_slot(id)?.mask;
        if !old_mask.test(bit) {
            return Err(EcsError::ComponentNotAttached {
                entity: id,
                component,
            });
        }
        let index = id.index() as usize;

        let mut new_mask = old_mask;
        new_mask.set(bit, false);

        for system in &mut self.systems {
            if system.entities.contains(id) && !system.matches(&new_mask) {
                system.entities.remove(id);
                if let Some(hook) = system.on_removed.as_mut() {
                    hook(id);
                }
            }
        }

        let record = &mut self.components[bit];
        if let Some(hook) = record.destructor.as_mut() {
            if let Some(bytes) = record.arena.bytes_mut(index) {
                hook(id, bytes);
            }
        }

        self.entities[index].mask.set(bit, false);
        self.refresh_entity(id)?;
        Ok(())
    }

    /// Queues a detachment for the next flush point.
    ///
    /// The component stays attached and visible until the running update
    /// returns; the flush skips pairs no longer attached by then.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentNotAttached`] when not attached,
    /// [`EcsError::InvalidEntity`], [`EcsError::UnknownComponentType`], or
    /// [`EcsError::OutOfMemory`] if the queue fails to grow.
    pub fn queue_remove(&mut self, id: EntityId, component: ComponentTypeId) -> EcsResult<()> {
        let bit = self.component_bit(component)?;
        if !self.ready_slot(id)?.mask.test(bit) {
            return Err(EcsError::ComponentNotAttached {
                entity: id,
                component,
            });
        }
        self.remove_queue
            .push_pair(id.index(), u32::from(component.index()))?;
        Ok(())
    }

    // =========================================================================
    // System operations
    // =========================================================================

    /// Registers a system and returns its id.
    ///
    /// The system starts active with an empty filter, so it immediately
    /// matches every ready entity; narrow it with
    /// [`World::require_component`] and [`World::exclude_component`].
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::SystemLimitExceeded`] when the registry is full,
    /// or [`EcsError::OutOfMemory`].
    pub fn register_system(&mut self, descriptor: SystemDescriptor) -> EcsResult<SystemId> {
        if self.systems.len() >= MAX_SYSTEMS {
            return Err(EcsError::SystemLimitExceeded { max: MAX_SYSTEMS });
        }
        self.systems.try_reserve(1).map_err(|_| OutOfMemory)?;

        let id = SystemId::new(self.systems.len() as u16);
        self.systems.push(SystemRecord::from_descriptor(descriptor));
        self.refresh_system(id.index() as usize)?;

        tracing::debug!("registered system {}", id.index());
        Ok(id)
    }

    /// Adds `component` to the system's require mask and re-syncs its
    /// matching set, firing membership hooks on transitions.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownSystem`],
    /// [`EcsError::UnknownComponentType`], or [`EcsError::OutOfMemory`].
    pub fn require_component(
        &mut self,
        system: SystemId,
        component: ComponentTypeId,
    ) -> EcsResult<()> {
        let bit = self.component_bit(component)?;
        let index = self.system_index(system)?;
        self.systems[index].require.set(bit, true);
        self.refresh_system(index)?;

        tracing::trace!(
            "system {} requires component {}",
            system.index(),
            component.index()
        );
        Ok(())
    }

    /// Adds `component` to the system's exclude mask and re-syncs its
    /// matching set, firing membership hooks on transitions.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownSystem`],
    /// [`EcsError::UnknownComponentType`], or [`EcsError::OutOfMemory`].
    pub fn exclude_component(
        &mut self,
        system: SystemId,
        component: ComponentTypeId,
    ) -> EcsResult<()> {
        let bit = self.component_bit(component)?;
        let index = self.system_index(system)?;
        self.systems[index].exclude.set(bit, true);
        self.refresh_system(index)?;

        tracing::trace!(
            "system {} excludes component {}",
            system.index(),
            component.index()
        );
        Ok(())
    }

    /// Re-activates a system.
    ///
    /// Activity only gates [`World::update_system`]; membership is
    /// maintained either way.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownSystem`].
    pub fn enable_system(&mut self, system: SystemId) -> EcsResult<()> {
        let index = self.system_index(system)?;
        self.systems[index].active = true;
        Ok(())
    }

    /// Deactivates a system without touching its matching set.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownSystem`].
    pub fn disable_system(&mut self, system: SystemId) -> EcsResult<()> {
        let index = self.system_index(system)?;
        self.systems[index].active = false;
        Ok(())
    }

    /// Runs one system for this tick.
    ///
    /// Inactive systems return 0 immediately, without flushing. Otherwise
    /// the matching ids are snapshotted, the update hook runs with
    /// `(world, ids, dt)`, and both command queues flush: queued destroys
    /// first, then queued removals, each skipping entries already dead or
    /// detached. Returns the hook's status code.
    ///
    /// Nested calls for OTHER systems are fine; the innermost flush drains
    /// the world-global queues.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownSystem`], [`EcsError::ReentrantUpdate`]
    /// when a hook re-enters the system it is running for, or
    /// [`EcsError::OutOfMemory`].
    pub fn update_system(&mut self, system: SystemId, dt: f32) -> EcsResult<i32> {
        let index = self.system_index(system)?;
        if !self.systems[index].active {
            return Ok(0);
        }
        let Some(mut hook) = self.systems[index].update.take() else {
            return Err(EcsError::ReentrantUpdate { system });
        };

        // Snapshot the matching ids so structural edits inside the hook
        // cannot alias the iteration list.
        let mut ids = std::mem::take(&mut self.scratch);
        ids.clear();
        if ids.try_reserve(self.systems[index].entities.len()).is_err() {
            self.scratch = ids;
            self.systems[index].update = Some(hook);
            return Err(EcsError::OutOfMemory(OutOfMemory));
        }
        ids.extend_from_slice(self.systems[index].entities.as_slice());

        let status = hook(self, &ids, dt);

        ids.clear();
        self.scratch = ids;
        self.systems[index].update = Some(hook);

        self.flush_queues()?;
        Ok(status)
    }

    /// Runs every system in registration order.
    ///
    /// Stops at the first non-zero status and returns it; returns 0 when
    /// every system completed.
    ///
    /// # Errors
    ///
    /// As [`World::update_system`].
    pub fn update_systems(&mut self, dt: f32) -> EcsResult<i32> {
        let mut index = 0;
        while index < self.systems.len() {
            let status = self.update_system(SystemId::new(index as u16), dt)?;
            if status != 0 {
                return Ok(status);
            }
            index += 1;
        }
        Ok(0)
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Returns the number of live entities.
    #[inline]
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.live_count
    }

    /// Returns the current entity table size.
    #[inline]
    #[must_use]
    pub fn entity_capacity(&self) -> usize {
        self.entities.len()
    }

    /// Returns the number of registered component types.
    #[inline]
    #[must_use]
    pub fn component_type_count(&self) -> usize {
        self.components.len()
    }

    /// Returns the number of registered systems.
    #[inline]
    #[must_use]
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Checks whether a system is active.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownSystem`].
    pub fn is_system_active(&self, system: SystemId) -> EcsResult<bool> {
        Ok(self.systems[self.system_index(system)?].active)
    }

    /// Returns the ids currently matching a system's filter.
    ///
    /// Order is unspecified and changes across structural edits.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownSystem`].
    pub fn system_entities(&self, system: SystemId) -> EcsResult<&[EntityId]> {
        Ok(self.systems[self.system_index(system)?].entities.as_slice())
    }

    /// Destroys every live entity with full destroy semantics and clears
    /// both command queues.
    ///
    /// Component and system registrations survive. Destructor and remove
    /// hooks fire exactly as they would for individual destroys.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::OutOfMemory`].
    pub fn reset(&mut self) -> EcsResult<()> {
        for raw in 0..self.entities.len() as u32 {
            let id = EntityId::new(raw);
            if self.is_ready(id) {
                self.destroy(id)?;
            }
        }
        self.destroy_queue.clear();
        self.remove_queue.clear();

        tracing::debug!("world reset; {} entity slots retained", self.entities.len());
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Looks up the slot for a ready entity.
    fn ready_slot(&self, id: EntityId) -> EcsResult<&EntitySlot> {
        self.entities
            .get(id.index() as usize)
            .filter(|slot| slot.ready)
            .ok_or(EcsError::InvalidEntity { id })
    }

    /// Validates a component id and returns its bit index.
    fn component_bit(&self, component: ComponentTypeId) -> EcsResult<usize> {
        let bit = component.index() as usize;
        if bit >= self.components.len() {
            return Err(EcsError::UnknownComponentType { id: component });
        }
        Ok(bit)
    }

    /// Validates a system id and returns its registry index.
    fn system_index(&self, system: SystemId) -> EcsResult<usize> {
        let index = system.index() as usize;
        if index >= self.systems.len() {
            return Err(EcsError::UnknownSystem { id: system });
        }
        Ok(index)
    }

    /// Re-tests one entity against every system filter, inserting into or
    /// removing from each matching set and firing hooks on transitions.
    fn refresh_entity(&mut self, id: EntityId) -> EcsResult<()> {
        let slot = self.entities[id.index() as usize];
        for system in &mut self.systems {
            if slot.ready && system.matches(&slot.mask) {
                if system.entities.add(id)? {
                    if let Some(hook) = system.on_added.as_mut() {
                        hook(id);
                    }
                }
            } else if system.entities.remove(id) {
                if let Some(hook) = system.on_removed.as_mut() {
                    hook(id);
                }
            }
        }
        Ok(())
    }

    /// Re-tests every ready entity against one system's filter.
    fn refresh_system(&mut self, system_index: usize) -> EcsResult<()> {
        let system = &mut self.systems[system_index];
        for (index, slot) in self.entities.iter().enumerate() {
            let id = EntityId::new(index as u32);
            if slot.ready && system.matches(&slot.mask) {
                if system.entities.add(id)? {
                    if let Some(hook) = system.on_added.as_mut() {
                        hook(id);
                    }
                }
            } else if system.entities.remove(id) {
                if let Some(hook) = system.on_removed.as_mut() {
                    hook(id);
                }
            }
        }
        Ok(())
    }

    /// Grows the entity table one growth step and returns a fresh id.
    ///
    /// The free pool is re-reserved to the new table size up front, which is
    /// what keeps `destroy` pushes allocation-free.
    fn grow_entities(&mut self) -> EcsResult<u32> {
        let old_capacity = self.entities.len();
        let new_capacity = grown_capacity(old_capacity, old_capacity);

        self.entities
            .try_reserve_exact(new_capacity - old_capacity)
            .map_err(|_| OutOfMemory)?;
        self.free.reserve(new_capacity)?;
        self.entities.resize(new_capacity, EntitySlot::default());

        // Push the tail in reverse so lower ids come out first; the lowest
        // fresh id goes straight to the caller.
        for raw in ((old_capacity as u32 + 1)..new_capacity as u32).rev() {
            self.free.push(raw)?;
        }

        tracing::trace!(
            "entity table grown from {} to {}",
            old_capacity,
            new_capacity
        );
        Ok(old_capacity as u32)
    }

    /// Drains the destroy queue, then the remove queue, in insertion order.
    ///
    /// Entries whose entity died or whose component detached since queueing
    /// are skipped silently; queueing twice is therefore harmless.
    fn flush_queues(&mut self) -> EcsResult<()> {
        if self.destroy_queue.is_empty() && self.remove_queue.is_empty() {
            return Ok(());
        }
        tracing::trace!(
            "flushing {} queued destroys and {} queued removals",
            self.destroy_queue.len(),
            self.remove_queue.len() / 2
        );

        // Swap the queues out while draining; membership hooks have no world
        // access, so nothing can enqueue during the drain.
        let mut destroys = std::mem::take(&mut self.destroy_queue);
        for &raw in destroys.as_slice() {
            let id = EntityId::new(raw);
            if self.is_ready(id) {
                self.destroy(id)?;
            }
        }
        destroys.clear();
        self.destroy_queue = destroys;

        let mut removals = std::mem::take(&mut self.remove_queue);
        for pair in removals.as_slice().chunks_exact(2) {
            let id = EntityId::new(pair[0]);
            let component = ComponentTypeId::new(pair[1] as u16);
            let attached = self
                .entities
                .get(pair[0] as usize)
                .is_some_and(|slot| slot.ready && slot.mask.test(pair[1] as usize));
            if attached {
                self.remove(id, component)?;
            }
        }
        removals.clear();
        self.remove_queue = removals;

        Ok(())
    }
}
