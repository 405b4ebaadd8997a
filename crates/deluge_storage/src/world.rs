//! World state: entities, component columns and the shared presence mask.
//!
//! The `World` is the unified interface to all storage systems. Presence of
//! a component is decided by the mask alone; a column slot is only read once
//! its bit says it is occupied.

use std::any::type_name;
use std::cell::RefCell;

use deluge_foundation::{ComponentTypeId, EntityId, Error, ErrorContext, Result};
use tracing::{debug, trace, warn};

use crate::column::Column;
use crate::component::{Component, Phase};
use crate::config::{LayoutPolicy, StorageConfig};
use crate::entity::EntityAllocator;
use crate::mask::{PresenceMask, stride};
use crate::registry::ComponentRegistry;
use crate::schedule::Schedule;

/// Entity-component storage.
#[derive(Debug, Default)]
pub struct World {
    /// Storage configuration.
    config: StorageConfig,
    /// Entity lifecycle management.
    entities: EntityAllocator,
    /// Component types and their dense columns.
    registry: ComponentRegistry,
    /// Presence bit matrix shared by every component type.
    mask: PresenceMask,
    /// Update and draw chains.
    schedule: Schedule,
    /// Set once registrations are explicitly frozen.
    frozen: bool,
}

impl World {
    /// Creates an empty world with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StorageConfig::default())
    }

    /// Creates an empty world with the given configuration.
    #[must_use]
    pub fn with_config(config: StorageConfig) -> Self {
        let mut entities = if config.recycle_destroyed_ids {
            EntityAllocator::recycling()
        } else {
            EntityAllocator::new()
        };
        entities.reserve(config.initial_entity_capacity);

        Self {
            config,
            entities,
            registry: ComponentRegistry::new(),
            mask: PresenceMask::new(),
            schedule: Schedule::new(),
            frozen: false,
        }
    }

    /// Returns the storage configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    // --- Entities ---

    /// Creates an entity.
    pub fn create(&mut self) -> EntityId {
        self.entities.create()
    }

    /// Destroys an entity.
    ///
    /// Returns `false` if `id` is outside the allocator's backing array.
    /// Otherwise clears the presence bit of every registered type for `id`,
    /// empties the matching column slots so no payload outlives its entity,
    /// and returns `true`.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        if !self.entities.release(id) {
            return false;
        }

        self.mask.clear_row(id.index(), self.registry.len());
        let dropped = self
            .registry
            .columns_mut()
            .map(|column| column.clear_slot(id.index()))
            .filter(|dropped| *dropped)
            .count();

        debug!(entity = %id, dropped, "destroyed entity");
        if self.entities.recycles() {
            debug!(entity = %id, queued = self.entities.free_len(), "id queued for reuse");
        }
        true
    }

    /// Returns true if the entity was created and not destroyed since.
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities.is_alive(id)
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterates over live entity ids in ascending order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter()
    }

    /// Returns the entity allocator.
    #[must_use]
    pub fn allocator(&self) -> &EntityAllocator {
        &self.entities
    }

    // --- Component types ---

    /// Registers component type `T`, returning its id.
    ///
    /// Registering an already known type returns its existing id. A new type
    /// is appended to the update and draw chains, and under
    /// [`LayoutPolicy::Migrate`] the presence mask is re-laid out if the row
    /// stride grows.
    ///
    /// # Errors
    ///
    /// Returns `LateRegistration` if registrations were frozen, or if the
    /// layout policy is [`LayoutPolicy::Frozen`] and presence data has
    /// already been written.
    pub fn register<T: Component>(&mut self) -> Result<ComponentTypeId> {
        if let Some(id) = self.registry.id_of::<T>() {
            return Ok(id);
        }

        let count = self.registry.len();
        let locked =
            self.frozen || (self.config.layout == LayoutPolicy::Frozen && self.mask.any());
        if locked {
            warn!(
                component = type_name::<T>(),
                registered = count,
                "rejected late registration"
            );
            return Err(Error::late_registration(type_name::<T>(), count)
                .with_context(ErrorContext::new().with_operation("register")));
        }

        let (id, _) = self.registry.insert::<T>();
        self.schedule.subscribe::<T>(id);

        if self.mask.relayout(count, count + 1) {
            debug!(
                from = stride(count),
                to = stride(count + 1),
                words = self.mask.len(),
                "migrated presence mask to new stride"
            );
        }

        debug!(component = type_name::<T>(), id = id.index(), "registered component type");
        Ok(id)
    }

    /// Forbids any further component type registration.
    pub fn freeze_registrations(&mut self) {
        self.frozen = true;
        debug!(registered = self.registry.len(), "froze component registrations");
    }

    /// Returns true if registrations were explicitly frozen.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Returns the number of registered component types.
    #[must_use]
    pub fn component_type_count(&self) -> usize {
        self.registry.len()
    }

    /// Returns the id of `T`, if registered.
    #[must_use]
    pub fn component_type_id<T: Component>(&self) -> Option<ComponentTypeId> {
        self.registry.id_of::<T>()
    }

    /// Iterates over registered component type names in registration order.
    pub fn component_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.registry.names()
    }

    // --- Components ---

    /// Attaches `value` to `id`, returning the stored value.
    ///
    /// Registers `T` on first use and grows its column and the presence mask
    /// to cover `id`. An existing payload is overwritten and dropped; no
    /// removal logic runs for it.
    ///
    /// # Errors
    ///
    /// Returns `LateRegistration` if `T` is new and registration is locked.
    pub fn set<T: Component>(&mut self, id: EntityId, value: T) -> Result<&mut T> {
        let ty = self.register::<T>()?;
        let count = self.registry.len();

        let column = self.registry.column_mut::<T>().ok_or_else(|| {
            Error::internal(format!("no column for registered {}", type_name::<T>()))
        })?;
        self.mask.insert(id.index(), ty.index(), count);
        Ok(column.insert(id.index(), value))
    }

    /// Returns the `T` attached to `id`.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotFound` if `id` holds no `T`. While a hook of
    /// `id`'s `T` runs, that payload is lent out to the hook and reading it
    /// here fails with an internal error.
    pub fn get<T: Component>(&self, id: EntityId) -> Result<&T> {
        if !self.has::<T>(id) {
            return Err(not_found::<T>(id, "get"));
        }
        self.registry
            .column::<T>()
            .and_then(|column| column.get(id.index()))
            .ok_or_else(|| torn::<T>(id))
    }

    /// Returns the `T` attached to `id` mutably.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotFound` if `id` holds no `T`.
    pub fn get_mut<T: Component>(&mut self, id: EntityId) -> Result<&mut T> {
        if !self.has::<T>(id) {
            return Err(not_found::<T>(id, "get_mut"));
        }
        self.registry
            .column_mut::<T>()
            .and_then(|column| column.get_mut(id.index()))
            .ok_or_else(|| torn::<T>(id))
    }

    /// Returns whether `id` holds a `T`.
    ///
    /// Ids beyond the column or the mask report `false`. Never grows storage
    /// and never registers `T`.
    #[must_use]
    pub fn has<T: Component>(&self, id: EntityId) -> bool {
        let Some(ty) = self.registry.id_of::<T>() else {
            return false;
        };
        let in_column = self
            .registry
            .column::<T>()
            .is_some_and(|column| id.index() < column.len());

        in_column && self.mask.contains(id.index(), ty.index(), self.registry.len())
    }

    /// Detaches the `T` from `id`.
    ///
    /// Returns `true` whenever `id` is addressable for `T`, whether or not a
    /// `T` was attached, and `false` only when `id` lies beyond the column or
    /// the mask.
    pub fn remove<T: Component>(&mut self, id: EntityId) -> bool {
        let Some(ty) = self.registry.id_of::<T>() else {
            return false;
        };
        let count = self.registry.len();
        let Some(column) = self.registry.column_mut::<T>() else {
            return false;
        };

        if id.index() >= column.len() || !self.mask.is_addressable(id.index(), ty.index(), count)
        {
            return false;
        }

        self.mask.remove(id.index(), ty.index(), count);
        column.take(id.index());
        true
    }

    /// Iterates over every `T` in ascending entity order.
    pub fn iter<T: Component>(&self) -> impl Iterator<Item = (EntityId, &T)> + '_ {
        self.registry
            .column::<T>()
            .into_iter()
            .flat_map(Column::<T>::iter)
    }

    // --- Phases ---

    /// Runs every subscriber of `phase` in registration order.
    ///
    /// Returns the number of payloads whose hook was invoked. See
    /// [`World::run_phase_in`] for what hooks may do to the world.
    pub fn run_phase(&mut self, phase: Phase, frame: u64) -> usize {
        let cell = RefCell::new(std::mem::take(self));
        let visited = Self::run_phase_in(&cell, phase, frame);
        *self = cell.into_inner();
        visited
    }

    /// Runs every subscriber of `phase` over a shared world.
    ///
    /// No borrow of `world` is held while a hook runs, so hooks may read and
    /// change any storage through their context or through whatever else
    /// shares the cell. Types registered by a hook join the chains from the
    /// next phase on. A payload removed, replaced or destroyed by its own
    /// hook is not put back.
    pub fn run_phase_in(world: &RefCell<World>, phase: Phase, frame: u64) -> usize {
        let subscribers = world.borrow().schedule.subscribers().to_vec();

        let mut visited = 0;
        for subscriber in &subscribers {
            let count = subscriber.run(phase, world, frame);
            trace!(
                %phase,
                component = subscriber.name(),
                id = subscriber.component().index(),
                visited = count,
                "ran subscriber"
            );
            visited += count;
        }

        trace!(%phase, frame, subscribers = subscribers.len(), visited, "ran phase");
        visited
    }

    /// Returns the number of slots in the column of `T`.
    pub(crate) fn column_len<T: Component>(&self) -> usize {
        self.registry.column::<T>().map_or(0, Column::len)
    }

    /// Takes the `T` of `id` out of its slot for a hook, leaving its
    /// presence bit set.
    pub(crate) fn lend<T: Component>(&mut self, id: EntityId) -> Option<T> {
        if !self.has::<T>(id) {
            return None;
        }
        self.registry.column_mut::<T>()?.take(id.index())
    }

    /// Returns a payload taken by [`World::lend`].
    ///
    /// The payload is dropped if its presence bit was cleared meanwhile or
    /// if the slot was filled with a new value.
    pub(crate) fn give_back<T: Component>(&mut self, id: EntityId, payload: T) {
        if !self.has::<T>(id) {
            trace!(entity = %id, component = type_name::<T>(), "dropped detached payload");
            return;
        }
        let Some(column) = self.registry.column_mut::<T>() else {
            return;
        };
        if column.get(id.index()).is_none() {
            column.insert(id.index(), payload);
        }
    }

    /// Returns the update and draw chains.
    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Drops every update and draw subscriber, keeping stored data.
    ///
    /// Component types registered afterwards subscribe again as usual.
    pub fn clear_schedule(&mut self) {
        debug!(subscribers = self.schedule.len(), "cleared phase schedule");
        self.schedule.clear();
    }
}

fn not_found<T: Component>(id: EntityId, operation: &'static str) -> Error {
    Error::component_not_found(id, type_name::<T>())
        .with_context(ErrorContext::new().with_operation(operation).with_entity(id))
}

fn torn<T: Component>(id: EntityId) -> Error {
    Error::internal(format!(
        "presence bit set for {} on {id} but its slot is empty",
        type_name::<T>()
    ))
}
