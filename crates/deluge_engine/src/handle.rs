//! Entity handles bound to the default world.

use std::fmt;

use deluge_foundation::{EntityId, Result};
use deluge_storage::Component;

use crate::runtime::{with_world, with_world_mut};

/// A lightweight handle wrapping an entity id.
///
/// Every operation delegates to the default world; the handle itself holds
/// nothing but the id, so two handles are equal iff their ids are. Handles
/// also work from inside component hooks while [`run_frame`] is running.
///
/// [`run_frame`]: crate::run_frame
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Entity {
    id: EntityId,
}

impl Entity {
    /// Creates a new entity in the default world.
    #[must_use]
    pub fn create() -> Self {
        Self::from_id(with_world_mut(deluge_storage::World::create))
    }

    /// Wraps an existing id.
    #[must_use]
    pub const fn from_id(id: EntityId) -> Self {
        Self { id }
    }

    /// Returns the wrapped id.
    #[must_use]
    pub const fn id(self) -> EntityId {
        self.id
    }

    /// Attaches `value`, returning the handle for chaining.
    ///
    /// The payload's [`Component::attach`] hook receives this entity's id
    /// before it is stored. Any previous `T` is overwritten.
    ///
    /// # Errors
    ///
    /// Returns `LateRegistration` if `T` is new and the default world's
    /// registrations are locked.
    pub fn set<T: Component>(self, mut value: T) -> Result<Self> {
        value.attach(self.id);
        with_world_mut(|world| world.set(self.id, value).map(|_| self))
    }

    /// Returns a copy of the attached `T`.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotFound` if no `T` is attached.
    pub fn get<T: Component + Clone>(self) -> Result<T> {
        with_world(|world| world.get::<T>(self.id).cloned())
    }

    /// Runs `f` with the attached `T`.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotFound` if no `T` is attached.
    pub fn with<T: Component, R>(self, f: impl FnOnce(&T) -> R) -> Result<R> {
        with_world(|world| world.get::<T>(self.id).map(f))
    }

    /// Runs `f` with the attached `T` mutably.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotFound` if no `T` is attached.
    pub fn with_mut<T: Component, R>(self, f: impl FnOnce(&mut T) -> R) -> Result<R> {
        with_world_mut(|world| world.get_mut::<T>(self.id).map(f))
    }

    /// Returns whether a `T` is attached.
    #[must_use]
    pub fn has<T: Component>(self) -> bool {
        with_world(|world| world.has::<T>(self.id))
    }

    /// Detaches the `T`.
    ///
    /// Returns `true` whenever the id is addressable for `T`, even if no `T`
    /// was attached.
    pub fn remove<T: Component>(self) -> bool {
        with_world_mut(|world| world.remove::<T>(self.id))
    }

    /// Destroys the entity.
    ///
    /// Returns `false` if the id is outside the allocator's bounds.
    pub fn destroy(self) -> bool {
        with_world_mut(|world| world.destroy(self.id))
    }
}

impl From<EntityId> for Entity {
    fn from(id: EntityId) -> Self {
        Self::from_id(id)
    }
}

impl From<Entity> for EntityId {
    fn from(entity: Entity) -> Self {
        entity.id
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id: {}", self.id.raw())
    }
}
