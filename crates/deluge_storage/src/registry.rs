//! Component type registry.
//!
//! Maps each Rust payload type to a [`ComponentTypeId`] handed out in
//! first-use order, and owns the column for every registered type.
//! Registration is permanent for the registry's lifetime.

use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::fmt;

use deluge_foundation::ComponentTypeId;

use crate::column::{Column, ErasedColumn};
use crate::component::Component;

/// A registered component type and its column.
struct Registration {
    name: &'static str,
    column: Box<dyn ErasedColumn>,
}

/// Registry of component types and their dense columns.
#[derive(Default)]
pub struct ComponentRegistry {
    ids: HashMap<TypeId, ComponentTypeId>,
    /// Indexed by `ComponentTypeId`.
    registrations: Vec<Registration>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered component types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Returns true if no type has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Returns the id of `T`, if registered.
    #[must_use]
    pub fn id_of<T: Component>(&self) -> Option<ComponentTypeId> {
        self.ids.get(&TypeId::of::<T>()).copied()
    }

    /// Registers `T` with an empty column.
    ///
    /// Returns the assigned id and `true` if `T` was not registered before.
    #[allow(clippy::cast_possible_truncation)]
    pub fn insert<T: Component>(&mut self) -> (ComponentTypeId, bool) {
        if let Some(id) = self.id_of::<T>() {
            return (id, false);
        }

        let id = ComponentTypeId::new(self.registrations.len() as u32);
        self.ids.insert(TypeId::of::<T>(), id);
        self.registrations.push(Registration {
            name: type_name::<T>(),
            column: Box::new(Column::<T>::new()),
        });
        (id, true)
    }

    /// Returns the typed column for `T`, if registered.
    #[must_use]
    pub fn column<T: Component>(&self) -> Option<&Column<T>> {
        let id = self.id_of::<T>()?;
        self.registrations[id.index()]
            .column
            .as_any()
            .downcast_ref::<Column<T>>()
    }

    /// Returns the typed column for `T` mutably, if registered.
    pub fn column_mut<T: Component>(&mut self) -> Option<&mut Column<T>> {
        let id = self.id_of::<T>()?;
        self.registrations[id.index()]
            .column
            .as_any_mut()
            .downcast_mut::<Column<T>>()
    }

    /// Iterates over every column mutably, in registration order.
    pub fn columns_mut(
        &mut self,
    ) -> impl Iterator<Item = &mut (dyn ErasedColumn + 'static)> + '_ {
        self.registrations
            .iter_mut()
            .map(|registration| registration.column.as_mut())
    }

    /// Returns the name of a registered type.
    #[must_use]
    pub fn name(&self, id: ComponentTypeId) -> Option<&'static str> {
        self.registrations.get(id.index()).map(|r| r.name)
    }

    /// Iterates over registered type names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.registrations.iter().map(|r| r.name)
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
