//! Dense per-type payload arrays.
//!
//! A [`Column`] maps `slot[entity] -> payload | empty`. It grows by doubling
//! and never shrinks. The presence mask, not the slot, is the authority on
//! whether an entity holds a component.

// Slot indices always originate from an `EntityId`, so they fit in a u32
#![allow(clippy::cast_possible_truncation)]

use std::any::Any;

use deluge_foundation::EntityId;

use crate::component::Component;
use crate::growth::ensure_capacity;

/// Dense storage for a single component type, indexed by entity id.
#[derive(Debug)]
pub struct Column<T> {
    slots: Vec<Option<T>>,
}

impl<T> Default for Column<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Column<T> {
    /// Creates an empty column.
    #[must_use]
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Returns the number of addressable slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no slot has been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the payload at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Returns the payload at `index` mutably, if any.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Stores `value` at `index`, growing the column if needed.
    ///
    /// Any previous payload is dropped without further notice.
    pub fn insert(&mut self, index: usize, value: T) -> &mut T {
        ensure_capacity(&mut self.slots, index);
        self.slots[index].insert(value)
    }

    /// Empties the slot at `index`, returning the payload it held.
    pub fn take(&mut self, index: usize) -> Option<T> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Iterates over occupied slots in ascending entity order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| Some((EntityId::new(index as u32), slot.as_ref()?)))
    }

    /// Iterates mutably over occupied slots in ascending entity order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| Some((EntityId::new(index as u32), slot.as_mut()?)))
    }
}

/// Object-safe view of a [`Column`] whose payload type is not known statically.
pub trait ErasedColumn: Any {
    /// Empties the slot at `index`. Returns true if a payload was dropped.
    fn clear_slot(&mut self, index: usize) -> bool;

    /// Upcast for downcasting to the concrete column.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete column.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedColumn for Column<T> {
    fn clear_slot(&mut self, index: usize) -> bool {
        self.take(index).is_some()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
