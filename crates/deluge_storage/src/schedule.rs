//! Ordered per-phase callback chains.
//!
//! Every component type subscribes one walker when it is registered, serving
//! both its update and its draw callback. Subscribers run in registration
//! order, and each walker visits its column in ascending entity order.
//!
//! Walkers never hold a borrow of the world while a hook runs. Each payload
//! is lent out of its slot, the hook is called with the world available
//! through its [`TickContext`], and the payload is handed back afterwards.

use std::cell::RefCell;

use deluge_foundation::{ComponentTypeId, EntityId};

use crate::component::{Component, Phase, TickContext};
use crate::world::World;

/// Walks one column, invoking the hook of a phase on every present payload.
///
/// Returns the number of payloads visited.
type PhaseFn = fn(&RefCell<World>, Phase, u64) -> usize;

/// One registered component type's callbacks.
#[derive(Clone, Copy)]
pub struct Subscriber {
    component: ComponentTypeId,
    name: &'static str,
    walk: PhaseFn,
}

impl Subscriber {
    /// Creates the subscriber for component type `T`.
    #[must_use]
    pub fn of<T: Component>(component: ComponentTypeId) -> Self {
        Self {
            component,
            name: std::any::type_name::<T>(),
            walk: walk_column::<T>,
        }
    }

    /// Returns the component type this subscriber walks.
    #[must_use]
    pub fn component(&self) -> ComponentTypeId {
        self.component
    }

    /// Returns the component type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Runs the callback for `phase` over every payload of the type.
    pub fn run(&self, phase: Phase, world: &RefCell<World>, frame: u64) -> usize {
        (self.walk)(world, phase, frame)
    }
}

impl std::fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriber")
            .field("component", &self.component)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// Slot indices always originate from an `EntityId`
#[allow(clippy::cast_possible_truncation)]
fn walk_column<T: Component>(world: &RefCell<World>, phase: Phase, frame: u64) -> usize {
    // Payloads attached past the current length during the walk wait for the next phase
    let slots = world.borrow().column_len::<T>();
    let mut visited = 0;

    for index in 0..slots {
        let entity = EntityId::new(index as u32);
        let lent = world.borrow_mut().lend::<T>(entity);
        let Some(mut payload) = lent else {
            continue;
        };

        let ctx = TickContext::new(frame, phase, entity, world);
        match phase {
            Phase::Update => payload.update(&ctx),
            Phase::Draw => payload.draw(&ctx),
        }

        world.borrow_mut().give_back(entity, payload);
        visited += 1;
    }
    visited
}

/// The update and draw chains, in registration order.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    subscribers: Vec<Subscriber>,
}

impl Schedule {
    /// Creates an empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Appends the callbacks of `T` to both chains.
    pub fn subscribe<T: Component>(&mut self, component: ComponentTypeId) {
        self.subscribers.push(Subscriber::of::<T>(component));
    }

    /// Returns the subscribers in invocation order.
    #[must_use]
    pub fn subscribers(&self) -> &[Subscriber] {
        &self.subscribers
    }

    /// Returns the number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns true if nothing is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Drops every subscriber.
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}
