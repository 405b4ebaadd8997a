//! Component payload behavior.
//!
//! Any `'static` type can be stored as a component once it implements
//! [`Component`]. The hooks all default to no-ops, so plain data types only
//! need an empty `impl`.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;

use deluge_foundation::EntityId;

use crate::world::World;

/// The two per-frame phases a component can take part in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Logic step, runs first in every frame.
    Update,
    /// Render step, runs after every update callback of the frame.
    Draw,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update => write!(f, "update"),
            Self::Draw => write!(f, "draw"),
        }
    }
}

/// What a component hook knows about the call it is part of.
///
/// The context also lends out the world being ticked, so a hook can read or
/// change sibling components of its owner. The hook's own payload is out of
/// its slot for the duration of the call; reach it through `self`.
#[derive(Copy, Clone, Debug)]
pub struct TickContext<'w> {
    frame: u64,
    phase: Phase,
    entity: EntityId,
    world: &'w RefCell<World>,
}

impl<'w> TickContext<'w> {
    /// Creates a context for one hook invocation.
    #[must_use]
    pub const fn new(
        frame: u64,
        phase: Phase,
        entity: EntityId,
        world: &'w RefCell<World>,
    ) -> Self {
        Self {
            frame,
            phase,
            entity,
            world,
        }
    }

    /// Returns the frame number.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Returns the phase being run.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the entity that owns the component.
    #[must_use]
    pub const fn entity(&self) -> EntityId {
        self.entity
    }

    /// Borrows the world being ticked.
    ///
    /// # Panics
    ///
    /// Panics if the hook still holds a guard from [`TickContext::world_mut`].
    #[must_use]
    pub fn world(&self) -> Ref<'w, World> {
        self.world.borrow()
    }

    /// Borrows the world being ticked mutably.
    ///
    /// # Panics
    ///
    /// Panics if the hook still holds another guard on the world.
    #[must_use]
    pub fn world_mut(&self) -> RefMut<'w, World> {
        self.world.borrow_mut()
    }
}

/// A unit of data and behavior attached to one entity at a time.
///
/// Payloads that want to remember their owner keep the id they receive in
/// [`Component::attach`] as a plain value. It must never be used to manage
/// the payload's lifetime; the store owns the payload.
pub trait Component: 'static {
    /// Called when the payload is attached through an entity handle.
    fn attach(&mut self, _owner: EntityId) {}

    /// Per-frame logic hook.
    fn update(&mut self, _ctx: &TickContext<'_>) {}

    /// Per-frame render hook.
    fn draw(&self, _ctx: &TickContext<'_>) {}
}

/// Planar velocity.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Velocity {
    /// Horizontal speed.
    pub x: f32,
    /// Vertical speed.
    pub y: f32,
}

impl Velocity {
    /// Creates a velocity.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the velocity as an `(x, y)` pair.
    #[must_use]
    pub const fn value(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X: {}, Y: {}", self.x, self.y)
    }
}

impl Component for Velocity {}
