//! Entity-component storage for Deluge.
//!
//! This crate provides:
//! - [`EntityAllocator`] - Entity id issue, retirement and optional reuse
//! - [`ComponentRegistry`] - First-use component type registration
//! - [`Column`] - Dense per-type payload arrays indexed by entity id
//! - [`PresenceMask`] - The shared `(entity, type)` presence bit matrix
//! - [`Schedule`] - Per-type update and draw callback chains
//! - [`World`] - The component store tying all of the above together

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod column;
pub mod component;
pub mod config;
pub mod entity;
pub mod growth;
pub mod mask;
pub mod registry;
pub mod schedule;
pub mod world;

pub use column::{Column, ErasedColumn};
pub use component::{Component, Phase, TickContext, Velocity};
pub use config::{LayoutPolicy, StorageConfig};
pub use entity::EntityAllocator;
pub use mask::{PresenceMask, WORD_BITS};
pub use registry::ComponentRegistry;
pub use schedule::{Schedule, Subscriber};
pub use world::World;
