//! Deluge - Entity-component storage engine
//!
//! This crate re-exports all layers of the Deluge system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: deluge_engine     - Tick driver, default world, entity handles
//! Layer 1: deluge_storage    - Allocator, type registry, columns, presence mask
//! Layer 0: deluge_foundation - Core types (EntityId, ComponentTypeId, Error)
//! ```

pub use deluge_engine as engine;
pub use deluge_foundation as foundation;
pub use deluge_storage as storage;
