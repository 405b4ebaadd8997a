//! Frame driving and entity handles for Deluge.
//!
//! This crate provides:
//! - [`TickDriver`] - Runs the update and draw phases once per frame
//! - [`Entity`] - Id handle operating on the default world
//! - The default world itself ([`with_world`], [`with_world_mut`], [`install`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod handle;
pub mod runtime;
pub mod tick;

pub use handle::Entity;
pub use runtime::{frame, install, reset, run_frame, with_world, with_world_mut};
pub use tick::{FrameStats, TickDriver};
