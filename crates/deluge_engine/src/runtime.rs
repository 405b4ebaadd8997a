//! The default world.
//!
//! Storage is single-threaded, so the process-wide world lives in a
//! thread-local slot owned by the thread that drives frames. [`Entity`]
//! handles operate on it, including from inside component hooks while
//! [`run_frame`] is running.
//!
//! [`Entity`]: crate::Entity

use std::cell::RefCell;

use deluge_storage::World;
use tracing::debug;

use crate::tick::{FrameStats, TickDriver};

thread_local! {
    static DEFAULT_WORLD: RefCell<World> = RefCell::new(World::new());
    static DRIVER: RefCell<TickDriver> = RefCell::new(TickDriver::new());
}

/// Runs `f` with shared access to the default world.
///
/// # Panics
///
/// Panics if called from inside [`with_world_mut`].
pub fn with_world<R>(f: impl FnOnce(&World) -> R) -> R {
    DEFAULT_WORLD.with(|world| f(&*world.borrow()))
}

/// Runs `f` with exclusive access to the default world.
///
/// # Panics
///
/// Panics if called from inside [`with_world`] or [`with_world_mut`].
pub fn with_world_mut<R>(f: impl FnOnce(&mut World) -> R) -> R {
    DEFAULT_WORLD.with(|world| f(&mut *world.borrow_mut()))
}

/// Replaces the default world, returning the previous one.
///
/// The frame counter restarts at zero.
pub fn install(world: World) -> World {
    DRIVER.with(|driver| *driver.borrow_mut() = TickDriver::new());
    let previous = with_world_mut(|current| std::mem::replace(current, world));
    debug!(
        entities = previous.entity_count(),
        component_types = previous.component_type_count(),
        "replaced default world"
    );
    previous
}

/// Replaces the default world with an empty one using the default configuration.
pub fn reset() -> World {
    install(World::new())
}

/// Runs one frame of the default world.
///
/// Neither the world nor the frame counter is borrowed while hooks run.
/// Hooks see the frame being run from [`frame`].
pub fn run_frame() -> FrameStats {
    let mut driver = DRIVER.with(|driver| driver.borrow().clone());
    let stats = DEFAULT_WORLD.with(|world| driver.run_frame_in(world));
    DRIVER.with(|slot| *slot.borrow_mut() = driver);
    stats
}

/// Returns the default world's current frame number.
#[must_use]
pub fn frame() -> u64 {
    DRIVER.with(|driver| driver.borrow().frame())
}
