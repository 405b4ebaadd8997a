//! Frame orchestration for Deluge.
//!
//! A frame is the unit of simulation time. Each frame:
//! 1. Runs every update callback, in component registration order
//! 2. Runs every draw callback, in component registration order
//! 3. Advances the frame counter
//!
//! Within a callback, payloads are visited in ascending entity order.

use std::cell::RefCell;

use deluge_storage::{Phase, World};
use tracing::trace;

// =============================================================================
// Frame Stats
// =============================================================================

/// What happened during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frame number the phases ran with.
    pub frame: u64,
    /// Number of payloads whose update hook ran.
    pub updated: usize,
    /// Number of payloads whose draw hook ran.
    pub drawn: usize,
}

// =============================================================================
// Tick Driver
// =============================================================================

/// Drives the update and draw phases of a [`World`].
#[derive(Clone, Debug, Default)]
pub struct TickDriver {
    /// Current frame number.
    frame: u64,
}

impl TickDriver {
    /// Creates a driver at frame zero.
    #[must_use]
    pub fn new() -> Self {
        Self { frame: 0 }
    }

    /// Returns the current frame number.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Runs the update phase for the current frame.
    ///
    /// Use together with [`TickDriver::draw`] and [`TickDriver::advance`]
    /// when logic and render steps are driven separately.
    pub fn update(&self, world: &mut World) -> usize {
        world.run_phase(Phase::Update, self.frame)
    }

    /// Runs the draw phase for the current frame.
    pub fn draw(&self, world: &mut World) -> usize {
        world.run_phase(Phase::Draw, self.frame)
    }

    /// Moves on to the next frame.
    pub fn advance(&mut self) {
        self.frame += 1;
    }

    /// Runs one complete frame: update, then draw, then advance.
    pub fn run_frame(&mut self, world: &mut World) -> FrameStats {
        let cell = RefCell::new(std::mem::take(world));
        let stats = self.run_frame_in(&cell);
        *world = cell.into_inner();
        stats
    }

    /// Runs one complete frame over a shared world.
    ///
    /// The world is not borrowed while hooks run, so anything holding the
    /// same cell can reach it from inside a hook.
    pub fn run_frame_in(&mut self, world: &RefCell<World>) -> FrameStats {
        let frame = self.frame;
        let updated = World::run_phase_in(world, Phase::Update, frame);
        let drawn = World::run_phase_in(world, Phase::Draw, frame);
        self.advance();

        trace!(frame, updated, drawn, "frame complete");
        FrameStats {
            frame,
            updated,
            drawn,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
