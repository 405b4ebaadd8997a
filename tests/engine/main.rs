//! Integration tests for Layer 2: Engine
//!
//! Tests for frame driving and entity handles on the default world.

mod frames;
mod handles;
