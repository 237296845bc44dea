//! Gapwing - a flap-through-the-gap arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipes, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `render`: Terminal rendering on crossterm

pub mod render;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions in world units
    pub const PLAYFIELD_WIDTH: f32 = 480.0;
    pub const PLAYFIELD_HEIGHT: f32 = 620.0;

    /// Downward acceleration added to the bird's velocity each frame
    pub const GRAVITY: f32 = 0.5;
    /// Velocity set by a flap (negative = upward)
    pub const FLAP_IMPULSE: f32 = -8.0;

    /// Bird defaults - width and height are equal, x never changes
    pub const BIRD_SIZE: f32 = 30.0;
    pub const BIRD_X: f32 = 80.0;

    /// Pipe defaults
    pub const PIPE_SPEED: f32 = 2.0;
    pub const PIPE_WIDTH: f32 = 50.0;
    pub const PIPE_GAP: f32 = 140.0;
    /// Milliseconds between pipe spawns
    pub const SPAWN_INTERVAL_MS: u64 = 1500;
    /// Minimum clearance between a gap edge and the playable band edges
    pub const GAP_MARGIN: f32 = 20.0;

    /// Height of the ground strip at the bottom of the playfield
    pub const FLOOR_HEIGHT: f32 = 80.0;

    /// Maximum bird tilt for rendering (radians)
    pub const MAX_TILT: f32 = std::f32::consts::FRAC_PI_4;
}
