//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`] so a run can be reconfigured
//! from a JSON file without recompiling. Defaults reproduce the classic feel.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts;

/// Gameplay constants. Speeds and accelerations are per-frame amounts, so
/// the frame cadence is part of the difficulty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playfield size in world units
    pub playfield_width: f32,
    pub playfield_height: f32,
    /// Downward acceleration added to the bird's velocity each frame
    pub gravity: f32,
    /// Velocity a flap sets (negative = upward)
    pub flap_impulse: f32,
    /// Leftward pipe movement per frame
    pub pipe_speed: f32,
    pub pipe_width: f32,
    /// Vertical gap height
    pub pipe_gap: f32,
    /// Milliseconds between pipe spawns
    pub spawn_interval_ms: u64,
    /// Bird width and height
    pub bird_size: f32,
    /// Fixed horizontal position of the bird's left edge
    pub bird_x: f32,
    /// Height of the ground strip
    pub floor_height: f32,
    /// Minimum clearance between a gap edge and the playable band edges
    pub gap_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: consts::PLAYFIELD_WIDTH,
            playfield_height: consts::PLAYFIELD_HEIGHT,
            gravity: consts::GRAVITY,
            flap_impulse: consts::FLAP_IMPULSE,
            pipe_speed: consts::PIPE_SPEED,
            pipe_width: consts::PIPE_WIDTH,
            pipe_gap: consts::PIPE_GAP,
            spawn_interval_ms: consts::SPAWN_INTERVAL_MS,
            bird_size: consts::BIRD_SIZE,
            bird_x: consts::BIRD_X,
            floor_height: consts::FLOOR_HEIGHT,
            gap_margin: consts::GAP_MARGIN,
        }
    }
}

/// Failure to load or validate tuning
#[derive(Debug)]
pub enum TuningError {
    Io(io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "reading tuning file: {e}"),
            TuningError::Parse(e) => write!(f, "parsing tuning file: {e}"),
            TuningError::Invalid(msg) => write!(f, "invalid tuning: {msg}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for TuningError {
    fn from(e: io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// Check that the constants describe a playable field
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.playfield_width <= 0.0 || self.playfield_height <= 0.0 {
            return Err(TuningError::Invalid(format!(
                "playfield {}x{} must be positive",
                self.playfield_width, self.playfield_height
            )));
        }
        if self.pipe_gap + self.floor_height + 2.0 * self.gap_margin >= self.playfield_height {
            return Err(TuningError::Invalid(format!(
                "gap {} + floor {} + margins {} do not fit in playfield height {}",
                self.pipe_gap,
                self.floor_height,
                2.0 * self.gap_margin,
                self.playfield_height
            )));
        }
        if self.pipe_speed <= 0.0
            || self.pipe_width <= 0.0
            || self.pipe_gap <= 0.0
            || self.bird_size <= 0.0
        {
            return Err(TuningError::Invalid(
                "pipe speed, pipe width, pipe gap, and bird size must be positive".into(),
            ));
        }
        if self.gravity < 0.0 {
            return Err(TuningError::Invalid(
                "gravity must not point upward".into(),
            ));
        }
        if self.flap_impulse >= 0.0 {
            return Err(TuningError::Invalid(
                "flap impulse must be upward (negative)".into(),
            ));
        }
        if self.spawn_interval_ms == 0 {
            return Err(TuningError::Invalid(
                "spawn interval must be at least 1 ms".into(),
            ));
        }
        if self.bird_x <= 0.0 || self.bird_x + self.bird_size >= self.playfield_width {
            return Err(TuningError::Invalid(format!(
                "bird at x {} (size {}) must sit inside the playfield",
                self.bird_x, self.bird_size
            )));
        }
        Ok(())
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = fs::read_to_string(path)?;
        let tuning: Tuning = serde_json::from_str(&json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, TuningError> {
        match path {
            Some(p) => {
                let tuning = Self::load(p)?;
                log::info!("loaded tuning from {}", p.display());
                Ok(tuning)
            }
            None => Ok(Self::default()),
        }
    }
}
