//! Game state and core simulation types
//!
//! One [`GameState`] is one session; nothing lives in module globals, so
//! several sessions can run side by side.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::consts::MAX_TILT;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended on a terminal collision; waits for an explicit restart
    GameOver,
}

/// The player-controlled bird
#[derive(Debug, Clone)]
pub struct Bird {
    /// Top-left corner. x never changes - the world scrolls instead.
    pub pos: Vec2,
    /// Width and height, fixed for the session
    pub size: Vec2,
    /// Vertical velocity in units per frame (positive = downward)
    pub velocity: f32,
    pub alive: bool,
}

impl Bird {
    fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.bird_x, tuning.playfield_height / 2.0),
            size: Vec2::splat(tuning.bird_size),
            velocity: 0.0,
            alive: true,
        }
    }

    /// Set velocity to the flap impulse. Dead birds don't flap.
    pub fn apply_impulse(&mut self, impulse: f32) {
        if self.alive {
            self.velocity = impulse;
        }
    }

    /// One frame of physics: accelerate, then move
    pub fn integrate(&mut self, gravity: f32) {
        self.velocity += gravity;
        self.pos.y += self.velocity;
    }

    /// Bounding box for collision checks
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.pos + self.size)
    }

    /// Rendering tilt in radians: velocity / 10, clamped to ±45°
    pub fn tilt(&self) -> f32 {
        (self.velocity / 10.0).clamp(-MAX_TILT, MAX_TILT)
    }
}

/// A pipe pair: solid above `gap_top` and below `gap_bottom`
#[derive(Debug, Clone)]
pub struct Pipe {
    /// Left edge, decreases every frame
    pub x: f32,
    /// Fixed at creation
    pub width: f32,
    /// Where the gap begins
    pub gap_top: f32,
    /// Where the gap ends (`gap_top` + the configured gap height)
    pub gap_bottom: f32,
    /// Flips to true at most once, when the bird clears the right edge
    pub passed: bool,
}

impl Pipe {
    /// Spawn a pipe at the right edge with a randomly placed gap.
    ///
    /// The gap plus its margins always lands inside the band between the
    /// ceiling and the ground strip.
    pub fn spawn(rng: &mut Pcg32, tuning: &Tuning) -> Self {
        let band = tuning.playfield_height
            - tuning.pipe_gap
            - tuning.floor_height
            - 2.0 * tuning.gap_margin;
        let gap_top = rng.random::<f32>() * band + tuning.gap_margin;
        Self {
            x: tuning.playfield_width,
            width: tuning.pipe_width,
            gap_top,
            gap_bottom: gap_top + tuning.pipe_gap,
            passed: false,
        }
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Rectangle above the gap
    pub fn top_rect(&self) -> Aabb {
        Aabb::new(Vec2::new(self.x, 0.0), Vec2::new(self.right(), self.gap_top))
    }

    /// Rectangle below the gap, down to the ground strip
    pub fn bottom_rect(&self, ground_y: f32) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, self.gap_bottom),
            Vec2::new(self.right(), ground_y),
        )
    }
}

/// Complete session state (deterministic given seed and input script)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Gap placement RNG, owned by the session
    pub(crate) rng: Pcg32,
    /// Gameplay constants
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    pub bird: Bird,
    /// Live pipes in creation order (x-descending)
    pub pipes: Vec<Pipe>,
    /// Pipes cleared this run
    pub score: u32,
    /// Best score this session; survives restarts
    pub best: u32,
    /// Spawn clock, re-armed on every spawn and on reset
    pub last_spawn_ms: u64,
    /// Simulation frame counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a session with custom tuning, assumed already validated
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        debug_assert!(tuning.validate().is_ok());
        let bird = Bird::new(&tuning);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Running,
            bird,
            pipes: Vec::new(),
            score: 0,
            best: 0,
            last_spawn_ms: 0,
            time_ticks: 0,
        }
    }

    /// Y coordinate where the ground strip begins
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.tuning.playfield_height - self.tuning.floor_height
    }

    /// Return to [`GamePhase::Running`] with a fresh bird and an empty
    /// playfield. The RNG stream and session best carry over.
    pub fn reset(&mut self, now_ms: u64) {
        self.bird = Bird::new(&self.tuning);
        self.pipes.clear();
        self.score = 0;
        self.last_spawn_ms = now_ms;
        self.phase = GamePhase::Running;
    }
}
