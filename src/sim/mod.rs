//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-frame stepping only (speeds and accelerations are per-frame amounts)
//! - Seeded RNG only
//! - Stable pipe order (creation order, x-descending)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, terminal_collision};
pub use state::{Bird, GamePhase, GameState, Pipe};
pub use tick::{TickInput, tick};
