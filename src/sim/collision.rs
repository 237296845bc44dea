//! Axis-aligned collision detection
//!
//! A run ends on the ground strip, the ceiling, or either rectangle of a
//! pipe. Exact edge contact is not a collision; any positive overlap is.

use glam::Vec2;

use super::state::{Bird, Pipe};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Strict overlap test: shared edges don't count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }
}

/// Whether the bird's box hit the ground, the ceiling, or any pipe.
///
/// Ground and ceiling are checked first, then pipes in set order with the
/// top rectangle before the bottom one; the first hit wins.
pub fn terminal_collision(
    bird: &Bird,
    pipes: &[Pipe],
    playfield_height: f32,
    floor_height: f32,
) -> bool {
    let ground_y = playfield_height - floor_height;
    if bird.pos.y + bird.size.y > ground_y {
        return true;
    }
    if bird.pos.y < 0.0 {
        return true;
    }

    let bb = bird.aabb();
    pipes
        .iter()
        .any(|pipe| bb.overlaps(&pipe.top_rect()) || bb.overlaps(&pipe.bottom_rect(ground_y)))
}
