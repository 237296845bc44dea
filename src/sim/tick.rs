//! Per-frame simulation step
//!
//! Advances pipes, spawns on cadence, integrates bird physics, scores
//! passages, and evaluates the terminal collision, in that order. Speeds and
//! gravity are per-frame quantities, so the frame cadence is the difficulty.

use super::collision::terminal_collision;
use super::state::{GamePhase, GameState, Pipe};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Set the bird's velocity to the upward impulse
    pub flap: bool,
    /// Restart from game over
    pub restart: bool,
}

/// Advance the session by one frame.
///
/// `now_ms` is a monotonic timestamp used only for the spawn cadence.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) {
    match state.phase {
        GamePhase::GameOver => {
            // Flap is ignored here; only an explicit restart resumes play.
            if input.restart {
                log::info!("restart, best so far {}", state.best);
                state.reset(now_ms);
            }
        }
        GamePhase::Running => run_frame(state, input, now_ms),
    }
}

fn run_frame(state: &mut GameState, input: &TickInput, now_ms: u64) {
    state.time_ticks += 1;

    // Advance the world, then drop pipes fully past the left edge. A pipe
    // whose right edge sits exactly on zero is still alive.
    let speed = state.tuning.pipe_speed;
    for pipe in &mut state.pipes {
        pipe.x -= speed;
    }
    state.pipes.retain(|pipe| pipe.right() >= 0.0);

    maybe_spawn(state, now_ms);

    if input.flap {
        state.bird.apply_impulse(state.tuning.flap_impulse);
    }
    state.bird.integrate(state.tuning.gravity);

    // Score before the collision check, so a pipe cleared on the terminal
    // frame still counts.
    let bird_x = state.bird.pos.x;
    for pipe in &mut state.pipes {
        if !pipe.passed && bird_x > pipe.right() {
            pipe.passed = true;
            state.score += 1;
        }
    }
    if state.score > state.best {
        state.best = state.score;
    }

    if terminal_collision(
        &state.bird,
        &state.pipes,
        state.tuning.playfield_height,
        state.tuning.floor_height,
    ) {
        state.bird.alive = false;
        state.phase = GamePhase::GameOver;
        log::info!(
            "game over at tick {}, score {}",
            state.time_ticks,
            state.score
        );
    }
}

/// Spawn one pipe at the right edge once the cadence interval has elapsed
fn maybe_spawn(state: &mut GameState, now_ms: u64) {
    if now_ms.saturating_sub(state.last_spawn_ms) > state.tuning.spawn_interval_ms {
        let pipe = Pipe::spawn(&mut state.rng, &state.tuning);
        log::debug!("pipe spawned, gap {:.0}..{:.0}", pipe.gap_top, pipe.gap_bottom);
        state.pipes.push(pipe);
        state.last_spawn_ms = now_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A pipe whose gap covers the whole playable band, so it can never be
    // collided with. Zero-height rectangles never overlap anything.
    fn open_pipe(x: f32) -> Pipe {
        Pipe {
            x,
            width: 50.0,
            gap_top: 0.0,
            gap_bottom: 540.0,
            passed: false,
        }
    }

    fn coast(state: &mut GameState) {
        tick(state, &TickInput::default(), 0);
    }

    #[test]
    fn test_freefall_matches_closed_form() {
        // From rest at mid-height with no pipes: after n frames
        //   velocity = n * g
        //   y        = y0 + g * n * (n + 1) / 2
        let mut state = GameState::new(1);
        let y0 = state.bird.pos.y;
        assert_eq!(y0, 310.0);

        for n in 1..=27u32 {
            coast(&mut state);
            assert_eq!(state.phase, GamePhase::Running, "alive at tick {n}");
            assert_eq!(state.bird.velocity, n as f32 * 0.5);
            assert_eq!(state.bird.pos.y, y0 + (n * (n + 1)) as f32 * 0.25);
        }

        // Tick 28 puts the bird's bottom through the ground line at 540
        coast(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.bird.alive);
        assert_eq!(state.bird.pos.y, 513.0);
        assert_eq!(state.time_ticks, 28);
    }

    #[test]
    fn test_game_over_freezes_the_world() {
        let mut state = GameState::new(1);
        state.pipes.push(open_pipe(300.0));
        while state.phase == GamePhase::Running {
            coast(&mut state);
        }

        let y = state.bird.pos.y;
        let velocity = state.bird.velocity;
        let pipe_x = state.pipes[0].x;
        let ticks = state.time_ticks;

        // Flap is not restart: nothing may move
        tick(&mut state, &TickInput { flap: true, restart: false }, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.bird.pos.y, y);
        assert_eq!(state.bird.velocity, velocity);
        assert_eq!(state.pipes[0].x, pipe_x);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_prune_boundary() {
        // Right edge exactly on zero after advancing survives the frame;
        // one more frame removes it.
        let mut state = GameState::new(1);
        state.pipes.push(open_pipe(-48.0));

        coast(&mut state);
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.pipes[0].right(), 0.0);

        coast(&mut state);
        assert!(state.pipes.is_empty());
    }

    #[test]
    fn test_passage_requires_strictly_clearing_the_edge() {
        // After one frame the pipe's right edge is exactly at the bird's x.
        // bird_x > right must be strict, so no score yet.
        let mut state = GameState::new(1);
        state.pipes.push(open_pipe(32.0));

        coast(&mut state);
        assert_eq!(state.pipes[0].right(), 80.0);
        assert_eq!(state.score, 0);
        assert!(!state.pipes[0].passed);

        coast(&mut state);
        assert_eq!(state.score, 1);
        assert!(state.pipes[0].passed);
    }

    #[test]
    fn test_single_pipe_scores_exactly_once() {
        // Keep the bird aloft with a flap every 16 frames while one
        // uncollidable pipe scrolls past.
        let mut state = GameState::new(1);
        state.pipes.push(open_pipe(90.0));

        for n in 1..=40u64 {
            let input = TickInput {
                flap: (n - 1) % 16 == 0,
                restart: false,
            };
            tick(&mut state, &input, 0);
            assert_eq!(state.phase, GamePhase::Running);
        }

        // Cleared at tick 31 (right edge 78 < bird x 80), never again
        assert_eq!(state.score, 1);
        assert_eq!(state.best, 1);
        assert!(state.pipes[0].passed);
    }

    #[test]
    fn test_passage_scored_on_the_terminal_frame() {
        // The bird hits the ground on tick 28, the same frame this pipe's
        // right edge finally drops below the bird's x. Scoring runs before
        // the collision check, so the point still counts.
        let mut state = GameState::new(1);
        state.pipes.push(open_pipe(85.0));

        while state.phase == GamePhase::Running {
            coast(&mut state);
        }

        assert_eq!(state.time_ticks, 28);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_restart_resets_the_session() {
        let mut state = GameState::new(1);
        state.pipes.push(open_pipe(85.0));
        while state.phase == GamePhase::Running {
            coast(&mut state);
        }
        assert_eq!(state.score, 1);

        tick(&mut state, &TickInput { flap: false, restart: true }, 60_000);

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.best, 1);
        assert!(state.pipes.is_empty());
        assert!(state.bird.alive);
        assert_eq!(state.bird.velocity, 0.0);
        assert_eq!(state.bird.pos.y, state.tuning.playfield_height / 2.0);
        assert_eq!(state.last_spawn_ms, 60_000);
    }

    #[test]
    fn test_spawn_cadence() {
        let mut state = GameState::new(42);

        // Interval must be strictly exceeded
        tick(&mut state, &TickInput::default(), 1_500);
        assert!(state.pipes.is_empty());

        tick(&mut state, &TickInput::default(), 1_501);
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.last_spawn_ms, 1_501);

        // Clock re-armed: same timestamp spawns nothing more
        tick(&mut state, &TickInput::default(), 1_501);
        assert_eq!(state.pipes.len(), 1);

        tick(&mut state, &TickInput::default(), 3_002);
        assert_eq!(state.pipes.len(), 2);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = GameState::new(99_999);
        let mut b = GameState::new(99_999);

        for n in 0..400u64 {
            let input = TickInput {
                flap: n % 13 == 0,
                restart: n % 97 == 0,
            };
            tick(&mut a, &input, n * 16);
            tick(&mut b, &input, n * 16);
        }

        assert_eq!(a.phase, b.phase);
        assert_eq!(a.score, b.score);
        assert_eq!(a.best, b.best);
        assert_eq!(a.bird.pos.y, b.bird.pos.y);
        assert_eq!(a.pipes.len(), b.pipes.len());
        for (pa, pb) in a.pipes.iter().zip(&b.pipes) {
            assert_eq!(pa.x, pb.x);
            assert_eq!(pa.gap_top, pb.gap_top);
        }
    }
}
