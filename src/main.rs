//! Gapwing entry point
//!
//! Terminal setup, the frame loop, and state-dependent input dispatch.

use std::io::{self, Stdout, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode},
    execute, terminal,
};

use gapwing::render::Renderer;
use gapwing::sim::{GamePhase, GameState, TickInput, tick};
use gapwing::tuning::Tuning;

/// Frame cadence. Sim constants are per-frame, so this is the difficulty.
const FRAME: Duration = Duration::from_millis(16);

fn main() -> io::Result<()> {
    env_logger::init();

    let config = std::env::args().nth(1).map(PathBuf::from);
    let tuning = match Tuning::load_or_default(config.as_deref()) {
        Ok(tuning) => tuning,
        Err(e) => {
            eprintln!("gapwing: {e}");
            std::process::exit(2);
        }
    };

    let seed = seed_from_time();
    log::info!("starting session, seed {seed}");
    let mut state = GameState::with_tuning(seed, tuning);

    terminal::enable_raw_mode()?;
    let mut out = stdout();
    let result = execute!(out, terminal::EnterAlternateScreen, cursor::Hide)
        .and_then(|_| run(&mut out, &mut state));
    let restore = execute!(out, terminal::LeaveAlternateScreen, cursor::Show)
        .and(terminal::disable_raw_mode());
    result.and(restore)
}

fn run(out: &mut Stdout, state: &mut GameState) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut renderer = Renderer::new(cols, rows);
    let started = Instant::now();

    loop {
        let frame_start = Instant::now();

        let mut input = TickInput::default();
        let mut quit = false;
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => dispatch(state.phase, key.code, &mut input, &mut quit),
                Event::Resize(c, r) => renderer.resize(c, r),
                _ => {}
            }
        }
        if quit {
            return Ok(());
        }

        tick(state, &input, started.elapsed().as_millis() as u64);
        renderer.draw(out, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

/// The same key means different things in different phases: space flaps
/// while running and restarts after a crash.
fn dispatch(phase: GamePhase, code: KeyCode, input: &mut TickInput, quit: &mut bool) {
    match (phase, code) {
        (_, KeyCode::Char('q') | KeyCode::Esc) => *quit = true,
        (GamePhase::Running, KeyCode::Char(' ') | KeyCode::Up) => input.flap = true,
        (GamePhase::GameOver, KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('r')) => {
            input.restart = true;
        }
        _ => {}
    }
}

fn seed_from_time() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
