//! Terminal rendering on crossterm
//!
//! Reads simulation state and draws whole frames with half-block cells: each
//! terminal row carries two vertical pixels, which keeps the playfield's
//! aspect ratio workable in an ordinary window. The renderer never touches
//! simulation state.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color},
};
use glam::Vec2;

use crate::sim::{GamePhase, GameState};

const SKY: Color = Color::Rgb { r: 110, g: 197, b: 233 };
const GRASS: Color = Color::Rgb { r: 90, g: 170, b: 60 };
const DIRT: Color = Color::Rgb { r: 222, g: 184, b: 135 };
const PIPE: Color = Color::Rgb { r: 0, g: 150, b: 0 };
const PIPE_LIP: Color = Color::Rgb { r: 0, g: 110, b: 0 };
const BIRD: Color = Color::Rgb { r: 255, g: 200, b: 0 };
const BIRD_EYE: Color = Color::Rgb { r: 220, g: 40, b: 30 };

/// Off-screen pixel grid emitted as `▀` cells
pub struct Renderer {
    cols: usize,
    rows: usize,
    px: Vec<Color>,
}

impl Renderer {
    pub fn new(cols: u16, rows: u16) -> Self {
        let (cols, rows) = (cols.max(2) as usize, rows.max(2) as usize);
        Self {
            cols,
            rows,
            px: vec![SKY; cols * rows * 2],
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(2) as usize;
        self.rows = rows.max(2) as usize;
        self.px.resize(self.cols * self.rows * 2, SKY);
    }

    fn height(&self) -> usize {
        self.rows * 2
    }

    fn set(&mut self, x: i32, y: i32, c: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.height() {
            self.px[y as usize * self.cols + x as usize] = c;
        }
    }

    /// Fill a world-space rectangle, mapped onto the pixel grid
    fn fill_world(&mut self, state: &GameState, x0: f32, y0: f32, x1: f32, y1: f32, c: Color) {
        let sx = self.cols as f32 / state.tuning.playfield_width;
        let sy = self.height() as f32 / state.tuning.playfield_height;
        let (px0, px1) = ((x0 * sx) as i32, (x1 * sx).ceil() as i32);
        let (py0, py1) = ((y0 * sy) as i32, (y1 * sy).ceil() as i32);
        for y in py0..py1 {
            for x in px0..px1 {
                self.set(x, y, c);
            }
        }
    }

    /// Draw one frame of the session
    pub fn draw(&mut self, out: &mut impl Write, state: &GameState) -> io::Result<()> {
        self.px.fill(SKY);

        let ground_y = state.ground_y();
        let field_w = state.tuning.playfield_width;
        let field_h = state.tuning.playfield_height;

        for pipe in &state.pipes {
            self.fill_world(state, pipe.x, 0.0, pipe.right(), pipe.gap_top, PIPE);
            self.fill_world(state, pipe.x, pipe.gap_bottom, pipe.right(), ground_y, PIPE);
            // Darker lip on the gap edges
            self.fill_world(
                state,
                pipe.x,
                pipe.gap_top - 6.0,
                pipe.right(),
                pipe.gap_top,
                PIPE_LIP,
            );
            self.fill_world(
                state,
                pipe.x,
                pipe.gap_bottom,
                pipe.right(),
                pipe.gap_bottom + 6.0,
                PIPE_LIP,
            );
        }

        self.fill_world(state, 0.0, ground_y, field_w, ground_y + 8.0, GRASS);
        self.fill_world(state, 0.0, ground_y + 8.0, field_w, field_h, DIRT);

        let bird = &state.bird;
        self.fill_world(
            state,
            bird.pos.x,
            bird.pos.y,
            bird.pos.x + bird.size.x,
            bird.pos.y + bird.size.y,
            BIRD,
        );
        // Eye rides the tilt: up when climbing, down when diving
        let lean = bird.tilt() / crate::consts::MAX_TILT * (bird.size.y / 4.0);
        let eye = bird.pos + Vec2::new(bird.size.x * 0.75, bird.size.y * 0.3 + lean);
        self.fill_world(state, eye.x, eye.y, eye.x + 5.0, eye.y + 5.0, BIRD_EYE);

        self.blit(out)?;
        self.overlay(out, state)
    }

    /// Emit the pixel grid, batching color changes
    fn blit(&self, out: &mut impl Write) -> io::Result<()> {
        let mut fg = None;
        let mut bg = None;
        for row in 0..self.rows {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            for col in 0..self.cols {
                let top = self.px[(row * 2) * self.cols + col];
                let bot = self.px[(row * 2 + 1) * self.cols + col];
                if fg != Some(top) {
                    queue!(out, style::SetForegroundColor(top))?;
                    fg = Some(top);
                }
                if bg != Some(bot) {
                    queue!(out, style::SetBackgroundColor(bot))?;
                    bg = Some(bot);
                }
                queue!(out, style::Print('\u{2580}'))?;
            }
        }
        queue!(out, style::ResetColor)?;
        Ok(())
    }

    fn overlay(&self, out: &mut impl Write, state: &GameState) -> io::Result<()> {
        self.print_centered(out, 1, &format!(" {} ", state.score))?;

        if state.phase == GamePhase::GameOver {
            let mid = (self.rows / 2) as u16;
            self.print_centered(out, mid.saturating_sub(1), "  GAME OVER  ")?;
            self.print_centered(
                out,
                mid,
                &format!("  score {}   best {}  ", state.score, state.best),
            )?;
            self.print_centered(out, mid + 1, "  space to restart, q to quit  ")?;
        }
        out.flush()
    }

    fn print_centered(&self, out: &mut impl Write, row: u16, text: &str) -> io::Result<()> {
        let col = (self.cols.saturating_sub(text.len()) / 2) as u16;
        queue!(
            out,
            cursor::MoveTo(col, row),
            style::SetForegroundColor(Color::White),
            style::SetBackgroundColor(Color::Black),
            style::Print(text),
            style::ResetColor,
        )
    }
}
