//! Terminal renderer
//!
//! Maps the playfield onto the character grid and paints each cell with a
//! background color. The top terminal row is kept for the score line.

use std::io::{self, Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};

use super::{BACKGROUND_COLOR, Renderer, Rgba};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::platform::{ScoreBoard, final_score_message};
use crate::sim::Rect;

/// Rows reserved above the playfield
const HUD_ROWS: u16 = 1;

/// Back buffer of colored cells covering the playfield
#[derive(Debug, Clone)]
pub struct CellGrid {
    cols: usize,
    rows: usize,
    cells: Vec<Rgba>,
}

impl CellGrid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![BACKGROUND_COLOR; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn clear(&mut self) {
        self.cells.fill(BACKGROUND_COLOR);
    }

    pub fn get(&self, col: usize, row: usize) -> Option<Rgba> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col])
    }

    /// Cell span `(col0..col1, row0..row1)` touched by a world rectangle
    ///
    /// Returns `None` when the rectangle lies entirely off the playfield.
    pub fn cell_span(&self, rect: &Rect) -> Option<(usize, usize, usize, usize)> {
        let cols = self.cols as f32;
        let rows = self.rows as f32;
        let to_col = |x: f32| x * cols / SCREEN_WIDTH as f32;
        let to_row = |y: f32| y * rows / SCREEN_HEIGHT as f32;

        // Round outward so even sub-cell rectangles stay visible
        let col0 = to_col(rect.left()).floor().clamp(0.0, cols) as usize;
        let col1 = to_col(rect.right()).ceil().clamp(0.0, cols) as usize;
        let row0 = to_row(rect.top()).floor().clamp(0.0, rows) as usize;
        let row1 = to_row(rect.bottom()).ceil().clamp(0.0, rows) as usize;

        (col0 < col1 && row0 < row1).then_some((col0, col1, row0, row1))
    }

    pub fn fill(&mut self, rect: &Rect, color: Rgba) {
        if let Some((col0, col1, row0, row1)) = self.cell_span(rect) {
            for row in row0..row1 {
                let start = row * self.cols;
                self.cells[start + col0..start + col1].fill(color);
            }
        }
    }

    /// Row as runs of `(color, length)`
    fn runs(&self, row: usize) -> Vec<(Rgba, usize)> {
        let mut runs: Vec<(Rgba, usize)> = Vec::new();
        let start = row * self.cols;
        for &cell in &self.cells[start..start + self.cols] {
            match runs.last_mut() {
                Some((color, len)) if *color == cell => *len += 1,
                _ => runs.push((cell, 1)),
            }
        }
        runs
    }
}

fn to_color([r, g, b, _]: Rgba) -> Color {
    Color::Rgb { r, g, b }
}

/// Crossterm-backed renderer writing to any `Write`
pub struct TerminalRenderer<W: Write> {
    out: W,
    grid: CellGrid,
}

impl<W: Write> TerminalRenderer<W> {
    /// Build a renderer for a terminal of `cols` x `rows` characters
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        let play_rows = rows.saturating_sub(HUD_ROWS).max(1);
        log::info!("Terminal renderer: {}x{} cells (+{} HUD row)", cols, play_rows, HUD_ROWS);
        Self {
            out,
            grid: CellGrid::new(cols.max(1) as usize, play_rows as usize),
        }
    }

    /// Follow a terminal resize
    pub fn resize(&mut self, cols: u16, rows: u16) -> io::Result<()> {
        let play_rows = rows.saturating_sub(HUD_ROWS).max(1);
        self.grid = CellGrid::new(cols.max(1) as usize, play_rows as usize);
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Hand back the writer (tests inspect what was written)
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, row: u16, text: &str) -> io::Result<()> {
        let width = self.grid.cols();
        self.out.queue(cursor::MoveTo(0, row))?;
        self.out.queue(style::ResetColor)?;
        self.out.queue(Print(format!("{:<width$}", text, width = width)))?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn clear(&mut self) -> io::Result<()> {
        self.grid.clear();
        Ok(())
    }

    fn draw_filled_rect(&mut self, rect: Rect, color: Rgba) -> io::Result<()> {
        self.grid.fill(&rect, color);
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        for row in 0..self.grid.rows() {
            self.out.queue(cursor::MoveTo(0, row as u16 + HUD_ROWS))?;
            for (color, len) in self.grid.runs(row) {
                self.out.queue(style::SetBackgroundColor(to_color(color)))?;
                self.out.queue(Print(" ".repeat(len)))?;
            }
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}

impl<W: Write> ScoreBoard for TerminalRenderer<W> {
    fn show_score(&mut self, score: u32) -> io::Result<()> {
        self.write_line(0, &format!("Score: {}", score))
    }

    fn show_final_score(&mut self, score: u32) -> io::Result<()> {
        self.write_line(0, &final_score_message(score))
    }
}
