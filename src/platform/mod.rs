//! Platform abstraction layer
//!
//! Ports the frame loop talks to:
//! - `Clock`: monotonic milliseconds
//! - `InputSource`: held keys and the quit signal
//! - `ScoreBoard`: score readout
//!
//! plus the native implementations (system clock, crossterm keyboard).

pub mod terminal;

pub use terminal::TerminalInput;

use std::io::{self, Write};
use std::time::Instant;

/// Logical keys the game reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Player movement (W/A/S/D)
    W,
    A,
    S,
    D,
    /// Box movement (arrow keys)
    Up,
    Down,
    Left,
    Right,
    /// Pause toggle (Pause or Escape)
    Pause,
}

/// Monotonic time source
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_millis(&self) -> u64;
}

/// Keyboard state plus the external quit signal
pub trait InputSource {
    /// Drain pending platform events; called once per frame
    fn pump(&mut self) -> io::Result<()>;
    /// Whether `key` is currently held
    fn is_key_held(&self, key: Key) -> bool;
    /// Whether the user asked to close the game
    fn quit_requested(&self) -> bool;
}

/// Where the running score is shown
pub trait ScoreBoard {
    /// Called once per simulated frame
    fn show_score(&mut self, score: u32) -> io::Result<()>;
    /// Called once when the session ends
    fn show_final_score(&mut self, score: u32) -> io::Result<()>;
}

/// Text shown when a session is over
pub fn final_score_message(score: u32) -> String {
    format!("Game is over with a score: {}", score)
}

/// Line-oriented score readout for a terminal in normal mode
#[derive(Debug)]
pub struct ConsoleScoreBoard<W: Write> {
    out: W,
}

impl<W: Write> ConsoleScoreBoard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ScoreBoard for ConsoleScoreBoard<W> {
    fn show_score(&mut self, score: u32) -> io::Result<()> {
        writeln!(self.out, "Score: {}", score)
    }

    fn show_final_score(&mut self, score: u32) -> io::Result<()> {
        writeln!(self.out, "{}", final_score_message(score))?;
        self.out.flush()
    }
}

/// `Clock` backed by `std::time::Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}
