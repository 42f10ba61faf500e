//! Rendering port
//!
//! The simulation never draws. Each frame the loop hands the session to
//! `draw_scene`, which emits one filled rectangle per entity through a
//! `Renderer` and presents.

pub mod terminal;

pub use terminal::TerminalRenderer;

use std::io;

use crate::sim::{Bounded, GameState, Rect};

/// RGBA color, 8 bits per channel
pub type Rgba = [u8; 4];

pub const BACKGROUND_COLOR: Rgba = [0, 0, 0, 255];
pub const PLAYER_COLOR: Rgba = [0, 255, 0, 255];
pub const BOX_COLOR: Rgba = [255, 0, 0, 255];
pub const ENEMY_COLOR: Rgba = [0, 0, 255, 255];

/// Something that can fill axis-aligned rectangles in world coordinates
pub trait Renderer {
    /// Wipe the back buffer to the background color
    fn clear(&mut self) -> io::Result<()>;
    /// Fill `rect` (world units) with `color`
    fn draw_filled_rect(&mut self, rect: Rect, color: Rgba) -> io::Result<()>;
    /// Show the back buffer
    fn present(&mut self) -> io::Result<()>;
}

/// Draw the whole session: player, then box, then enemies
pub fn draw_scene<R: Renderer + ?Sized>(renderer: &mut R, state: &GameState) -> io::Result<()> {
    renderer.clear()?;
    renderer.draw_filled_rect(state.player.bounds(), PLAYER_COLOR)?;
    renderer.draw_filled_rect(state.catch_box.bounds(), BOX_COLOR)?;
    for enemy in &state.enemies {
        renderer.draw_filled_rect(enemy.bounds(), ENEMY_COLOR)?;
    }
    renderer.present()
}
