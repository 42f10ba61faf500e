//! Catch Box - steer a player and its catch box to trap homing enemies
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, session state)
//! - `app`: Frame loop driver (clock, pause toggle, quit signal)
//! - `renderer`: Draw port and the terminal renderer
//! - `platform`: Clock, input and score ports plus terminal implementations
//! - `settings`: JSON-backed runtime settings

pub mod app;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (world units)
    pub const SCREEN_WIDTH: u32 = 800;
    pub const SCREEN_HEIGHT: u32 = 600;

    /// Player square edge and speed (units per second)
    pub const PLAYER_SIZE: u32 = 50;
    pub const PLAYER_SPEED: f32 = 200.0;

    /// Catch box edge; its offset from the player ranges over
    /// `[-BOX_SIZE, PLAYER_SIZE]` on both axes
    pub const BOX_SIZE: u32 = 40;

    /// Enemy square edge
    pub const ENEMY_SIZE: u32 = 10;

    /// Lateral velocity amplitudes for the periodic enemies
    pub const ZIGZAG_AMPLITUDE: f32 = 50.0;
    pub const SPIRAL_SIZE: f32 = 100.0;

    /// Phase angle growth (radians per second)
    pub const ANGLE_SPEED_CHANGE: f32 = 5.0;

    /// Per-axis distance between the player and a freshly spawned enemy
    pub const ENEMY_CREATION_DISTANCE_COMPONENT: f32 = 100.0;

    /// Number of enemies alive at any time
    pub const INITIAL_ENEMY_COUNT: usize = 3;
}

/// Clamp `value` into `[min, max]`, preferring `min` when the range is inverted
#[inline]
pub fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}
