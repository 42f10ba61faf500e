//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only enters through the `dt` passed to `tick`
//! - Seeded RNG only
//! - No rendering, terminal or clock dependencies

pub mod collision;
pub mod motion;
pub mod state;
pub mod tick;

pub use collision::{Bounded, Rect, check_collision, rects_overlap};
pub use motion::DirectionFlags;
pub use state::{
    CatchBox, EndReason, Enemy, EnemyKind, Entity, GameEvent, GamePhase, GameState, Motion, Player,
};
pub use tick::{TickInput, tick};
