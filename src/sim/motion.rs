//! Per-frame motion laws
//!
//! The player and its box follow held direction keys; enemies steer toward
//! the player's position, each kind adding its own periodic drift.

use glam::Vec2;

use super::state::{CatchBox, Enemy, Motion, Player};
use crate::clamp_axis;
use crate::consts::*;

/// Four independent direction keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionFlags {
    /// Sum of the held unit directions (diagonals are not normalized)
    pub fn axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.up {
            axis.y -= 1.0;
        }
        if self.down {
            axis.y += 1.0;
        }
        if self.left {
            axis.x -= 1.0;
        }
        if self.right {
            axis.x += 1.0;
        }
        axis
    }
}

impl Player {
    /// Move by held keys, then keep the whole square on screen
    pub fn update(&mut self, dt: f32, keys: DirectionFlags) {
        let body = &mut self.body;
        body.pos += keys.axis() * PLAYER_SPEED * dt;

        let max_x = (SCREEN_WIDTH - body.width()) as f32;
        let max_y = (SCREEN_HEIGHT - body.height()) as f32;
        body.pos.x = clamp_axis(body.pos.x, 0.0, max_x);
        body.pos.y = clamp_axis(body.pos.y, 0.0, max_y);
    }
}

impl CatchBox {
    /// Smallest allowed offset component
    pub const MIN_OFFSET: f32 = -(BOX_SIZE as f32);
    /// Largest allowed offset component
    pub const MAX_OFFSET: f32 = PLAYER_SIZE as f32;

    /// Steer the offset by held keys and re-anchor on the player
    pub fn update(&mut self, dt: f32, keys: DirectionFlags, player_pos: Vec2) {
        self.offset += keys.axis() * PLAYER_SPEED * dt;
        self.offset.x = clamp_axis(self.offset.x, Self::MIN_OFFSET, Self::MAX_OFFSET);
        self.offset.y = clamp_axis(self.offset.y, Self::MIN_OFFSET, Self::MAX_OFFSET);

        self.body.pos = player_pos + self.offset;
    }
}

impl Enemy {
    /// Advance toward `target` (the player's position)
    pub fn update(&mut self, dt: f32, target: Vec2) {
        // Phase advances even when the enemy sits on the target
        let drift = match &mut self.motion {
            Motion::Straight => Vec2::ZERO,
            Motion::ZigZag { angle } => {
                *angle += ANGLE_SPEED_CHANGE * dt;
                Vec2::new(angle.cos() * ZIGZAG_AMPLITUDE, 0.0)
            }
            Motion::Spiral { angle } => {
                *angle += ANGLE_SPEED_CHANGE * dt;
                Vec2::new(angle.cos(), angle.sin()) * SPIRAL_SIZE
            }
        };

        let to_target = target - self.body.pos;
        let distance = to_target.length();
        if distance > 0.0 {
            let heading = to_target / distance;
            self.body.pos += (heading * self.speed + drift) * dt;
        }
    }
}
