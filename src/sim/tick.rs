//! Variable timestep simulation step
//!
//! One call advances the whole session by one frame: player, box, then every
//! enemy with its collision outcome.

use super::collision::check_collision;
use super::motion::DirectionFlags;
use super::state::{EndReason, GameEvent, GameState};

/// Held keys for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// W/S/A/D
    pub player: DirectionFlags,
    /// Arrow keys
    pub catcher: DirectionFlags,
}

/// Advance the session by `dt` seconds
///
/// Returns the events produced this frame. Ended sessions and non-positive
/// (or non-finite) `dt` leave the state untouched.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if !state.is_running() || !(dt > 0.0 && dt.is_finite()) {
        return events;
    }

    state.frame += 1;

    state.player.update(dt, input.player);
    let player_pos = state.player.pos();
    state.catch_box.update(dt, input.catcher, player_pos);

    // Replacements go onto the live list and are visited later in this same pass
    let mut player_caught = false;
    let mut i = 0;
    while i < state.enemies.len() {
        state.enemies[i].update(dt, player_pos);

        if check_collision(&state.catch_box, &state.enemies[i]) {
            let caught = state.enemies.remove(i);
            state.score += 1;
            events.push(GameEvent::EnemyCaught {
                kind: caught.kind(),
                score: state.score,
            });

            let replacement = state.make_random_enemy();
            events.push(GameEvent::EnemySpawned {
                kind: replacement.kind(),
                speed: replacement.speed,
            });
            state.enemies.push(replacement);
            continue;
        }

        if check_collision(&state.player, &state.enemies[i]) {
            // Keep going: the rest of the pass still runs this frame
            player_caught = true;
            events.push(GameEvent::PlayerCaught {
                kind: state.enemies[i].kind(),
            });
        }
        i += 1;
    }

    if player_caught {
        state.end(EndReason::Caught);
    }

    for event in &events {
        log::debug!("frame {}: {:?}", state.frame, event);
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Enemy, EnemyKind, GamePhase, Motion};
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    /// Session with no enemies so tests can place their own
    fn empty_state() -> GameState {
        let mut state = GameState::new(12345);
        state.enemies.clear();
        state
    }

    #[test]
    fn test_tick_without_input_keeps_player() {
        let mut state = GameState::new(12345);
        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.pos(), Vec2::new(400.0, 300.0));
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_zero_and_negative_dt_are_noops() {
        let mut state = GameState::new(12345);
        let before = state.enemies.clone();
        let input = TickInput {
            player: DirectionFlags {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };

        for dt in [0.0, -0.5, f32::NAN] {
            assert!(tick(&mut state, &input, dt).is_empty());
        }
        assert_eq!(state.enemies, before);
        assert_eq!(state.player.pos(), Vec2::new(400.0, 300.0));
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_box_catch_scores_and_respawns() {
        let mut state = empty_state();
        state.score = 5;
        // Inside the box's initial footprint (360..400, 260..300)
        state
            .enemies
            .push(Enemy::new(EnemyKind::ZigZag, Vec2::new(370.0, 270.0), 0.0));

        let events = tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.score, 6);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.phase, GamePhase::Running);

        let replacement = &state.enemies[0];
        assert_eq!(replacement.speed, 6.0);
        // Already stepped once from its spawn point this frame
        let spawn = state.player.pos() + replacement.kind().spawn_offset();
        assert!(replacement.pos().distance(spawn) <= (6.0 + SPIRAL_SIZE) * DT + 1e-4);

        assert!(matches!(
            events[0],
            GameEvent::EnemyCaught {
                kind: EnemyKind::ZigZag,
                score: 6
            }
        ));
        assert!(matches!(events[1], GameEvent::EnemySpawned { speed, .. } if speed == 6.0));
    }

    #[test]
    fn test_player_hit_ends_session() {
        let mut state = empty_state();
        // Overlaps the player (400..450, 300..350) but not the box
        state
            .enemies
            .push(Enemy::new(EnemyKind::Straight, Vec2::new(420.0, 320.0), 0.0));

        let events = tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.end_reason, Some(EndReason::Caught));
        assert_eq!(state.score, 0);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(
            events,
            vec![GameEvent::PlayerCaught {
                kind: EnemyKind::Straight
            }]
        );
    }

    #[test]
    fn test_box_hit_preempts_player_hit() {
        let mut state = empty_state();
        // Move the box to offset (10, 10) so it overlaps the player's square
        state.catch_box.offset = Vec2::new(10.0, 10.0);
        // Touches both the box (410..450, 310..350) and the player
        state
            .enemies
            .push(Enemy::new(EnemyKind::Spiral, Vec2::new(420.0, 320.0), 0.0));

        tick(&mut state, &TickInput::default(), 0.001);

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 1);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_pass_finishes_after_player_hit() {
        let mut state = empty_state();
        state
            .enemies
            .push(Enemy::new(EnemyKind::Straight, Vec2::new(420.0, 320.0), 0.0));
        state
            .enemies
            .push(Enemy::new(EnemyKind::Straight, Vec2::new(370.0, 270.0), 0.0));

        tick(&mut state, &TickInput::default(), DT);

        // The second enemy was still caught in the same frame
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.score, 1);
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_two_catches_in_one_frame() {
        let mut state = empty_state();
        state
            .enemies
            .push(Enemy::new(EnemyKind::Straight, Vec2::new(365.0, 265.0), 0.0));
        state
            .enemies
            .push(Enemy::new(EnemyKind::ZigZag, Vec2::new(380.0, 280.0), 0.0));

        let events = tick(&mut state, &TickInput::default(), 0.001);

        assert_eq!(state.score, 2);
        assert_eq!(state.enemies.len(), 2);
        // Speeds follow the score at each catch
        let mut speeds: Vec<f32> = state.enemies.iter().map(|e| e.speed).collect();
        speeds.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(speeds, vec![1.0, 2.0]);
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn test_replacement_moves_in_catch_frame() {
        for seed in 0..16 {
            let mut state = GameState::new(seed);
            state.enemies.clear();
            state
                .enemies
                .push(Enemy::new(EnemyKind::Straight, Vec2::new(370.0, 270.0), 0.0));

            let dt = 0.1;
            tick(&mut state, &TickInput::default(), dt);
            assert_eq!(state.score, 1);

            let replacement = &state.enemies[0];
            let spawn = state.player.pos() + replacement.kind().spawn_offset();
            assert_ne!(replacement.pos(), spawn);
            match replacement.motion {
                Motion::Straight => {
                    // Speed 1 straight at the player
                    assert!((replacement.pos().distance(spawn) - dt).abs() < 1e-4);
                }
                Motion::ZigZag { angle } | Motion::Spiral { angle } => {
                    assert!((angle - ANGLE_SPEED_CHANGE * dt).abs() < 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_ended_is_terminal() {
        let mut state = GameState::new(1);
        state.request_quit();
        let snapshot_enemies = state.enemies.clone();
        let input = TickInput {
            player: DirectionFlags {
                down: true,
                ..Default::default()
            },
            catcher: DirectionFlags {
                right: true,
                ..Default::default()
            },
        };

        for _ in 0..10 {
            assert!(tick(&mut state, &input, DT).is_empty());
        }
        assert_eq!(state.score, 0);
        assert_eq!(state.enemies, snapshot_enemies);
        assert_eq!(state.player.pos(), Vec2::new(400.0, 300.0));
        assert_eq!(state.end_reason, Some(EndReason::Quit));
    }

    #[test]
    fn test_box_steering_catches_initial_straight_enemy() {
        // Straight enemy starts at speed 0 at (300, 200). Walk the player
        // up-left until the box (which trails up-left) sweeps over it.
        let mut state = GameState::new(3);
        let input = TickInput {
            player: DirectionFlags {
                up: true,
                left: true,
                ..Default::default()
            },
            ..Default::default()
        };

        let mut caught = false;
        for _ in 0..120 {
            let events = tick(&mut state, &input, DT);
            if events
                .iter()
                .any(|e| matches!(e, GameEvent::EnemyCaught { kind: EnemyKind::Straight, .. }))
            {
                caught = true;
                break;
            }
            if !state.is_running() {
                break;
            }
        }
        assert!(caught, "box never reached the straight enemy");
        assert_eq!(state.enemies.len(), INITIAL_ENEMY_COUNT);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                player: DirectionFlags {
                    up: true,
                    left: true,
                    ..Default::default()
                },
                ..Default::default()
            },
            TickInput {
                catcher: DirectionFlags {
                    right: true,
                    ..Default::default()
                },
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..100 {
            for input in &inputs {
                tick(&mut state1, input, DT);
                tick(&mut state2, input, DT);
            }
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.enemies, state2.enemies);
        assert_eq!(state1.player, state2.player);
    }
}
