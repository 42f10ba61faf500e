//! Game state and core simulation types
//!
//! The session owns the player, its catch box and every live enemy. Enemies
//! are plain values inside a `Vec`; removing one drops it.

use glam::{UVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{Bounded, Rect};
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Simulation advances every frame
    Running,
    /// Session is over; nothing changes any more
    Ended,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// An enemy touched the player
    Caught,
    /// The player asked to quit (window close / Ctrl+C)
    Quit,
}

/// Something notable that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// The box trapped an enemy; `score` is the score after the catch
    EnemyCaught { kind: EnemyKind, score: u32 },
    /// A replacement enemy was queued
    EnemySpawned { kind: EnemyKind, speed: f32 },
    /// An enemy reached the player
    PlayerCaught { kind: EnemyKind },
}

/// Position and fixed size shared by every simulated object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub pos: Vec2,
    size: UVec2,
}

impl Entity {
    pub fn new(pos: Vec2, width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0, "entity size must be positive");
        Self {
            pos,
            size: UVec2::new(width, height),
        }
    }

    /// Square entity
    pub fn square(pos: Vec2, edge: u32) -> Self {
        Self::new(pos, edge, edge)
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.x
    }

    pub fn height(&self) -> u32 {
        self.size.y
    }
}

impl Bounded for Entity {
    fn bounds(&self) -> Rect {
        Rect {
            min: self.pos,
            size: self.size.as_vec2(),
        }
    }
}

/// The player square
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: Entity,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Entity::square(pos, PLAYER_SIZE),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        self.body.bounds()
    }
}

/// The catcher, steered as an offset from the player
#[derive(Debug, Clone, PartialEq)]
pub struct CatchBox {
    pub body: Entity,
    /// Offset from the player's position, clamped to `[-BOX_SIZE, PLAYER_SIZE]`
    pub offset: Vec2,
}

impl CatchBox {
    /// Offset the box starts with: tucked against the player's top-left corner
    pub const INITIAL_OFFSET: Vec2 = Vec2::new(-(BOX_SIZE as f32), -(BOX_SIZE as f32));

    pub fn new(player_pos: Vec2) -> Self {
        Self {
            body: Entity::square(player_pos + Self::INITIAL_OFFSET, BOX_SIZE),
            offset: Self::INITIAL_OFFSET,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }
}

impl Bounded for CatchBox {
    fn bounds(&self) -> Rect {
        self.body.bounds()
    }
}

/// Enemy flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Straight,
    ZigZag,
    Spiral,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Straight, EnemyKind::ZigZag, EnemyKind::Spiral];

    /// Where this kind appears relative to the player
    pub fn spawn_offset(&self) -> Vec2 {
        let d = ENEMY_CREATION_DISTANCE_COMPONENT;
        match self {
            EnemyKind::Straight => Vec2::new(-d, -d),
            EnemyKind::ZigZag => Vec2::new(d, -d),
            EnemyKind::Spiral => Vec2::new(-d, d),
        }
    }

    /// Uniform pick among the three kinds
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Straight => "straight",
            EnemyKind::ZigZag => "zigzag",
            EnemyKind::Spiral => "spiral",
        }
    }
}

/// Per-kind motion state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Pure homing
    Straight,
    /// Homing plus an x-axis wobble driven by `angle`
    ZigZag { angle: f32 },
    /// Homing plus a circular drift driven by `angle`
    Spiral { angle: f32 },
}

impl Motion {
    pub fn for_kind(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Straight => Motion::Straight,
            EnemyKind::ZigZag => Motion::ZigZag { angle: 0.0 },
            EnemyKind::Spiral => Motion::Spiral { angle: 0.0 },
        }
    }

    pub fn kind(&self) -> EnemyKind {
        match self {
            Motion::Straight => EnemyKind::Straight,
            Motion::ZigZag { .. } => EnemyKind::ZigZag,
            Motion::Spiral { .. } => EnemyKind::Spiral,
        }
    }

    /// Accumulated phase angle (always 0 for straight movers)
    pub fn angle(&self) -> f32 {
        match *self {
            Motion::Straight => 0.0,
            Motion::ZigZag { angle } | Motion::Spiral { angle } => angle,
        }
    }
}

/// A homing enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub body: Entity,
    /// Homing speed (units per second), fixed at spawn
    pub speed: f32,
    pub motion: Motion,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2, speed: f32) -> Self {
        Self {
            body: Entity::square(pos, ENEMY_SIZE),
            speed,
            motion: Motion::for_kind(kind),
        }
    }

    /// Spawn at the kind's fixed offset from the player
    pub fn spawn_near(kind: EnemyKind, player_pos: Vec2, speed: f32) -> Self {
        Self::new(kind, player_pos + kind.spawn_offset(), speed)
    }

    pub fn kind(&self) -> EnemyKind {
        self.motion.kind()
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Rect {
        self.body.bounds()
    }
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn RNG
    pub rng: Pcg32,
    /// Enemies caught so far
    pub score: u32,
    /// Current phase
    pub phase: GamePhase,
    /// Set when the phase becomes `Ended`
    pub end_reason: Option<EndReason>,
    /// Frames simulated while running
    pub frame: u64,
    pub player: Player,
    pub catch_box: CatchBox,
    /// Live enemies (order carries no meaning)
    pub enemies: Vec<Enemy>,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64) -> Self {
        let player = Player::new(Vec2::new(
            (SCREEN_WIDTH / 2) as f32,
            (SCREEN_HEIGHT / 2) as f32,
        ));
        let catch_box = CatchBox::new(player.pos());

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            phase: GamePhase::Running,
            end_reason: None,
            frame: 0,
            player,
            catch_box,
            enemies: Vec::with_capacity(INITIAL_ENEMY_COUNT),
        };

        // One of each kind to start
        for kind in EnemyKind::ALL {
            let enemy = Enemy::spawn_near(kind, state.player.pos(), state.enemy_speed());
            state.enemies.push(enemy);
        }

        state
    }

    /// Speed given to newly spawned enemies: mirrors the score
    pub fn enemy_speed(&self) -> f32 {
        self.score as f32
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Move to `Ended`; only the first call has any effect
    pub fn end(&mut self, reason: EndReason) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Ended;
            self.end_reason = Some(reason);
            log::info!(
                "Session ended ({:?}) after {} frames with score {}",
                reason,
                self.frame,
                self.score
            );
        }
    }

    /// External quit signal
    pub fn request_quit(&mut self) {
        self.end(EndReason::Quit);
    }

    /// Build a replacement enemy of a random kind near the player
    pub fn make_random_enemy(&mut self) -> Enemy {
        let kind = EnemyKind::random(&mut self.rng);
        Enemy::spawn_near(kind, self.player.pos(), self.enemy_speed())
    }
}
