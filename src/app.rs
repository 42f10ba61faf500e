//! Frame loop driver
//!
//! Samples the clock, polls input, toggles pause and advances the session
//! once per frame. Platform details stay behind the `platform` and
//! `renderer` ports so the loop runs the same against a terminal or a test
//! double.

use std::io;

use crate::platform::{Clock, InputSource, Key, ScoreBoard};
use crate::renderer::{Renderer, draw_scene};
use crate::sim::{DirectionFlags, GameEvent, GameState, TickInput, tick};

/// What a call to `App::frame` did
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// The session advanced and was drawn
    Simulated { dt: f32, events: Vec<GameEvent> },
    /// Paused: nothing advanced or drew
    Paused,
}

/// Snapshot the held keys as simulation input
pub fn read_tick_input<I: InputSource + ?Sized>(input: &I) -> TickInput {
    TickInput {
        player: DirectionFlags {
            up: input.is_key_held(Key::W),
            down: input.is_key_held(Key::S),
            left: input.is_key_held(Key::A),
            right: input.is_key_held(Key::D),
        },
        catcher: DirectionFlags {
            up: input.is_key_held(Key::Up),
            down: input.is_key_held(Key::Down),
            left: input.is_key_held(Key::Left),
            right: input.is_key_held(Key::Right),
        },
    }
}

/// Session plus loop bookkeeping
#[derive(Debug)]
pub struct App {
    state: GameState,
    paused: bool,
    /// Pause key state last frame (toggle fires on the press edge)
    pause_key_down: bool,
    last_millis: Option<u64>,
}

impl App {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            paused: false,
            pause_key_down: false,
            last_millis: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Keep looping while this holds
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Run one loop iteration
    pub fn frame<C, I, D>(
        &mut self,
        clock: &C,
        input: &mut I,
        display: &mut D,
    ) -> io::Result<FrameOutcome>
    where
        C: Clock + ?Sized,
        I: InputSource + ?Sized,
        D: Renderer + ScoreBoard + ?Sized,
    {
        // Sampled every iteration, paused or not, so unpausing resumes with a short dt
        let now = clock.now_millis();
        let dt = match self.last_millis {
            Some(last) => now.saturating_sub(last) as f32 / 1000.0,
            None => 0.0,
        };
        self.last_millis = Some(now);

        input.pump()?;
        if input.quit_requested() {
            self.state.request_quit();
        }

        let pause_held = input.is_key_held(Key::Pause);
        if pause_held && !self.pause_key_down {
            self.paused = !self.paused;
            log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
        }
        self.pause_key_down = pause_held;

        if self.paused {
            return Ok(FrameOutcome::Paused);
        }

        let tick_input = read_tick_input(input);
        let events = tick(&mut self.state, &tick_input, dt);
        for event in &events {
            if let GameEvent::EnemyCaught { kind, score } = event {
                log::info!("Caught {} enemy, score {}", kind.as_str(), score);
            }
        }

        draw_scene(display, &self.state)?;
        display.show_score(self.state.score)?;

        Ok(FrameOutcome::Simulated { dt, events })
    }

    /// Report the final score once the loop is over
    pub fn finish<D: ScoreBoard + ?Sized>(&self, display: &mut D) -> io::Result<u32> {
        let score = self.state.score;
        display.show_final_score(score)?;
        Ok(score)
    }
}
