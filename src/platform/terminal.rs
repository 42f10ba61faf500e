//! Crossterm keyboard input
//!
//! Terminals report key presses, not key state. Each frame we drain every
//! pending event and remember when each key was last pressed or repeated.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (kitty, Ghostty, WezTerm, ...): real
//!   `Release` events drop a key the moment it is let go.
//! * **Classic terminals**: only `Press` events arrive (OS auto-repeat shows
//!   up as repeated presses). A key counts as held until `hold_window`
//!   passes without a fresh press.

use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{InputSource, Key};

/// Translate a terminal key code into a game key
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::W),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::A),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::S),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::D),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Pause | KeyCode::Esc => Some(Key::Pause),
        _ => None,
    }
}

/// Held-key tracker fed by crossterm events
#[derive(Debug)]
pub struct TerminalInput {
    /// Key → instant of its last press/repeat
    last_seen: HashMap<Key, Instant>,
    hold_window: Duration,
    /// Terminal sends release events, so keys never time out
    release_events: bool,
    quit: bool,
    resized: Option<(u16, u16)>,
}

impl TerminalInput {
    pub fn new(hold_window: Duration, release_events: bool) -> Self {
        Self {
            last_seen: HashMap::new(),
            hold_window,
            release_events,
            quit: false,
            resized: None,
        }
    }

    /// Apply one terminal event observed at `now`
    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) => {
                let is_ctrl_c =
                    code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL);
                if kind == KeyEventKind::Press
                    && (is_ctrl_c || matches!(code, KeyCode::Char('q') | KeyCode::Char('Q')))
                {
                    log::info!("Quit requested from keyboard");
                    self.quit = true;
                    return;
                }

                let Some(key) = map_key(code) else {
                    return;
                };
                match kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        self.last_seen.insert(key, now);
                    }
                    KeyEventKind::Release => {
                        self.last_seen.remove(&key);
                    }
                }
            }
            Event::Resize(cols, rows) => {
                self.resized = Some((cols, rows));
            }
            _ => {}
        }
    }

    /// Forget keys whose last press is older than the hold window
    pub fn expire(&mut self, now: Instant) {
        if self.release_events {
            return;
        }
        let window = self.hold_window;
        self.last_seen
            .retain(|_, seen| now.saturating_duration_since(*seen) <= window);
    }

    /// New terminal size, if a resize arrived since the last call
    pub fn take_resize(&mut self) -> Option<(u16, u16)> {
        self.resized.take()
    }
}

impl InputSource for TerminalInput {
    fn pump(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            self.handle_event(event, Instant::now());
        }
        self.expire(Instant::now());
        Ok(())
    }

    fn is_key_held(&self, key: Key) -> bool {
        self.last_seen.contains_key(&key)
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
    }

    #[test]
    fn test_map_key() {
        assert_eq!(map_key(KeyCode::Char('W')), Some(Key::W));
        assert_eq!(map_key(KeyCode::Char('d')), Some(Key::D));
        assert_eq!(map_key(KeyCode::Left), Some(Key::Left));
        assert_eq!(map_key(KeyCode::Esc), Some(Key::Pause));
        assert_eq!(map_key(KeyCode::Pause), Some(Key::Pause));
        assert_eq!(map_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_press_expires_after_hold_window() {
        let mut input = TerminalInput::new(Duration::from_millis(100), false);
        let t0 = Instant::now();
        input.handle_event(key(KeyCode::Char('w'), KeyEventKind::Press), t0);
        assert!(input.is_key_held(Key::W));

        input.expire(t0 + Duration::from_millis(50));
        assert!(input.is_key_held(Key::W));

        input.expire(t0 + Duration::from_millis(150));
        assert!(!input.is_key_held(Key::W));
    }

    #[test]
    fn test_repeat_refreshes_hold() {
        let mut input = TerminalInput::new(Duration::from_millis(100), false);
        let t0 = Instant::now();
        input.handle_event(key(KeyCode::Up, KeyEventKind::Press), t0);
        let t1 = t0 + Duration::from_millis(80);
        input.handle_event(key(KeyCode::Up, KeyEventKind::Repeat), t1);
        input.expire(t0 + Duration::from_millis(150));
        assert!(input.is_key_held(Key::Up));
    }

    #[test]
    fn test_release_drops_key_and_disables_expiry() {
        let mut input = TerminalInput::new(Duration::from_millis(10), true);
        let t0 = Instant::now();
        input.handle_event(key(KeyCode::Right, KeyEventKind::Press), t0);
        input.expire(t0 + Duration::from_secs(5));
        assert!(input.is_key_held(Key::Right));

        input.handle_event(key(KeyCode::Right, KeyEventKind::Release), t0);
        assert!(!input.is_key_held(Key::Right));
    }

    #[test]
    fn test_ctrl_c_and_q_request_quit() {
        let mut input = TerminalInput::new(Duration::from_millis(100), false);
        assert!(!input.quit_requested());
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        input.handle_event(ctrl_c, Instant::now());
        assert!(input.quit_requested());

        let mut input = TerminalInput::new(Duration::from_millis(100), false);
        input.handle_event(key(KeyCode::Char('q'), KeyEventKind::Press), Instant::now());
        assert!(input.quit_requested());
    }

    #[test]
    fn test_independent_key_sets() {
        let mut input = TerminalInput::new(Duration::from_millis(100), false);
        let now = Instant::now();
        input.handle_event(key(KeyCode::Char('a'), KeyEventKind::Press), now);
        input.handle_event(key(KeyCode::Down, KeyEventKind::Press), now);
        assert!(input.is_key_held(Key::A));
        assert!(input.is_key_held(Key::Down));
        assert!(!input.is_key_held(Key::Left));
        assert!(!input.is_key_held(Key::S));
    }

    #[test]
    fn test_resize_is_reported_once() {
        let mut input = TerminalInput::new(Duration::from_millis(100), false);
        input.handle_event(Event::Resize(120, 40), Instant::now());
        assert_eq!(input.take_resize(), Some((120, 40)));
        assert_eq!(input.take_resize(), None);
    }
}
