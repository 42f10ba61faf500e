//! Catch Box entry point
//!
//! Sets up logging and the terminal, then runs the frame loop until the
//! session ends.

use std::fs::File;
use std::io::{self, BufRead};
use std::time::Instant;

use crossterm::{
    cursor, execute,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use catch_box::app::App;
use catch_box::platform::{ConsoleScoreBoard, SystemClock, TerminalInput};
use catch_box::renderer::TerminalRenderer;
use catch_box::sim::GameState;
use catch_box::{GameError, Settings};

/// Puts the terminal back however the loop exits
struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

        // Release events let held keys end exactly when let go
        let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if keyboard_enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
        }
        log::info!("Terminal ready (key release events: {})", keyboard_enhanced);
        Ok(Self { keyboard_enhanced })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.keyboard_enhanced {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(stdout, cursor::Show, LeaveAlternateScreen);
        if let Err(e) = terminal::disable_raw_mode() {
            log::error!("Failed to disable raw mode: {}", e);
        }
    }
}

fn init_logging(settings: &Settings) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match File::create(&settings.log_file) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            // Nowhere safe to write while the terminal is drawing
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    let _ = builder.try_init();
}

/// Run one session on the terminal; the terminal is restored on return
fn play(settings: &Settings, seed: u64) -> Result<App, GameError> {
    let guard = TerminalGuard::enter()?;
    let (cols, rows) = terminal::size()?;

    let clock = SystemClock::new();
    let mut input = TerminalInput::new(settings.hold_window(), guard.keyboard_enhanced);
    let mut display = TerminalRenderer::new(io::stdout(), cols, rows);
    let mut app = App::new(GameState::new(seed));
    let frame_budget = settings.frame_budget();

    while app.is_running() {
        let frame_start = Instant::now();

        if let Some((cols, rows)) = input.take_resize() {
            log::debug!("Terminal resized to {}x{}", cols, rows);
            display.resize(cols, rows)?;
        }
        app.frame(&clock, &mut input, &mut display)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            std::thread::sleep(frame_budget - elapsed);
        }
    }

    log::info!(
        "Session over after {} frames ({:?}), score {}",
        app.state().frame,
        app.state().end_reason,
        app.state().score
    );
    drop(guard);
    Ok(app)
}

/// Block until a line holding an integer arrives (or stdin closes)
fn wait_for_integer() -> io::Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if line?.trim().parse::<i64>().is_ok() {
            break;
        }
    }
    Ok(())
}

fn main() -> Result<(), GameError> {
    let settings = Settings::load();
    init_logging(&settings);
    log::info!("Catch Box starting...");

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Game initialized with seed: {}", seed);

    let app = play(&settings, seed)?;

    app.finish(&mut ConsoleScoreBoard::new(io::stdout()))?;
    wait_for_integer()?;
    Ok(())
}
