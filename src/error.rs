//! Error type for the fallible edges of the game (terminal, settings)
//!
//! The simulation itself never fails.

use core::fmt;
use std::io;

#[derive(Debug)]
pub enum GameError {
    /// Terminal setup, drawing or stdin failed
    Io(io::Error),
    /// Settings text was not valid JSON for `Settings`
    Json(serde_json::Error),
    /// Settings file could not be used
    Settings { path: String, reason: String },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "terminal I/O failed: {e}"),
            Self::Json(e) => write!(f, "invalid settings JSON: {e}"),
            Self::Settings { path, reason } => {
                write!(f, "cannot load settings from {path}: {reason}")
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Settings { .. } => None,
        }
    }
}

impl From<io::Error> for GameError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
