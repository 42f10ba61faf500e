//! Runtime settings
//!
//! Read-only JSON file named by `CATCH_BOX_SETTINGS`; every field is
//! optional and falls back to its default.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed (random per run when absent)
    pub seed: Option<u64>,
    /// Frame pacing for the terminal loop
    pub target_fps: u32,
    /// How long a key stays held after its last press on terminals that
    /// never report key releases
    pub hold_window_ms: u64,
    /// Log file (the terminal itself is busy drawing)
    pub log_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            target_fps: 60,
            hold_window_ms: 150,
            log_file: "catch-box.log".to_string(),
        }
    }
}

impl Settings {
    /// Environment variable pointing at a settings file
    pub const ENV_VAR: &'static str = "CATCH_BOX_SETTINGS";

    /// Target duration of one frame
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps.max(1) as f64)
    }

    pub fn hold_window(&self) -> Duration {
        Duration::from_millis(self.hold_window_ms)
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from(path: &Path) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path).map_err(|source| GameError::Settings {
            path: path.display().to_string(),
            reason: source.to_string(),
        })?;
        Self::from_json(&json).map_err(|e| GameError::Settings {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Settings from `CATCH_BOX_SETTINGS`, or defaults
    ///
    /// A missing or broken file is not fatal: it is logged and defaults are
    /// used instead.
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(Self::ENV_VAR) else {
            return Self::default();
        };

        match Self::load_from(Path::new(&path)) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Path::new(&path).display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }
}
