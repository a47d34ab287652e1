//! Runtime settings
//!
//! Frontend knobs only; physics constants live in [`crate::consts`] and are
//! not configurable. Read from an optional JSON file, then overridden by
//! command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target frames per second
    pub fps: u32,
    /// RNG seed; a fresh one is drawn each run when unset
    pub seed: Option<u64>,
    /// Splash screen image
    pub splash_path: PathBuf,
    /// How long a key press counts as held on terminals that never report
    /// key releases (milliseconds)
    pub hold_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: 60,
            seed: None,
            splash_path: PathBuf::from("assets/pong_splash.txt"),
            hold_timeout_ms: 150,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read settings file {}", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("invalid settings file {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.fps = settings.fps.max(1);
        Ok(settings)
    }

    /// Seed for this run
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Time budget for one frame
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(1) / self.fps.max(1)
    }
}
