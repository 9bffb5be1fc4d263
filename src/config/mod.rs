//! Game settings, stored as JSON.
//!
//! Every field has a default, so a partial file or no file at all still
//! gives a playable configuration.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::skin::Skin;
use crate::types::Difficulty;

/// Errors from loading or saving a [`Config`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[allow(missing_docs)]
    #[error("could not access config file: {0}")]
    Io(#[from] io::Error),
    #[allow(missing_docs)]
    #[error("config file is not valid: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ticks per second for each difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickRates {
    #[allow(missing_docs)]
    pub easy: u32,
    #[allow(missing_docs)]
    pub normal: u32,
    #[allow(missing_docs)]
    pub hard: u32,
}

impl Default for TickRates {
    fn default() -> Self {
        TickRates {
            easy: Difficulty::Easy.default_tick_rate(),
            normal: Difficulty::Normal.default_tick_rate(),
            hard: Difficulty::Hard.default_tick_rate(),
        }
    }
}

impl TickRates {
    /// ticks per second for a difficulty, never zero
    pub fn rate(&self, difficulty: Difficulty) -> u32 {
        let rate = match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
        };
        rate.max(1)
    }

    /// time between two simulation ticks
    pub fn interval(&self, difficulty: Difficulty) -> Duration {
        Duration::from_secs(1) / self.rate(difficulty)
    }
}

/// Everything the game reads at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// where `level{rank}_{index}.txt` files are looked up
    pub levels_dir: PathBuf,
    /// the score ledger file
    pub stats_path: PathBuf,
    #[allow(missing_docs)]
    pub tick_rates: TickRates,
    /// frame rate of the menu screens
    pub menu_tick_rate: u32,
    #[allow(missing_docs)]
    pub skin: Skin,
    /// fixed seed for apple placement, `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            levels_dir: PathBuf::from("data/levels"),
            stats_path: PathBuf::from("stats.txt"),
            tick_rates: TickRates::default(),
            menu_tick_rate: 10,
            skin: Skin::default(),
            seed: None,
        }
    }
}

impl Config {
    /// Reads the config at `path`. A missing file is not an error, the
    /// defaults are used instead.
    pub fn load(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// writes the config as pretty printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}
