//! Settings loaded from an optional TOML file.
//!
//! Every field has a default, so a missing file, or a file naming only some fields, is valid:
//!
//! ```toml
//! conversions = "conversions.json"
//! default_equation = "x^2 = 4"
//! combine_mode = "named"
//! log_level = "warn"
//!
//! [voice]
//! sample_rate = 16000
//! channels = 1
//! block_size = 8000
//! poll_interval_ms = 100
//! ```

use crate::engine::CombineMode;
use serde::Deserialize;
use std::{fs, io, path::{Path, PathBuf}, time::Duration};
use thiserror::Error;

/// The file read when no settings path is given.
pub const DEFAULT_SETTINGS_FILE: &str = "eqn.toml";

/// The equation shown when a session starts.
pub const DEFAULT_EQUATION: &str = "x^2 = 4";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings from `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: io::Error,
    },

    #[error("invalid settings in `{}`: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Path of the JSON substitution table.
    pub conversions: PathBuf,

    /// Equation shown at startup.
    pub default_equation: String,

    pub combine_mode: CombineMode,

    /// Default log filter, used when `RUST_LOG` is not set.
    pub log_level: String,

    pub voice: VoiceSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            conversions: PathBuf::from("conversions.json"),
            default_equation: DEFAULT_EQUATION.to_string(),
            combine_mode: CombineMode::default(),
            log_level: "warn".to_string(),
            voice: VoiceSettings::default(),
        }
    }
}

impl Settings {
    /// Loads settings from the given TOML file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)
            .map_err(|source| SettingsError::Io { path: path.to_path_buf(), source })?;
        toml::from_str(&contents)
            .map_err(|source| SettingsError::Parse { path: path.to_path_buf(), source })
    }

    /// Loads settings from `path` if given. Otherwise, loads [`DEFAULT_SETTINGS_FILE`] if it
    /// exists, or falls back to the defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_SETTINGS_FILE);
                if path.is_file() {
                    Self::load(path)
                } else {
                    Ok(Self::default())
                }
            },
        }
    }
}

/// Audio capture parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VoiceSettings {
    /// Samples per second.
    pub sample_rate: u32,
    pub channels: u16,

    /// Frames per audio block delivered by the input device.
    pub block_size: usize,

    /// How long the voice worker waits for audio before checking whether to stop listening.
    pub poll_interval_ms: u64,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            sample_rate: 16_000,
            channels: 1,
            block_size: 8000,
            poll_interval_ms: 100,
        }
    }
}

impl VoiceSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// The size in bytes of one block of 16-bit samples.
    pub fn block_bytes(&self) -> usize {
        self.block_size * usize::from(self.channels) * 2
    }
}
