//! YAML defaults for the `termspin` binary.
//!
//! ```yaml
//! # ~/.config/termspin/config.yaml
//! style: pacman-ghost
//! interval_ms: 100
//! message: Working...
//! # frames: ["-", "=", "≡"]   # overrides `style`
//! ```
//!
//! Command-line flags win over the file; the file wins over built-in
//! defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::SpinnerError;
use crate::spinner::{DEFAULT_INTERVAL, FrameSet, FrameStyle};

const CONFIG_FILE_NAME: &str = "config.yaml";

/// Message used when neither the command line nor the config sets one.
pub const DEFAULT_MESSAGE: &str = "Working...";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Built-in frame set name
    pub style: Option<FrameStyle>,

    /// Custom frames; takes precedence over `style`
    pub frames: Option<Vec<String>>,

    /// Delay between frames in milliseconds
    pub interval_ms: Option<u64>,

    /// Default spinner message
    pub message: Option<String>,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used and a missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config: {}", path.display()))?;
                Self::from_yaml(&content)
                    .with_context(|| format!("Invalid config: {}", path.display()))
            }
            None => {
                let path = config_path()?;
                match fs::read_to_string(&path) {
                    Ok(content) => Self::from_yaml(&content)
                        .with_context(|| format!("Invalid config: {}", path.display())),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {
                        debug!(?path, "config:no file, using defaults");
                        Ok(Self::default())
                    }
                    Err(e) => Err(e)
                        .with_context(|| format!("Failed to read config: {}", path.display())),
                }
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Pick the frame set: CLI style, then custom frames, then config style.
    pub fn resolve_frames(&self, cli_style: Option<FrameStyle>) -> Result<FrameSet> {
        if let Some(style) = cli_style {
            return Ok(style.frames());
        }
        if let Some(frames) = &self.frames {
            return FrameSet::new(frames.iter().cloned()).context("Invalid `frames` in config");
        }
        Ok(self.style.unwrap_or_default().frames())
    }

    /// Pick the interval: CLI value, then config, then the default.
    pub fn resolve_interval(&self, cli_ms: Option<u64>) -> Result<Duration> {
        let Some(ms) = cli_ms.or(self.interval_ms) else {
            return Ok(DEFAULT_INTERVAL);
        };
        if ms == 0 {
            return Err(SpinnerError::ZeroInterval).context("Invalid interval");
        }
        Ok(Duration::from_millis(ms))
    }

    pub fn resolve_message(&self, cli_message: Option<&str>) -> String {
        cli_message
            .or(self.message.as_deref())
            .unwrap_or(DEFAULT_MESSAGE)
            .to_string()
    }
}

/// Default config file location.
///
/// Checks XDG_CONFIG_HOME first, falls back to ~/.config.
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("termspin").join(CONFIG_FILE_NAME))
}

fn config_dir() -> Result<PathBuf> {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME")
        && !config_home.is_empty()
    {
        return Ok(PathBuf::from(config_home));
    }

    if let Some(home_dir) = home::home_dir() {
        return Ok(home_dir.join(".config"));
    }

    anyhow::bail!("Could not determine config directory")
}
