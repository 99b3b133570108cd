//! Runtime options for a viewing session.
//!
//! There is no config file and nothing is read from the environment: every
//! run starts from [`ViewerConfig::default`] and the host overrides fields
//! from its command-line flags.
//!
//! | Field | Default | Flag |
//! |---|---|---|
//! | `lossy_quality` | 75 | `--quality <1-100>` |
//! | `log_level` | `info` | `-v` for `debug`, `-q` for `warn` |

use crate::encode::Quality;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Diagnostic verbosity for the host's log output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Warn,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    /// Map the host's `-v`/`-q` flags onto a level. Quiet wins.
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => LogLevel::Warn,
            (false, 0) => LogLevel::Info,
            (false, _) => LogLevel::Debug,
        }
    }

    pub fn as_tracing(self) -> tracing::Level {
        match self {
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerConfig {
    /// JPEG quality used when re-encoding transformed images.
    pub lossy_quality: Quality,
    pub log_level: LogLevel,
}

impl ViewerConfig {
    /// Build a config from raw host values, rejecting out-of-range input
    /// instead of silently clamping it.
    pub fn from_args(quality: Option<u32>, log_level: LogLevel) -> Result<Self, ConfigError> {
        if let Some(q) = quality {
            validate_quality(q)?;
        }
        Ok(Self {
            lossy_quality: quality.map(Quality::new).unwrap_or_default(),
            log_level,
        })
    }
}

fn validate_quality(value: u32) -> Result<(), ConfigError> {
    if !(1..=100).contains(&value) {
        return Err(ConfigError::Validation(format!(
            "quality must be 1-100, got {value}"
        )));
    }
    Ok(())
}
