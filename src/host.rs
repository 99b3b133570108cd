//! Line-oriented command shell over a [`Session`].
//!
//! The binary reads one command per line and prints one payload per line:
//!
//! ```text
//! first            → base64 PNG of image 0, or "-"
//! next             → next image, wrapping to the first
//! previous | prev  → previous image, stopping at the first
//! <kind> <number>  → apply operation (e.g. "bright 75", "sharpen 60")
//! close | quit     → exit immediately
//! ```
//!
//! Operation kinds are passed through unchecked so an unknown kind reaches
//! the session and comes back as the sentinel. Magnitudes must be finite
//! numbers: `nan` and `inf` are parse errors.

use crate::encode::Payload;
use crate::session::{self, Session};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum HostError {
    #[error("Missing magnitude for operation '{0}'")]
    MissingMagnitude(String),
    #[error("Invalid magnitude '{value}' for operation '{kind}'")]
    InvalidMagnitude { kind: String, value: String },
    #[error("Unexpected argument '{0}'")]
    TrailingArgument(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    First,
    Next,
    Previous,
    Apply { kind: String, magnitude: f64 },
    Close,
}

impl HostCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, HostError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };

        let command = match head {
            "first" => HostCommand::First,
            "next" => HostCommand::Next,
            "previous" | "prev" => HostCommand::Previous,
            "close" | "quit" => HostCommand::Close,
            kind => {
                let value = words
                    .next()
                    .ok_or_else(|| HostError::MissingMagnitude(kind.to_string()))?;
                let magnitude = value
                    .parse::<f64>()
                    .ok()
                    .filter(|m| m.is_finite())
                    .ok_or_else(|| HostError::InvalidMagnitude {
                        kind: kind.to_string(),
                        value: value.to_string(),
                    })?;
                HostCommand::Apply {
                    kind: kind.to_string(),
                    magnitude,
                }
            }
        };

        match words.next() {
            Some(extra) => Err(HostError::TrailingArgument(extra.to_string())),
            None => Ok(Some(command)),
        }
    }
}

/// Run one command against the session.
pub fn dispatch(session: &mut Session, command: HostCommand) -> Payload {
    match command {
        HostCommand::First => session.first(),
        HostCommand::Next => session.next(),
        HostCommand::Previous => session.previous(),
        HostCommand::Apply { kind, magnitude } => session.apply_operation(&kind, magnitude),
        HostCommand::Close => session::close(),
    }
}
