// error.rs - Error types shared by the engines, the pacing driver and config loading

use std::path::PathBuf;

use thiserror::Error;

use crate::grid::Position;

/// Why a run could not be created. Nothing is published when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("no start cell has been placed")]
    MissingStart,
    #[error("no end cell has been placed")]
    MissingEnd,
    #[error("start and end are the same cell {0}")]
    StartIsEnd(Position),
    #[error("position {pos} lies outside the {rows}x{cols} grid")]
    OutOfBounds { pos: Position, rows: usize, cols: usize },
    #[error("cannot sort an empty array")]
    EmptyArray,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    #[error("snapshot receiver disconnected after {published} snapshots")]
    SinkClosed { published: usize },
}

/// Returned by a snapshot sink whose renderer has gone away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("snapshot sink closed")]
pub struct SinkClosed;

/// Tone delivery failure. The pacing driver logs these and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToneError {
    #[error("audio output is unavailable")]
    Unavailable,
    #[error("tone rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}
