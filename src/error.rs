//! Error types for the fallible edges of the core.
//!
//! The simulation step itself never fails; only configuration loading and
//! upgrade selection (driven by external UI) can be rejected.

use std::path::PathBuf;

use thiserror::Error;

use crate::progression::UpgradeId;

/// Errors raised while loading or validating [`crate::Settings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("world bounds must be positive, got {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },
}

/// Errors raised when the UI asks for an upgrade the controller cannot apply.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeError {
    #[error("no upgrade choice is pending")]
    NotPaused,

    #[error("upgrade offer index {index} out of range ({offered} offered)")]
    InvalidChoice { index: usize, offered: usize },

    #[error("upgrade {0:?} is not among the current offers")]
    NotOffered(UpgradeId),
}
