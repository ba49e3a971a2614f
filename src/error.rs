//! Error types for the canvas' ambient operations.
//!
//! The interaction core itself never fails: referential misses are no-ops,
//! pointer capture errors are swallowed and zoom requests are clamped. What
//! remains fallible is settings I/O and the settings file watcher.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, saving or watching settings
#[derive(Error, Debug)]
pub enum CanvasError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error from serde_json
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File watcher error from notify
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    /// Settings parsed but contain unusable values
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// No platform config directory could be determined
    #[error("No config directory available")]
    NoConfigDir,

    /// A settings file path that does not exist
    #[error("Settings file not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Result type alias for canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;
