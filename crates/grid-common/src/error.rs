//! Error types for occupancy grid handling.

use thiserror::Error;

/// Result type alias using GridError.
pub type GridResult<T> = Result<T, GridError>;

/// Errors raised while reading or validating grid messages and options.
#[derive(Debug, Error)]
pub enum GridError {
    // === Message contract violations ===
    #[error("Grid message has no info block")]
    MissingInfo,

    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid grid resolution: {0}")]
    InvalidResolution(f64),

    #[error("Grid data length mismatch: expected {expected} cells, got {actual}")]
    DataLengthMismatch { expected: usize, actual: usize },

    // === Configuration ===
    #[error("Invalid option '{option}': {message}")]
    InvalidOption { option: String, message: String },

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    // === IO / parsing ===
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl GridError {
    /// True for errors caused by a malformed grid message rather than
    /// by configuration or IO.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            GridError::MissingInfo
                | GridError::InvalidDimensions { .. }
                | GridError::InvalidResolution(_)
                | GridError::DataLengthMismatch { .. }
        )
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        GridError::Parse(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for GridError {
    fn from(err: serde_yaml::Error) -> Self {
        GridError::Parse(format!("YAML error: {}", err))
    }
}
