//! Error types for grid rendering.

use grid_common::{GridError, MapMetaData};
use thiserror::Error;

/// Result type alias using RenderError.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised while building, updating or exporting a grid layer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(
        "Grid geometry changed from {}x{}@{} to {}x{}@{}",
        .expected.width, .expected.height, .expected.resolution,
        .actual.width, .actual.height, .actual.resolution
    )]
    GeometryChanged {
        expected: MapMetaData,
        actual: MapMetaData,
    },

    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Scene backend error: {0}")]
    Backend(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
