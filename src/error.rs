//! Error types for whiteboard export and transport.

use thiserror::Error;

/// Result type for whiteboard operations.
pub type Result<T> = std::result::Result<T, WhiteboardError>;

/// Errors surfaced by export and the image-to-HTML transport.
#[derive(Debug, Error)]
pub enum WhiteboardError {
    /// Export requested with a zero-sized canvas.
    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Writing or reading the snapshot failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    /// Network failure or non-success HTTP status from the remote service.
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote service answered with an unexpected payload.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Required API configuration is missing.
    #[error("configuration error: {0}")]
    Config(String),
}
