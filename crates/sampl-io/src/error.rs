//! Error types for the bitmap adapters.

use std::io;

use sampl_ops::OpsError;
use thiserror::Error;

/// Adapter error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The image could not be decoded.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// The image could not be encoded.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// A pixel buffer does not match its declared size.
    #[error("invalid buffer: {0}")]
    InvalidBuffer(String),

    /// File type or pixel layout this crate does not handle.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A background load ended without producing a result.
    #[error("load aborted: {0}")]
    LoadAborted(String),

    /// Sampler construction failed.
    #[error(transparent)]
    Ops(#[from] OpsError),
}

/// Result type for adapter operations.
pub type IoResult<T> = Result<T, IoError>;
