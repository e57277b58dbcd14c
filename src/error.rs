//! Error taxonomy shared by the codec, storage, transforms, and session.
//!
//! Only the edges of the system fail: decoding bytes, touching the
//! filesystem, and transforms handed genuinely nonsensical input. Session
//! bookkeeping (`accept`, `cancel`, `cancel_acceptance`) is total and never
//! produces one of these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Invalid pixel buffer: {0}")]
    InvalidBuffer(String),
    #[error("No image is open")]
    NoImage,
}

/// Result type for editing operations.
pub type Result<T> = std::result::Result<T, EditError>;
