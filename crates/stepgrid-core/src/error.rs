//! Error types for stepgrid

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("Bar index {index} out of range (bar count {len})")]
    OutOfRange { index: usize, len: usize },
    #[error("Malformed grid state: {0}")]
    MalformedState(String),
    #[error("Malformed host message: {0}")]
    MalformedMessage(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GridError>;
