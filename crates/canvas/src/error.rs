//! Error types for drawing surface operations

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("No item carries the tag: {0}")]
    UnknownTag(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
}

pub type Result<T> = std::result::Result<T, SurfaceError>;
