//! Error types for shape construction and transforms

use canvas::SurfaceError;
use geometry::GeometryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("A {kind} needs {expected} vertices, got {found}")]
    InvalidShape {
        kind: String,
        expected: usize,
        found: usize,
    },

    #[error("The given points do not form a kite")]
    NotAKite,

    #[error("The given points do not form a trapezoid")]
    NotATrapezoid,

    #[error("The given points do not form a parallelogram")]
    NotAParallelogram,

    #[error("The given points do not form a rhombus")]
    NotARhombus,

    #[error("The given points do not form a rectangle")]
    NotARectangle,

    #[error("The given points do not form a square")]
    NotASquare,

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Group {0} has no members")]
    EmptyGroup(String),

    #[error("Drawing surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShapeError {
    /// True for the errors raised when vertices fail a quadrilateral classification
    pub fn is_classification(&self) -> bool {
        matches!(
            self,
            ShapeError::NotAKite
                | ShapeError::NotATrapezoid
                | ShapeError::NotAParallelogram
                | ShapeError::NotARhombus
                | ShapeError::NotARectangle
                | ShapeError::NotASquare
        )
    }
}

impl From<GeometryError> for ShapeError {
    fn from(err: GeometryError) -> Self {
        match err {
            GeometryError::InvalidCoordinate(msg) => ShapeError::InvalidCoordinate(msg),
            GeometryError::InvalidGeometry(msg) => ShapeError::InvalidGeometry(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShapeError>;
