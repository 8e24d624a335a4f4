//! Error types for meshmend

use std::fmt;
use thiserror::Error;

/// Which buffer an out-of-range index pointed into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Face,
    Vertex,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Face => write!(f, "face"),
            IndexKind::Vertex => write!(f, "vertex"),
        }
    }
}

/// Main error type for meshmend operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        kind: IndexKind,
        index: usize,
        len: usize,
    },

    #[error("Face {0} is degenerate")]
    DegenerateFace(usize),

    #[error("No mesh loaded")]
    NoMeshLoaded,

    #[error("No stroke is open")]
    NoStrokeOpen,

    #[error("A stroke is already open")]
    StrokeAlreadyOpen,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn face_out_of_range(index: usize, len: usize) -> Self {
        Error::IndexOutOfRange {
            kind: IndexKind::Face,
            index,
            len,
        }
    }

    pub(crate) fn vertex_out_of_range(index: usize, len: usize) -> Self {
        Error::IndexOutOfRange {
            kind: IndexKind::Vertex,
            index,
            len,
        }
    }
}

/// Result type alias for meshmend operations
pub type Result<T> = std::result::Result<T, Error>;
