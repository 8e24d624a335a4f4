//! Face erasure for indexed meshes
//!
//! This crate turns picks from an external raycaster into face deletions:
//! - Selection policies deciding which faces a pick removes
//! - Strokes grouping the deletions of one gesture
//! - Undo/redo history replaying recorded strokes
//! - An input controller mapping erase-mode and pointer events to strokes

pub mod config;
pub mod selection;
pub mod history;
pub mod engine;
pub mod controller;

pub use config::*;
pub use selection::*;
pub use history::*;
pub use engine::*;
pub use controller::*;

use meshmend_core::{IndexedMesh, Pick, Result};

/// Decide which faces a pick removes
pub trait FaceSelector {
    /// Faces matched by `pick`, in ascending order. Erased faces never match.
    fn select(&self, mesh: &IndexedMesh, pick: &Pick) -> Result<Vec<usize>>;
}
