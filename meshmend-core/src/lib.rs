//! Core data structures for meshmend
//!
//! This crate provides the indexed triangle mesh that erase tools edit in
//! place, the pick type an external raycaster hands in, and the shared error
//! type.

pub mod point;
pub mod pick;
pub mod mesh;
pub mod error;

pub use point::*;
pub use pick::*;
pub use mesh::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};
