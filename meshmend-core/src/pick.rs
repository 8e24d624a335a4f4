//! Pick results handed in by an external raycaster

use crate::point::*;
use serde::{Deserialize, Serialize};

/// A single ray/surface hit in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    pub point: Point3f,
    pub normal: Vector3f,
    /// Face the ray hit directly, when the raycaster reports it
    pub hit_face: Option<usize>,
}

impl Pick {
    /// Create a pick without a hit face
    pub fn new(point: Point3f, normal: Vector3f) -> Self {
        Self {
            point,
            normal,
            hit_face: None,
        }
    }

    /// Create a pick that also records the directly hit face
    pub fn with_face(point: Point3f, normal: Vector3f, face: usize) -> Self {
        Self {
            point,
            normal,
            hit_face: Some(face),
        }
    }
}
