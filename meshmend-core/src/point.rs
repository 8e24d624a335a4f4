//! Point and vector types

use nalgebra::{Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Vertex index triple of one triangle, in winding order
pub type FaceIndices = [u32; 3];

/// The triple written into a face's slots to mark it erased
pub const TOMBSTONE: FaceIndices = [0, 0, 0];
