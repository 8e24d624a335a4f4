//! Indexed triangle mesh with tombstone deletion

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};

/// Serialized form of [`IndexedMesh`]; validated when converted back
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshBuffers {
    pub positions: Vec<Point3f>,
    pub indices: Vec<u32>,
}

/// A triangle mesh stored as a position buffer and a flat index buffer.
///
/// Face `f` occupies `indices[3f..3f + 3]`. Erasing a face overwrites its
/// slots with [`TOMBSTONE`]; neither buffer is ever resized, so face indices
/// stay stable for the lifetime of the mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MeshBuffers", into = "MeshBuffers")]
pub struct IndexedMesh {
    positions: Vec<Point3f>,
    indices: Vec<u32>,
}

impl TryFrom<MeshBuffers> for IndexedMesh {
    type Error = Error;

    fn try_from(buffers: MeshBuffers) -> Result<Self> {
        Self::new(buffers.positions, buffers.indices)
    }
}

impl From<IndexedMesh> for MeshBuffers {
    fn from(mesh: IndexedMesh) -> Self {
        Self {
            positions: mesh.positions,
            indices: mesh.indices,
        }
    }
}

impl IndexedMesh {
    /// Create a mesh from a position buffer and a flat index buffer.
    ///
    /// Fails with [`Error::InvalidGeometry`] if the index count is not a
    /// multiple of 3 and with [`Error::IndexOutOfRange`] if any index does not
    /// name a vertex.
    pub fn new(positions: Vec<Point3f>, indices: Vec<u32>) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(Error::InvalidGeometry(format!(
                "index buffer length {} is not a multiple of 3",
                indices.len()
            )));
        }

        let vertex_count = positions.len();
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(Error::vertex_out_of_range(bad as usize, vertex_count));
        }

        Ok(Self { positions, indices })
    }

    /// Create a mesh from triangle triples
    pub fn from_faces(positions: Vec<Point3f>, faces: &[FaceIndices]) -> Result<Self> {
        let indices = faces.iter().flatten().copied().collect();
        Self::new(positions, indices)
    }

    /// Create a mesh from a flat `xyzxyz...` coordinate buffer, as found in glTF accessors
    pub fn from_flat(coords: &[f32], indices: Vec<u32>) -> Result<Self> {
        if coords.len() % 3 != 0 {
            return Err(Error::InvalidGeometry(format!(
                "position buffer length {} is not a multiple of 3",
                coords.len()
            )));
        }
        let positions = coords
            .chunks_exact(3)
            .map(|c| Point3f::new(c[0], c[1], c[2]))
            .collect();
        Self::new(positions, indices)
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of faces, erased ones included
    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if the mesh has no faces
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn positions(&self) -> &[Point3f] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Index buffer as raw native-endian bytes, ready for upload or export
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Position buffer as raw native-endian bytes (`f32` xyz triples)
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    fn check_face(&self, face: usize) -> Result<usize> {
        let count = self.face_count();
        if face >= count {
            return Err(Error::face_out_of_range(face, count));
        }
        Ok(face * 3)
    }

    /// Vertex indices of a face in winding order
    pub fn face_vertex_indices(&self, face: usize) -> Result<FaceIndices> {
        let offset = self.check_face(face)?;
        Ok([
            self.indices[offset],
            self.indices[offset + 1],
            self.indices[offset + 2],
        ])
    }

    pub fn vertex_position(&self, vertex: usize) -> Result<Point3f> {
        self.positions
            .get(vertex)
            .copied()
            .ok_or_else(|| Error::vertex_out_of_range(vertex, self.positions.len()))
    }

    /// Positions of a face's three vertices in winding order
    pub fn face_positions(&self, face: usize) -> Result<[Point3f; 3]> {
        let [a, b, c] = self.face_vertex_indices(face)?;
        Ok([
            self.vertex_position(a as usize)?,
            self.vertex_position(b as usize)?,
            self.vertex_position(c as usize)?,
        ])
    }

    /// Arithmetic mean of the face's vertex positions
    pub fn face_centroid(&self, face: usize) -> Result<Point3f> {
        let [v0, v1, v2] = self.face_positions(face)?;
        Ok(Point3f::from((v0.coords + v1.coords + v2.coords) / 3.0))
    }

    /// Unit normal of `(v1 - v0) x (v2 - v0)`.
    ///
    /// Collinear or coincident vertices (erased faces included) give
    /// [`Error::DegenerateFace`] instead of a NaN vector. The collinearity
    /// test is relative to the edge lengths, so small triangles still count.
    pub fn face_normal(&self, face: usize) -> Result<Vector3f> {
        let [v0, v1, v2] = self.face_positions(face)?;
        let (e1, e2) = (v1 - v0, v2 - v0);
        let cross = e1.cross(&e2);
        let norm = cross.norm();
        if norm == 0.0 || norm <= f32::EPSILON * e1.norm() * e2.norm() {
            return Err(Error::DegenerateFace(face));
        }
        Ok(cross / norm)
    }

    /// Overwrite a face's three index slots.
    ///
    /// Only the face index is range-checked; `triple` is written as given so
    /// callers can store [`TOMBSTONE`].
    pub fn replace_face_indices(&mut self, face: usize, triple: FaceIndices) -> Result<()> {
        let offset = self.check_face(face)?;
        self.indices[offset..offset + 3].copy_from_slice(&triple);
        Ok(())
    }

    /// Whether the face currently holds the tombstone triple
    pub fn is_face_erased(&self, face: usize) -> Result<bool> {
        Ok(self.face_vertex_indices(face)? == TOMBSTONE)
    }

    /// Number of faces holding the tombstone triple
    pub fn erased_face_count(&self) -> usize {
        self.indices
            .chunks_exact(3)
            .filter(|tri| **tri == TOMBSTONE)
            .count()
    }

    /// Indices of faces that have not been erased
    pub fn live_faces(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices
            .chunks_exact(3)
            .enumerate()
            .filter(|(_, tri)| **tri != TOMBSTONE)
            .map(|(face, _)| face)
    }

    /// Axis-aligned bounds over every vertex position
    pub fn bounding_box(&self) -> (Point3f, Point3f) {
        if self.positions.is_empty() {
            return (Point3f::origin(), Point3f::origin());
        }

        let mut min = self.positions[0];
        let mut max = self.positions[0];

        for p in &self.positions {
            min = min.inf(p);
            max = max.sup(p);
        }

        (min, max)
    }
}
