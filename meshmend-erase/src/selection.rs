//! Selection policies mapping a pick to faces
//!
//! Both policies are a linear scan over every face with no spatial index.
//! That is fine for scans in the tens of thousands of faces; beyond that the
//! scan dominates each pick. The `parallel` feature spreads it over rayon's
//! pool without changing the result.

use crate::config::{EraseConfig, SelectionPolicy};
use crate::FaceSelector;
use meshmend_core::{Error, FaceIndices, IndexedMesh, Pick, Result, TOMBSTONE};
use tracing::warn;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Evaluate `matches` on every face that is not erased, collecting hits in face order.
///
/// A [`Error::DegenerateFace`] from the predicate skips that face; any other
/// error aborts the scan.
fn scan_faces<F>(mesh: &IndexedMesh, matches: F) -> Result<Vec<usize>>
where
    F: Fn(usize, FaceIndices) -> Result<bool> + Sync,
{
    let test = |face: usize| -> Option<Result<usize>> {
        let tri = match mesh.face_vertex_indices(face) {
            Ok(tri) => tri,
            Err(e) => return Some(Err(e)),
        };
        if tri == TOMBSTONE {
            return None;
        }
        match matches(face, tri) {
            Ok(true) => Some(Ok(face)),
            Ok(false) | Err(Error::DegenerateFace(_)) => None,
            Err(e) => Some(Err(e)),
        }
    };

    #[cfg(feature = "parallel")]
    {
        (0..mesh.face_count()).into_par_iter().filter_map(test).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        (0..mesh.face_count()).filter_map(test).collect()
    }
}

/// Removes every face sharing at least one vertex index with the hit face.
///
/// Needs [`Pick::hit_face`]; a pick without one, or one whose hit face is
/// already erased, matches nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedVertexSelector;

impl FaceSelector for SharedVertexSelector {
    fn select(&self, mesh: &IndexedMesh, pick: &Pick) -> Result<Vec<usize>> {
        let Some(hit) = pick.hit_face else {
            warn!("shared-vertex pick carries no hit face, ignoring");
            return Ok(Vec::new());
        };

        let hit_tri = mesh.face_vertex_indices(hit)?;
        if hit_tri == TOMBSTONE {
            return Ok(Vec::new());
        }

        scan_faces(mesh, |_, tri| Ok(tri.iter().any(|v| hit_tri.contains(v))))
    }
}

/// Removes faces near the pick point that face the same way as the pick normal
#[derive(Debug, Clone, Copy)]
pub struct RadiusNormalSelector {
    /// Maximum distance from the pick point to a face centroid
    pub radius: f32,
    /// Require `dot(pick normal, face normal) > 0`
    pub require_normal_alignment: bool,
}

impl RadiusNormalSelector {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            require_normal_alignment: true,
        }
    }
}

impl FaceSelector for RadiusNormalSelector {
    fn select(&self, mesh: &IndexedMesh, pick: &Pick) -> Result<Vec<usize>> {
        let radius_squared = self.radius * self.radius;

        scan_faces(mesh, |face, _| {
            if (mesh.face_centroid(face)? - pick.point).norm_squared() > radius_squared {
                return Ok(false);
            }
            // Degenerate faces are skipped under either setting
            let normal = mesh.face_normal(face)?;
            Ok(!self.require_normal_alignment || pick.normal.dot(&normal) > 0.0)
        })
    }
}

impl From<&EraseConfig> for RadiusNormalSelector {
    fn from(config: &EraseConfig) -> Self {
        Self {
            radius: config.radius,
            require_normal_alignment: config.require_normal_alignment,
        }
    }
}

/// Run the policy named by `config` against `mesh`
pub fn select_faces(config: &EraseConfig, mesh: &IndexedMesh, pick: &Pick) -> Result<Vec<usize>> {
    match config.policy {
        SelectionPolicy::SharedVertex => SharedVertexSelector.select(mesh, pick),
        SelectionPolicy::RadiusNormal => RadiusNormalSelector::from(config).select(mesh, pick),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshmend_core::{Point3f, Vector3f};

    /// Four coplanar triangles around the origin: faces 0 and 1 wind
    /// counter-clockwise (+z), faces 2 and 3 clockwise (-z).
    fn make_fan() -> IndexedMesh {
        IndexedMesh::from_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
                Point3f::new(-1.0, 0.0, 0.0),
                Point3f::new(0.0, -1.0, 0.0),
            ],
            &[[0, 1, 2], [0, 2, 3], [0, 4, 3], [0, 1, 4]],
        )
        .unwrap()
    }

    fn up() -> Vector3f {
        Vector3f::new(0.0, 0.0, 1.0)
    }

    #[test]
    fn test_radius_and_normal_pick_two_of_four() {
        let mesh = make_fan();
        let pick = Pick::new(Point3f::new(0.0, 0.4, 0.0), up());
        let faces = RadiusNormalSelector::new(0.5).select(&mesh, &pick).unwrap();
        assert_eq!(faces, vec![0, 1]);
    }

    #[test]
    fn test_normal_rejects_back_faces() {
        let mesh = make_fan();
        let selector = RadiusNormalSelector::new(0.5);

        let front = Pick::new(Point3f::origin(), up());
        assert_eq!(selector.select(&mesh, &front).unwrap(), vec![0, 1]);

        let back = Pick::new(Point3f::origin(), -up());
        assert_eq!(selector.select(&mesh, &back).unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_radius_only_erases_through() {
        let mesh = make_fan();
        let selector = RadiusNormalSelector {
            radius: 0.5,
            require_normal_alignment: false,
        };
        let pick = Pick::new(Point3f::origin(), up());
        assert_eq!(selector.select(&mesh, &pick).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_perpendicular_normal_does_not_match() {
        let mesh = make_fan();
        let pick = Pick::new(Point3f::origin(), Vector3f::new(1.0, 0.0, 0.0));
        assert!(RadiusNormalSelector::new(1.0).select(&mesh, &pick).unwrap().is_empty());
    }

    #[test]
    fn test_radius_skips_erased_and_degenerate() {
        let mut mesh = IndexedMesh::from_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
                Point3f::new(2.0, 0.0, 0.0),
            ],
            &[[0, 1, 2], [0, 1, 3], [1, 3, 2]],
        )
        .unwrap();
        mesh.replace_face_indices(0, TOMBSTONE).unwrap();

        let pick = Pick::new(Point3f::new(0.5, 0.5, 0.0), up());
        let faces = RadiusNormalSelector::new(10.0).select(&mesh, &pick).unwrap();
        // face 1 is collinear, face 0 erased
        assert_eq!(faces, vec![2]);
    }

    #[test]
    fn test_shared_vertex_policy() {
        let positions = (0..10).map(|i| Point3f::new(i as f32, (i * i) as f32, 0.0)).collect();
        let mesh = IndexedMesh::from_faces(positions, &[[1, 2, 3], [3, 5, 6], [7, 8, 9]]).unwrap();

        let pick = Pick::with_face(Point3f::origin(), up(), 0);
        let faces = SharedVertexSelector.select(&mesh, &pick).unwrap();
        assert_eq!(faces, vec![0, 1]);
    }

    #[test]
    fn test_shared_vertex_ignores_erased_hit() {
        let positions = (0..4).map(|i| Point3f::new(i as f32, 0.0, 0.0)).collect();
        let mut mesh = IndexedMesh::from_faces(positions, &[[1, 2, 3], [0, 1, 2]]).unwrap();
        mesh.replace_face_indices(0, TOMBSTONE).unwrap();

        let pick = Pick::with_face(Point3f::origin(), up(), 0);
        assert!(SharedVertexSelector.select(&mesh, &pick).unwrap().is_empty());
    }

    #[test]
    fn test_shared_vertex_without_hit_face() {
        let mesh = make_fan();
        let pick = Pick::new(Point3f::origin(), up());
        assert!(SharedVertexSelector.select(&mesh, &pick).unwrap().is_empty());
    }

    #[test]
    fn test_shared_vertex_hit_out_of_range() {
        let mesh = make_fan();
        let pick = Pick::with_face(Point3f::origin(), up(), 9);
        assert!(matches!(
            SharedVertexSelector.select(&mesh, &pick),
            Err(Error::IndexOutOfRange { index: 9, .. })
        ));
    }

    #[test]
    fn test_select_faces_dispatch() {
        let mesh = make_fan();
        let pick = Pick::with_face(Point3f::origin(), up(), 0);

        let faces = select_faces(&EraseConfig::shared_vertex(), &mesh, &pick).unwrap();
        assert_eq!(faces, vec![0, 1, 2, 3]);

        let faces = select_faces(&EraseConfig::with_radius(0.5), &mesh, &pick).unwrap();
        assert_eq!(faces, vec![0, 1]);
    }
}
