//! Erase strokes and the undo/redo history

use meshmend_core::{FaceIndices, IndexedMesh, Result, TOMBSTONE};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Faces removed during one continuous erase gesture, keyed by face index.
///
/// Each entry holds the face's vertex indices as they were before the
/// gesture first erased it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stroke {
    faces: BTreeMap<usize, FaceIndices>,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a face's original indices. A face already in the stroke keeps
    /// its first snapshot; returns whether the entry was new.
    pub fn record(&mut self, face: usize, original: FaceIndices) -> bool {
        match self.faces.entry(face) {
            Entry::Vacant(slot) => {
                slot.insert(original);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn contains(&self, face: usize) -> bool {
        self.faces.contains_key(&face)
    }

    /// The snapshot recorded for `face`, if it is part of this stroke
    pub fn original(&self, face: usize) -> Option<FaceIndices> {
        self.faces.get(&face).copied()
    }

    /// `(face, original indices)` pairs in ascending face order
    pub fn iter(&self) -> impl Iterator<Item = (usize, FaceIndices)> + '_ {
        self.faces.iter().map(|(&face, &tri)| (face, tri))
    }

    /// Write every recorded snapshot back into the mesh
    pub fn restore(&self, mesh: &mut IndexedMesh) -> Result<()> {
        for (face, original) in self.iter() {
            mesh.replace_face_indices(face, original)?;
        }
        Ok(())
    }

    /// Erase every face of the stroke again
    pub fn reapply(&self, mesh: &mut IndexedMesh) -> Result<()> {
        for (face, _) in self.iter() {
            mesh.replace_face_indices(face, TOMBSTONE)?;
        }
        Ok(())
    }
}

/// Committed strokes, most recent last on each stack
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<Stroke>,
    redo_stack: Vec<Stroke>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a finished stroke. A forward edit invalidates everything that was undone.
    pub fn commit(&mut self, stroke: Stroke) {
        self.undo_stack.push(stroke);
        self.redo_stack.clear();
    }

    /// Restore the most recent stroke and move it to the redo stack
    pub fn undo(&mut self, mesh: &mut IndexedMesh) -> Result<Option<&Stroke>> {
        let Some(stroke) = self.undo_stack.last() else {
            return Ok(None);
        };
        stroke.restore(mesh)?;

        if let Some(stroke) = self.undo_stack.pop() {
            self.redo_stack.push(stroke);
        }
        Ok(self.redo_stack.last())
    }

    /// Re-erase the most recently undone stroke and move it back to the undo stack
    pub fn redo(&mut self, mesh: &mut IndexedMesh) -> Result<Option<&Stroke>> {
        let Some(stroke) = self.redo_stack.last() else {
            return Ok(None);
        };
        stroke.reapply(mesh)?;

        if let Some(stroke) = self.redo_stack.pop() {
            self.undo_stack.push(stroke);
        }
        Ok(self.undo_stack.last())
    }

    pub fn clear_redo(&mut self) {
        self.redo_stack.clear();
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn undo_stack(&self) -> &[Stroke] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[Stroke] {
        &self.redo_stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshmend_core::Point3f;

    fn make_strip() -> IndexedMesh {
        IndexedMesh::from_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
                Point3f::new(1.0, 1.0, 0.0),
                Point3f::new(2.0, 0.0, 0.0),
            ],
            &[[0, 1, 2], [1, 3, 2], [1, 4, 3]],
        )
        .unwrap()
    }

    fn erase(mesh: &mut IndexedMesh, faces: &[usize]) -> Stroke {
        let mut stroke = Stroke::new();
        for &face in faces {
            stroke.record(face, mesh.face_vertex_indices(face).unwrap());
            mesh.replace_face_indices(face, TOMBSTONE).unwrap();
        }
        stroke
    }

    #[test]
    fn test_record_keeps_first_snapshot() {
        let mut stroke = Stroke::new();
        assert!(stroke.record(4, [1, 2, 3]));
        assert!(!stroke.record(4, TOMBSTONE));
        assert_eq!(stroke.original(4), Some([1, 2, 3]));
        assert_eq!(stroke.len(), 1);
    }

    #[test]
    fn test_undo_redo_moves_stroke() {
        let mut mesh = make_strip();
        let original = mesh.clone();
        let mut history = History::new();

        let stroke = erase(&mut mesh, &[1, 2]);
        history.commit(stroke);
        let erased = mesh.clone();

        assert_eq!(history.undo(&mut mesh).unwrap().map(Stroke::len), Some(2));
        assert_eq!(mesh, original);
        assert_eq!((history.undo_depth(), history.redo_depth()), (0, 1));

        assert!(history.redo(&mut mesh).unwrap().is_some());
        assert_eq!(mesh, erased);
        assert_eq!((history.undo_depth(), history.redo_depth()), (1, 0));
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut mesh = make_strip();
        let before = mesh.clone();
        let mut history = History::new();

        assert!(history.undo(&mut mesh).unwrap().is_none());
        assert!(history.redo(&mut mesh).unwrap().is_none());
        assert_eq!(mesh, before);
    }

    #[test]
    fn test_commit_clears_redo() {
        let mut mesh = make_strip();
        let mut history = History::new();

        history.commit(erase(&mut mesh, &[0]));
        history.undo(&mut mesh).unwrap();
        assert!(history.can_redo());

        history.commit(erase(&mut mesh, &[2]));
        assert!(!history.can_redo());
        assert!(history.redo(&mut mesh).unwrap().is_none());
    }
}
