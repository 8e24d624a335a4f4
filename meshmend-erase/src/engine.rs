//! The erase engine: picks in, tombstoned faces and strokes out

use crate::config::EraseConfig;
use crate::history::{History, Stroke};
use crate::selection::select_faces;
use meshmend_core::{Error, IndexedMesh, Pick, Result, TOMBSTONE};
use tracing::{debug, trace};

/// Owns one mesh and edits its index buffer in response to picks.
///
/// Deletions made between [`begin_stroke`](Self::begin_stroke) and
/// [`end_stroke`](Self::end_stroke) form one undoable [`Stroke`]. All
/// operations are synchronous; callers sharing an engine across threads must
/// serialize access themselves.
#[derive(Debug, Clone)]
pub struct EraseEngine {
    mesh: Option<IndexedMesh>,
    history: History,
    open: Option<Stroke>,
    config: EraseConfig,
}

impl EraseEngine {
    /// Create an engine with no mesh loaded
    pub fn new(config: EraseConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            mesh: None,
            history: History::new(),
            open: None,
            config,
        })
    }

    /// Create an engine editing `mesh`
    pub fn with_mesh(mesh: IndexedMesh, config: EraseConfig) -> Result<Self> {
        let mut engine = Self::new(config)?;
        engine.mesh = Some(mesh);
        Ok(engine)
    }

    pub fn config(&self) -> &EraseConfig {
        &self.config
    }

    /// Replace the configuration; applies to every pick that follows
    pub fn set_config(&mut self, config: EraseConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn mesh(&self) -> Option<&IndexedMesh> {
        self.mesh.as_ref()
    }

    /// Start editing a new mesh. History is dropped and an open stroke starts over empty.
    pub fn load_mesh(&mut self, mesh: IndexedMesh) {
        debug!(
            faces = mesh.face_count(),
            vertices = mesh.vertex_count(),
            "mesh loaded"
        );
        self.mesh = Some(mesh);
        self.forget_edits();
    }

    /// Hand the mesh back to the caller, dropping history
    pub fn take_mesh(&mut self) -> Option<IndexedMesh> {
        self.forget_edits();
        self.mesh.take()
    }

    fn forget_edits(&mut self) {
        self.history.clear();
        if let Some(stroke) = self.open.as_mut() {
            *stroke = Stroke::new();
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_stroke_open(&self) -> bool {
        self.open.is_some()
    }

    /// Faces erased so far by the stroke in progress
    pub fn open_stroke(&self) -> Option<&Stroke> {
        self.open.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || self.open.as_ref().is_some_and(|s| !s.is_empty())
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    pub fn begin_stroke(&mut self) -> Result<()> {
        if self.open.is_some() {
            return Err(Error::StrokeAlreadyOpen);
        }
        self.open = Some(Stroke::new());
        trace!("stroke opened");
        Ok(())
    }

    /// Faces `pick` would erase under the current policy, without touching the mesh
    pub fn select(&self, pick: &Pick) -> Result<Vec<usize>> {
        let mesh = self.mesh.as_ref().ok_or(Error::NoMeshLoaded)?;
        select_faces(&self.config, mesh, pick)
    }

    /// Erase the faces matched by `pick` into the open stroke.
    ///
    /// Returns the number of faces newly erased. Faces already erased are
    /// skipped, and a face hit twice in one stroke keeps its first snapshot.
    pub fn apply_pick(&mut self, pick: &Pick) -> Result<usize> {
        let mesh = self.mesh.as_mut().ok_or(Error::NoMeshLoaded)?;
        let stroke = self.open.as_mut().ok_or(Error::NoStrokeOpen)?;

        let mut erased = 0;
        for face in select_faces(&self.config, mesh, pick)? {
            let original = mesh.face_vertex_indices(face)?;
            if original == TOMBSTONE {
                continue;
            }
            stroke.record(face, original);
            mesh.replace_face_indices(face, TOMBSTONE)?;
            erased += 1;
        }

        if erased > 0 {
            self.history.clear_redo();
        }
        trace!(erased, stroke_faces = stroke.len(), "pick applied");
        Ok(erased)
    }

    /// Apply several picks from one query in order; returns the total erased
    pub fn apply_picks<'a, I>(&mut self, picks: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a Pick>,
    {
        let mut total = 0;
        for pick in picks {
            total += self.apply_pick(pick)?;
        }
        Ok(total)
    }

    /// Close the open stroke, committing it if it erased anything
    pub fn end_stroke(&mut self) {
        let Some(stroke) = self.open.take() else {
            return;
        };
        if stroke.is_empty() {
            trace!("empty stroke discarded");
            return;
        }
        let faces = stroke.len();
        self.history.commit(stroke);
        debug!(faces, undo_depth = self.history.undo_depth(), "stroke committed");
    }

    /// Commit whatever the open stroke holds and keep an empty stroke open
    fn split_open_stroke(&mut self) {
        if let Some(stroke) = self.open.as_mut() {
            if !stroke.is_empty() {
                self.history.commit(std::mem::take(stroke));
            }
        }
    }

    /// Restore the faces of the most recent stroke.
    ///
    /// An open stroke with content counts as the most recent stroke; it is
    /// committed first and a fresh empty stroke stays open. Returns `false`
    /// when there was nothing to undo.
    pub fn undo(&mut self) -> Result<bool> {
        self.split_open_stroke();
        let Some(mesh) = self.mesh.as_mut() else {
            return Ok(false);
        };

        let undone = self.history.undo(mesh)?.map(Stroke::len);
        if let Some(faces) = undone {
            debug!(
                faces,
                undo_depth = self.history.undo_depth(),
                redo_depth = self.history.redo_depth(),
                "stroke undone"
            );
        }
        Ok(undone.is_some())
    }

    /// Erase the faces of the most recently undone stroke again.
    /// Returns `false` when there was nothing to redo.
    pub fn redo(&mut self) -> Result<bool> {
        let Some(mesh) = self.mesh.as_mut() else {
            return Ok(false);
        };

        let redone = self.history.redo(mesh)?.map(Stroke::len);
        if let Some(faces) = redone {
            debug!(
                faces,
                undo_depth = self.history.undo_depth(),
                redo_depth = self.history.redo_depth(),
                "stroke redone"
            );
        }
        Ok(redone.is_some())
    }

    /// Revert every erase, returning the mesh to its loaded state.
    /// Redo history is dropped; an open stroke stays open but empty.
    pub fn reset_all(&mut self) -> Result<()> {
        self.split_open_stroke();
        let mut strokes = 0;
        while self.undo()? {
            strokes += 1;
        }
        self.history.clear_redo();
        debug!(strokes, "all strokes reverted");
        Ok(())
    }
}
