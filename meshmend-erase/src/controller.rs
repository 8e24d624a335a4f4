//! Input adapter between pointer/keyboard events and the erase engine

use crate::config::StrokeTrigger;
use crate::engine::EraseEngine;
use meshmend_core::{Pick, Result};
use tracing::debug;

/// Tracks erase mode and pointer state and opens/closes strokes accordingly.
///
/// Picks only erase while erase mode is on and the pointer is held. Which
/// event closes a stroke follows
/// [`EraseConfig::stroke_trigger`](crate::EraseConfig::stroke_trigger);
/// under either trigger, leaving erase mode closes the open stroke.
#[derive(Debug, Clone)]
pub struct EraseController {
    engine: EraseEngine,
    erase_mode: bool,
    pointer_down: bool,
}

impl EraseController {
    pub fn new(engine: EraseEngine) -> Self {
        Self {
            engine,
            erase_mode: false,
            pointer_down: false,
        }
    }

    pub fn engine(&self) -> &EraseEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut EraseEngine {
        &mut self.engine
    }

    pub fn into_engine(self) -> EraseEngine {
        self.engine
    }

    pub fn erase_mode(&self) -> bool {
        self.erase_mode
    }

    pub fn pointer_down(&self) -> bool {
        self.pointer_down
    }

    fn trigger(&self) -> StrokeTrigger {
        self.engine.config().stroke_trigger
    }

    fn ensure_stroke(&mut self) -> Result<()> {
        if !self.engine.is_stroke_open() {
            self.engine.begin_stroke()?;
        }
        Ok(())
    }

    /// Flip erase mode; returns the new mode
    pub fn toggle_erase_mode(&mut self) -> Result<bool> {
        self.erase_mode = !self.erase_mode;
        debug!(erase_mode = self.erase_mode, "erase mode toggled");

        if !self.erase_mode {
            self.engine.end_stroke();
        } else if self.trigger() == StrokeTrigger::ModeToggle || self.pointer_down {
            self.ensure_stroke()?;
        }
        Ok(self.erase_mode)
    }

    pub fn pointer_pressed(&mut self) -> Result<()> {
        self.pointer_down = true;
        if self.erase_mode && self.trigger() == StrokeTrigger::PointerRelease {
            self.ensure_stroke()?;
        }
        Ok(())
    }

    pub fn pointer_released(&mut self) {
        self.pointer_down = false;
        if self.trigger() == StrokeTrigger::PointerRelease {
            self.engine.end_stroke();
        }
    }

    /// Feed the picks under the moved pointer. Erases only while erase mode
    /// is on and the pointer is held; returns the number of faces erased.
    pub fn pointer_moved(&mut self, picks: &[Pick]) -> Result<usize> {
        if !(self.erase_mode && self.pointer_down) || picks.is_empty() {
            return Ok(0);
        }
        self.ensure_stroke()?;
        self.engine.apply_picks(picks)
    }

    pub fn undo(&mut self) -> Result<bool> {
        self.engine.undo()
    }

    pub fn redo(&mut self) -> Result<bool> {
        self.engine.redo()
    }

    pub fn reset_all(&mut self) -> Result<()> {
        self.engine.reset_all()
    }
}
