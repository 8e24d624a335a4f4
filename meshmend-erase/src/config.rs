//! Erase tool configuration

use meshmend_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Which rule maps a pick to the faces it removes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionPolicy {
    /// Remove every face sharing a vertex with the directly hit face
    SharedVertex,
    /// Remove faces whose centroid lies within the radius and that face the pick normal
    #[default]
    RadiusNormal,
}

/// Which input event closes a stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeTrigger {
    /// Pointer down opens a stroke, pointer up closes it
    #[default]
    PointerRelease,
    /// Erase mode on opens a stroke, erase mode off closes it
    ModeToggle,
}

/// Configuration for the erase engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EraseConfig {
    /// Selection rule applied to each pick
    pub policy: SelectionPolicy,
    /// Maximum pick-to-centroid distance (radius policy only)
    pub radius: f32,
    /// Skip faces whose normal does not point along the pick normal (radius policy only)
    pub require_normal_alignment: bool,
    /// Input event that ends a stroke
    pub stroke_trigger: StrokeTrigger,
}

impl Default for EraseConfig {
    fn default() -> Self {
        Self {
            policy: SelectionPolicy::RadiusNormal,
            radius: 0.05,
            require_normal_alignment: true,
            stroke_trigger: StrokeTrigger::PointerRelease,
        }
    }
}

impl EraseConfig {
    /// Legacy configuration: shared-vertex selection
    pub fn shared_vertex() -> Self {
        Self {
            policy: SelectionPolicy::SharedVertex,
            ..Self::default()
        }
    }

    /// Radius + normal selection with the given radius
    pub fn with_radius(radius: f32) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "erase radius must be finite and non-negative, got {}",
                self.radius
            )));
        }
        Ok(())
    }
}
