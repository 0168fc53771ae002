//! Axis-aligned box collider.
//!
//! A stock attachable component with its own enabled flag, so it is the
//! usual target for `AttachByType`/`AttachToField` annotations that set an
//! initial enabled state. Overlap queries belong to the host physics.

use bevy_ecs::prelude::Component;

use crate::components::activatable::{Activatable, Attachable};

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub width: f32,
    pub height: f32,
    pub offset: (f32, f32),
    pub enabled: bool,
    // pub is_trigger: bool, // maybe we will use this
}

impl Default for BoxCollider {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl BoxCollider {
    /// Create an enabled BoxCollider with given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            offset: (0.0, 0.0),
            enabled: true,
        }
    }

    /// Modify BoxCollider with given offset
    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = (x, y);
        self
    }
}

impl Activatable for BoxCollider {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl Attachable for BoxCollider {
    fn as_activatable(&mut self) -> Option<&mut dyn Activatable> {
        Some(self)
    }
}
