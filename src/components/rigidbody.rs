//! Kinematic body component.
//!
//! [`RigidBody`] stores velocity and damping for an entity. It has no enabled
//! flag of its own (`frozen` is read by the host physics), so the binder
//! attaches it without touching any active state.

use bevy_ecs::prelude::Component;

use crate::components::activatable::Attachable;

/// Kinematic body storing velocity and damping.
///
/// # Fields
/// - `velocity` - Current velocity in world units per second
/// - `friction` - Velocity damping factor (0.0 = no friction, higher = more drag)
/// - `max_speed` - Optional maximum speed clamp
/// - `frozen` - When true, the host skips movement for this entity
#[derive(Component, Clone, Debug, PartialEq, Default)]
pub struct RigidBody {
    pub velocity: (f32, f32),
    pub friction: f32,
    pub max_speed: Option<f32>,
    pub frozen: bool,
}

impl RigidBody {
    /// Create a RigidBody with physics parameters configured.
    ///
    /// # Arguments
    /// * `friction` - Velocity damping (0.0 = none, ~5.0 = responsive, ~10.0 = heavy)
    /// * `max_speed` - Optional velocity magnitude limit
    pub fn with_physics(friction: f32, max_speed: Option<f32>) -> Self {
        Self {
            friction,
            max_speed,
            ..Self::default()
        }
    }
}

impl Attachable for RigidBody {}
