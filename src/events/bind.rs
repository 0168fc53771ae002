//! Binding outcome events.
//!
//! The bind driver triggers [`BehaviourBoundEvent`] after a behaviour entity
//! was bound and [`BindFailedEvent`] when binding stopped at an authoring
//! error. Observers can use the first to finish initialization and the second
//! to halt startup or show a diagnostic.
use bevy_ecs::prelude::*;

use crate::binder::{BindError, BindReport};

/// Event fired once a behaviour entity is bound.
#[derive(Event, Debug, Clone)]
pub struct BehaviourBoundEvent {
    pub entity: Entity,
    /// Type name of the behaviour.
    pub behaviour: &'static str,
    pub report: BindReport,
}

/// Event fired when binding a behaviour entity failed.
#[derive(Event, Debug, Clone)]
pub struct BindFailedEvent {
    pub entity: Entity,
    pub error: BindError,
}
