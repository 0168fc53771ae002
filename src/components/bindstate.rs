//! Binding lifecycle marker.
//!
//! An entity without [`BindState`] is unbound. The bind driver inserts
//! [`BindState::Bound`] or [`BindState::Failed`] once and never revisits the
//! entity afterwards; both states are terminal.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub enum BindState {
    /// Every annotation of the behaviour was applied.
    Bound,
    /// Binding stopped at an authoring error. Holds the rendered error.
    Failed(String),
}

impl BindState {
    pub fn is_bound(&self) -> bool {
        matches!(self, BindState::Bound)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, BindState::Failed(_))
    }
}
