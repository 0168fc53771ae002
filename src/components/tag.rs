//! Classification tag component.
//!
//! [`EntityTag`] is the entity-wide label written by `TagEntity` annotations.
//! An entity carries at most one tag; writing a new one replaces the old.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityTag(pub String);

impl EntityTag {
    pub fn new(tag: impl Into<String>) -> Self {
        EntityTag(tag.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Compare against a literal tag.
    pub fn is(&self, tag: &str) -> bool {
        self.0 == tag
    }
}
