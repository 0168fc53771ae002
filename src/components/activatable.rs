//! Enable/disable capability for components.
//!
//! Every component kind the binder may attach implements [`Attachable`].
//! Kinds that carry their own active/inactive state also implement
//! [`Activatable`] and expose it through [`Attachable::as_activatable`], so
//! the capability follows the type no matter how it was registered.

use bevy_ecs::component::{Component, Mutable};

/// A component that can be switched on and off independently of its entity.
pub trait Activatable {
    /// Returns `true` when the component is active.
    fn is_enabled(&self) -> bool;

    /// Sets the active state.
    fn set_enabled(&mut self, enabled: bool);

    /// Flips the active state and returns the new value.
    fn toggle(&mut self) -> bool {
        let next = !self.is_enabled();
        self.set_enabled(next);
        next
    }
}

/// A component kind the binder can attach.
///
/// Activatable kinds override [`Attachable::as_activatable`] to return
/// `Some(self)`; the default reports no enabled state.
pub trait Attachable: Component<Mutability = Mutable> {
    fn as_activatable(&mut self) -> Option<&mut dyn Activatable> {
        None
    }
}
