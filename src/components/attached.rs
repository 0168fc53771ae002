//! Typed handle to a component attached to an entity.
//!
//! Behaviours cannot hold references into the world, so the binder writes an
//! [`Attached<T>`] into the target member instead. The handle remembers the
//! owning entity and the component type; resolve it with [`Attached::get`] or
//! [`Attached::get_mut`] whenever the component is needed.

use std::fmt;
use std::marker::PhantomData;

use bevy_ecs::component::Mutable;
use bevy_ecs::prelude::*;
use bevy_ecs::world::Mut;

/// Handle to the `T` component living on [`Attached::entity`].
pub struct Attached<T> {
    entity: Entity,
    marker: PhantomData<fn() -> T>,
}

impl<T> Attached<T> {
    /// Create a handle for the `T` component of `entity`.
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            marker: PhantomData,
        }
    }

    /// The entity that owns the component.
    pub fn entity(&self) -> Entity {
        self.entity
    }
}

impl<T: Component> Attached<T> {
    /// Borrow the component from the world.
    ///
    /// Returns `None` if the entity was despawned or the component removed.
    pub fn get<'w>(&self, world: &'w World) -> Option<&'w T> {
        world.get::<T>(self.entity)
    }

    /// Returns `true` if the component is still present.
    pub fn is_alive(&self, world: &World) -> bool {
        self.get(world).is_some()
    }
}

impl<T: Component<Mutability = Mutable>> Attached<T> {
    /// Mutably borrow the component from the world.
    pub fn get_mut<'w>(&self, world: &'w mut World) -> Option<Mut<'w, T>> {
        world.get_mut::<T>(self.entity)
    }
}

// Manual impls: derives would require `T: Clone`/`T: PartialEq`.
impl<T> Clone for Attached<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Attached<T> {}

impl<T> PartialEq for Attached<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entity == other.entity
    }
}

impl<T> Eq for Attached<T> {}

impl<T> fmt::Debug for Attached<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attached")
            .field("component", &std::any::type_name::<T>())
            .field("entity", &self.entity)
            .finish()
    }
}
