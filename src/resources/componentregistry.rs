//! Registry of attachable component kinds.
//!
//! The binder never creates a component it does not know how to build. Each
//! kind is registered once with a factory. Kinds must implement
//! [`Attachable`], which also tells the binder whether the component has an
//! enabled state. A [`ComponentKey`] that is not present here is rejected as
//! an unsupported component type.
//!
//! # Usage
//!
//! ```ignore
//! let mut registry = ComponentRegistry::default();
//! registry.register::<BoxCollider>();
//! registry.register::<RigidBody>();
//! registry.register_with(|| Health(100));
//! world.insert_resource(registry);
//! ```

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use bevy_ecs::prelude::*;
use bevy_ecs::world::EntityWorldMut;
use log::debug;
use rustc_hash::FxHashMap;

use crate::components::activatable::Attachable;

/// Identity of a requested type: its [`TypeId`] plus the type name for messages.
#[derive(Clone, Copy)]
pub struct ComponentKey {
    type_id: TypeId,
    name: &'static str,
}

impl ComponentKey {
    pub fn of<T: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ComponentKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ComponentKey {}

impl std::hash::Hash for ComponentKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

type InsertFn = Arc<dyn Fn(&mut EntityWorldMut) -> bool + Send + Sync>;
type SetEnabledFn = fn(&mut EntityWorldMut, bool) -> bool;

/// Everything the binder needs to materialize one component kind.
#[derive(Clone)]
pub struct ComponentKind {
    key: ComponentKey,
    get_or_insert: InsertFn,
    set_enabled: SetEnabledFn,
}

impl ComponentKind {
    pub fn key(&self) -> ComponentKey {
        self.key
    }

    /// Insert the component if the entity lacks it.
    ///
    /// Returns `true` if a new component was created, `false` if an existing
    /// one was kept.
    pub fn get_or_insert(&self, entity: &mut EntityWorldMut) -> bool {
        (self.get_or_insert)(entity)
    }

    /// Apply the enabled state. Returns `false` when the component has no
    /// enabled state (or is absent), leaving it untouched.
    pub fn apply_enabled(&self, entity: &mut EntityWorldMut, enabled: bool) -> bool {
        (self.set_enabled)(entity, enabled)
    }
}

impl fmt::Debug for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentKind")
            .field("key", &self.key)
            .finish()
    }
}

fn erase<F>(f: F) -> InsertFn
where
    F: Fn(&mut EntityWorldMut) -> bool + Send + Sync + 'static,
{
    Arc::new(f)
}

fn set_enabled_of<T: Attachable>(entity: &mut EntityWorldMut, enabled: bool) -> bool {
    let Some(mut component) = entity.get_mut::<T>() else {
        return false;
    };
    match component.as_activatable() {
        Some(activatable) => {
            activatable.set_enabled(enabled);
            true
        }
        None => false,
    }
}

/// Map of attachable component kinds, keyed by [`TypeId`].
#[derive(Resource, Default)]
pub struct ComponentRegistry {
    kinds: FxHashMap<TypeId, ComponentKind>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a kind built with [`Default`].
    pub fn register<T: Attachable + Default>(&mut self) -> &mut Self {
        self.register_with(T::default)
    }

    /// Register a kind built by `factory`.
    pub fn register_with<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Attachable,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let key = ComponentKey::of::<T>();
        debug!("Registering attachable component {}", key);
        self.kinds.insert(
            key.type_id(),
            ComponentKind {
                key,
                get_or_insert: Self::insert_fn(factory),
                set_enabled: set_enabled_of::<T>,
            },
        );
        self
    }

    fn insert_fn<T, F>(factory: F) -> InsertFn
    where
        T: Attachable,
        F: Fn() -> T + Send + Sync + 'static,
    {
        erase(move |entity: &mut EntityWorldMut| {
            if entity.contains::<T>() {
                false
            } else {
                entity.insert(factory());
                true
            }
        })
    }

    pub fn get(&self, key: &ComponentKey) -> Option<&ComponentKind> {
        self.kinds.get(&key.type_id())
    }

    pub fn contains(&self, key: &ComponentKey) -> bool {
        self.kinds.contains_key(&key.type_id())
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
