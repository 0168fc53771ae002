//! Registry of behaviour binding tables.
//!
//! Maps each behaviour type to its [`BindingTable`]. Tables are stored behind
//! an [`Arc`] so the binder can hold one while mutating the world.

use std::any::{Any, TypeId};
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;

use crate::binder::{BindError, Behaviour};
use crate::resources::bindingtable::BindingTable;
use crate::resources::componentregistry::ComponentRegistry;

#[derive(Resource, Default)]
pub struct BehaviourRegistry {
    tables: FxHashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl BehaviourRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `B` with the table returned by [`Behaviour::bindings`].
    ///
    /// When `validate` is set the table is checked against `components`
    /// first and rejected on the first authoring error.
    pub fn register<B: Behaviour>(
        &mut self,
        components: &ComponentRegistry,
        validate: bool,
    ) -> Result<(), BindError> {
        self.register_table(B::bindings(), components, validate)
    }

    /// Register an explicit table for `B`, replacing any previous one.
    pub fn register_table<B: Behaviour>(
        &mut self,
        table: BindingTable<B>,
        components: &ComponentRegistry,
        validate: bool,
    ) -> Result<(), BindError> {
        if validate {
            table.validate(components)?;
        }
        info!(
            "Registered behaviour {} with {} annotation(s)",
            std::any::type_name::<B>(),
            table.annotations().len()
        );
        self.tables.insert(TypeId::of::<B>(), Arc::new(table));
        Ok(())
    }

    pub fn get<B: Behaviour>(&self) -> Option<Arc<BindingTable<B>>> {
        let table = self.tables.get(&TypeId::of::<B>())?.clone();
        table.downcast::<BindingTable<B>>().ok()
    }

    pub fn contains<B: Behaviour>(&self) -> bool {
        self.tables.contains_key(&TypeId::of::<B>())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
