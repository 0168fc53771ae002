//! Autowire library.
//!
//! Declarative component binding for `bevy_ecs` worlds plus a few small
//! utilities. Behaviours declare, through a [`resources::bindingtable::BindingTable`],
//! which components must exist on their entity, which members receive handles
//! to them, their initial enabled state and the entity tag. The
//! [`binder`] applies those tables once per behaviour entity.

pub mod binder;
pub mod components;
pub mod events;
pub mod ext;
pub mod resources;
pub mod systems;
