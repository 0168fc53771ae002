//! ECS resources.
//!
//! - [`behaviourregistry`] – binding tables per behaviour type
//! - [`binderconfig`] – INI-backed binder settings
//! - [`bindingtable`] – annotations and member slots of one behaviour
//! - [`componentregistry`] – attachable component kinds and their factories
//! - [`objectpool`] – capped stack of reusable values

pub mod behaviourregistry;
pub mod binderconfig;
pub mod bindingtable;
pub mod componentregistry;
pub mod objectpool;
