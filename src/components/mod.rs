//! ECS components for entities.
//!
//! Submodules overview:
//! - [`activatable`] – enable/disable capability trait
//! - [`attached`] – typed handle written into behaviour members by the binder
//! - [`bindstate`] – per-entity binding lifecycle marker
//! - [`boxcollider`] – axis-aligned collider with its own enabled flag
//! - [`rigidbody`] – simple kinematic body storing velocity
//! - [`tag`] – entity classification tag

pub mod activatable;
pub mod attached;
pub mod bindstate;
pub mod boxcollider;
pub mod rigidbody;
pub mod tag;
