//! ECS systems.
//!
//! - [`bind`] – binds pending behaviour entities and records their state
pub mod bind;
