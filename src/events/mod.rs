//! Event types used by the binder.
//!
//! Submodules:
//! - [`bind`] – success and failure notifications from the bind driver
pub mod bind;
