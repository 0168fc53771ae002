//! Small extension traits and helpers.
//!
//! - [`axis`] – combine two key states into a -1/0/1 axis value
//! - [`callback`] – call optional callbacks without unwrapping
//! - [`shuffle`] – in-place slice shuffling and random picks
//! - [`snap`] – round world coordinates to whole pixels
//! - [`vector`] – clamp and 2D/3D conversions for tuple vectors

pub mod axis;
pub mod callback;
pub mod shuffle;
pub mod snap;
pub mod vector;
