//! Shared types for Gridlight.
//!
//! Holds the color model and the highlight configuration so that the core
//! engine, the overlay renderer, and the harness all agree on one vocabulary
//! without pulling in each other's dependencies.

pub mod color;
pub mod config;

pub use color::Color;
pub use config::{Category, HighlightConfig};
