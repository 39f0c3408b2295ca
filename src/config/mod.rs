//! Configuration module for lvconf
//!
//! Provides CLI arguments, the project layout and runtime settings.

mod settings;

pub use settings::*;
