//! Core copy module
//!
//! Ties the destination lookup and file copy together into the
//! single operation the CLI runs.

mod copier;

pub use copier::*;
