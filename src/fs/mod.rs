//! File system operations module
//!
//! Destination lookup under the dependency tree and the
//! metadata-preserving copy itself.

mod locate;
mod operations;

pub use locate::*;
pub use operations::*;
