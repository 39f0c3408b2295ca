//! # lvconf - LVGL configuration header installer
//!
//! PlatformIO vendors LVGL under `.pio/libdeps/<env>/lvgl`, and the LVGL
//! build looks for `lv_conf.h` next to its sources. lvconf copies the
//! project's `include/lv_conf.h` into that directory so the build picks
//! up the project-specific configuration.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lvconf::core::copy_config;
//! use std::path::Path;
//!
//! let report = copy_config(Path::new("/path/to/project")).unwrap();
//! println!("{}", report.status_line());
//! ```
//!
//! ## Choosing an environment
//!
//! ```no_run
//! use lvconf::config::{CopierConfig, SelectionPolicy};
//! use lvconf::core::ConfigCopier;
//! use std::path::Path;
//!
//! let config = CopierConfig {
//!     selection: SelectionPolicy::Named("esp32".to_string()),
//!     verify: true,
//!     ..Default::default()
//! };
//!
//! let copier = ConfigCopier::new(config).unwrap();
//! let report = copier.copy_config(Path::new("/path/to/project")).unwrap();
//! report.print_summary();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod error;
pub mod fs;

// Re-export commonly used types
pub use crate::config::{CopierConfig, ProjectLayout, SelectionPolicy};
pub use crate::core::{copy_config, ConfigCopier, CopyReport};
pub use crate::error::{LvConfError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
