//! Configuration settings for lvconf
//!
//! Defines the CLI arguments, the project layout the copier searches,
//! and the runtime configuration derived from both.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// lvconf - copy lv_conf.h into the PlatformIO LVGL source tree
#[derive(Parser, Debug, Clone)]
#[command(name = "lvconf")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Copy include/lv_conf.h into .pio/libdeps/*/lvgl/src")]
#[command(long_about = r#"
lvconf copies a project's LVGL configuration header into the library
directory PlatformIO vendors under .pio/libdeps, so the LVGL build picks
up the project-specific settings.

With no arguments it operates on the current directory.

Examples:
  lvconf                       # Copy using the only libdeps environment
  lvconf --env esp32           # Pick the esp32 environment explicitly
  lvconf --first               # Take the first environment in sorted order
  lvconf -C ../firmware -n     # Show what would be copied for another project
"#)]
pub struct CliArgs {
    /// Project root (defaults to the current directory)
    #[arg(short = 'C', long, env = "LVCONF_PROJECT_DIR", value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// PlatformIO environment under .pio/libdeps to copy into
    #[arg(short = 'e', long, value_name = "NAME", conflicts_with = "first")]
    pub env: Option<String>,

    /// Take the first environment in sorted order when several match
    #[arg(long)]
    pub first: bool,

    /// Dry run (resolve paths, write nothing)
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Compare source and destination content after copying
    #[arg(long)]
    pub verify: bool,

    /// Output format for the status line
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress the success line)
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl CliArgs {
    /// Default tracing filter for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Output format for reports
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON format
    Json,
}

/// How to choose among several matching destination directories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    /// Exactly one candidate must match
    #[default]
    Unique,
    /// First candidate in lexicographic order
    First,
    /// The candidate whose environment has this name
    Named(String),
}

/// Fixed directory and file names that locate the header on both sides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLayout {
    /// Project subdirectory holding the header
    pub include_dir: PathBuf,
    /// Header file name
    pub file_name: String,
    /// Dependency manager's per-environment library root
    pub libdeps_dir: PathBuf,
    /// Library directory name inside each environment
    pub library: String,
    /// Subdirectory of the library that receives the header
    pub library_subdir: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            include_dir: PathBuf::from("include"),
            file_name: "lv_conf.h".to_string(),
            libdeps_dir: PathBuf::from(".pio").join("libdeps"),
            library: "lvgl".to_string(),
            library_subdir: "src".to_string(),
        }
    }
}

impl ProjectLayout {
    /// `<root>/<include_dir>/<file_name>`
    pub fn source_path(&self, root: &Path) -> PathBuf {
        root.join(&self.include_dir).join(&self.file_name)
    }

    /// `<root>/<libdeps_dir>`
    pub fn libdeps_root(&self, root: &Path) -> PathBuf {
        root.join(&self.libdeps_dir)
    }

    /// Pattern relative to the libdeps root, one wildcard segment
    pub fn relative_pattern(&self) -> String {
        format!("*/{}/{}", self.library, self.library_subdir)
    }

    /// Full pattern as displayed to users
    pub fn display_pattern(&self) -> String {
        let libdeps = self.libdeps_dir.to_string_lossy().replace('\\', "/");
        format!("{}/{}", libdeps, self.relative_pattern())
    }
}

/// Runtime configuration derived from CLI args
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopierConfig {
    /// Names used to build source and destination paths
    pub layout: ProjectLayout,
    /// Destination selection policy
    pub selection: SelectionPolicy,
    /// Dry run mode
    pub dry_run: bool,
    /// Verify content after copy
    pub verify: bool,
    /// Preserve permissions and timestamps
    pub preserve: bool,
}

impl Default for CopierConfig {
    fn default() -> Self {
        Self {
            layout: ProjectLayout::default(),
            selection: SelectionPolicy::Unique,
            dry_run: false,
            verify: false,
            preserve: true,
        }
    }
}

impl CopierConfig {
    /// Create config from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Self {
        let selection = match (&args.env, args.first) {
            (Some(env), _) => SelectionPolicy::Named(env.clone()),
            (None, true) => SelectionPolicy::First,
            (None, false) => SelectionPolicy::Unique,
        };

        Self {
            selection,
            dry_run: args.dry_run,
            verify: args.verify,
            ..Default::default()
        }
    }
}
