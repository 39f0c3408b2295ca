//! Error types for lvconf
//!
//! Every failure a run can end in, plus the single status line that
//! the CLI prints for each of them.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lvconf operations
#[derive(Error, Debug)]
pub enum LvConfError {
    /// No directory matched the dependency-library pattern
    #[error("No directory matches '{pattern}'")]
    DestinationNotFound { pattern: String },

    /// The configuration header is missing from the project
    #[error("Source file not found: {0}")]
    SourceNotFound(PathBuf),

    /// Several dependency environments matched and the policy requires one
    #[error("Multiple destinations match: {}", join_envs(.candidates))]
    AmbiguousDestination { candidates: Vec<PathBuf> },

    /// The requested environment has no matching library directory
    #[error("Environment '{env}' not found (available: {})", join_envs(.candidates))]
    EnvironmentNotFound { env: String, candidates: Vec<PathBuf> },

    /// Content of the copy differs from the source
    #[error("Verification failed: '{destination}' differs from '{original}'")]
    VerificationFailed { original: PathBuf, destination: PathBuf },

    /// Destination resolves to the source file itself
    #[error("Source and destination are the same: {0}")]
    SameSourceAndDestination(PathBuf),

    /// I/O error during file operations
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Search pattern could not be compiled
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

impl LvConfError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The one-line message shown to the user for this failure
    pub fn status_line(&self) -> String {
        match self {
            Self::DestinationNotFound { .. } => {
                "✗ Error: Could not find LVGL in .pio/libdeps".to_string()
            }
            Self::SourceNotFound(path) => format!("✗ Error: {} not found", path.display()),
            Self::AmbiguousDestination { candidates } => format!(
                "✗ Error: Multiple LVGL installs in .pio/libdeps ({}); pass --env or --first",
                join_envs(candidates)
            ),
            other => format!("✗ Error: {}", other),
        }
    }

    /// Short machine-readable name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DestinationNotFound { .. } => "destination_not_found",
            Self::SourceNotFound(_) => "source_not_found",
            Self::AmbiguousDestination { .. } => "ambiguous_destination",
            Self::EnvironmentNotFound { .. } => "environment_not_found",
            Self::VerificationFailed { .. } => "verification_failed",
            Self::SameSourceAndDestination(_) => "same_source_and_destination",
            Self::Io { .. } => "io",
            Self::InvalidPattern(_) => "invalid_pattern",
        }
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. }
            | Self::SourceNotFound(path)
            | Self::SameSourceAndDestination(path) => Some(path),
            Self::VerificationFailed { destination, .. } => Some(destination),
            _ => None,
        }
    }
}

/// Result type alias for lvconf operations
pub type Result<T> = std::result::Result<T, LvConfError>;

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Add path context to an I/O error
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| LvConfError::io(path, e))
    }
}

/// Environment name of a `<libdeps>/<env>/lvgl/src` candidate
pub(crate) fn env_name(candidate: &std::path::Path) -> String {
    candidate
        .ancestors()
        .nth(2)
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| candidate.display().to_string())
}

fn join_envs(candidates: &[PathBuf]) -> String {
    candidates
        .iter()
        .map(|c| env_name(c))
        .collect::<Vec<_>>()
        .join(", ")
}
