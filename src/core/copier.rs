//! Config copier
//!
//! Resolves the header and its destination for a project root and
//! performs the single copy, producing a [`CopyReport`].

use crate::config::CopierConfig;
use crate::error::{IoResultExt, LvConfError, Result};
use crate::fs::{ensure_distinct, files_match, CopyOptions, DestinationLocator, FileCopier};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome of a successful run
#[derive(Debug, Clone, Serialize)]
pub struct CopyReport {
    /// Header that was copied
    pub source: PathBuf,
    /// File that now holds the header
    pub destination: PathBuf,
    /// Environment the destination belongs to
    pub env: String,
    /// Every matching library directory, sorted
    pub candidates: Vec<PathBuf>,
    /// Source size in bytes
    pub bytes: u64,
    /// A file already existed at the destination
    pub replaced_existing: bool,
    /// The existing destination already had the same content
    pub already_identical: bool,
    /// Nothing was written
    pub dry_run: bool,
    /// Result of the post-copy content check, if requested
    pub verified: Option<bool>,
    /// Time spent copying
    pub duration: Duration,
}

impl CopyReport {
    /// The one-line message shown to the user
    pub fn status_line(&self) -> String {
        let verb = if self.dry_run { "Would copy" } else { "Copied" };
        let name = self
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("✓ {} {} to LVGL source ({})", verb, name, self.destination.display())
    }

    /// Status as a single JSON object
    pub fn to_json_line(&self) -> String {
        let mut value = serde_json::to_value(self).unwrap_or(serde_json::Value::Null);
        if let Some(map) = value.as_object_mut() {
            map.insert("status".into(), "ok".into());
        }
        value.to_string()
    }

    /// Print details to console
    pub fn print_summary(&self) {
        println!("=== Copy Summary ===");
        println!("Source:      {}", self.source.display());
        println!("Destination: {}", self.destination.display());
        println!("Environment: {}", self.env);
        println!("Size:        {}", humansize::format_size(self.bytes, humansize::BINARY));
        println!("Replaced:    {}", self.replaced_existing);
        println!("Unchanged:   {}", self.already_identical);
        println!("Duration:    {:.2?}", self.duration);
        if let Some(verified) = self.verified {
            println!("Verified:    {}", if verified { "YES ✓" } else { "NO ✗" });
        }
        if self.candidates.len() > 1 {
            println!("Candidates:");
            for candidate in &self.candidates {
                println!("  {}", candidate.display());
            }
        }
    }
}

/// Failure as a single JSON object
pub fn error_json_line(err: &LvConfError) -> String {
    serde_json::json!({
        "status": "error",
        "kind": err.kind(),
        "message": err.to_string(),
        "path": err.path(),
    })
    .to_string()
}

/// Copies the configuration header into the dependency tree
pub struct ConfigCopier {
    config: CopierConfig,
    locator: DestinationLocator,
    copier: FileCopier,
}

impl ConfigCopier {
    /// Create a copier for the given configuration
    pub fn new(config: CopierConfig) -> Result<Self> {
        let locator = DestinationLocator::new(&config.layout)?;
        let copier = FileCopier::new(CopyOptions {
            preserve_permissions: config.preserve,
            preserve_times: config.preserve,
        });

        Ok(Self {
            config,
            locator,
            copier,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &CopierConfig {
        &self.config
    }

    /// Copy `<root>/include/lv_conf.h` into the selected `lvgl/src` directory
    ///
    /// The destination is resolved first, so a project without any
    /// matching directory reports [`LvConfError::DestinationNotFound`]
    /// even when the header is missing too. The source is checked before
    /// anything is written; both failure paths leave the tree untouched.
    pub fn copy_config(&self, project_root: &Path) -> Result<CopyReport> {
        let layout = &self.config.layout;
        let source = layout.source_path(project_root);

        let (selected, candidates) = self.locator.locate(project_root, &self.config.selection)?;
        let destination = selected.dir.join(&layout.file_name);
        tracing::debug!("Source {:?}, destination {:?}", source, destination);

        let metadata = match std::fs::metadata(&source) {
            Ok(meta) if meta.is_file() => meta,
            Ok(_) => return Err(LvConfError::SourceNotFound(source)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LvConfError::SourceNotFound(source))
            }
            Err(e) => return Err(LvConfError::io(source, e)),
        };

        // A link back to the header must be caught before anything opens it
        ensure_distinct(&source, &destination)?;

        let replaced_existing = destination
            .symlink_metadata()
            .map(|m| m.is_file())
            .unwrap_or(false);
        let already_identical = replaced_existing && files_match(&source, &destination)?;

        let mut report = CopyReport {
            source,
            destination,
            env: selected.env,
            candidates: candidates.into_iter().map(|c| c.dir).collect(),
            bytes: metadata.len(),
            replaced_existing,
            already_identical,
            dry_run: self.config.dry_run,
            verified: None,
            duration: Duration::ZERO,
        };

        if self.config.dry_run {
            tracing::info!("Dry run: would copy {:?} to {:?}", report.source, report.destination);
            return Ok(report);
        }

        if replaced_existing && !already_identical {
            tracing::warn!("Overwriting modified {:?}", report.destination);
        }

        let stats = self
            .copier
            .copy_with_metadata(&report.source, &metadata, &report.destination)?;
        report.bytes = stats.bytes_copied;
        report.duration = stats.duration;
        tracing::info!(
            "Copied {} to {:?}",
            humansize::format_size(stats.bytes_copied, humansize::BINARY),
            report.destination
        );

        if self.config.verify {
            if !files_match(&report.source, &report.destination)? {
                return Err(LvConfError::VerificationFailed {
                    original: report.source,
                    destination: report.destination,
                });
            }
            report.verified = Some(true);
        }

        Ok(report)
    }
}

/// Copy with the default layout and policy
pub fn copy_config(project_root: &Path) -> Result<CopyReport> {
    ConfigCopier::new(CopierConfig::default())?.copy_config(project_root)
}

/// Resolve the project root, falling back to the current directory
pub fn resolve_project_root(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => std::env::current_dir().with_path("."),
    }
}
