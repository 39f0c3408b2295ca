//! Destination directory lookup
//!
//! Matches `<libdeps>/*/<library>/<subdir>` under a project root and
//! picks one match according to a [`SelectionPolicy`].

use crate::config::{ProjectLayout, SelectionPolicy};
use crate::error::{LvConfError, Result};
use globset::{GlobBuilder, GlobMatcher};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// A library directory found under one dependency environment
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Candidate {
    /// Absolute path of the matched directory
    pub dir: PathBuf,
    /// Environment name (the wildcard segment)
    pub env: String,
}

/// Finds candidate destination directories for a project layout
pub struct DestinationLocator {
    layout: ProjectLayout,
    matcher: GlobMatcher,
}

impl DestinationLocator {
    /// Create a locator for the given layout
    pub fn new(layout: &ProjectLayout) -> Result<Self> {
        let pattern = layout.relative_pattern();
        let matcher = GlobBuilder::new(&pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| LvConfError::InvalidPattern(format!("'{}': {}", pattern, e)))?
            .compile_matcher();

        Ok(Self {
            layout: layout.clone(),
            matcher,
        })
    }

    /// All matching directories under `root`, sorted by path
    pub fn find_candidates(&self, root: &Path) -> Result<Vec<Candidate>> {
        let libdeps = self.layout.libdeps_root(root);
        if !libdeps.is_dir() {
            tracing::debug!("No libdeps directory at {:?}", libdeps);
            return Ok(Vec::new());
        }

        // Wildcard segment + library + subdir
        let depth = 3;
        let walker = WalkDir::new(&libdeps)
            .min_depth(depth)
            .max_depth(depth)
            .follow_links(true)
            .sort_by_file_name();

        let mut candidates = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    tracing::debug!("Skipping unreadable entry: {}", err);
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&libdeps) else {
                continue;
            };

            let Some(env) = first_segment(relative) else {
                continue;
            };

            // Shell globs never match dot-entries with `*`
            if env.starts_with('.') || !self.matcher.is_match(relative) {
                continue;
            }

            candidates.push(Candidate {
                dir: entry.path().to_path_buf(),
                env,
            });
        }

        candidates.sort();
        tracing::debug!(
            "Found {} candidate(s) for {}",
            candidates.len(),
            self.layout.display_pattern()
        );

        Ok(candidates)
    }

    /// Apply `policy` to the candidates
    pub fn select(&self, candidates: &[Candidate], policy: &SelectionPolicy) -> Result<Candidate> {
        if candidates.is_empty() {
            return Err(LvConfError::DestinationNotFound {
                pattern: self.layout.display_pattern(),
            });
        }

        match policy {
            SelectionPolicy::Unique if candidates.len() == 1 => Ok(candidates[0].clone()),
            SelectionPolicy::Unique => Err(LvConfError::AmbiguousDestination {
                candidates: candidates.iter().map(|c| c.dir.clone()).collect(),
            }),
            SelectionPolicy::First => Ok(candidates[0].clone()),
            SelectionPolicy::Named(name) => candidates
                .iter()
                .find(|c| &c.env == name)
                .cloned()
                .ok_or_else(|| LvConfError::EnvironmentNotFound {
                    env: name.clone(),
                    candidates: candidates.iter().map(|c| c.dir.clone()).collect(),
                }),
        }
    }

    /// Find and select in one step
    pub fn locate(&self, root: &Path, policy: &SelectionPolicy) -> Result<(Candidate, Vec<Candidate>)> {
        let candidates = self.find_candidates(root)?;
        let selected = self.select(&candidates, policy)?;
        Ok((selected, candidates))
    }
}

fn first_segment(relative: &Path) -> Option<String> {
    match relative.components().next() {
        Some(Component::Normal(name)) => Some(name.to_string_lossy().into_owned()),
        _ => None,
    }
}
