//! Destination tree materialization.
//!
//! Copies grouped files into `destination/<group>/<attempt>/<display_name>`,
//! destructively recreating the destination root on every run. Recreation of
//! a pre-existing root is gated by an [`OverwriteGate`], so interactive
//! callers can ask before anything is deleted; a declined gate leaves the
//! destination byte-identical.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SortError;
use crate::group::GroupedFiles;

/// Decides whether a pre-existing destination root may be deleted.
///
/// Consulted once per run, and only when the destination already exists as a
/// directory. Returning `false` aborts the whole distribution with no
/// changes made.
pub trait OverwriteGate {
    fn confirm_overwrite(&mut self, destination: &Path) -> bool;
}

/// Gate that always allows overwriting, for scripted runs and tests.
#[derive(Debug, Default)]
pub struct AssumeYes;

impl OverwriteGate for AssumeYes {
    fn confirm_overwrite(&mut self, _destination: &Path) -> bool {
        true
    }
}

/// Statistics from a distribution run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributeStats {
    /// Number of groups materialized
    pub groups: usize,

    /// Number of attempt directories created
    pub attempts: usize,

    /// Number of files copied into the tree
    pub files_copied: usize,

    /// Number of files skipped because the source disappeared
    pub files_skipped: usize,
}

/// Result of a distribution: either the tree was built, or the gate declined
/// and nothing was touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributeOutcome {
    Completed(DistributeStats),
    Aborted,
}

/// Materializes the grouped destination tree.
#[derive(Debug, Clone)]
pub struct Distributor {
    destination: PathBuf,
}

impl Distributor {
    pub fn new(destination: PathBuf) -> Self {
        Self { destination }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Copy every grouped file into the destination tree.
    ///
    /// The destination root is deleted and recreated first; group and attempt
    /// subdirectories are created on demand, and an attempt directory shared
    /// by several files is reused so they accumulate. Sources are copied, not
    /// moved, and a source that vanished since discovery is skipped silently.
    pub fn distribute(
        &self,
        groups: &GroupedFiles,
        gate: &mut dyn OverwriteGate,
    ) -> Result<DistributeOutcome, SortError> {
        self.validate_destination()?;

        if self.destination.is_dir() && !gate.confirm_overwrite(&self.destination) {
            tracing::info!(
                "distribution declined, leaving {} untouched",
                self.destination.display()
            );
            return Ok(DistributeOutcome::Aborted);
        }

        self.recreate_root()?;

        let mut stats = DistributeStats {
            groups: groups.len(),
            attempts: 0,
            files_copied: 0,
            files_skipped: 0,
        };

        for (group_key, files) in groups {
            for file in files {
                let attempt_dir = self.destination.join(group_key).join(&file.attempt_token);
                if !attempt_dir.is_dir() {
                    fs::create_dir_all(&attempt_dir)?;
                    stats.attempts += 1;
                }

                if !file.source_path.is_file() {
                    tracing::debug!(
                        "source disappeared before copy, skipping: {}",
                        file.source_path.display()
                    );
                    stats.files_skipped += 1;
                    continue;
                }

                let target = attempt_dir.join(&file.display_name);
                tracing::debug!(
                    "copying {} -> {}",
                    file.source_path.display(),
                    target.display()
                );
                fs::copy(&file.source_path, &target)?;
                stats.files_copied += 1;
            }
        }

        tracing::info!(
            "distributed {} files across {} groups into {}",
            stats.files_copied,
            stats.groups,
            self.destination.display()
        );

        Ok(DistributeOutcome::Completed(stats))
    }

    /// Rejects destinations the tree recreation must never touch: an existing
    /// non-directory path, and the process working directory.
    fn validate_destination(&self) -> Result<(), SortError> {
        if self.destination.exists() && !self.destination.is_dir() {
            return Err(SortError::InvalidDestination {
                path: self.destination.clone(),
                reason: "exists but is not a directory".to_string(),
            });
        }

        // Canonicalize both sides so relative spellings of the working
        // directory are caught. A destination that does not exist yet cannot
        // be the working directory.
        if let Ok(canonical) = self.destination.canonicalize() {
            let cwd = std::env::current_dir()?.canonicalize()?;
            if canonical == cwd {
                return Err(SortError::InvalidDestination {
                    path: self.destination.clone(),
                    reason: "cannot be the working directory".to_string(),
                });
            }
        }

        Ok(())
    }

    fn recreate_root(&self) -> Result<(), SortError> {
        if self.destination.is_dir() {
            fs::remove_dir_all(&self.destination)?;
        }
        fs::create_dir_all(&self.destination)?;
        Ok(())
    }
}
