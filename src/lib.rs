//! subsort
//!
//! Reorganizes a directory of bulk-downloaded submission files, named
//! `<anything>_<group>_attempt_<timestamp>[_<name>].<ext>`, into a tree
//! grouped by submitter and attempt, and writes a log of each group's latest
//! attempt.
//!
//! The pipeline runs in one synchronous pass: discovery, grouping,
//! destination tree recreation, per-file copy, then log generation and
//! write. Data flows one way through [`run`]; no stage reads another's
//! internal state beyond what is passed explicitly.

pub mod config;
pub mod distribute;
pub mod error;
pub mod group;
pub mod parse;
pub mod report;

pub use config::SortConfig;
pub use distribute::{AssumeYes, DistributeOutcome, DistributeStats, Distributor, OverwriteGate};
pub use error::SortError;
pub use group::{discover, group_files, DiscoveryMode, GroupedFiles};
pub use parse::{parse_filename, DisplayName, ParsedFile};
pub use report::{generate_log, write_log, AttemptLog, AttemptTimestamp};

use chrono::{DateTime, Utc};

/// Result of a full pipeline run.
#[derive(Debug)]
pub struct RunSummary {
    /// Whether the tree was built or the overwrite gate declined
    pub outcome: DistributeOutcome,

    /// Number of groups discovered in the source
    pub groups: usize,

    /// When the run finished
    pub finished_at: DateTime<Utc>,
}

/// Run the whole pipeline against one source/destination pair.
///
/// When the gate declines the destructive recreation of a pre-existing
/// destination, the run ends cleanly with nothing changed and no log
/// written. A log write failure leaves the distributed tree on disk.
pub fn run(config: &SortConfig, gate: &mut dyn OverwriteGate) -> Result<RunSummary, SortError> {
    let files = group::discover(&config.source, config.discovery)?;
    let groups = group::group_files(files);
    tracing::debug!(
        "{} groups discovered in {}",
        groups.len(),
        config.source.display()
    );

    let distributor = Distributor::new(config.destination.clone());
    let outcome = distributor.distribute(&groups, gate)?;

    if matches!(outcome, DistributeOutcome::Completed(_)) {
        let log = report::generate_log(&groups)?;
        report::write_log(&config.log_path(), &log)?;
        tracing::info!("attempt log written to {}", config.log_path().display());
    }

    Ok(RunSummary {
        outcome,
        groups: groups.len(),
        finished_at: Utc::now(),
    })
}
