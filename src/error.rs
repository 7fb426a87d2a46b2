//! Error taxonomy for the sorting pipeline.
//!
//! Only conditions that abort a run are modeled here. Filenames that do not
//! match the naming convention, and source files that disappear between
//! discovery and copy, are recovered silently and never surface as errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a sorting run.
#[derive(Debug, Error)]
pub enum SortError {
    /// The destination exists as a plain file, or resolves to the working
    /// directory. Raised before any mutation.
    #[error("invalid destination {}: {}", .path.display(), .reason)]
    InvalidDestination { path: PathBuf, reason: String },

    /// An attempt token that matched the filename grammar failed the stricter
    /// six-component date grammar during log generation. Indicates a grammar
    /// mismatch upstream, so it is fatal rather than skipped.
    #[error("malformed attempt token: {0:?}")]
    MalformedAttemptToken(String),

    /// The log file could not be opened or written. The distributed tree is
    /// already on disk when this is raised.
    #[error("could not write log file {}", .path.display())]
    LogFileUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Filesystem error during discovery or destination tree recreation.
    /// There is no rollback; the destination may be partially rebuilt.
    #[error(transparent)]
    Io(#[from] io::Error),
}
