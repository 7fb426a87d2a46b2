//! Run configuration for the sorting pipeline.
//!
//! Every pipeline entry point receives its configuration explicitly; no
//! component reads process-wide argument state.

use serde::Serialize;
use std::io;
use std::path::PathBuf;

use crate::group::DiscoveryMode;

/// Directory name appended to the working directory for the default
/// destination.
pub const DEFAULT_DESTINATION_DIR: &str = "sorted";

/// Name of the attempt log written inside the destination.
pub const LOG_FILE_NAME: &str = "sort.log";

/// Configuration for one sorting run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortConfig {
    /// Directory the submission files are read from
    pub source: PathBuf,

    /// Directory the grouped tree is materialized into
    pub destination: PathBuf,

    /// Whether discovery lists the source flat or walks it recursively
    pub discovery: DiscoveryMode,
}

impl SortConfig {
    /// Defaults relative to the working directory: source is the working
    /// directory itself, destination is `./sorted`, discovery is flat.
    pub fn from_cwd() -> io::Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self {
            source: cwd.clone(),
            destination: cwd.join(DEFAULT_DESTINATION_DIR),
            discovery: DiscoveryMode::Flat,
        })
    }

    pub fn with_source(mut self, source: PathBuf) -> Self {
        self.source = source;
        self
    }

    pub fn with_destination(mut self, destination: PathBuf) -> Self {
        self.destination = destination;
        self
    }

    pub fn with_discovery(mut self, discovery: DiscoveryMode) -> Self {
        self.discovery = discovery;
        self
    }

    /// Path of the attempt log inside the destination.
    pub fn log_path(&self) -> PathBuf {
        self.destination.join(LOG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_hang_off_the_working_directory() {
        let config = SortConfig::from_cwd().unwrap();
        let cwd = std::env::current_dir().unwrap();

        assert_eq!(config.source, cwd);
        assert_eq!(config.destination, cwd.join("sorted"));
        assert_eq!(config.discovery, DiscoveryMode::Flat);
    }

    #[test]
    fn test_builders_override_defaults() {
        let config = SortConfig::from_cwd()
            .unwrap()
            .with_source(PathBuf::from("/downloads"))
            .with_destination(PathBuf::from("/graded"))
            .with_discovery(DiscoveryMode::Recursive);

        assert_eq!(config.source, PathBuf::from("/downloads"));
        assert_eq!(config.destination, PathBuf::from("/graded"));
        assert_eq!(config.discovery, DiscoveryMode::Recursive);
        assert_eq!(config.log_path(), PathBuf::from("/graded/sort.log"));
    }
}
