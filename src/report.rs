//! Latest-attempt log generation.
//!
//! For every group, selects the chronologically latest attempt and renders it
//! as `YYYY-MM-DD HH:MM:SS`. Selection compares parsed six-field timestamps
//! rather than the raw tokens, so tokens with unpadded components still order
//! chronologically; rendering zero-pads, normalizing whatever widths the
//! filenames used.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::SortError;
use crate::group::GroupedFiles;

static ATTEMPT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)-(\d+)-(\d+)-(\d+)-(\d+)-(\d+)$").expect("attempt grammar is a valid regex")
});

/// Rendered latest-attempt date per group, in grouping order.
pub type AttemptLog = IndexMap<String, String>;

/// Structured attempt timestamp.
///
/// Field order matches the token layout, so the derived ordering is
/// chronological. Components are compared as integers; no calendar
/// validation is applied beyond the six-component grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct AttemptTimestamp {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl AttemptTimestamp {
    /// Parse a raw attempt token into its six components.
    ///
    /// A token that fails the grammar indicates a mismatch with the filename
    /// parser upstream, so this is an error rather than a skip.
    pub fn parse(token: &str) -> Result<Self, SortError> {
        let caps = ATTEMPT_RE
            .captures(token)
            .ok_or_else(|| SortError::MalformedAttemptToken(token.to_string()))?;

        let field = |i: usize| -> Result<u32, SortError> {
            caps[i]
                .parse()
                .map_err(|_| SortError::MalformedAttemptToken(token.to_string()))
        };

        Ok(Self {
            year: field(1)?,
            month: field(2)?,
            day: field(3)?,
            hour: field(4)?,
            minute: field(5)?,
            second: field(6)?,
        })
    }

    /// Render as a zero-padded `YYYY-MM-DD HH:MM:SS` string.
    pub fn render(&self) -> String {
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Compute the latest attempt per group.
///
/// Every token in the group is parsed; any malformed token aborts log
/// generation for the whole run.
pub fn generate_log(groups: &GroupedFiles) -> Result<AttemptLog, SortError> {
    let mut log = AttemptLog::new();

    for (group_key, files) in groups {
        let mut latest: Option<AttemptTimestamp> = None;

        for file in files {
            let timestamp = AttemptTimestamp::parse(&file.attempt_token)?;
            if latest.map_or(true, |current| timestamp > current) {
                latest = Some(timestamp);
            }
        }

        if let Some(timestamp) = latest {
            log.insert(group_key.clone(), timestamp.render());
        }
    }

    Ok(log)
}

/// Write the attempt log as `<group>,<date>` lines, no header.
pub fn write_log(path: &Path, log: &AttemptLog) -> Result<(), SortError> {
    let unwritable = |source| SortError::LogFileUnwritable {
        path: path.to_path_buf(),
        source,
    };

    let mut out = File::create(path).map_err(unwritable)?;
    for (group_key, date) in log {
        writeln!(out, "{},{}", group_key, date).map_err(unwritable)?;
    }

    Ok(())
}
