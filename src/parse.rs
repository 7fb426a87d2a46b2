//! Filename parser for the submission naming convention.
//!
//! Bulk-downloaded submissions follow a fixed grammar:
//!
//! ```text
//! <anything>_<group>_attempt_<attempt>[_<name>].<ext>
//! ```
//!
//! The `<group>` and `<attempt>` segments are matched non-greedily, the
//! `<name>` segment is optional, and `<ext>` greedily consumes the rest of
//! the string. A filename like `a_G_attempt_1.tar.gz` therefore yields the
//! extension `tar.gz` rather than `gz`; that ambiguity is part of the
//! convention and is preserved here.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Short name used for files whose filename carries no explicit label
/// segment. The download convention reserves the unlabeled slot for the
/// submitter's comments attachment.
pub const DEFAULT_LABEL: &str = "comments";

static FILENAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.*?_(?P<group>.+?)_attempt_(?P<attempt>.+?)(?:_(?P<name>.+?))?\.(?P<ext>.*)$")
        .expect("filename grammar is a valid regex")
});

/// Label segment of a matched filename.
///
/// Modeled as a sum type so the defaulted case stays distinguishable from a
/// file that was explicitly labeled `comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayName {
    /// The filename carried an explicit `_<name>` segment.
    Labeled(String),
    /// No label segment; the conventional default applies.
    Comments,
}

impl DisplayName {
    /// The label text, with the default substituted for the unlabeled case.
    pub fn as_str(&self) -> &str {
        match self {
            DisplayName::Labeled(name) => name,
            DisplayName::Comments => DEFAULT_LABEL,
        }
    }
}

/// A single file that matched the naming convention.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFile {
    /// Submitter/group identifier, trimmed of surrounding whitespace
    pub group_key: String,

    /// Raw timestamp token from the filename (`YYYY-MM-DD-HH-MM-SS`)
    pub attempt_token: String,

    /// Label segment, or the `comments` default
    pub label: DisplayName,

    /// Short name used in the output tree (`<label>.<ext>`)
    pub display_name: String,

    /// Original location of the file
    pub source_path: PathBuf,
}

/// Parse a raw filename against the naming convention.
///
/// Returns `None` when the filename does not match; non-matching input is a
/// normal outcome, not a failure. On match the group key is trimmed of
/// surrounding whitespace before use; download exports sometimes carry
/// trailing spaces in the group segment.
pub fn parse_filename(file_name: &str, source_path: &Path) -> Option<ParsedFile> {
    let caps = FILENAME_RE.captures(file_name)?;

    let group_key = caps["group"].trim().to_string();
    if group_key.is_empty() {
        return None;
    }

    let label = match caps.name("name") {
        Some(m) => DisplayName::Labeled(m.as_str().to_string()),
        None => DisplayName::Comments,
    };
    let display_name = format!("{}.{}", label.as_str(), &caps["ext"]);

    Some(ParsedFile {
        group_key,
        attempt_token: caps["attempt"].to_string(),
        label,
        display_name,
        source_path: source_path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(name: &str) -> Option<ParsedFile> {
        parse_filename(name, Path::new(name))
    }

    #[test]
    fn test_unlabeled_file_defaults_to_comments() {
        let parsed = parse("sub_TeamB_attempt_2024-01-02-10-00-00.pdf").unwrap();

        assert_eq!(parsed.group_key, "TeamB");
        assert_eq!(parsed.attempt_token, "2024-01-02-10-00-00");
        assert_eq!(parsed.label, DisplayName::Comments);
        assert_eq!(parsed.display_name, "comments.pdf");
    }

    #[test]
    fn test_labeled_file_keeps_its_name() {
        let parsed = parse("sub_TeamB_attempt_2024-01-02-10-00-00_essay.pdf").unwrap();

        assert_eq!(parsed.group_key, "TeamB");
        assert_eq!(parsed.label, DisplayName::Labeled("essay".to_string()));
        assert_eq!(parsed.display_name, "essay.pdf");
    }

    #[test]
    fn test_group_key_is_trimmed() {
        let parsed = parse("foo_TeamA _attempt_1.txt").unwrap();
        assert_eq!(parsed.group_key, "TeamA");
    }

    #[test]
    fn test_group_key_may_contain_underscores() {
        let parsed = parse("x_Team_A_attempt_2024-01-02-10-00-00.txt").unwrap();
        assert_eq!(parsed.group_key, "Team_A");
    }

    #[test]
    fn test_missing_attempt_marker_is_not_a_match() {
        assert!(parse("readme.txt").is_none());
        assert!(parse("TeamA_attempt_1.txt").is_none());
    }

    #[test]
    fn test_dotted_unlabeled_filename_extends_the_extension() {
        // Accepted grammar ambiguity: with no label segment the extension is
        // greedy, so literal dots end up inside it.
        let parsed = parse("a_G_attempt_1.tar.gz").unwrap();
        assert_eq!(parsed.display_name, "comments.tar.gz");
    }

    #[test]
    fn test_label_with_dots_splits_on_first_dot() {
        let parsed = parse("x_G_attempt_1_my.essay.txt").unwrap();
        assert_eq!(parsed.label, DisplayName::Labeled("my".to_string()));
        assert_eq!(parsed.display_name, "my.essay.txt");
    }

    #[test]
    fn test_parsing_is_idempotent_over_derived_fields() {
        let first = parse("prefix_TeamC _attempt_2024-03-04-05-06-07_report.pdf").unwrap();

        // Rebuild a conventional filename from the derived fields and parse
        // it again; every field must survive the round trip unchanged.
        let rebuilt = format!(
            "x_{}_attempt_{}_{}",
            first.group_key, first.attempt_token, first.display_name
        );
        let second = parse(&rebuilt).unwrap();

        assert_eq!(second.group_key, first.group_key);
        assert_eq!(second.attempt_token, first.attempt_token);
        assert_eq!(second.display_name, first.display_name);
    }

    #[test]
    fn test_all_whitespace_group_is_dropped() {
        assert!(parse("x_ _attempt_1.txt").is_none());
    }
}
