//! File discovery and grouping.
//!
//! Discovery lists the source directory (flat) or walks it recursively, and
//! grouping folds the discovered filenames into an ordered map keyed by the
//! parsed group identifier. The grouping step is a pure fold over `(filename,
//! path)` pairs, so it can be tested without touching the filesystem.

use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::parse::{parse_filename, ParsedFile};

/// How the source directory is enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiscoveryMode {
    /// List only the top level of the source directory.
    Flat,
    /// Walk the source tree, descending into every subdirectory.
    Recursive,
}

/// Parsed files bucketed by group key, in discovery order.
///
/// Insertion order is the order groups were first encountered; it carries no
/// meaning beyond staying stable within a run.
pub type GroupedFiles = IndexMap<String, Vec<ParsedFile>>;

/// Enumerate candidate files in the source directory.
///
/// Returns `(filename, full path)` pairs for every plain file found;
/// directories and entries without a UTF-8 filename are skipped. Whether the
/// enumeration descends into subdirectories is controlled by `mode`.
pub fn discover(source: &Path, mode: DiscoveryMode) -> io::Result<Vec<(String, PathBuf)>> {
    let mut found = Vec::new();

    match mode {
        DiscoveryMode::Flat => {
            for entry in fs::read_dir(source)? {
                let path = entry?.path();
                if !path.is_file() {
                    continue;
                }
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    let name = name.to_string();
                    found.push((name, path));
                }
            }
        }
        DiscoveryMode::Recursive => {
            for entry in walkdir::WalkDir::new(source) {
                let entry = entry.map_err(io::Error::from)?;
                if !entry.file_type().is_file() {
                    continue;
                }
                if let Some(name) = entry.file_name().to_str() {
                    found.push((name.to_string(), entry.path().to_path_buf()));
                }
            }
        }
    }

    Ok(found)
}

/// Bucket discovered files by group key.
///
/// Pure fold over the input sequence: filenames that do not match the naming
/// convention are dropped, matching ones are appended to their group's list
/// in input order. Group keys are trimmed by the parser before they are used
/// here, so spellings differing only by surrounding whitespace land in the
/// same bucket.
pub fn group_files<I>(files: I) -> GroupedFiles
where
    I: IntoIterator<Item = (String, PathBuf)>,
{
    files
        .into_iter()
        .filter_map(|(name, path)| {
            let parsed = parse_filename(&name, &path);
            if parsed.is_some() {
                tracing::debug!("file found: {}", name);
            }
            parsed
        })
        .fold(GroupedFiles::new(), |mut groups, parsed| {
            groups
                .entry(parsed.group_key.clone())
                .or_default()
                .push(parsed);
            groups
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn pairs(names: &[&str]) -> Vec<(String, PathBuf)> {
        names
            .iter()
            .map(|n| (n.to_string(), PathBuf::from(n)))
            .collect()
    }

    #[test]
    fn test_grouping_collapses_whitespace_variants() {
        let groups = group_files(pairs(&[
            "foo_TeamA _attempt_2024-01-02-10-00-00.txt",
            "foo_TeamA_attempt_2024-01-03-10-00-00.txt",
        ]));

        assert_eq!(groups.len(), 1);
        assert_eq!(groups["TeamA"].len(), 2);
    }

    #[test]
    fn test_non_matching_filenames_are_dropped() {
        let groups = group_files(pairs(&[
            "readme.txt",
            "sub_TeamB_attempt_2024-01-02-10-00-00.pdf",
            "notes.md",
        ]));

        assert_eq!(groups.len(), 1);
        assert!(groups.contains_key("TeamB"));
    }

    #[test]
    fn test_group_order_follows_discovery_order() {
        let groups = group_files(pairs(&[
            "x_Zeta_attempt_2024-01-02-10-00-00.txt",
            "x_Alpha_attempt_2024-01-02-10-00-00.txt",
            "x_Zeta_attempt_2024-01-03-10-00-00.txt",
            "x_Mid_attempt_2024-01-02-10-00-00.txt",
        ]));

        let keys: Vec<_> = groups.keys().cloned().collect();
        assert_eq!(keys, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_files_stay_in_input_order_within_a_group() {
        let groups = group_files(pairs(&[
            "x_G_attempt_2024-01-05-10-00-00.txt",
            "x_G_attempt_2024-01-01-10-00-00.txt",
        ]));

        let tokens: Vec<_> = groups["G"]
            .iter()
            .map(|f| f.attempt_token.as_str())
            .collect();
        assert_eq!(tokens, vec!["2024-01-05-10-00-00", "2024-01-01-10-00-00"]);
    }

    #[test]
    fn test_flat_discovery_ignores_nested_files() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("a_G_attempt_1.txt")).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        File::create(dir.path().join("nested/a_H_attempt_1.txt")).unwrap();

        let found = discover(dir.path(), DiscoveryMode::Flat).unwrap();
        let names: Vec<_> = found.iter().map(|(n, _)| n.as_str()).collect();

        assert_eq!(names, vec!["a_G_attempt_1.txt"]);
    }

    #[test]
    fn test_recursive_discovery_finds_nested_files() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("a_G_attempt_1.txt")).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        File::create(dir.path().join("nested/a_H_attempt_1.txt")).unwrap();

        let found = discover(dir.path(), DiscoveryMode::Recursive).unwrap();
        let mut names: Vec<_> = found.iter().map(|(n, _)| n.as_str()).collect();
        names.sort();

        assert_eq!(names, vec!["a_G_attempt_1.txt", "a_H_attempt_1.txt"]);
    }
}
