//! Seed Log - what was handed out, and when
//!
//! Append-only, one exploration per line:
//! `timestamp<TAB>seed<TAB>concept`. Pure random explorations have an
//! empty seed field.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serendip_core::SerendipResult;
use tracing::warn;

use crate::policy::ExplorationResult;
use crate::timestamp_now;

/// One parsed log line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedLogEntry {
    pub timestamp: String,
    pub seed: Option<String>,
    pub concept: String,
}

/// Append-only exploration log
#[derive(Clone, Debug)]
pub struct SeedLog {
    path: PathBuf,
}

impl SeedLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a line stamped with the current local time
    pub fn append(&self, seed: Option<&str>, concept: &str) -> SerendipResult<()> {
        self.append_at(&timestamp_now(), seed, concept)
    }

    /// Append an exploration result
    pub fn record(&self, result: &ExplorationResult) -> SerendipResult<()> {
        self.append(result.seed.as_deref(), result.concept())
    }

    /// Append a line with an explicit timestamp
    pub fn append_at(
        &self,
        timestamp: &str,
        seed: Option<&str>,
        concept: &str,
    ) -> SerendipResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}\t{}\t{}", timestamp, seed.unwrap_or(""), concept)?;
        Ok(())
    }

    /// Read every well-formed line back; a missing file is an empty log
    pub fn read_entries(&self) -> SerendipResult<Vec<SeedLogEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let data = fs::read_to_string(&self.path)?;
        let mut entries = Vec::new();

        for (n, line) in data.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            match fields.as_slice() {
                [timestamp, seed, concept] => entries.push(SeedLogEntry {
                    timestamp: timestamp.to_string(),
                    seed: (!seed.is_empty()).then(|| seed.to_string()),
                    concept: concept.to_string(),
                }),
                _ => warn!("{}:{}: skipping malformed line", self.path.display(), n + 1),
            }
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ExplorationMethod;
    use crate::selector::Selection;

    #[test]
    fn test_append_format() {
        let dir = tempfile::tempdir().unwrap();
        let log = SeedLog::new(dir.path().join("logs").join("exploration_seeds.txt"));

        log.append_at("2026-10-16T09:31:00", Some("science"), "telescope").unwrap();
        log.append_at("2026-10-16T09:32:00", None, "glimmer").unwrap();

        let raw = fs::read_to_string(log.path()).unwrap();
        assert_eq!(
            raw,
            "2026-10-16T09:31:00\tscience\ttelescope\n2026-10-16T09:32:00\t\tglimmer\n"
        );
    }

    #[test]
    fn test_read_entries_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let log = SeedLog::new(dir.path().join("seeds.txt"));
        assert!(log.read_entries().unwrap().is_empty());

        let result = ExplorationResult {
            selection: Selection::Filtered {
                word: "plankton".into(),
                rank: 0,
            },
            method: ExplorationMethod::Walk,
            seed: Some("ocean".into()),
        };
        log.record(&result).unwrap();
        log.append(None, "glimmer").unwrap();

        let entries = log.read_entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].seed.as_deref(), Some("ocean"));
        assert_eq!(entries[0].concept, "plankton");
        assert_eq!(entries[1].seed, None);
        assert!(!entries[1].timestamp.is_empty());
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seeds.txt");
        fs::write(&path, "just garbage\n2026-10-16T09:31:00\tart\tmural\n").unwrap();

        let entries = SeedLog::new(&path).read_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].concept, "mural");
    }
}
