//! Interest Store - the topics exploration keeps coming back to
//!
//! A small JSON document, rewritten whole on every change:
//!
//! ```json
//! { "interests": ["consciousness", "emergence"], "updated": "2026-10-16T09:31:00.123456" }
//! ```
//!
//! There is no locking. Two processes adding interests at the same time can
//! lose one of the writes (last writer wins).

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serendip_core::{is_acceptable, SerendipResult};
use tracing::{debug, info};

use crate::timestamp_now;

/// Starting interests when nothing has been saved yet
pub const DEFAULT_INTERESTS: [&str; 8] = [
    "consciousness",
    "emergence",
    "fractals",
    "bioluminescence",
    "philosophy",
    "networks",
    "evolution",
    "linguistics",
];

fn default_interests() -> Vec<String> {
    DEFAULT_INTERESTS.iter().map(|s| s.to_string()).collect()
}

/// On-disk form of the interest list
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterestDocument {
    #[serde(default = "default_interests")]
    pub interests: Vec<String>,

    /// ISO-8601 time of the last change
    #[serde(default)]
    pub updated: Option<String>,
}

impl Default for InterestDocument {
    fn default() -> Self {
        Self {
            interests: default_interests(),
            updated: None,
        }
    }
}

/// Deduplicated, persisted interest list
#[derive(Clone, Debug)]
pub struct InterestStore {
    path: PathBuf,
    interests: Vec<String>,
    updated: Option<String>,
}

impl InterestStore {
    /// Read the document at `path`, or start from the defaults if there is none.
    ///
    /// The defaults are not written until the first `add_interest`. Repeated
    /// entries in a hand-edited file are dropped, keeping the first.
    pub fn load(path: impl Into<PathBuf>) -> SerendipResult<Self> {
        let path = path.into();

        let document = if path.exists() {
            let data = fs::read_to_string(&path)?;
            let document: InterestDocument = serde_json::from_str(&data)?;
            debug!("Loaded {} interests from {}", document.interests.len(), path.display());
            document
        } else {
            debug!("No interests at {}, using defaults", path.display());
            InterestDocument::default()
        };

        let mut seen = HashSet::new();
        let interests = document
            .interests
            .into_iter()
            .filter(|w| seen.insert(w.clone()))
            .collect();

        Ok(Self {
            path,
            interests,
            updated: document.updated,
        })
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    pub fn len(&self) -> usize {
        self.interests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interests.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.interests.iter().any(|w| w == word)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Time of the last saved change, if any
    pub fn updated(&self) -> Option<&str> {
        self.updated.as_deref()
    }

    /// Uniformly random interest
    pub fn choose<R: Rng>(&self, rng: &mut R) -> Option<&str> {
        self.interests.choose(rng).map(String::as_str)
    }

    /// Add a newly discovered interest.
    ///
    /// Returns `Ok(false)` without touching the file when the word is
    /// already present or is not an acceptable concept. On a failed write
    /// the in-memory list is left as it was.
    pub fn add_interest(&mut self, word: &str) -> SerendipResult<bool> {
        if self.contains(word) || !is_acceptable(word) {
            debug!("Interest {:?} rejected (duplicate or not a concept)", word);
            return Ok(false);
        }

        self.interests.push(word.to_string());
        let previous = self.updated.replace(timestamp_now());

        if let Err(e) = self.save() {
            self.interests.pop();
            self.updated = previous;
            return Err(e);
        }

        info!("✨ New interest: {} ({} total)", word, self.interests.len());
        Ok(true)
    }

    /// Current state as a document
    pub fn document(&self) -> InterestDocument {
        InterestDocument {
            interests: self.interests.clone(),
            updated: self.updated.clone(),
        }
    }

    /// Overwrite the document on disk
    pub fn save(&self) -> SerendipResult<()> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_string_pretty(&self.document())?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
