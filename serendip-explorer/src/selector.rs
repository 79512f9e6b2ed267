//! Selector - from ranked neighbors to one concept
//!
//! Filter first, then pick uniformly among the top few survivors. The single
//! closest match is too predictable; the top handful keeps results on topic
//! while still varying from call to call.

use rand::Rng;
use serde::{Deserialize, Serialize};
use serendip_core::{Candidate, SerendipError, SerendipResult, WordFilter, SELECTION_WINDOW};
use tracing::debug;

/// Which branch produced the chosen word
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    /// Picked from the filtered window
    Filtered {
        word: String,
        /// Position in the provider's unfiltered ranking
        rank: usize,
    },
    /// Nothing passed the filter, so the top raw candidate was returned
    Fallback { word: String },
}

impl Selection {
    pub fn word(&self) -> &str {
        match self {
            Self::Filtered { word, .. } | Self::Fallback { word } => word,
        }
    }

    pub fn into_word(self) -> String {
        match self {
            Self::Filtered { word, .. } | Self::Fallback { word } => word,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Randomized top-k picker over filtered candidates
#[derive(Clone, Debug)]
pub struct Selector {
    filter: WordFilter,
    window: usize,
}

impl Default for Selector {
    fn default() -> Self {
        Self {
            filter: WordFilter,
            window: SELECTION_WINDOW,
        }
    }
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick from the top `window` filtered candidates (at least 1)
    pub fn with_window(window: usize) -> Self {
        Self {
            window: window.max(1),
            ..Self::default()
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Choose one word from candidates ranked by descending similarity.
    ///
    /// Only an empty candidate list is an error.
    pub fn select<R: Rng>(
        &self,
        candidates: &[Candidate],
        rng: &mut R,
    ) -> SerendipResult<Selection> {
        let top = candidates.first().ok_or(SerendipError::NoCandidates)?;

        let passing: Vec<usize> = candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| self.filter.is_acceptable(&c.word))
            .map(|(i, _)| i)
            .collect();

        if passing.is_empty() {
            debug!(
                "selector: none of {} candidates passed, falling back to {:?}",
                candidates.len(),
                top.word
            );
            return Ok(Selection::Fallback {
                word: top.word.clone(),
            });
        }

        let pick = rng.gen_range(0..self.window.min(passing.len()));
        let rank = passing[pick];
        debug!(
            "selector: {}/{} passed, picked #{} ({:?})",
            passing.len(),
            candidates.len(),
            rank,
            candidates[rank].word
        );

        Ok(Selection::Filtered {
            word: candidates[rank].word.clone(),
            rank,
        })
    }
}
