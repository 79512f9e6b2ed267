//! Exploration Policy - discover or go deeper
//!
//! Each call flips a biased coin:
//! - heads (probability `random_chance`): a pure random point, something
//!   completely new
//! - tails: a noisy walk from one of the current interests
//!
//! The policy only reads the interest list. Promoting a concept to an
//! interest is the caller's decision (`Explorer::add_interest`).

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use serendip_core::config::validate_probability;
use serendip_core::{EmbeddingProvider, SerendipResult, DEFAULT_SEED_WORD, EXPLORATION_WALK_NOISE};
use tracing::{debug, warn};

use crate::interests::InterestStore;
use crate::sampler::{ConceptSampler, SampleRequest};
use crate::selector::Selection;

/// Which branch an exploration took
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplorationMethod {
    Random,
    Walk,
}

impl ExplorationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Walk => "walk",
        }
    }
}

impl fmt::Display for ExplorationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One exploration: the concept, how it was found, and from where
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExplorationResult {
    pub selection: Selection,
    pub method: ExplorationMethod,
    /// Interest the walk started from (None for pure random)
    pub seed: Option<String>,
}

impl ExplorationResult {
    pub fn concept(&self) -> &str {
        self.selection.word()
    }
}

impl fmt::Display for ExplorationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.seed {
            Some(seed) => write!(f, "{} (walked from: {})", self.concept(), seed),
            None => write!(f, "{} (pure random)", self.concept()),
        }
    }
}

/// Interest-weighted explorer over an embedding space
pub struct Explorer<'a, P: EmbeddingProvider + ?Sized> {
    sampler: ConceptSampler<'a, P>,
    interests: InterestStore,
}

impl<'a, P: EmbeddingProvider + ?Sized> Explorer<'a, P> {
    pub fn new(provider: &'a P, interests: InterestStore) -> Self {
        Self {
            sampler: ConceptSampler::new(provider),
            interests,
        }
    }

    pub fn interests(&self) -> &InterestStore {
        &self.interests
    }

    /// Promote a word to an interest (see `InterestStore::add_interest`)
    pub fn add_interest(&mut self, word: &str) -> SerendipResult<bool> {
        self.interests.add_interest(word)
    }

    /// Generate the next exploration seed
    pub fn explore<R: Rng>(
        &self,
        random_chance: f64,
        rng: &mut R,
    ) -> SerendipResult<ExplorationResult> {
        validate_probability(random_chance)?;

        let roll: f64 = rng.gen();
        let (method, seed, request) = if roll < random_chance {
            (ExplorationMethod::Random, None, SampleRequest::pure_random())
        } else {
            let seed = match self.interests.choose(rng) {
                Some(interest) => interest.to_string(),
                None => {
                    warn!("Interest list is empty, walking from {:?}", DEFAULT_SEED_WORD);
                    DEFAULT_SEED_WORD.to_string()
                }
            };
            let request = SampleRequest::walk(seed.clone(), EXPLORATION_WALK_NOISE);
            (ExplorationMethod::Walk, Some(seed), request)
        };

        let selection = self.sampler.random_concept(&request, rng)?;
        debug!(
            "explore: roll {:.3} vs {:.3} -> {} {:?} => {:?}",
            roll,
            random_chance,
            method,
            seed,
            selection.word()
        );

        Ok(ExplorationResult {
            selection,
            method,
            seed,
        })
    }
}
