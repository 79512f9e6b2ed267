//! Agent Prompt - hand a concept to an agent to go research
//!
//! Rotates through a broad set of seed words so successive sessions cover
//! different parts of the space, walks from one, and renders the briefing.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serendip_core::{EmbeddingProvider, SerendipResult, DEFAULT_SEED_WORD, EXPLORATION_WALK_NOISE};

use crate::sampler::{ConceptSampler, SampleRequest};
use crate::selector::Selection;

/// Seeds the prompt workflow rotates through
pub const SEED_WORDS: [&str; 14] = [
    "science",
    "consciousness",
    "mythology",
    "technology",
    "biology",
    "philosophy",
    "art",
    "mathematics",
    "ecology",
    "language",
    "music",
    "evolution",
    "quantum",
    "emergence",
];

/// A concept ready to hand to an agent
#[derive(Clone, Debug, PartialEq)]
pub struct AgentPrompt {
    pub seed: String,
    pub selection: Selection,
}

impl AgentPrompt {
    /// Pick a seed word and walk from it
    pub fn generate<P, R>(provider: &P, rng: &mut R) -> SerendipResult<Self>
    where
        P: EmbeddingProvider + ?Sized,
        R: Rng,
    {
        let seed = SEED_WORDS.choose(rng).copied().unwrap_or(DEFAULT_SEED_WORD);
        let request = SampleRequest::walk(seed, EXPLORATION_WALK_NOISE);
        let selection = ConceptSampler::new(provider).random_concept(&request, rng)?;
        Ok(Self {
            seed: seed.to_string(),
            selection,
        })
    }

    pub fn concept(&self) -> &str {
        self.selection.word()
    }
}

impl fmt::Display for AgentPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);
        let concept = self.concept();
        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "EXPLORATION SEED: {concept}")?;
        writeln!(f, "(walked from: {})", self.seed)?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;
        writeln!(f, "Instructions for the agent:")?;
        writeln!(f, "1. Research '{concept}' - what is it? why is it interesting?")?;
        writeln!(f, "2. Follow tangents that catch your attention")?;
        writeln!(f, "3. Connect it to things you already know")?;
        writeln!(f, "4. Note what surprises you")?;
        writeln!(f, "5. Log your findings")
    }
}
