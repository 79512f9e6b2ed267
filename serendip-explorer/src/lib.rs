//! # Serendip Explorer
//!
//! Concept sampling and interest-weighted exploration over a word-embedding
//! space.
//!
//! ```text
//! Explorer ─ method/seed ─> ConceptSampler ─ vector ─> provider.nearest(50)
//!                                                          │
//!              ExplorationResult <─ Selector (WordFilter, top-5 pick)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use serendip_explorer::{Explorer, InterestStore, LazyProvider};
//!
//! let provider = LazyProvider::from_path("word2vec.bin", None);
//! let space = provider.get()?;
//! let explorer = Explorer::new(&*space, InterestStore::load("interests.json")?);
//! let result = explorer.explore(0.3, &mut rand::thread_rng())?;
//! println!("{result}");
//! ```

pub mod embeddings;
pub mod interests;
pub mod policy;
pub mod prompt;
pub mod sampler;
pub mod seed_log;
pub mod selector;

#[cfg(test)]
mod fixtures;

pub use embeddings::{load_word2vec, LazyProvider, ModelFormat, WordVectors};
pub use interests::{InterestDocument, InterestStore, DEFAULT_INTERESTS};
pub use policy::{ExplorationMethod, ExplorationResult, Explorer};
pub use prompt::{AgentPrompt, SEED_WORDS};
pub use sampler::{ConceptSampler, SampleRequest, SamplingMethod};
pub use seed_log::{SeedLog, SeedLogEntry};
pub use selector::{Selection, Selector};

/// Local time in ISO-8601 with microseconds, e.g. `2026-10-16T09:31:00.123456`
pub fn timestamp_now() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
