//! # Serendip Core
//!
//! Core types and traits for Serendip, a novelty generator that samples
//! "concept" words out of a pretrained word-embedding space.
//!
//! This crate provides the fundamental building blocks:
//! - **WordFilter**: Decides whether a token is an acceptable concept
//! - **Vector / Candidate**: Points in embedding space and ranked neighbors
//! - **EmbeddingProvider**: The seam to whatever model backs the space
//! - **SerendipConfig**: Paths and defaults shared by the runtime
//!
//! ## Design Philosophy
//!
//! Serendip is not a retrieval system. It is a **randomness source** with
//! a sense of topic: results only need to be real words, not correct ones.

pub mod config;
pub mod error;
pub mod filter;
pub mod traits;
pub mod vector;

// Re-export main types at crate root
pub use config::SerendipConfig;
pub use error::{SerendipError, SerendipResult};
pub use filter::{is_acceptable, WordFilter, WORD_JOINER};
pub use traits::EmbeddingProvider;
pub use vector::{cosine_similarity, norm, normalize, Candidate, Vector};

/// Dimensions of the embedding space (word2vec Google News)
pub const EMBEDDING_DIMS: usize = 300;

/// Seed used by `walk` when the requested seed is not in the vocabulary
pub const DEFAULT_SEED_WORD: &str = "science";

/// Neighbors requested from the provider per sampled vector
pub const NEAREST_TOP_N: usize = 50;

/// Size of the window the selector picks from after filtering
pub const SELECTION_WINDOW: usize = 5;

/// Leading vocabulary words considered for interpolation
pub const INTERPOLATION_POOL: usize = 5000;

/// Blend weight range for interpolation
pub const INTERPOLATION_ALPHA_MIN: f32 = 0.3;
pub const INTERPOLATION_ALPHA_MAX: f32 = 0.7;

/// Noise used when the exploration policy walks from an interest
pub const EXPLORATION_WALK_NOISE: f32 = 0.6;

/// Default noise for a plain `walk` request
pub const DEFAULT_NOISE_SCALE: f32 = 0.5;
