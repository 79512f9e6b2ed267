//! # Traits - Abstractions for Serendip's Components
//!
//! The sampling core never loads a model itself. Whatever backs the
//! embedding space (a word2vec file in memory, a remote service, a fake in
//! tests) implements `EmbeddingProvider` and is passed in by reference.

use crate::error::SerendipResult;
use crate::vector::{Candidate, Vector};

/// Embedding provider trait - the word→vector space
///
/// Implementations handle:
/// - Looking up a word's vector
/// - Ranking vocabulary words by cosine similarity to a query vector
/// - Exposing the vocabulary in its native order
pub trait EmbeddingProvider: Send + Sync {
    /// Dimensionality of every vector in this space
    fn dimensions(&self) -> usize;

    /// Vector for a word, `None` when the word is not in the vocabulary
    fn vector_of(&self, word: &str) -> Option<Vector>;

    /// The `top_n` most similar words, ordered by descending similarity.
    ///
    /// The query does not need to be normalized.
    fn nearest(&self, vector: &[f32], top_n: usize) -> SerendipResult<Vec<Candidate>>;

    /// First `limit` vocabulary words in native order
    fn sample_vocabulary(&self, limit: usize) -> Vec<String>;

    /// Is the word in the vocabulary?
    fn contains(&self, word: &str) -> bool {
        self.vector_of(word).is_some()
    }

    /// Name of this provider (for logging)
    fn name(&self) -> &str {
        "embedding-provider"
    }
}

impl<P: EmbeddingProvider + ?Sized> EmbeddingProvider for std::sync::Arc<P> {
    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    fn vector_of(&self, word: &str) -> Option<Vector> {
        (**self).vector_of(word)
    }

    fn nearest(&self, vector: &[f32], top_n: usize) -> SerendipResult<Vec<Candidate>> {
        (**self).nearest(vector, top_n)
    }

    fn sample_vocabulary(&self, limit: usize) -> Vec<String> {
        (**self).sample_vocabulary(limit)
    }

    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
