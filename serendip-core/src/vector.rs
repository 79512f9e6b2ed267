//! Vector math for embedding space
//!
//! Vectors are plain `Vec<f32>`; nothing here owns a model.

use serde::{Deserialize, Serialize};

/// A point in embedding space
pub type Vector = Vec<f32>;

/// Nearest-neighbor result: a vocabulary word and its cosine similarity
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub word: String,
    /// Cosine similarity in [-1, 1]
    pub similarity: f32,
}

impl Candidate {
    pub fn new(word: impl Into<String>, similarity: f32) -> Self {
        Self {
            word: word.into(),
            similarity,
        }
    }
}

/// Euclidean norm
pub fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Scale to unit length in place.
///
/// A zero vector is left untouched and `false` is returned.
pub fn normalize(v: &mut [f32]) -> bool {
    let n = norm(v);
    if n <= f32::EPSILON {
        return false;
    }
    for x in v.iter_mut() {
        *x /= n;
    }
    true
}

/// Cosine similarity, 0.0 when either side is a zero vector
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let denom = norm(a) * norm(b);
    if denom <= f32::EPSILON {
        0.0
    } else {
        dot / denom
    }
}
