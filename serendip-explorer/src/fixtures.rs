//! Synthetic embedding spaces for unit tests

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};
use serendip_core::{Vector, EMBEDDING_DIMS};

use crate::embeddings::WordVectors;

/// Words that pass the filter
pub const CONCEPTS: &[&str] = &[
    "science",
    "fractal",
    "fractals",
    "emergence",
    "consciousness",
    "bioluminescence",
    "philosophy",
    "networks",
    "evolution",
    "linguistics",
    "ocean",
    "coral",
];

/// Words that fail it
pub const JUNK: &[&str] = &["New_York", "Paris", "x1", "ab", "DNA", "covid19"];

/// Alphabetic filler: "lexa", "lexb", ... "lexba", ...
pub fn filler_word(mut i: usize) -> String {
    let mut suffix = Vec::new();
    loop {
        suffix.push((b'a' + (i % 26) as u8) as char);
        i /= 26;
        if i == 0 {
            break;
        }
    }
    suffix.reverse();
    format!("lex{}", suffix.into_iter().collect::<String>())
}

fn random_vector(rng: &mut ChaCha8Rng) -> Vector {
    (0..EMBEDDING_DIMS).map(|_| StandardNormal.sample(rng)).collect()
}

fn build<'a>(words: impl IntoIterator<Item = &'a str>, extra: usize) -> WordVectors {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut entries: Vec<(String, Vector)> = words
        .into_iter()
        .map(|w| (w.to_string(), random_vector(&mut rng)))
        .collect();
    for i in 0..extra {
        entries.push((filler_word(i), random_vector(&mut rng)));
    }
    WordVectors::from_entries(EMBEDDING_DIMS, entries).expect("fixture vectors are well formed")
}

/// Concepts, junk and 40 filler words
pub fn space() -> WordVectors {
    build(CONCEPTS.iter().chain(JUNK).copied(), 40)
}

/// The standard space minus one word
pub fn space_without(missing: &str) -> WordVectors {
    build(
        CONCEPTS.iter().chain(JUNK).copied().filter(|w| *w != missing),
        40,
    )
}

/// Nothing in here passes the filter
pub fn junk_only() -> WordVectors {
    build(JUNK.iter().copied(), 0)
}
