//! Concept Sampler - where in embedding space to look
//!
//! Three ways to pick a target point:
//! - **pure_random**: a uniformly random direction; far from anything the
//!   model was trained on, so results are often junk and get filtered
//! - **walk**: a seed word's vector plus Gaussian noise; `noise_scale`
//!   near 0 stays close to the seed, near 1 drifts broadly
//! - **interpolate**: a convex blend of two common words, left
//!   unnormalized so it lands "between" them rather than past them
//!
//! The target is then sent to the provider for its 50 nearest words.

use std::fmt;
use std::str::FromStr;

use rand::seq::index;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};
use serendip_core::config::validate_noise;
use serendip_core::{
    cosine_similarity, normalize, Candidate, EmbeddingProvider, SerendipError, SerendipResult,
    Vector, WordFilter, DEFAULT_NOISE_SCALE, DEFAULT_SEED_WORD, INTERPOLATION_ALPHA_MAX,
    INTERPOLATION_ALPHA_MIN, INTERPOLATION_POOL, NEAREST_TOP_N,
};
use tracing::{debug, warn};

use crate::selector::{Selection, Selector};

/// How to generate the target vector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMethod {
    PureRandom,
    Walk,
    Interpolate,
}

impl SamplingMethod {
    pub const ALL: [SamplingMethod; 3] = [Self::PureRandom, Self::Walk, Self::Interpolate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PureRandom => "pure_random",
            Self::Walk => "walk",
            Self::Interpolate => "interpolate",
        }
    }
}

impl fmt::Display for SamplingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SamplingMethod {
    type Err = SerendipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| SerendipError::InvalidMethod(s.to_string()))
    }
}

/// A sampling request: method plus the walk parameters
#[derive(Clone, Debug, PartialEq)]
pub struct SampleRequest {
    pub method: SamplingMethod,
    /// Walk anchor (default: "science"); ignored by other methods
    pub seed_word: Option<String>,
    /// Walk drift (default: 0.5); ignored by other methods
    pub noise_scale: Option<f32>,
}

impl SampleRequest {
    pub fn new(method: SamplingMethod) -> Self {
        Self {
            method,
            seed_word: None,
            noise_scale: None,
        }
    }

    pub fn pure_random() -> Self {
        Self::new(SamplingMethod::PureRandom)
    }

    pub fn walk(seed_word: impl Into<String>, noise_scale: f32) -> Self {
        Self {
            method: SamplingMethod::Walk,
            seed_word: Some(seed_word.into()),
            noise_scale: Some(noise_scale),
        }
    }

    pub fn interpolate() -> Self {
        Self::new(SamplingMethod::Interpolate)
    }

    /// Parse a method name; unknown names are `InvalidMethod`
    pub fn parse(
        method: &str,
        seed_word: Option<String>,
        noise_scale: Option<f32>,
    ) -> SerendipResult<Self> {
        Ok(Self {
            method: method.parse()?,
            seed_word,
            noise_scale,
        })
    }
}

/// Samples target vectors against a borrowed embedding provider
pub struct ConceptSampler<'a, P: EmbeddingProvider + ?Sized> {
    provider: &'a P,
    selector: Selector,
}

impl<'a, P: EmbeddingProvider + ?Sized> ConceptSampler<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self {
            provider,
            selector: Selector::new(),
        }
    }

    /// Use a custom selector for `random_concept`
    pub fn with_selector(mut self, selector: Selector) -> Self {
        self.selector = selector;
        self
    }

    /// Generate the target vector for a request.
    ///
    /// `pure_random` and `walk` return unit vectors; `interpolate` does not.
    pub fn sample_vector<R: Rng>(
        &self,
        request: &SampleRequest,
        rng: &mut R,
    ) -> SerendipResult<Vector> {
        let vector = match request.method {
            SamplingMethod::PureRandom => self.pure_random(rng),
            SamplingMethod::Walk => {
                let seed = request.seed_word.as_deref().unwrap_or(DEFAULT_SEED_WORD);
                let noise = request.noise_scale.unwrap_or(DEFAULT_NOISE_SCALE);
                self.walk(seed, noise, rng)?
            }
            SamplingMethod::Interpolate => self.interpolate(rng)?,
        };

        debug!(
            "sampled {} vector (norm {:.4})",
            request.method,
            serendip_core::norm(&vector)
        );
        Ok(vector)
    }

    /// Sample a vector and fetch its 50 nearest words
    pub fn candidates<R: Rng>(
        &self,
        request: &SampleRequest,
        rng: &mut R,
    ) -> SerendipResult<Vec<Candidate>> {
        let vector = self.sample_vector(request, rng)?;
        self.provider.nearest(&vector, NEAREST_TOP_N)
    }

    /// Sample, search and select: one concept per call
    pub fn random_concept<R: Rng>(
        &self,
        request: &SampleRequest,
        rng: &mut R,
    ) -> SerendipResult<Selection> {
        let candidates = self.candidates(request, rng)?;
        self.selector.select(&candidates, rng)
    }

    fn pure_random<R: Rng>(&self, rng: &mut R) -> Vector {
        let dims = self.provider.dimensions();
        loop {
            let mut v: Vector = (0..dims).map(|_| StandardNormal.sample(rng)).collect();
            if normalize(&mut v) {
                return v;
            }
        }
    }

    fn walk<R: Rng>(
        &self,
        seed_word: &str,
        noise_scale: f32,
        rng: &mut R,
    ) -> SerendipResult<Vector> {
        validate_noise(noise_scale)?;

        let base = match self.provider.vector_of(seed_word) {
            Some(v) => v,
            None => {
                warn!(
                    "seed {:?} not in vocabulary, walking from {:?}",
                    seed_word, DEFAULT_SEED_WORD
                );
                self.provider.vector_of(DEFAULT_SEED_WORD).ok_or_else(|| {
                    SerendipError::provider(format!(
                        "default seed word {DEFAULT_SEED_WORD:?} missing from vocabulary"
                    ))
                })?
            }
        };

        let mut v: Vector = base
            .iter()
            .map(|x| {
                let n: f32 = StandardNormal.sample(rng);
                x + n * noise_scale
            })
            .collect();

        if !normalize(&mut v) {
            return Err(SerendipError::invalid_argument(format!(
                "walk from {seed_word:?} produced a zero vector"
            )));
        }
        debug!(
            "walk from {:?} drifted to cosine {:.3}",
            seed_word,
            cosine_similarity(&base, &v)
        );
        Ok(v)
    }

    fn interpolate<R: Rng>(&self, rng: &mut R) -> SerendipResult<Vector> {
        let vocabulary = self.provider.sample_vocabulary(INTERPOLATION_POOL);
        let pool = WordFilter.retain(&vocabulary, String::as_str);
        if pool.len() < 2 {
            return Err(SerendipError::InsufficientVocabulary {
                needed: 2,
                found: pool.len(),
            });
        }

        let picks = index::sample(rng, pool.len(), 2);
        let (w1, w2) = (pool[picks.index(0)].as_str(), pool[picks.index(1)].as_str());
        let alpha: f32 = rng.gen_range(INTERPOLATION_ALPHA_MIN..INTERPOLATION_ALPHA_MAX);

        let lookup = |w: &str| {
            self.provider.vector_of(w).ok_or_else(|| {
                SerendipError::provider(format!("vocabulary word {w:?} has no vector"))
            })
        };
        let (v1, v2) = (lookup(w1)?, lookup(w2)?);

        debug!("interpolating {:?} and {:?} (alpha {:.2})", w1, w2, alpha);
        Ok(v1
            .iter()
            .zip(&v2)
            .map(|(a, b)| alpha * a + (1.0 - alpha) * b)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use serendip_core::{norm, EMBEDDING_DIMS};

    fn make_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_method_names_parse() {
        for method in SamplingMethod::ALL {
            assert_eq!(method.to_string().parse::<SamplingMethod>().unwrap(), method);
        }
        let err = "zigzag".parse::<SamplingMethod>().unwrap_err();
        assert!(matches!(err, SerendipError::InvalidMethod(ref m) if m == "zigzag"));
        assert!(SampleRequest::parse("Walk", None, None).is_err());
    }

    #[test]
    fn test_every_method_yields_full_dimension() {
        let space = fixtures::space();
        let sampler = ConceptSampler::new(&space);
        let mut rng = make_rng();

        for request in [
            SampleRequest::pure_random(),
            SampleRequest::walk("fractal", 0.5),
            SampleRequest::interpolate(),
        ] {
            let v = sampler.sample_vector(&request, &mut rng).unwrap();
            assert_eq!(v.len(), EMBEDDING_DIMS, "{}", request.method);
        }
    }

    #[test]
    fn test_pure_random_and_walk_are_unit_length() {
        let space = fixtures::space();
        let sampler = ConceptSampler::new(&space);
        let mut rng = make_rng();

        for _ in 0..20 {
            for request in [SampleRequest::pure_random(), SampleRequest::walk("ocean", 0.9)] {
                let v = sampler.sample_vector(&request, &mut rng).unwrap();
                assert!((norm(&v) - 1.0).abs() < 1e-5, "norm {}", norm(&v));
            }
        }
    }

    #[test]
    fn test_unknown_seed_walks_from_science() {
        let space = fixtures::space();
        let sampler = ConceptSampler::new(&space);

        let from_unknown = sampler
            .sample_vector(&SampleRequest::walk("flibbertigibbet", 0.3), &mut make_rng())
            .unwrap();
        let from_science = sampler
            .sample_vector(&SampleRequest::walk("science", 0.3), &mut make_rng())
            .unwrap();
        assert_eq!(from_unknown, from_science);
    }

    #[test]
    fn test_walk_without_noise_stays_on_seed() {
        let space = fixtures::space();
        let sampler = ConceptSampler::new(&space);

        let selection = sampler
            .random_concept(&SampleRequest::walk("coral", 0.0), &mut make_rng())
            .unwrap();
        let candidates = sampler
            .candidates(&SampleRequest::walk("coral", 0.0), &mut make_rng())
            .unwrap();
        assert_eq!(candidates[0].word, "coral");
        assert!((candidates[0].similarity - 1.0).abs() < 1e-5);
        assert!(!selection.is_fallback());
    }

    #[test]
    fn test_walk_defaults_to_science() {
        let space = fixtures::space();
        let sampler = ConceptSampler::new(&space);
        let request = SampleRequest {
            noise_scale: Some(0.0),
            ..SampleRequest::new(SamplingMethod::Walk)
        };
        let candidates = sampler.candidates(&request, &mut make_rng()).unwrap();
        assert_eq!(candidates[0].word, "science");
    }

    #[test]
    fn test_walk_without_default_seed_fails() {
        let space = fixtures::space_without("science");
        let sampler = ConceptSampler::new(&space);
        let err = sampler
            .sample_vector(&SampleRequest::walk("flibbertigibbet", 0.5), &mut make_rng())
            .unwrap_err();
        assert!(matches!(err, SerendipError::ProviderUnavailable(_)));
    }

    #[test]
    fn test_negative_noise_rejected() {
        let space = fixtures::space();
        let sampler = ConceptSampler::new(&space);
        let err = sampler
            .sample_vector(&SampleRequest::walk("ocean", -0.5), &mut make_rng())
            .unwrap_err();
        assert!(matches!(err, SerendipError::InvalidArgument(_)));
    }

    #[test]
    fn test_interpolation_is_not_renormalized() {
        let space = fixtures::space();
        let sampler = ConceptSampler::new(&space);
        let mut rng = make_rng();

        // Two independent random 300-d vectors are nearly orthogonal, so a
        // convex blend is clearly shorter than either endpoint.
        for _ in 0..10 {
            let v = sampler.sample_vector(&SampleRequest::interpolate(), &mut rng).unwrap();
            let shortest_word = space
                .words()
                .iter()
                .map(|w| norm(space.get(w).unwrap()))
                .fold(f32::INFINITY, f32::min);
            assert!(norm(&v) < shortest_word);
        }
    }

    #[test]
    fn test_interpolation_needs_two_acceptable_words() {
        let space = fixtures::junk_only();
        let sampler = ConceptSampler::new(&space);
        let err = sampler
            .sample_vector(&SampleRequest::interpolate(), &mut make_rng())
            .unwrap_err();
        assert!(matches!(
            err,
            SerendipError::InsufficientVocabulary { needed: 2, found: 0 }
        ));
    }

    #[test]
    fn test_candidates_are_top_fifty() {
        let space = fixtures::space();
        let sampler = ConceptSampler::new(&space);
        let candidates = sampler
            .candidates(&SampleRequest::pure_random(), &mut make_rng())
            .unwrap();
        assert_eq!(candidates.len(), NEAREST_TOP_N.min(space.len()));
        assert!(candidates
            .windows(2)
            .all(|pair| pair[0].similarity >= pair[1].similarity));
    }

    #[test]
    fn test_same_seed_same_concept() {
        let space = fixtures::space();
        let sampler = ConceptSampler::new(&space);
        let request = SampleRequest::walk("emergence", 0.6);
        let a = sampler.random_concept(&request, &mut make_rng()).unwrap();
        let b = sampler.random_concept(&request, &mut make_rng()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_window_of_one_always_takes_best_match() {
        let space = fixtures::space();
        let sampler = ConceptSampler::new(&space).with_selector(Selector::with_window(1));
        let mut rng = make_rng();

        for _ in 0..10 {
            let selection = sampler
                .random_concept(&SampleRequest::walk("coral", 0.0), &mut rng)
                .unwrap();
            assert_eq!(selection, Selection::Filtered { word: "coral".into(), rank: 0 });
        }
    }
}
