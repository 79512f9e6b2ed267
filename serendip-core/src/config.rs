//! # Configuration - where things live and how adventurous to be
//!
//! Interests live under `~/.creativity-engine/`, the seed log under `logs/`,
//! and 30% of explorations are pure random.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{SerendipError, SerendipResult};
use crate::DEFAULT_NOISE_SCALE;

/// Default model file name (word2vec Google News, 3M words, 300 dims)
pub const DEFAULT_MODEL_FILE: &str = "word2vec-google-news-300.bin";

/// Master configuration for Serendip
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SerendipConfig {
    /// Embedding model file (word2vec binary or text format)
    pub model_path: PathBuf,

    /// Load at most this many vectors (None = whole file)
    #[serde(default)]
    pub model_limit: Option<usize>,

    /// Persisted interest document
    pub interests_path: PathBuf,

    /// Append-only exploration seed log
    pub seed_log_path: PathBuf,

    /// Probability of pure random discovery vs walking from an interest
    pub random_chance: f64,

    /// Noise scale for plain `walk` requests
    pub noise_scale: f32,
}

impl Default for SerendipConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            model_path: home.join(".serendip").join(DEFAULT_MODEL_FILE),
            model_limit: None,
            interests_path: home.join(".creativity-engine").join("interests.json"),
            seed_log_path: PathBuf::from("logs").join("exploration_seeds.txt"),
            random_chance: 0.3,
            noise_scale: DEFAULT_NOISE_SCALE,
        }
    }
}

impl SerendipConfig {
    /// Create config from environment variables
    ///
    /// Reads:
    /// - SERENDIP_MODEL: Embedding file path
    /// - SERENDIP_MODEL_LIMIT: Max vectors to load
    /// - SERENDIP_INTERESTS: Interest document path
    /// - SERENDIP_SEED_LOG: Seed log path
    /// - SERENDIP_RANDOM_CHANCE: Pure random probability (default: 0.3)
    /// - SERENDIP_NOISE: Walk noise scale (default: 0.5)
    ///
    /// Values that fail to parse are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("SERENDIP_MODEL") {
            config.model_path = PathBuf::from(path);
        }
        if let Ok(val) = std::env::var("SERENDIP_MODEL_LIMIT") {
            if let Ok(v) = val.parse() {
                config.model_limit = Some(v);
            }
        }
        if let Ok(path) = std::env::var("SERENDIP_INTERESTS") {
            config.interests_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("SERENDIP_SEED_LOG") {
            config.seed_log_path = PathBuf::from(path);
        }
        if let Ok(val) = std::env::var("SERENDIP_RANDOM_CHANCE") {
            if let Ok(v) = val.parse() {
                config.random_chance = v;
            }
        }
        if let Ok(val) = std::env::var("SERENDIP_NOISE") {
            if let Ok(v) = val.parse() {
                config.noise_scale = v;
            }
        }

        config
    }

    /// Check value ranges
    pub fn validate(&self) -> SerendipResult<()> {
        validate_probability(self.random_chance)?;
        validate_noise(self.noise_scale)?;
        if self.model_limit == Some(0) {
            return Err(SerendipError::config("model_limit must be greater than 0"));
        }
        Ok(())
    }
}

/// Probabilities must be finite and inside [0, 1]
pub fn validate_probability(p: f64) -> SerendipResult<()> {
    if p.is_finite() && (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(SerendipError::invalid_argument(format!(
            "random chance must be within [0, 1], got {p}"
        )))
    }
}

/// Noise scales must be finite and non-negative
pub fn validate_noise(noise: f32) -> SerendipResult<()> {
    if noise.is_finite() && noise >= 0.0 {
        Ok(())
    } else {
        Err(SerendipError::invalid_argument(format!(
            "noise scale must be a non-negative number, got {noise}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SerendipConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.random_chance, 0.3);
        assert!(config.interests_path.ends_with(".creativity-engine/interests.json"));
    }

    #[test]
    fn test_probability_bounds() {
        assert!(validate_probability(0.0).is_ok());
        assert!(validate_probability(1.0).is_ok());
        assert!(validate_probability(1.5).is_err());
        assert!(validate_probability(-0.1).is_err());
        assert!(validate_probability(f64::NAN).is_err());
    }

    #[test]
    fn test_noise_bounds() {
        assert!(validate_noise(0.0).is_ok());
        assert!(validate_noise(2.5).is_ok());
        assert!(validate_noise(-1.0).is_err());
        assert!(validate_noise(f32::INFINITY).is_err());
    }

    #[test]
    fn test_zero_model_limit_rejected() {
        let config = SerendipConfig {
            model_limit: Some(0),
            ..SerendipConfig::default()
        };
        assert!(matches!(config.validate(), Err(SerendipError::Config(_))));
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let config = SerendipConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: SerendipConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.interests_path, config.interests_path);
    }
}
