//! Engine Configuration
//!
//! One canonical, typed configuration for scoring, search and explanation.
//! Every field has a reference default, so a JSON file only needs to name
//! the values it overrides.

use crate::recipe::Category;
use crate::utils::normalization::DEFAULT_MIN_TOKEN_LEN;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration validation failure
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("scoring weights must sum to 1.0 (got {0})")]
    WeightSum(f64),

    #[error("weight {name} must be non-negative (got {value})")]
    NegativeWeight { name: &'static str, value: f64 },

    #[error("search weights must sum to 1.0 (got {0})")]
    SearchWeightSum(f64),

    #[error("result bounds invalid: min_results={min}, max_results={max}")]
    ResultBounds { min: usize, max: usize },

    #[error("fuzzy threshold must lie in [0, 1] (got {0})")]
    FuzzyThreshold(f64),

    #[error("retry policy needs at least one attempt")]
    NoAttempts,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
    pub search: SearchConfig,
    pub explanation: ExplanationConfig,
}

/// Sustainability scoring weights and category modifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub environmental_weight: f64,
    pub nutrition_weight: f64,
    pub category_modifiers: CategoryModifiers,
    /// Minimum ingredient token length in characters
    pub min_token_len: usize,
}

/// Per-category bonus/penalty added after weighting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryModifiers {
    pub salad: f64,
    pub soup: f64,
    pub main: f64,
    pub dessert: f64,
    pub drink: f64,
    pub breakfast: f64,
    pub side: f64,
    pub other: f64,
}

/// Search matching and ranking parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_results: usize,
    /// Candidate sets smaller than this are broadened
    pub min_results: usize,
    pub fuzzy_threshold: f64,
    /// Group B blend: relevance share
    pub relevance_weight: f64,
    /// Group B blend: sustainability share
    pub sustainability_weight: f64,
    /// Characters of a term used for prefix broadening
    pub prefix_len: usize,
    pub min_term_len: usize,
}

/// External explanation provider policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplanationConfig {
    pub provider_enabled: bool,
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub backoff_multiplier: f64,
    pub attempt_timeout_ms: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            environmental_weight: 0.6,
            nutrition_weight: 0.4,
            category_modifiers: CategoryModifiers::default(),
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
        }
    }
}

impl Default for CategoryModifiers {
    fn default() -> Self {
        Self {
            salad: 5.0,
            soup: 3.0,
            main: -3.0,
            dessert: -4.0,
            drink: 1.0,
            breakfast: 2.0,
            side: 2.0,
            other: 0.0,
        }
    }
}

impl CategoryModifiers {
    /// Modifier for a category
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Salad => self.salad,
            Category::Soup => self.soup,
            Category::Main => self.main,
            Category::Dessert => self.dessert,
            Category::Drink => self.drink,
            Category::Breakfast => self.breakfast,
            Category::Side => self.side,
            Category::Other => self.other,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 8,
            min_results: 5,
            fuzzy_threshold: 0.7,
            relevance_weight: 0.7,
            sustainability_weight: 0.3,
            prefix_len: 3,
            min_term_len: DEFAULT_MIN_TOKEN_LEN,
        }
    }
}

impl Default for ExplanationConfig {
    fn default() -> Self {
        Self {
            provider_enabled: false,
            max_attempts: 3,
            base_delay_ms: 250,
            backoff_multiplier: 2.0,
            attempt_timeout_ms: 8_000,
        }
    }
}

impl ExplanationConfig {
    /// Per-attempt hard timeout
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }

    /// Delay before retry number `retry` (1-based)
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        let factor = self.backoff_multiplier.max(1.0).powi(retry.saturating_sub(1) as i32);
        Duration::from_millis((self.base_delay_ms as f64 * factor).round() as u64)
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: EngineConfig = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse config JSON")?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.scoring;
        let q = &self.search;
        for (name, value) in [
            ("environmental_weight", s.environmental_weight),
            ("nutrition_weight", s.nutrition_weight),
            ("relevance_weight", q.relevance_weight),
            ("sustainability_weight", q.sustainability_weight),
        ] {
            if value < 0.0 || value.is_nan() {
                return Err(ConfigError::NegativeWeight { name, value });
            }
        }

        let weight_sum = s.environmental_weight + s.nutrition_weight;
        if (weight_sum - 1.0).abs() > 1e-6 {
            return Err(ConfigError::WeightSum(weight_sum));
        }

        let blend_sum = q.relevance_weight + q.sustainability_weight;
        if (blend_sum - 1.0).abs() > 1e-6 {
            return Err(ConfigError::SearchWeightSum(blend_sum));
        }
        if q.max_results == 0 || q.min_results > q.max_results {
            return Err(ConfigError::ResultBounds {
                min: q.min_results,
                max: q.max_results,
            });
        }
        if !(0.0..=1.0).contains(&q.fuzzy_threshold) {
            return Err(ConfigError::FuzzyThreshold(q.fuzzy_threshold));
        }

        if self.explanation.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }

        Ok(())
    }
}
