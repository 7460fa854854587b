//! Utility modules for recipe scoring
//!
//! Contains shared functionality used across scoring, search and explanation:
//! - Normalization: ingredient and query tokenization
//! - Score bands: label/icon/color lookup for scores
//! - Similarity: edit-distance similarity for fuzzy matching

pub mod normalization;
pub mod score_bands;
pub mod similarity;

// Re-export commonly used items
pub use normalization::{normalize_ingredients, normalize_query, DEFAULT_MIN_TOKEN_LEN};
pub use score_bands::{environmental_label, evaluate, EnvironmentalBand, ScoreBand};
pub use similarity::{similar_above, similarity};
