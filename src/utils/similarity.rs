//! String similarity for fuzzy ingredient matching
//!
//! Normalized Levenshtein distance over characters (not bytes), so accented
//! Hungarian ingredient names compare the way they read.

use strsim::normalized_levenshtein;

/// Similarity in [0, 1]; 1.0 means identical
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    normalized_levenshtein(a, b)
}

/// Similarity if strictly above `threshold`
pub fn similar_above(a: &str, b: &str, threshold: f64) -> Option<f64> {
    let sim = similarity(a, b);
    (sim > threshold).then_some(sim)
}
