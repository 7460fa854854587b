//! Sustainability Scorer - composite 0-100 index for recipes
//!
//! index = clamp((100 - env) * W_env + nutri * W_nutri + category_modifier, 0, 100)
//!
//! Inputs are clamped to [0, 100] first; the result is rounded to one decimal.
//! This is the only code that produces a sustainability index.

use crate::config::ScoringConfig;
use crate::recipe::Category;
use serde::Serialize;

/// Sustainability scorer
#[derive(Debug, Clone)]
pub struct SustainabilityScorer {
    config: ScoringConfig,
}

/// Intermediate values of one score computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// 100 - env (lower raw impact → higher component)
    pub environmental_component: f64,
    pub nutritional_component: f64,
    pub weighted: f64,
    pub category_modifier: f64,
    /// Clamped and rounded index
    pub total: f64,
}

impl Default for SustainabilityScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl SustainabilityScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Composite sustainability index
    pub fn score(&self, env: f64, nutri: f64, category: Category) -> f64 {
        self.breakdown(env, nutri, category).total
    }

    /// Composite index with all intermediate components
    pub fn breakdown(&self, env: f64, nutri: f64, category: Category) -> ScoreBreakdown {
        let env = clamp_score(env);
        let nutri = clamp_score(nutri);

        let environmental_component = 100.0 - env;
        let nutritional_component = nutri;
        let weighted = environmental_component * self.config.environmental_weight
            + nutritional_component * self.config.nutrition_weight;
        let category_modifier = self.config.category_modifiers.get(category);

        let total = round_one_decimal((weighted + category_modifier).clamp(0.0, 100.0));

        ScoreBreakdown {
            environmental_component,
            nutritional_component,
            weighted,
            category_modifier,
            total,
        }
    }
}

/// Clamp to [0, 100]; NaN counts as 0
fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_soup_example() {
        let scorer = SustainabilityScorer::default();
        let b = scorer.breakdown(25.5, 78.2, Category::Soup);

        assert_relative_eq!(b.environmental_component, 74.5);
        assert_relative_eq!(b.nutritional_component, 78.2);
        assert_relative_eq!(b.weighted, 75.98, epsilon = 1e-9);
        assert_relative_eq!(b.category_modifier, 3.0);
        assert_relative_eq!(b.total, 79.0);
    }

    #[test]
    fn test_out_of_range_inputs_are_clamped() {
        let scorer = SustainabilityScorer::default();
        // env=150 behaves like env=100
        assert_relative_eq!(
            scorer.score(150.0, 50.0, Category::Other),
            scorer.score(100.0, 50.0, Category::Other)
        );
        assert_relative_eq!(
            scorer.score(-20.0, 500.0, Category::Other),
            scorer.score(0.0, 100.0, Category::Other)
        );
    }

    #[test]
    fn test_bounded_for_extremes() {
        let scorer = SustainabilityScorer::default();
        for category in Category::ALL {
            for env in [-1e9, 0.0, 50.0, 100.0, 1e9] {
                for nutri in [-1e9, 0.0, 50.0, 100.0, 1e9] {
                    let s = scorer.score(env, nutri, category);
                    assert!((0.0..=100.0).contains(&s), "{env} {nutri} {category} -> {s}");
                }
            }
        }
        // modifier cannot push past the bounds
        assert_relative_eq!(scorer.score(0.0, 100.0, Category::Salad), 100.0);
        assert_relative_eq!(scorer.score(100.0, 0.0, Category::Dessert), 0.0);
    }

    #[test]
    fn test_nan_counts_as_zero() {
        let scorer = SustainabilityScorer::default();
        assert_relative_eq!(
            scorer.score(f64::NAN, 40.0, Category::Main),
            scorer.score(0.0, 40.0, Category::Main)
        );
    }

    #[test]
    fn test_monotonic_in_env_and_nutri() {
        let scorer = SustainabilityScorer::default();
        for category in Category::ALL {
            let mut previous = f64::NEG_INFINITY;
            for env in (0..=100).rev() {
                let s = scorer.score(f64::from(env), 55.0, category);
                assert!(s >= previous);
                previous = s;
            }

            let mut previous = f64::NEG_INFINITY;
            for nutri in 0..=100 {
                let s = scorer.score(35.0, f64::from(nutri), category);
                assert!(s >= previous);
                previous = s;
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let scorer = SustainabilityScorer::default();
        let first = scorer.score(42.3, 61.7, Category::Breakfast);
        for _ in 0..100 {
            assert_eq!(scorer.score(42.3, 61.7, Category::Breakfast), first);
        }
    }

    #[test]
    fn test_rounds_to_one_decimal() {
        let scorer = SustainabilityScorer::default();
        let s = scorer.score(33.33, 66.66, Category::Other);
        assert_relative_eq!(s * 10.0, (s * 10.0).round(), epsilon = 1e-9);
    }
}
