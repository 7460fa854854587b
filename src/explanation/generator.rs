use crate::config::ScoringConfig;
use crate::explanation::cache::ExplanationCache;
use crate::explanation::lookup_tables::{category_statement, lookup_ingredient, FoodGroup, IngredientImpact};
use crate::explanation::types::*;
use crate::recipe::Recipe;
use crate::utils::score_bands::{environmental_label, evaluate};
use std::time::Instant;

/// Upper bound on suggestions per explanation
pub const MAX_SUGGESTIONS: usize = 3;

const AFFIRMING_SUGGESTION: &str = "This recipe is already a sustainable choice. Keep it up!";
const IMPROVE_SUGGESTION: &str = "Add seasonal vegetables or legumes to raise the score further.";

/// Rule-based explanation generator
///
/// Deterministic for a given recipe and scoring configuration. Results are
/// memoized per recipe id in the generator's own cache.
#[derive(Debug, Clone)]
pub struct ExplanationGenerator {
    scoring: ScoringConfig,
    cache: ExplanationCache,
}

/// An ingredient table hit, aggregated across tokens
struct IngredientHit {
    entry: &'static IngredientImpact,
    occurrences: usize,
}

impl Default for ExplanationGenerator {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl ExplanationGenerator {
    pub fn new(scoring: ScoringConfig) -> Self {
        Self {
            scoring,
            cache: ExplanationCache::new(),
        }
    }

    pub fn cache(&self) -> &ExplanationCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut ExplanationCache {
        &mut self.cache
    }

    /// Cached explanation for a recipe, generating it on first request
    pub fn explain(&mut self, recipe: &Recipe) -> Explanation {
        if let Some(cached) = self.cache.lookup(recipe.id) {
            return cached.clone();
        }
        let explanation = self.generate(recipe);
        self.cache.insert(explanation.clone());
        explanation
    }

    /// Generate an explanation without consulting the cache
    pub fn generate(&self, recipe: &Recipe) -> Explanation {
        let start = Instant::now();

        let (hits, recognized) = Self::match_ingredients(recipe);

        let environmental_factors = self.environmental_factors(recipe, &hits);
        let nutritional_factors = Self::nutritional_factors(recipe, &hits);
        let suggestions = Self::suggestions(recipe, &hits);
        let summary = Self::summary(recipe, &environmental_factors);
        let confidence = Self::confidence(recipe, recognized);

        tracing::debug!(
            recipe = recipe.id,
            factors = environmental_factors.len() + nutritional_factors.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "rule-based explanation generated"
        );

        Explanation {
            recipe_id: recipe.id,
            summary,
            environmental_factors,
            nutritional_factors,
            suggestions,
            confidence,
            source: ExplanationSource::RuleBased,
        }
    }

    /// Table hits in first-seen order, plus the count of recognized tokens
    fn match_ingredients(recipe: &Recipe) -> (Vec<IngredientHit>, usize) {
        let mut hits: Vec<IngredientHit> = Vec::new();
        let mut recognized = 0;

        for ingredient in &recipe.ingredients {
            let Some(entry) = lookup_ingredient(ingredient) else { continue };
            recognized += 1;
            match hits.iter_mut().find(|h| h.entry.display == entry.display) {
                Some(hit) => hit.occurrences += 1,
                None => hits.push(IngredientHit { entry, occurrences: 1 }),
            }
        }

        (hits, recognized)
    }

    fn environmental_factors(&self, recipe: &Recipe, hits: &[IngredientHit]) -> Vec<Factor> {
        let mut factors = Vec::with_capacity(hits.len() + 3);

        let band = environmental_label(recipe.env_score);
        let env_impact = if recipe.env_score <= 40.0 {
            Impact::Positive
        } else if recipe.env_score >= 60.0 {
            Impact::Negative
        } else {
            Impact::Neutral
        };
        factors.push(Factor::new(
            "Environmental impact",
            env_impact,
            format!("Environmental impact score {:.0}/100 ({}).", recipe.env_score, band.label.to_lowercase()),
            (recipe.env_score - 50.0).abs() / 50.0,
        ));

        for hit in hits {
            factors.push(Factor::new(
                capitalize(hit.entry.display),
                hit.entry.impact(),
                hit.entry.explanation,
                hit.entry.importance(),
            ));
        }

        let recognized_any = !hits.is_empty();
        let has_animal = hits.iter().any(|h| h.entry.group.is_animal());
        if recognized_any && !has_animal {
            factors.push(Factor::new(
                "Plant-based composition",
                Impact::Positive,
                "No meat or dairy among the recognized ingredients.",
                0.6,
            ));
        }

        let modifier = self.scoring.category_modifiers.get(recipe.category);
        let category_impact = if modifier > 0.0 {
            Impact::Positive
        } else if modifier < 0.0 {
            Impact::Negative
        } else {
            Impact::Neutral
        };
        factors.push(Factor::new(
            format!("Category: {}", recipe.category.label()),
            category_impact,
            format!("{} ({:+.0} points)", category_statement(recipe.category), modifier),
            (modifier.abs() / 5.0).min(1.0),
        ));

        sort_by_importance(&mut factors);
        factors
    }

    fn nutritional_factors(recipe: &Recipe, hits: &[IngredientHit]) -> Vec<Factor> {
        let mut factors = Vec::new();

        let nutri = recipe.nutri_score;
        let (impact, label) = if nutri >= 70.0 {
            (Impact::Positive, "high")
        } else if nutri <= 30.0 {
            (Impact::Negative, "low")
        } else {
            (Impact::Neutral, "average")
        };
        factors.push(Factor::new(
            "Nutritional value",
            impact,
            format!("Nutrition score {:.0}/100 indicates {} nutritional value.", nutri, label),
            (nutri - 50.0).abs() / 50.0,
        ));

        let vegetables: usize = hits
            .iter()
            .filter(|h| h.entry.group == FoodGroup::Vegetable)
            .map(|h| h.occurrences)
            .sum();
        if vegetables >= 3 {
            factors.push(Factor::new(
                "Vegetable-rich",
                Impact::Positive,
                format!("Contains {} vegetables, adding fibre and micronutrients.", vegetables),
                (vegetables as f64 / 5.0).min(1.0),
            ));
        }

        if hits.iter().any(|h| h.entry.group == FoodGroup::Legume) {
            factors.push(Factor::new(
                "Plant protein",
                Impact::Positive,
                "Legumes supply protein and fibre.",
                0.5,
            ));
        }

        if recipe.low_confidence {
            factors.push(Factor::new(
                "Incomplete data",
                Impact::Neutral,
                "One of the source scores was missing; the index is less certain.",
                0.3,
            ));
        }

        sort_by_importance(&mut factors);
        factors
    }

    /// Substitutes for the worst ingredients first, 1 to 3 entries
    fn suggestions(recipe: &Recipe, hits: &[IngredientHit]) -> Vec<String> {
        let mut negatives: Vec<&IngredientHit> = hits
            .iter()
            .filter(|h| h.entry.impact() == Impact::Negative)
            .collect();
        negatives.sort_by(|a, b| a.entry.score.total_cmp(&b.entry.score));

        let mut suggestions: Vec<String> = Vec::new();
        for hit in negatives {
            let Some(substitute) = hit.entry.substitute else { continue };
            if !suggestions.iter().any(|s| s == substitute) {
                suggestions.push(substitute.to_string());
            }
            if suggestions.len() == MAX_SUGGESTIONS {
                break;
            }
        }

        if suggestions.is_empty() {
            let default = if recipe.sustainability_index >= 60.0 {
                AFFIRMING_SUGGESTION
            } else {
                IMPROVE_SUGGESTION
            };
            suggestions.push(default.to_string());
        }

        suggestions
    }

    fn summary(recipe: &Recipe, environmental_factors: &[Factor]) -> String {
        let band = evaluate(recipe.sustainability_index);
        let mut summary = format!(
            "{} scores {:.1}/100 ({}).",
            recipe.name, recipe.sustainability_index, band.label
        );

        let (wanted, lead) = if recipe.sustainability_index >= 60.0 {
            (Impact::Positive, "Main strength")
        } else {
            (Impact::Negative, "Main concern")
        };
        if let Some(factor) = environmental_factors.iter().find(|f| f.impact == wanted) {
            summary.push_str(&format!(" {}: {}.", lead, factor.name.to_lowercase()));
        }

        summary
    }

    /// Share of recognized ingredients, reduced for incomplete source data
    fn confidence(recipe: &Recipe, recognized: usize) -> f64 {
        let coverage = if recipe.ingredients.is_empty() {
            0.0
        } else {
            recognized as f64 / recipe.ingredients.len() as f64
        };
        let mut confidence = 0.5 + 0.4 * coverage;
        if recipe.low_confidence {
            confidence -= 0.3;
        }
        (confidence.clamp(0.1, 1.0) * 100.0).round() / 100.0
    }
}

fn sort_by_importance(factors: &mut [Factor]) {
    factors.sort_by(|a, b| b.importance.total_cmp(&a.importance));
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
