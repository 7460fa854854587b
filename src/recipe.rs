//! Recipe data model and the single preparation boundary.
//!
//! Raw catalog records are loose: ids may arrive as strings, scores as
//! numeric strings, ingredient lists as R list literals. `Recipe::prepare`
//! is the only place they are turned into a `Recipe`, and the only place a
//! sustainability index is computed.

use crate::classify::classify;
use crate::scorer::SustainabilityScorer;
use crate::utils::normalization::normalize_ingredients;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Display name for records without one
pub const DEFAULT_NAME: &str = "Unnamed recipe";

/// Instructions text for records without any
pub const DEFAULT_INSTRUCTIONS: &str = "No instructions available.";

// ============================================================================
// Category
// ============================================================================

/// Fixed recipe category set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Salad,
    Soup,
    Main,
    Dessert,
    Drink,
    Breakfast,
    Side,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Salad,
        Category::Soup,
        Category::Main,
        Category::Dessert,
        Category::Drink,
        Category::Breakfast,
        Category::Side,
        Category::Other,
    ];

    /// Stable English key
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Salad => "salad",
            Category::Soup => "soup",
            Category::Main => "main",
            Category::Dessert => "dessert",
            Category::Drink => "drink",
            Category::Breakfast => "breakfast",
            Category::Side => "side",
            Category::Other => "other",
        }
    }

    /// Localized (Hungarian) label shown to participants
    pub fn label(&self) -> &'static str {
        match self {
            Category::Salad => "Saláta",
            Category::Soup => "Leves",
            Category::Main => "Főétel",
            Category::Dessert => "Desszert",
            Category::Drink => "Ital",
            Category::Breakfast => "Reggeli",
            Category::Side => "Köret",
            Category::Other => "Egyéb",
        }
    }

    /// Parse an English key or a localized label (case-insensitive)
    pub fn parse(value: &str) -> Option<Category> {
        let needle = value.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == needle || c.label().to_lowercase() == needle)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Recipe
// ============================================================================

/// A prepared catalog recipe
///
/// `sustainability_index` is always `scorer.score(env_score, nutri_score, category)`
/// as of preparation; nothing recomputes or overwrites it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u64,
    pub name: String,
    pub ingredients_raw: String,
    /// Lowercase tokens in source order (duplicates kept)
    pub ingredients: Vec<String>,
    pub category: Category,
    /// 0-100, higher = worse
    pub env_score: f64,
    /// 0-100, higher = better
    pub nutri_score: f64,
    /// 0-100, higher = more sustainable
    pub sustainability_index: f64,
    pub instructions: String,
    /// Exactly one of env/nutri was missing and defaulted to 0
    pub low_confidence: bool,
}

/// Reasons a raw record is dropped at preparation
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecipeError {
    #[error("missing or non-positive id: {0:?}")]
    InvalidId(Option<i64>),

    #[error("recipe {id} has a blank name")]
    BlankName { id: u64 },

    #[error("recipe {id} has neither an environmental nor a nutrition score")]
    NoUsableScores { id: u64 },

    #[error("duplicate recipe id {0}")]
    DuplicateId(u64),
}

/// Loose catalog record, as found in JSON exports
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecipe {
    #[serde(default, alias = "recipe_id", alias = "RecipeId", deserialize_with = "lenient_i64")]
    pub id: Option<i64>,

    #[serde(default, alias = "title", alias = "Name", deserialize_with = "lenient_text")]
    pub name: Option<String>,

    #[serde(
        default,
        alias = "RecipeIngredientParts",
        alias = "ingredients_raw",
        deserialize_with = "lenient_text"
    )]
    pub ingredients: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,

    #[serde(default, alias = "environmental_score", alias = "env", deserialize_with = "lenient_f64")]
    pub env_score: Option<f64>,

    #[serde(default, alias = "nutrition_score", alias = "nutri", deserialize_with = "lenient_f64")]
    pub nutri_score: Option<f64>,

    #[serde(default, alias = "RecipeInstructions", deserialize_with = "lenient_text")]
    pub instructions: Option<String>,
}

impl Recipe {
    /// Validate and prepare a raw record
    ///
    /// - id must be a positive integer
    /// - an absent name gets `DEFAULT_NAME`; a present but blank name is rejected
    /// - env/nutri that are absent, non-finite or ≤ 0 count as missing; both
    ///   missing rejects the record, one missing defaults it to 0 and flags
    ///   the recipe low-confidence
    /// - a supplied category is kept if it parses, otherwise classified
    pub fn prepare(raw: RawRecipe, scorer: &SustainabilityScorer) -> Result<Recipe, RecipeError> {
        let id = match raw.id {
            Some(id) if id > 0 => id as u64,
            other => return Err(RecipeError::InvalidId(other)),
        };

        let name = match raw.name {
            None => DEFAULT_NAME.to_string(),
            Some(name) if name.trim().is_empty() => return Err(RecipeError::BlankName { id }),
            Some(name) => name.trim().to_string(),
        };

        let env = usable_score(raw.env_score);
        let nutri = usable_score(raw.nutri_score);
        if env.is_none() && nutri.is_none() {
            return Err(RecipeError::NoUsableScores { id });
        }
        let low_confidence = env.is_none() || nutri.is_none();
        let env_score = env.unwrap_or(0.0).clamp(0.0, 100.0);
        let nutri_score = nutri.unwrap_or(0.0).clamp(0.0, 100.0);

        let ingredients_raw = raw.ingredients.unwrap_or_default();
        let ingredients = normalize_ingredients(Some(&ingredients_raw), scorer.config().min_token_len);

        let category = raw
            .category
            .as_deref()
            .and_then(Category::parse)
            .unwrap_or_else(|| classify(&ingredients.join(", "), &name));

        let sustainability_index = scorer.score(env_score, nutri_score, category);

        let instructions = raw
            .instructions
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string());

        Ok(Recipe {
            id,
            name,
            ingredients_raw,
            ingredients,
            category,
            env_score,
            nutri_score,
            sustainability_index,
            instructions,
            low_confidence,
        })
    }
}

/// A score counts only if finite and strictly positive
fn usable_score(score: Option<f64>) -> Option<f64> {
    score.filter(|s| s.is_finite() && *s > 0.0)
}

// ============================================================================
// Lenient field decoding
// ============================================================================

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_decimal(&s),
        _ => None,
    }))
}

/// Number from text, accepting a decimal comma
pub(crate) fn parse_decimal(text: &str) -> Option<f64> {
    text.trim().replace(',', ".").parse().ok()
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// Strings pass through; arrays of strings are joined with commas
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| item.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use approx::assert_relative_eq;

    fn scorer() -> SustainabilityScorer {
        SustainabilityScorer::new(ScoringConfig::default())
    }

    fn raw(json: &str) -> RawRecipe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_prepare_full_record() {
        let recipe = Recipe::prepare(
            raw(r#"{"id": 7, "name": "Lencseleves", "ingredients": "c(\"lencse\", \"hagyma\")",
                    "category": "soup", "env_score": 25.5, "nutri_score": 78.2}"#),
            &scorer(),
        )
        .unwrap();

        assert_eq!(recipe.id, 7);
        assert_eq!(recipe.ingredients, vec!["lencse", "hagyma"]);
        assert_eq!(recipe.category, Category::Soup);
        assert_relative_eq!(recipe.sustainability_index, 79.0);
        assert!(!recipe.low_confidence);
        assert_eq!(recipe.instructions, DEFAULT_INSTRUCTIONS);
    }

    #[test]
    fn test_supplied_index_is_ignored() {
        let recipe = Recipe::prepare(
            raw(r#"{"id": 1, "name": "X", "category": "soup", "env_score": 25.5,
                    "nutri_score": 78.2, "sustainability_index": 3.0}"#),
            &scorer(),
        )
        .unwrap();
        assert_relative_eq!(recipe.sustainability_index, 79.0);
    }

    #[test]
    fn test_lenient_fields() {
        let recipe = Recipe::prepare(
            raw(r#"{"RecipeId": "12", "title": "Saláta", "RecipeIngredientParts": ["uborka", "paradicsom"],
                    "env": "20,5", "nutri": 60}"#),
            &scorer(),
        )
        .unwrap();

        assert_eq!(recipe.id, 12);
        assert_eq!(recipe.ingredients, vec!["uborka", "paradicsom"]);
        assert_relative_eq!(recipe.env_score, 20.5);
        assert_eq!(recipe.category, Category::Salad);
    }

    #[test]
    fn test_localized_category_label() {
        assert_eq!(Category::parse("Főétel"), Some(Category::Main));
        assert_eq!(Category::parse(" DESSERT "), Some(Category::Dessert));
        assert_eq!(Category::parse("brunch"), None);
    }

    #[test]
    fn test_unknown_category_is_classified() {
        let recipe = Recipe::prepare(
            raw(r#"{"id": 3, "name": "Marhapörkölt", "ingredients": "marha, hagyma",
                    "category": "brunch", "env_score": 80, "nutri_score": 40}"#),
            &scorer(),
        )
        .unwrap();
        assert_eq!(recipe.category, Category::Main);
    }

    #[test]
    fn test_rejects_bad_ids() {
        let s = scorer();
        assert_eq!(
            Recipe::prepare(raw(r#"{"id": -4, "env_score": 10}"#), &s),
            Err(RecipeError::InvalidId(Some(-4)))
        );
        assert_eq!(
            Recipe::prepare(raw(r#"{"env_score": 10}"#), &s),
            Err(RecipeError::InvalidId(None))
        );
    }

    #[test]
    fn test_name_rules() {
        let s = scorer();
        let unnamed = Recipe::prepare(raw(r#"{"id": 2, "env_score": 10, "nutri_score": 10}"#), &s).unwrap();
        assert_eq!(unnamed.name, DEFAULT_NAME);

        assert_eq!(
            Recipe::prepare(raw(r#"{"id": 2, "name": "  ", "env_score": 10}"#), &s),
            Err(RecipeError::BlankName { id: 2 })
        );
    }

    #[test]
    fn test_missing_scores() {
        let s = scorer();
        assert_eq!(
            Recipe::prepare(raw(r#"{"id": 5, "name": "A", "env_score": 0, "nutri_score": -1}"#), &s),
            Err(RecipeError::NoUsableScores { id: 5 })
        );

        let one = Recipe::prepare(raw(r#"{"id": 6, "name": "B", "nutri_score": 70}"#), &s).unwrap();
        assert!(one.low_confidence);
        assert_eq!(one.env_score, 0.0);
    }

    #[test]
    fn test_out_of_range_scores_are_clamped() {
        let recipe = Recipe::prepare(
            raw(r#"{"id": 8, "name": "C", "env_score": 150, "nutri_score": 120}"#),
            &scorer(),
        )
        .unwrap();
        assert_eq!(recipe.env_score, 100.0);
        assert_eq!(recipe.nutri_score, 100.0);
    }

    #[test]
    fn test_garbled_score_is_missing() {
        let recipe = Recipe::prepare(
            raw(r#"{"id": 9, "name": "D", "env_score": "n/a", "nutri_score": 55}"#),
            &scorer(),
        )
        .unwrap();
        assert!(recipe.low_confidence);
    }
}
