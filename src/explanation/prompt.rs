//! Prompt construction and strict response parsing for external providers.
//!
//! The provider is asked for a single JSON object. Anything that does not
//! decode into a usable explanation is a `ParseError`, which the caller
//! treats like any other provider failure.

use crate::explanation::generator::MAX_SUGGESTIONS;
use crate::explanation::provider::ProviderError;
use crate::explanation::types::{Explanation, ExplanationSource, Factor, Impact};
use crate::recipe::Recipe;
use serde::Deserialize;

/// Confidence assumed when the provider omits one
const DEFAULT_PROVIDER_CONFIDENCE: f64 = 0.7;

pub fn build_prompt(recipe: &Recipe) -> String {
    format!(
        "You explain the sustainability score of a recipe to a study participant.\n\
         \n\
         Recipe: {name}\n\
         Category: {category}\n\
         Ingredients: {ingredients}\n\
         Environmental impact score: {env:.1}/100 (higher = worse)\n\
         Nutrition score: {nutri:.1}/100 (higher = better)\n\
         Sustainability index: {index:.1}/100\n\
         \n\
         Respond with a single JSON object and nothing else:\n\
         {{\n  \"summary\": string,\n  \
         \"environmental_factors\": [{{\"name\": string, \"impact\": \"positive\"|\"negative\"|\"neutral\", \"explanation\": string, \"importance\": number 0-1}}],\n  \
         \"nutritional_factors\": [same shape],\n  \
         \"suggestions\": [1 to {max} strings],\n  \
         \"confidence\": number 0-1\n}}",
        name = recipe.name,
        category = recipe.category,
        ingredients = recipe.ingredients.join(", "),
        env = recipe.env_score,
        nutri = recipe.nutri_score,
        index = recipe.sustainability_index,
        max = MAX_SUGGESTIONS,
    )
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    summary: String,
    #[serde(default)]
    environmental_factors: Vec<ProviderFactor>,
    #[serde(default)]
    nutritional_factors: Vec<ProviderFactor>,
    suggestions: Vec<String>,
    confidence: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ProviderFactor {
    name: String,
    impact: String,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    importance: f64,
}

/// Decode a provider reply into an explanation
///
/// Tolerates a surrounding markdown code fence. Requires a non-blank
/// summary, at least one non-blank suggestion, and known impact values.
/// Importance and confidence are clamped; suggestions beyond the limit
/// are dropped.
pub fn parse_response(text: &str, recipe_id: u64, provider_name: &str) -> Result<Explanation, ProviderError> {
    let body = strip_code_fence(text);
    let response: ProviderResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::ParseError(e.to_string()))?;

    let summary = response.summary.trim().to_string();
    if summary.is_empty() {
        return Err(ProviderError::ParseError("empty summary".to_string()));
    }

    let suggestions: Vec<String> = response
        .suggestions
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .take(MAX_SUGGESTIONS)
        .collect();
    if suggestions.is_empty() {
        return Err(ProviderError::ParseError("no suggestions".to_string()));
    }

    let confidence = response
        .confidence
        .filter(|c| c.is_finite())
        .unwrap_or(DEFAULT_PROVIDER_CONFIDENCE)
        .clamp(0.0, 1.0);

    Ok(Explanation {
        recipe_id,
        summary,
        environmental_factors: convert_factors(response.environmental_factors)?,
        nutritional_factors: convert_factors(response.nutritional_factors)?,
        suggestions,
        confidence,
        source: ExplanationSource::Provider {
            name: provider_name.to_string(),
        },
    })
}

fn convert_factors(factors: Vec<ProviderFactor>) -> Result<Vec<Factor>, ProviderError> {
    factors
        .into_iter()
        .map(|f| {
            let impact = Impact::parse(&f.impact)
                .ok_or_else(|| ProviderError::ParseError(format!("unknown impact '{}'", f.impact)))?;
            Ok(Factor::new(f.name, impact, f.explanation, f.importance))
        })
        .collect()
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop an optional language tag on the opening line
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
