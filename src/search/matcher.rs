//! Ingredient matching and relevance scoring
//!
//! Per query term, every ingredient token is checked in order:
//! exact match (+10), substring either way (+5), fuzzy similarity above the
//! threshold (+round(similarity * 3)). A term that hit no ingredient gets +2
//! if it appears in the recipe name. Terms with an exact or partial hit add a
//! coverage bonus of round(covered / terms * 5).

use crate::config::SearchConfig;
use crate::recipe::Recipe;
use crate::utils::similarity::similar_above;

pub const EXACT_POINTS: u32 = 10;
pub const PARTIAL_POINTS: u32 = 5;
pub const FUZZY_SCALE: f64 = 3.0;
pub const NAME_POINTS: u32 = 2;
pub const COVERAGE_POINTS: f64 = 5.0;

/// Relevance assigned to recipes found only by prefix broadening
pub const PREFIX_RELEVANCE: u32 = 1;

/// Relevance of recipes padded in by sustainability
pub const PADDING_RELEVANCE: u32 = 0;

/// Relevance of one recipe against a query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchScore {
    pub relevance: u32,
    pub exact_terms: usize,
    pub partial_terms: usize,
}

/// A recipe under consideration for a result list
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub recipe: &'a Recipe,
    pub relevance: u32,
    /// False for recipes added by broadening rather than matching
    pub matched: bool,
}

/// Score a recipe against normalized query terms
pub fn match_recipe(recipe: &Recipe, terms: &[String], config: &SearchConfig) -> MatchScore {
    if terms.is_empty() {
        return MatchScore::default();
    }

    let name = recipe.name.to_lowercase();
    let mut score = MatchScore::default();

    for term in terms {
        let mut exact = false;
        let mut partial = false;
        let mut fuzzy = false;

        for ingredient in &recipe.ingredients {
            if ingredient == term {
                score.relevance += EXACT_POINTS;
                exact = true;
            } else if ingredient.contains(term.as_str()) || term.contains(ingredient.as_str()) {
                score.relevance += PARTIAL_POINTS;
                partial = true;
            } else if let Some(sim) = similar_above(term, ingredient, config.fuzzy_threshold) {
                score.relevance += (sim * FUZZY_SCALE).round() as u32;
                fuzzy = true;
            }
        }

        if !(exact || partial || fuzzy) && name.contains(term.as_str()) {
            score.relevance += NAME_POINTS;
        }

        if exact {
            score.exact_terms += 1;
        } else if partial {
            score.partial_terms += 1;
        }
    }

    let covered = (score.exact_terms + score.partial_terms) as f64;
    score.relevance += (covered / terms.len() as f64 * COVERAGE_POINTS).round() as u32;

    score
}

/// All recipes with non-zero relevance, in catalog order
pub fn find_matches<'a>(recipes: &'a [Recipe], terms: &[String], config: &SearchConfig) -> Vec<Candidate<'a>> {
    recipes
        .iter()
        .filter_map(|recipe| {
            let score = match_recipe(recipe, terms, config);
            (score.relevance > 0).then_some(Candidate {
                recipe,
                relevance: score.relevance,
                matched: true,
            })
        })
        .collect()
}

/// Recipes with an ingredient word starting with a term's prefix
///
/// Skips recipes already in `existing`. Terms shorter than the prefix
/// length are used whole.
pub fn prefix_matches<'a>(
    recipes: &'a [Recipe],
    terms: &[String],
    existing: &[Candidate<'a>],
    config: &SearchConfig,
) -> Vec<Candidate<'a>> {
    let prefixes: Vec<String> = terms
        .iter()
        .map(|t| t.chars().take(config.prefix_len.max(1)).collect())
        .collect();

    recipes
        .iter()
        .filter(|recipe| !existing.iter().any(|c| c.recipe.id == recipe.id))
        .filter(|recipe| {
            recipe.ingredients.iter().any(|ingredient| {
                ingredient
                    .split_whitespace()
                    .any(|word| prefixes.iter().any(|p| word.starts_with(p.as_str())))
            })
        })
        .map(|recipe| Candidate {
            recipe,
            relevance: PREFIX_RELEVANCE,
            matched: false,
        })
        .collect()
}

/// Highest-sustainability recipes not already in `existing`
///
/// Ordered by index descending, then id ascending.
pub fn sustainable_padding<'a>(
    recipes: &'a [Recipe],
    existing: &[Candidate<'a>],
    count: usize,
) -> Vec<Candidate<'a>> {
    let mut pool: Vec<&Recipe> = recipes
        .iter()
        .filter(|recipe| !existing.iter().any(|c| c.recipe.id == recipe.id))
        .collect();

    pool.sort_by(|a, b| {
        b.sustainability_index
            .total_cmp(&a.sustainability_index)
            .then_with(|| a.id.cmp(&b.id))
    });

    pool.into_iter()
        .take(count)
        .map(|recipe| Candidate {
            recipe,
            relevance: PADDING_RELEVANCE,
            matched: false,
        })
        .collect()
}
