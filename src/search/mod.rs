//! Search & Ranking Engine
//!
//! query → normalized terms → matching → broadening (prefix, then
//! sustainability padding) → bounded candidate set → per-group ordering.
//!
//! The candidate set is chosen by relevance alone, before any group-specific
//! ordering, so every group sees the same recipes for the same query.

pub mod matcher;
pub mod ranking;

pub use matcher::{match_recipe, Candidate, MatchScore};
pub use ranking::RankingStrategy;

use crate::config::SearchConfig;
use crate::experiment::TestGroup;
use crate::recipe::Recipe;
use crate::utils::normalization::normalize_query;
use rand::Rng;
use serde::Serialize;
use std::time::Instant;

/// One ranked search result
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    pub recipe: &'a Recipe,
    pub relevance: u32,
    /// 1-based position in the ranked list
    pub rank: usize,
    /// False when the recipe was added by broadening
    pub matched: bool,
}

/// Search engine over a prepared catalog
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Ranked results for `query` as seen by `group`
    ///
    /// Returns nothing for an empty catalog or a query with no usable terms.
    /// Otherwise returns between `min(min_results, catalog size)` and
    /// `max_results` hits.
    pub fn search<'a, R: Rng + ?Sized>(
        &self,
        recipes: &'a [Recipe],
        query: &str,
        group: TestGroup,
        rng: &mut R,
    ) -> Vec<SearchHit<'a>> {
        let start = Instant::now();
        let candidates = self.candidates(recipes, query);
        if candidates.is_empty() {
            tracing::debug!(query, "search produced no candidates");
            return Vec::new();
        }

        let mut candidates = candidates;
        RankingStrategy::for_group(group, &self.config).rank(&mut candidates, rng);

        let hits: Vec<SearchHit<'a>> = candidates
            .into_iter()
            .enumerate()
            .map(|(i, c)| SearchHit {
                recipe: c.recipe,
                relevance: c.relevance,
                rank: i + 1,
                matched: c.matched,
            })
            .collect();

        tracing::debug!(
            query,
            group = %group,
            results = hits.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "search complete"
        );
        hits
    }

    /// Bounded, group-independent candidate set
    ///
    /// Broadening runs only while fewer than `min_results` recipes matched.
    /// When more than `max_results` qualify, the most relevant are kept
    /// (ties by ascending id). A query with at least two letters or digits
    /// but no usable term (e.g. `"a b"`) goes straight to padding.
    pub fn candidates<'a>(&self, recipes: &'a [Recipe], query: &str) -> Vec<Candidate<'a>> {
        if recipes.is_empty() {
            return Vec::new();
        }
        let terms = normalize_query(query, self.config.min_term_len);
        if terms.is_empty() && query.chars().filter(|c| c.is_alphanumeric()).count() < 2 {
            return Vec::new();
        }

        let mut candidates = if terms.is_empty() {
            Vec::new()
        } else {
            matcher::find_matches(recipes, &terms, &self.config)
        };

        if !terms.is_empty() && candidates.len() < self.config.min_results {
            let extra = matcher::prefix_matches(recipes, &terms, &candidates, &self.config);
            tracing::debug!(query, added = extra.len(), "prefix broadening");
            candidates.extend(extra);
        }

        if candidates.len() < self.config.min_results {
            let missing = self.config.min_results - candidates.len();
            let padding = matcher::sustainable_padding(recipes, &candidates, missing);
            tracing::debug!(query, added = padding.len(), "sustainability padding");
            candidates.extend(padding);
        }

        candidates.sort_by(|a, b| {
            b.relevance
                .cmp(&a.relevance)
                .then_with(|| a.recipe.id.cmp(&b.recipe.id))
        });
        candidates.truncate(self.config.max_results);
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Catalog;
    use crate::scorer::SustainabilityScorer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog() -> Catalog {
        Catalog::fixture(&SustainabilityScorer::default()).0
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let catalog = catalog();
        let engine = SearchEngine::default();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(engine.search(catalog.recipes(), "   ", TestGroup::B, &mut rng).is_empty());
        assert!(engine.search(catalog.recipes(), "a , ;", TestGroup::B, &mut rng).is_empty());
    }

    #[test]
    fn test_short_tokens_fall_back_to_padding() {
        let catalog = catalog();
        let engine = SearchEngine::default();
        let hits = engine.search(catalog.recipes(), "a b", TestGroup::C, &mut StdRng::seed_from_u64(0));
        assert_eq!(hits.len(), engine.config().min_results);
        assert!(hits.iter().all(|h| !h.matched));
        // green smoothie (87.0) then lentil soup (86.8)
        assert_eq!(hits[0].recipe.id, 7);
        assert_eq!(hits[1].recipe.id, 1);
    }

    #[test]
    fn test_empty_catalog_returns_nothing() {
        let engine = SearchEngine::default();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(engine.search(&[], "hagyma", TestGroup::C, &mut rng).is_empty());
    }

    #[test]
    fn test_ranks_are_one_based_and_contiguous() {
        let catalog = catalog();
        let engine = SearchEngine::default();
        let hits = engine.search(catalog.recipes(), "hagyma", TestGroup::C, &mut StdRng::seed_from_u64(3));
        let ranks: Vec<usize> = hits.iter().map(|h| h.rank).collect();
        assert_eq!(ranks, (1..=hits.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_bounded_by_max_results() {
        let catalog = catalog();
        let config = SearchConfig {
            max_results: 3,
            min_results: 2,
            ..SearchConfig::default()
        };
        let engine = SearchEngine::new(config);
        let hits = engine.search(catalog.recipes(), "hagyma paradicsom", TestGroup::B, &mut StdRng::seed_from_u64(3));
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_padding_reaches_minimum() {
        let catalog = catalog();
        let engine = SearchEngine::default();
        let hits = engine.search(catalog.recipes(), "xylofon", TestGroup::C, &mut StdRng::seed_from_u64(3));
        assert_eq!(hits.len(), engine.config().min_results);
        assert!(hits.iter().all(|h| !h.matched));
    }
}
