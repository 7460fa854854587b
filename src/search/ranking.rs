//! Per-group ordering of a bounded candidate set
//!
//! Ranking never adds or removes candidates; it only orders them.

use super::matcher::Candidate;
use crate::config::SearchConfig;
use crate::experiment::TestGroup;
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;

/// Ordering strategy for a test group
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RankingStrategy {
    /// Group A: uniform random order
    Shuffle,
    /// Group B: weighted blend of normalized relevance and sustainability
    Blended {
        relevance_weight: f64,
        sustainability_weight: f64,
    },
    /// Group C: sustainability index first
    SustainabilityFirst,
}

impl RankingStrategy {
    pub fn for_group(group: TestGroup, config: &SearchConfig) -> Self {
        match group {
            TestGroup::A => RankingStrategy::Shuffle,
            TestGroup::B => RankingStrategy::Blended {
                relevance_weight: config.relevance_weight,
                sustainability_weight: config.sustainability_weight,
            },
            TestGroup::C => RankingStrategy::SustainabilityFirst,
        }
    }

    /// Order candidates in place
    ///
    /// Only `Shuffle` consumes randomness; the other strategies are fully
    /// deterministic with id as the final tie-break.
    pub fn rank<R: Rng + ?Sized>(&self, candidates: &mut [Candidate<'_>], rng: &mut R) {
        match *self {
            RankingStrategy::Shuffle => candidates.shuffle(rng),
            RankingStrategy::Blended {
                relevance_weight,
                sustainability_weight,
            } => {
                let max_relevance = candidates.iter().map(|c| c.relevance).max().unwrap_or(0);
                let blend = |c: &Candidate<'_>| {
                    blended_score(c, max_relevance, relevance_weight, sustainability_weight)
                };
                candidates.sort_by(|a, b| {
                    blend(b)
                        .total_cmp(&blend(a))
                        .then_with(|| b.relevance.cmp(&a.relevance))
                        .then_with(|| a.recipe.id.cmp(&b.recipe.id))
                });
            }
            RankingStrategy::SustainabilityFirst => candidates.sort_by(sustainability_first),
        }
    }
}

/// Relevance scaled to 0-100 against the best candidate, blended with the index
pub fn blended_score(
    candidate: &Candidate<'_>,
    max_relevance: u32,
    relevance_weight: f64,
    sustainability_weight: f64,
) -> f64 {
    let normalized = if max_relevance == 0 {
        0.0
    } else {
        f64::from(candidate.relevance) / f64::from(max_relevance) * 100.0
    };
    relevance_weight * normalized + sustainability_weight * candidate.recipe.sustainability_index
}

/// Index desc, relevance desc, env asc, id asc
fn sustainability_first(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    b.recipe
        .sustainability_index
        .total_cmp(&a.recipe.sustainability_index)
        .then_with(|| b.relevance.cmp(&a.relevance))
        .then_with(|| a.recipe.env_score.total_cmp(&b.recipe.env_score))
        .then_with(|| a.recipe.id.cmp(&b.recipe.id))
}
