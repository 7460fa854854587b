use crate::explanation::types::Explanation;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Per-recipe explanation cache
///
/// Owned by the generator instance. Recipes are immutable after catalog
/// preparation, so entries never go stale and are never invalidated.
#[derive(Debug, Clone, Default)]
pub struct ExplanationCache {
    entries: FxHashMap<u64, Explanation>,
    hits: u64,
    misses: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl ExplanationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached explanation, counting the hit or miss
    pub fn lookup(&mut self, recipe_id: u64) -> Option<&Explanation> {
        match self.entries.get(&recipe_id) {
            Some(explanation) => {
                self.hits += 1;
                Some(explanation)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Cached explanation without touching the counters
    pub fn peek(&self, recipe_id: u64) -> Option<&Explanation> {
        self.entries.get(&recipe_id)
    }

    pub fn insert(&mut self, explanation: Explanation) {
        self.entries.insert(explanation.recipe_id, explanation);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}
