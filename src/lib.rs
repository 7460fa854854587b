//! Recipe Sustainability Scorer
//!
//! Scoring and search-ranking engine for a recipe-choice study.
//!
//! - `recipe` / `classify` / `scorer`: record preparation, category
//!   classification and the composite sustainability index
//! - `data`: catalog loading (JSON or CSV via Polars) with fixture fallback
//! - `search`: ingredient matching, broadening and per-group ranking
//! - `experiment`: test groups, participants and the choice log
//! - `explanation`: rule-based explanations with an optional provider
//! - `api_server` (feature `api`): Axum REST surface

pub mod utils;
pub mod config;
pub mod recipe;
pub mod classify;
pub mod scorer;
pub mod fixtures;
pub mod data;
pub mod search;
pub mod experiment;
pub mod explanation;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use config::{ConfigError, EngineConfig, ExplanationConfig, ScoringConfig, SearchConfig};
pub use recipe::{Category, RawRecipe, Recipe, RecipeError};
pub use classify::classify;
pub use scorer::{ScoreBreakdown, SustainabilityScorer};
pub use data::{Catalog, CatalogSource, PreparationReport};
pub use search::{RankingStrategy, SearchEngine, SearchHit};
pub use experiment::{ChoiceLog, ChoiceRecord, ChoiceSource, Participant, RecipeView, TestGroup};
pub use explanation::{
    Explanation, ExplanationGenerator, ExplanationProvider, ExplanationService, FakeProvider,
    JsonFormatter, MarkdownFormatter, ProviderError,
};
pub use utils::{evaluate, environmental_label, normalize_ingredients, normalize_query};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
