//! Score explanations
//!
//! Rule-based generation from static lookup tables, with an optional
//! external provider tried first when enabled. Provider output goes through
//! strict parsing; any failure falls back to the rule-based explanation.

pub mod types;
pub mod lookup_tables;
pub mod cache;
pub mod generator;
pub mod provider;
pub mod retry;
pub mod prompt;
pub mod service;
pub mod formatters;

pub use types::{Explanation, ExplanationSource, Factor, Impact};
pub use cache::{CacheStats, ExplanationCache};
pub use generator::{ExplanationGenerator, MAX_SUGGESTIONS};
pub use provider::{ExplanationProvider, FakeProvider, ProviderError};
pub use retry::retry_with_backoff;
pub use prompt::{build_prompt, parse_response};
pub use service::ExplanationService;
pub use formatters::{JsonFormatter, MarkdownFormatter};
