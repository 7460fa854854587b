use crate::config::ExplanationConfig;
use crate::explanation::cache::CacheStats;
use crate::explanation::generator::ExplanationGenerator;
use crate::explanation::prompt::{build_prompt, parse_response};
use crate::explanation::provider::ExplanationProvider;
use crate::explanation::retry::retry_with_backoff;
use crate::explanation::types::Explanation;
use crate::recipe::Recipe;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Explanation entry point: cache, then provider (if enabled), then rules
///
/// Provider failures of any kind end in the rule-based explanation, so a
/// caller always gets a complete explanation. The generator lock is only
/// held for cache access, never across a provider call, so one slow
/// provider request does not stall explanations that are already cached.
#[derive(Debug)]
pub struct ExplanationService {
    generator: Mutex<ExplanationGenerator>,
    provider: Option<Arc<dyn ExplanationProvider>>,
    policy: ExplanationConfig,
}

impl ExplanationService {
    pub fn new(generator: ExplanationGenerator, policy: ExplanationConfig) -> Self {
        Self {
            generator: Mutex::new(generator),
            provider: None,
            policy,
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn ExplanationProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.generator.lock().await.cache().stats()
    }

    /// Explanation for a recipe, cached per recipe id
    ///
    /// Concurrent misses for the same recipe may both compute; the first
    /// one cached wins and later results are discarded.
    pub async fn explain(&self, recipe: &Recipe) -> Explanation {
        if let Some(cached) = self.generator.lock().await.cache_mut().lookup(recipe.id) {
            return cached.clone();
        }

        let from_provider = self.from_provider(recipe).await;

        let mut generator = self.generator.lock().await;
        if let Some(existing) = generator.cache().peek(recipe.id) {
            return existing.clone();
        }
        let explanation = match from_provider {
            Some(explanation) => explanation,
            None => generator.generate(recipe),
        };
        generator.cache_mut().insert(explanation.clone());
        explanation
    }

    async fn from_provider(&self, recipe: &Recipe) -> Option<Explanation> {
        if !self.policy.provider_enabled {
            return None;
        }
        let provider = self.provider.as_ref()?;

        let prompt = build_prompt(recipe);
        let recipe_id = recipe.id;
        let result = retry_with_backoff(&self.policy, |_attempt| {
            let provider = Arc::clone(provider);
            let prompt = prompt.clone();
            async move {
                let text = provider.complete(&prompt).await?;
                parse_response(&text, recipe_id, provider.provider_name())
            }
        })
        .await;

        match result {
            Ok(explanation) => {
                tracing::info!("Provider '{}' explained recipe {}", provider.provider_name(), recipe_id);
                Some(explanation)
            }
            Err(e) => {
                tracing::warn!("Falling back to rule-based explanation for recipe {}: {}", recipe_id, e);
                None
            }
        }
    }
}
