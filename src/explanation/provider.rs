//! External explanation provider abstraction.
//!
//! A provider takes a prompt and returns raw text, expected to be the JSON
//! document described in `prompt`. Network providers live outside this
//! crate; `FakeProvider` serves tests and offline runs.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;

/// Error type for provider calls
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Provider returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Attempt timed out after {0} ms")]
    Timeout(u64),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl ProviderError {
    /// Configuration problems are not worth retrying
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ProviderError::NotConfigured(_))
    }
}

#[async_trait]
pub trait ExplanationProvider: Send + Sync + fmt::Debug {
    /// Send a prompt and get the raw text response
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Short identifier recorded in the explanation source
    fn provider_name(&self) -> &'static str;
}

/// Scripted provider for tests
///
/// Replies are consumed in order; once the script runs out, every call
/// returns the fallback reply (an error unless set).
#[derive(Debug)]
pub struct FakeProvider {
    script: Mutex<VecDeque<Result<String, ProviderError>>>,
    fallback: Result<String, ProviderError>,
    delay: Option<Duration>,
    calls: Mutex<usize>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Err(ProviderError::NotConfigured("no scripted reply".to_string())),
            delay: None,
            calls: Mutex::new(0),
        }
    }
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer with `response`
    pub fn always(response: &str) -> Self {
        Self {
            fallback: Ok(response.to_string()),
            ..Self::default()
        }
    }

    /// Always fail with `error`
    pub fn failing(error: ProviderError) -> Self {
        Self {
            fallback: Err(error),
            ..Self::default()
        }
    }

    pub fn with_script(replies: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            script: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    /// Sleep before each reply (to exercise timeouts)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn calls(&self) -> usize {
        *self.calls.lock().await
    }
}

#[async_trait]
impl ExplanationProvider for FakeProvider {
    async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
        *self.calls.lock().await += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = self.script.lock().await.pop_front();
        scripted.unwrap_or_else(|| self.fallback.clone())
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_then_fallback() {
        let provider = FakeProvider::with_script(vec![
            Err(ProviderError::ApiError { status: 503, message: "busy".to_string() }),
            Ok("{}".to_string()),
        ]);

        assert!(provider.complete("p").await.is_err());
        assert_eq!(provider.complete("p").await, Ok("{}".to_string()));
        assert!(matches!(
            provider.complete("p").await,
            Err(ProviderError::NotConfigured(_))
        ));
        assert_eq!(provider.calls().await, 3);
    }

    #[test]
    fn test_retryable() {
        assert!(ProviderError::Timeout(10).is_retryable());
        assert!(ProviderError::ParseError("x".to_string()).is_retryable());
        assert!(!ProviderError::NotConfigured("x".to_string()).is_retryable());
    }
}
