use crate::config::ExplanationConfig;
use crate::explanation::provider::ProviderError;
use std::future::Future;
use tokio::time::{sleep, timeout};

/// Run `operation` with a hard per-attempt timeout and exponential backoff
///
/// `operation` receives the 1-based attempt number. Stops early on a
/// non-retryable error. Returns the last error once attempts run out.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &ExplanationConfig,
    mut operation: F,
) -> Result<T, ProviderError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let error = match timeout(policy.attempt_timeout(), operation(attempt)).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(e)) => e,
            Err(_) => ProviderError::Timeout(policy.attempt_timeout_ms),
        };

        if !error.is_retryable() || attempt >= max_attempts {
            tracing::warn!("Explanation provider gave up after attempt {}/{}: {}", attempt, max_attempts, error);
            return Err(error);
        }

        let delay = policy.backoff_delay(attempt);
        tracing::warn!(
            "Explanation provider attempt {}/{} failed ({}) - retrying after {}ms",
            attempt,
            max_attempts,
            error,
            delay.as_millis()
        );
        sleep(delay).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn policy(max_attempts: u32) -> ExplanationConfig {
        ExplanationConfig {
            provider_enabled: true,
            max_attempts,
            base_delay_ms: 1,
            backoff_multiplier: 2.0,
            attempt_timeout_ms: 50,
        }
    }

    #[tokio::test]
    async fn test_succeeds_after_failures() {
        let calls = AtomicU32::new(0);
        let result = retry_with_backoff(&policy(3), |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 3 {
                    Err(ProviderError::RequestFailed("flaky".to_string()))
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_bounded_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = retry_with_backoff(&policy(2), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(ProviderError::ParseError("bad json".to_string())) }
        })
        .await;

        assert_eq!(result, Err(ProviderError::ParseError("bad json".to_string())));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_timeout_per_attempt() {
        let result: Result<(), _> = retry_with_backoff(&policy(2), |_| async {
            sleep(Duration::from_millis(500)).await;
            Ok(())
        })
        .await;

        assert_eq!(result, Err(ProviderError::Timeout(50)));
    }

    #[tokio::test]
    async fn test_not_configured_stops_immediately() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = retry_with_backoff(&policy(5), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(ProviderError::NotConfigured("no key".to_string())) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
