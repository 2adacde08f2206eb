//! Retrying wrapper for configuration storage.

use async_trait::async_trait;
use jobdef_core::{ConfigurationStorage, Document, Result, RetryPolicy};
use tracing::warn;

/// Retries transient failures of an inner storage according to a [`RetryPolicy`].
///
/// Only errors reporting [`is_retryable`](jobdef_core::Error::is_retryable) are retried.
pub struct RetryingStorage<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S: ConfigurationStorage> RetryingStorage<S> {
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

#[async_trait]
impl<S: ConfigurationStorage> ConfigurationStorage for RetryingStorage<S> {
    async fn fetch_configuration(&self, component_id: &str, config_id: &str) -> Result<Document> {
        let mut attempt = 1;
        loop {
            match self.inner.fetch_configuration(component_id, config_id).await {
                Err(err) if err.is_retryable() && attempt < self.policy.max_attempts => {
                    let delay = self.policy.delay_for(attempt);
                    warn!(
                        component_id,
                        config_id,
                        attempt,
                        ?delay,
                        error = %err,
                        "configuration fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
