//! Delayed provider implementation - wraps another provider with artificial delay.

use std::time::Duration;

use reply_core::{async_trait, GeneratedResponse, GenerationRequest, ProviderError, ReplyProvider};
use tokio::time::sleep;

/// A provider that wraps another provider and adds artificial delay.
///
/// Useful for keeping an attempt in flight long enough to observe the
/// loading announcer and the busy flag.
pub struct DelayedProvider<P: ReplyProvider> {
    inner: P,
    delay: Duration,
}

impl<P: ReplyProvider> DelayedProvider<P> {
    /// Create a new DelayedProvider wrapping the given provider with the specified delay.
    pub fn new(inner: P, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a provider with a delay in milliseconds.
    pub fn with_millis(inner: P, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// Create a provider with a delay in seconds.
    pub fn with_secs(inner: P, secs: u64) -> Self {
        Self::new(inner, Duration::from_secs(secs))
    }
}

#[async_trait]
impl<P: ReplyProvider> ReplyProvider for DelayedProvider<P> {
    async fn generate(&self, request: GenerationRequest) -> Result<GeneratedResponse, ProviderError> {
        sleep(self.delay).await;
        self.inner.generate(request).await
    }

    fn name(&self) -> &str {
        "DelayedProvider"
    }

    async fn is_ready(&self) -> bool {
        self.inner.is_ready().await
    }
}
