//! The ReplyProvider trait definition.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::{GeneratedResponse, GenerationRequest};

/// A service that turns a conversation excerpt into reply suggestions.
///
/// Implementations can range from canned test doubles to full model
/// backends. This trait is object-safe and can be used with
/// `Box<dyn ReplyProvider>`.
#[async_trait]
pub trait ReplyProvider: Send + Sync {
    /// Generate replies and a context analysis for one request.
    ///
    /// Exactly one of `request.text` (non-empty) or `request.image` is
    /// meaningful; the other carries the empty sentinel.
    async fn generate(&self, request: GenerationRequest)
        -> Result<GeneratedResponse, ProviderError>;

    /// Get a human-readable name for this provider.
    fn name(&self) -> &str;

    /// Check if the provider is ready to accept requests.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}

#[async_trait]
impl<P: ReplyProvider + ?Sized> ReplyProvider for std::sync::Arc<P> {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GeneratedResponse, ProviderError> {
        (**self).generate(request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    async fn is_ready(&self) -> bool {
        (**self).is_ready().await
    }
}

#[async_trait]
impl<P: ReplyProvider + ?Sized> ReplyProvider for Box<P> {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GeneratedResponse, ProviderError> {
        (**self).generate(request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    async fn is_ready(&self) -> bool {
        (**self).is_ready().await
    }
}
