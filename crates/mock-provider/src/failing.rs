//! Failing provider implementation - always errors.

use reply_core::{async_trait, GeneratedResponse, GenerationRequest, ProviderError, ReplyProvider};

/// What kind of failure to produce.
#[derive(Debug, Clone)]
enum Failure {
    Message(String),
    Silent,
}

/// A provider that fails every request.
///
/// Useful for testing error surfacing and the no-charge-on-failure path.
#[derive(Debug, Clone)]
pub struct FailingProvider {
    failure: Failure,
}

impl FailingProvider {
    /// Fail with `ProviderError::Unavailable(message)`.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            failure: Failure::Message(message.into()),
        }
    }

    /// Fail with `ProviderError::Unknown`, which carries no message.
    pub fn silent() -> Self {
        Self {
            failure: Failure::Silent,
        }
    }
}

#[async_trait]
impl ReplyProvider for FailingProvider {
    async fn generate(&self, _request: GenerationRequest) -> Result<GeneratedResponse, ProviderError> {
        match &self.failure {
            Failure::Message(message) => Err(ProviderError::Unavailable(message.clone())),
            Failure::Silent => Err(ProviderError::Unknown),
        }
    }

    fn name(&self) -> &str {
        "FailingProvider"
    }
}
