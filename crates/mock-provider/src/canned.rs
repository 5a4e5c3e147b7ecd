//! Canned provider implementation - returns a fixed response.

use reply_core::{
    async_trait, AnalysisResult, GeneratedResponse, GenerationRequest, ProviderError,
    ReplyOption, ReplyProvider, ReplyStyle,
};

/// A three-reply response covering every reply style.
pub fn sample_response() -> GeneratedResponse {
    GeneratedResponse {
        analysis: AnalysisResult::new(
            "Early talking stage",
            "Testing your interest",
            "Match their energy and ask something back.",
        ),
        replies: vec![
            ReplyOption::new("safe-1", "Haha fair enough, what are you up to this weekend?", ReplyStyle::Safe),
            ReplyOption::new("balanced-1", "Only if you promise to pick the place this time 😏", ReplyStyle::Balanced),
            ReplyOption::new("bold-1", "Say less. Friday, 8pm, you're buying dessert.", ReplyStyle::Bold),
        ],
    }
}

/// A provider that answers every request with the same response.
///
/// Useful for testing the lifecycle without any model calls.
#[derive(Debug, Clone)]
pub struct CannedProvider {
    response: GeneratedResponse,
}

impl CannedProvider {
    /// Create a provider that always returns `response`.
    pub fn new(response: GeneratedResponse) -> Self {
        Self { response }
    }

    /// Create a provider that returns [`sample_response`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use mock_provider::CannedProvider;
    ///
    /// let provider = CannedProvider::sample();
    /// assert_eq!(provider.response().replies.len(), 3);
    /// ```
    pub fn sample() -> Self {
        Self::new(sample_response())
    }

    /// The response this provider hands out.
    pub fn response(&self) -> &GeneratedResponse {
        &self.response
    }
}

impl Default for CannedProvider {
    fn default() -> Self {
        Self::sample()
    }
}

#[async_trait]
impl ReplyProvider for CannedProvider {
    async fn generate(&self, _request: GenerationRequest) -> Result<GeneratedResponse, ProviderError> {
        Ok(self.response.clone())
    }

    fn name(&self) -> &str {
        "CannedProvider"
    }
}
