//! Recording provider implementation - remembers every request it sees.

use std::sync::Arc;

use reply_core::{async_trait, GeneratedResponse, GenerationRequest, ProviderError, ReplyProvider};
use tokio::sync::Mutex;

/// A provider that records requests before delegating to an inner provider.
///
/// Cloning shares the recorded log, so a test can keep one handle while
/// the orchestrator owns another.
pub struct RecordingProvider<P: ReplyProvider> {
    inner: Arc<P>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl<P: ReplyProvider> Clone for RecordingProvider<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            requests: Arc::clone(&self.requests),
        }
    }
}

impl<P: ReplyProvider> RecordingProvider<P> {
    /// Wrap `inner`, starting with an empty log.
    pub fn new(inner: P) -> Self {
        Self {
            inner: Arc::new(inner),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of requests received so far.
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// Snapshot of every request received so far, oldest first.
    pub async fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().await.clone()
    }

    /// The most recent request, if any.
    pub async fn last_request(&self) -> Option<GenerationRequest> {
        self.requests.lock().await.last().cloned()
    }
}

#[async_trait]
impl<P: ReplyProvider> ReplyProvider for RecordingProvider<P> {
    async fn generate(&self, request: GenerationRequest) -> Result<GeneratedResponse, ProviderError> {
        self.requests.lock().await.push(request.clone());
        self.inner.generate(request).await
    }

    fn name(&self) -> &str {
        "RecordingProvider"
    }

    async fn is_ready(&self) -> bool {
        self.inner.is_ready().await
    }
}
