//! Mock reply providers for exercising the generation lifecycle.
//!
//! This crate provides implementations of the `ReplyProvider` trait for testing:
//! - `CannedProvider` - Always returns the same response
//! - `FailingProvider` - Always fails with the same error
//! - `DelayedProvider` - Wraps another provider with artificial delay
//! - `RecordingProvider` - Wraps another provider and records every request
//!
//! For real generation, use the `gemini-provider` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_provider::{CannedProvider, GenerationOptions, GenerationRequest, ReplyProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_provider::ProviderError> {
//!     let provider = CannedProvider::sample();
//!
//!     let request = GenerationRequest::from_text("u up?", GenerationOptions::default());
//!
//!     let response = provider.generate(request).await?;
//!     println!("First reply: {}", response.replies[0].text);
//!     Ok(())
//! }
//! ```

mod canned;
mod delayed;
mod failing;
mod recording;

// Re-export reply-core types for convenience
pub use reply_core::{
    async_trait, AnalysisResult, GeneratedResponse, GenerationOptions, GenerationRequest,
    ProviderError, ReplyOption, ReplyProvider, ReplyStyle,
};

pub use canned::{sample_response, CannedProvider};
pub use delayed::DelayedProvider;
pub use failing::FailingProvider;
pub use recording::RecordingProvider;
