//! Gemini-based reply provider.
//!
//! This crate provides a [`ReplyProvider`] that sends the user's chat
//! excerpt (pasted text or a screenshot) to Google's Gemini
//! `generateContent` endpoint and parses the JSON reply suggestions it
//! returns.
//!
//! # Features
//!
//! - Text and screenshot (inline image) requests
//! - JSON output mode with a built-in persona prompt
//! - Optional system prompt override via env var or prompt file
//! - Configurable via environment variables
//!
//! # Usage
//!
//! ```rust,no_run
//! use gemini_provider::{GeminiProvider, GenerationOptions, GenerationRequest, ReplyProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GeminiProvider::from_env()?;
//!     let request = GenerationRequest::from_text("wyd this weekend?", GenerationOptions::default());
//!     let response = provider.generate(request).await?;
//!     println!("{}", response.analysis.advice);
//!     Ok(())
//! }
//! ```

mod api_types;
mod config;
mod prompt;
mod provider;

pub use config::{GeminiProviderConfig, GeminiProviderConfigBuilder, DEFAULT_MODEL, DEFAULT_PROMPT_FILE};
pub use prompt::DEFAULT_SYSTEM_PROMPT;
pub use provider::GeminiProvider;

// Re-export reply-core types for convenience
pub use reply_core::{
    async_trait, GeneratedResponse, GenerationOptions, GenerationRequest, ImagePayload,
    ProviderError, ReplyProvider,
};
