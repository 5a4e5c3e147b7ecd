//! Core trait and types for reply-suggestion providers.
//!
//! This crate provides the shared interface between the generation
//! orchestrator and the services that actually write replies. It defines:
//!
//! - [`ReplyProvider`] - The trait that every generation backend implements
//! - [`GenerationRequest`] / [`GeneratedResponse`] - Request and response types
//! - [`GenerationOptions`] with [`Tone`], [`Language`] and [`TextStyle`]
//! - [`ImagePayload`] - A decoded chat screenshot
//! - [`ProviderError`] - Error types for provider operations
//!
//! # Example
//!
//! ```rust
//! use reply_core::{
//!     AnalysisResult, GeneratedResponse, GenerationRequest, ProviderError, ReplyOption,
//!     ReplyProvider, ReplyStyle,
//! };
//! use async_trait::async_trait;
//!
//! struct PoliteProvider;
//!
//! #[async_trait]
//! impl ReplyProvider for PoliteProvider {
//!     async fn generate(&self, _request: GenerationRequest) -> Result<GeneratedResponse, ProviderError> {
//!         Ok(GeneratedResponse {
//!             analysis: AnalysisResult::new("Opening", "Small talk", "Keep it light."),
//!             replies: vec![ReplyOption::new("1", "Hey! How was your day?", ReplyStyle::Safe)],
//!         })
//!     }
//!
//!     fn name(&self) -> &str {
//!         "PoliteProvider"
//!     }
//! }
//! ```

mod error;
mod image;
mod prompt;
mod trait_def;
mod types;

pub use error::ProviderError;
pub use image::{ImageError, ImagePayload};
pub use prompt::hash_prompt;
pub use trait_def::ReplyProvider;
pub use types::{
    AnalysisResult, GeneratedResponse, GenerationOptions, GenerationRequest, InputMode, Language,
    ParseOptionError, ReplyOption, ReplyStyle, TextStyle, Tone,
};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
