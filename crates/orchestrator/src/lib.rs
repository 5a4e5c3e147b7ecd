//! Generation orchestrator for message reply suggestions.
//!
//! This crate provides the [`Orchestrator`] type which runs one generation
//! attempt at a time against a [`ReplyProvider`]: it validates the active
//! input, gates on credits, dispatches, and settles the outcome into the
//! state a renderer reads.
//!
//! # Features
//!
//! - Text or screenshot input, with the inactive payload kept across mode switches
//! - Free-use credits, charged only after a successful generation
//! - Upgrade offer when credits run out, premium upgrade in one call
//! - Cycling loading status while a request is in flight
//! - Busy guard: a second trigger during a generation is rejected
//!
//! # Architecture
//!
//! ```text
//! generate()
//!     ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ORCHESTRATOR                           │
//! │                                                             │
//! │  1. Reject if busy, clear last error                        │
//! │         ↓                                                   │
//! │  2. Validate active input ──fail──→ error message, Idle     │
//! │         ↓                                                   │
//! │  3. Credit gate ──blocked──→ upgrade offer, Idle            │
//! │         ↓                                                   │
//! │  4. Hide last result, start loading announcer               │
//! │         ↓                                                   │
//! │  5. Provider call (Generating)                              │
//! │         ↓                                                   │
//! │  6. Stop announcer, then:                                   │
//! │     • ok   → charge one credit, store result (Succeeded)    │
//! │     • fail → store user-facing message (Failed)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use orchestrator::{GenerationOutcome, LoggingListener, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = Orchestrator::from_env(LoggingListener)?;
//!     orchestrator.set_text("wyd this weekend?");
//!
//!     match orchestrator.generate().await? {
//!         GenerationOutcome::Generated(response) => {
//!             for reply in &response.replies {
//!                 println!("[{}] {}", reply.style, reply.text);
//!             }
//!         }
//!         GenerationOutcome::UpgradeRequired => println!("Out of credits"),
//!     }
//!     Ok(())
//! }
//! ```

mod announcer;
mod config;
mod credits;
mod error;
mod input;
mod listener;
mod orchestrator;
mod presentation;

// Public exports
pub use announcer::{AnnouncerGuard, LoadingAnnouncer};
pub use config::{
    SessionConfig, SessionConfigBuilder, DEFAULT_LOADING_INTERVAL, DEFAULT_LOADING_MESSAGES,
};
pub use credits::{CreditGate, UserCredits, DEFAULT_INITIAL_CREDITS, PREMIUM_CREDITS};
pub use error::{OrchestratorError, ValidationError, GENERIC_ERROR_MESSAGE};
pub use input::{GenerationInput, InputModel, OptionsModel};
pub use listener::{GenerationListener, LoggingListener, NoOpListener};
pub use orchestrator::{GenerationOutcome, Orchestrator, Phase, SessionSnapshot};
pub use presentation::PresentationState;

// Re-export commonly used types from dependencies
pub use gemini_provider::{GeminiProvider, GeminiProviderConfig};
pub use reply_core::{
    GeneratedResponse, GenerationOptions, GenerationRequest, ImagePayload, InputMode, Language,
    ProviderError, ReplyOption, ReplyProvider, ReplyStyle, TextStyle, Tone,
};
