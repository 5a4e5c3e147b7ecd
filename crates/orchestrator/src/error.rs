//! Error types for orchestrator operations.

use reply_core::ProviderError;
use thiserror::Error;

/// Shown when a provider fails without a usable message.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// The active input mode has nothing to submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// TEXT mode with blank text.
    #[error("Please paste a text message first.")]
    MissingText,

    /// IMAGE mode with no screenshot.
    #[error("Please upload a screenshot first.")]
    MissingImage,
}

/// Errors that can end a generation attempt.
///
/// Running out of credits is not an error; see
/// [`GenerationOutcome::UpgradeRequired`](crate::GenerationOutcome::UpgradeRequired).
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Input was missing; nothing was dispatched.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The provider failed. `message` is what the user sees.
    #[error("{message}")]
    Provider {
        message: String,
        #[source]
        source: ProviderError,
    },

    /// Another attempt is still in flight.
    #[error("a generation is already in progress")]
    Busy,
}

impl OrchestratorError {
    /// Wrap a provider failure, picking the user-facing message.
    pub fn provider(source: ProviderError) -> Self {
        let message = source
            .user_message()
            .unwrap_or(GENERIC_ERROR_MESSAGE)
            .to_string();
        Self::Provider { message, source }
    }
}
