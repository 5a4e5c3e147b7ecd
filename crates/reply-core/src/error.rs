//! Error types for provider operations.

use thiserror::Error;

/// Errors that can occur while a provider generates replies.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider is temporarily unavailable.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The request never reached the provider, or the connection dropped.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The provider answered, but the body was not a usable response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The provider is misconfigured (missing key, bad URL, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The provider failed without saying why.
    #[error("unknown provider failure")]
    Unknown,
}

impl ProviderError {
    /// The human-readable message attached to this failure, if any.
    ///
    /// Blank messages are treated as absent so callers can substitute
    /// their own fallback text.
    pub fn user_message(&self) -> Option<&str> {
        let message = match self {
            Self::Unavailable(msg)
            | Self::Network(msg)
            | Self::InvalidResponse(msg)
            | Self::Configuration(msg) => msg.as_str(),
            Self::Api { message, .. } => message.as_str(),
            Self::Unknown => return None,
        };

        let trimmed = message.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}
