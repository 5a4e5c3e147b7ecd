//! Session configuration.

use std::time::Duration;

use crate::credits::DEFAULT_INITIAL_CREDITS;

/// How often the loading status advances.
pub const DEFAULT_LOADING_INTERVAL: Duration = Duration::from_millis(1500);

/// Status lines cycled while a generation is in flight.
pub const DEFAULT_LOADING_MESSAGES: [&str; 5] = [
    "Reading the vibe...",
    "Analyzing the context...",
    "Decoding their intent...",
    "Crafting the perfect replies...",
    "Adding a little charm...",
];

/// Configuration for one orchestrator session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Free generations at session start.
    pub initial_credits: u32,
    /// Time between loading status changes.
    pub loading_interval: Duration,
    /// Loading status lines, in order. Never empty.
    pub loading_messages: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_credits: DEFAULT_INITIAL_CREDITS,
            loading_interval: DEFAULT_LOADING_INTERVAL,
            loading_messages: default_loading_messages(),
        }
    }
}

impl SessionConfig {
    /// Create from environment variables.
    ///
    /// Environment variables:
    /// - `SWAY_INITIAL_CREDITS` - Free generations (default: 5)
    /// - `SWAY_LOADING_INTERVAL_MS` - Loading status interval (default: 1500)
    /// - `SWAY_LOADING_MESSAGES` - `|`-separated status lines
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let initial_credits = std::env::var("SWAY_INITIAL_CREDITS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.initial_credits);

        let loading_interval = std::env::var("SWAY_LOADING_INTERVAL_MS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.loading_interval);

        let loading_messages = std::env::var("SWAY_LOADING_MESSAGES")
            .ok()
            .map(|v| parse_messages(&v))
            .filter(|messages| !messages.is_empty())
            .unwrap_or(defaults.loading_messages);

        Self {
            initial_credits,
            loading_interval,
            loading_messages,
        }
    }

    /// Create a new config builder.
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }
}

fn default_loading_messages() -> Vec<String> {
    DEFAULT_LOADING_MESSAGES.iter().map(|s| s.to_string()).collect()
}

fn parse_messages(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builder for SessionConfig.
#[derive(Debug, Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    pub fn initial_credits(mut self, credits: u32) -> Self {
        self.config.initial_credits = credits;
        self
    }

    /// Zero intervals are ignored.
    pub fn loading_interval(mut self, interval: Duration) -> Self {
        if !interval.is_zero() {
            self.config.loading_interval = interval;
        }
        self
    }

    /// An empty list keeps the current messages.
    pub fn loading_messages<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let messages: Vec<String> = messages.into_iter().map(Into::into).collect();
        if !messages.is_empty() {
            self.config.loading_messages = messages;
        }
        self
    }

    pub fn build(self) -> SessionConfig {
        self.config
    }
}
