//! Configuration for GeminiProvider.

use reply_core::ProviderError;
use std::env;
use std::path::Path;
use std::time::Duration;

/// Default system prompt file name.
pub const DEFAULT_PROMPT_FILE: &str = "SYSTEM_PROMPT.md";

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration for GeminiProvider.
#[derive(Debug, Clone)]
pub struct GeminiProviderConfig {
    /// Gemini API base URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Optional system prompt. The built-in persona prompt is used when unset.
    pub system_prompt: Option<String>,

    /// Maximum output tokens.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// HTTP client timeout. None leaves the request unbounded.
    pub timeout: Option<Duration>,
}

impl Default for GeminiProviderConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
            max_tokens: Some(2048),
            temperature: Some(0.9),
            timeout: None,
        }
    }
}

impl GeminiProviderConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `GEMINI_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `GEMINI_API_URL` - API URL (default: https://generativelanguage.googleapis.com)
    /// - `GEMINI_MODEL` - Model name (default: gemini-2.5-flash)
    /// - `GEMINI_SYSTEM_PROMPT` - System prompt (overrides prompt file)
    /// - `GEMINI_PROMPT_FILE` - Path to system prompt file (default: SYSTEM_PROMPT.md)
    /// - `GEMINI_MAX_TOKENS` - Max output tokens (default: 2048)
    /// - `GEMINI_TEMPERATURE` - Temperature (default: 0.9)
    /// - `GEMINI_TIMEOUT_SECS` - HTTP timeout in seconds (default: none)
    ///
    /// System prompt priority:
    /// 1. `GEMINI_SYSTEM_PROMPT` env var (if set)
    /// 2. Contents of prompt file (if exists)
    /// 3. None (built-in prompt)
    pub fn from_env() -> Result<Self, ProviderError> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| ProviderError::Configuration("GEMINI_API_KEY not set".to_string()))?;

        let api_url = env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let system_prompt = if let Ok(prompt) = env::var("GEMINI_SYSTEM_PROMPT") {
            Some(prompt)
        } else {
            let prompt_file = env::var("GEMINI_PROMPT_FILE")
                .unwrap_or_else(|_| DEFAULT_PROMPT_FILE.to_string());
            load_prompt_file(&prompt_file)
        };

        let max_tokens = env::var("GEMINI_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(2048));

        let temperature = env::var("GEMINI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(0.9));

        let timeout = env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs);

        Ok(Self {
            api_url,
            api_key,
            model,
            system_prompt,
            max_tokens,
            temperature,
            timeout,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> GeminiProviderConfigBuilder {
        GeminiProviderConfigBuilder::default()
    }

    /// Full URL of the `generateContent` endpoint for the configured model.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Builder for GeminiProviderConfig.
#[derive(Debug, Default)]
pub struct GeminiProviderConfigBuilder {
    config: GeminiProviderConfig,
}

impl GeminiProviderConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> GeminiProviderConfig {
        self.config
    }

    /// Load system prompt from a file.
    ///
    /// If the file exists and is non-empty, sets the system prompt.
    pub fn load_prompt_file(mut self, path: impl AsRef<Path>) -> Self {
        if let Some(prompt) = load_prompt_file(path) {
            self.config.system_prompt = Some(prompt);
        }
        self
    }
}

/// Load a prompt file, returning None if not found or empty.
fn load_prompt_file(path: impl AsRef<Path>) -> Option<String> {
    let content = std::fs::read_to_string(path.as_ref()).ok()?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
