//! GeminiProvider implementation using the Gemini REST API.

use reply_core::{
    async_trait, hash_prompt, GeneratedResponse, GenerationRequest, ProviderError, ReplyProvider,
};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::api_types::{
    ApiError, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    ReplyPayload,
};
use crate::config::GeminiProviderConfig;
use crate::prompt::{build_user_prompt, strip_code_fence, DEFAULT_SYSTEM_PROMPT};

/// A reply provider backed by Google's Gemini models.
///
/// Each request is independent: there is no conversation history, the
/// excerpt the user pasted (or the screenshot) is the whole context.
pub struct GeminiProvider {
    client: Client,
    config: GeminiProviderConfig,
    system_prompt_hash: String,
}

impl GeminiProvider {
    /// Create a new GeminiProvider with the given configuration.
    pub fn new(config: GeminiProviderConfig) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            ProviderError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        let system_prompt_hash = hash_prompt(Self::system_prompt_for(&config));
        info!(
            "GeminiProvider initialized with model: {}, prompt fingerprint: {}",
            config.model, system_prompt_hash
        );

        Ok(Self {
            client,
            config,
            system_prompt_hash,
        })
    }

    /// Create a GeminiProvider from environment variables.
    ///
    /// See [`GeminiProviderConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::new(GeminiProviderConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &GeminiProviderConfig {
        &self.config
    }

    /// Fingerprint of the system prompt in use.
    pub fn system_prompt_hash(&self) -> &str {
        &self.system_prompt_hash
    }

    fn system_prompt_for(config: &GeminiProviderConfig) -> &str {
        config
            .system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }

    /// Build the request body for one generation.
    fn build_request(&self, request: &GenerationRequest) -> GenerateContentRequest {
        let mut parts = vec![Part::text(build_user_prompt(request))];
        if let Some(ref image) = request.image {
            parts.push(Part::inline(image.mime_type.clone(), image.to_base64()));
        }

        GenerateContentRequest {
            system_instruction: Some(Content::system(Self::system_prompt_for(&self.config))),
            contents: vec![Content::user(parts)],
            generation_config: GenerationConfig {
                max_output_tokens: self.config.max_tokens,
                temperature: self.config.temperature,
                response_mime_type: "application/json".to_string(),
            },
        }
    }

    /// POST to `generateContent` and decode the envelope.
    async fn generate_content(
        &self,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = self.config.generate_url();

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Network("Request timed out. Try again.".to_string())
                } else {
                    ProviderError::Network(format!("Network error: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let api_error = serde_json::from_str::<ApiError>(&error_text)
                .ok()
                .map(|e| e.error);
            match &api_error {
                Some(details) => {
                    warn!("Gemini API returned {}", details.summary(status.as_u16()))
                }
                None => warn!("Gemini API returned {}: {}", status.as_u16(), error_text),
            }
            let api_message = api_error.map(|details| details.message);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: status_message(status, api_message),
            });
        }

        response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("Unexpected API response: {}", e))
        })
    }
}

/// User-facing text for a failed HTTP status.
fn status_message(status: StatusCode, api_message: Option<String>) -> String {
    match status.as_u16() {
        400 => "Bad request. Try a shorter message or a smaller screenshot.".to_string(),
        401 | 403 => "Invalid API key. Check your configuration.".to_string(),
        429 => "Too many requests right now. Wait a moment and try again.".to_string(),
        500 | 503 => "The reply service is having trouble. Try again.".to_string(),
        code => api_message.unwrap_or_else(|| format!("API error (HTTP {}).", code)),
    }
}

/// Turn a decoded envelope into replies.
fn parse_response(response: GenerateContentResponse) -> Result<GeneratedResponse, ProviderError> {
    if let Some(usage) = &response.usage_metadata {
        debug!(
            "Token usage - prompt: {}, completion: {}, total: {}",
            usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
        );
    }

    let text = match response.first_text() {
        Some(text) => text,
        None => {
            let reason = response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .or_else(|| {
                    response
                        .candidates
                        .first()
                        .and_then(|c| c.finish_reason.clone())
                });
            return Err(match reason {
                Some(reason) => ProviderError::InvalidResponse(format!(
                    "The reply service declined this conversation ({}).",
                    reason
                )),
                None => ProviderError::InvalidResponse("Empty response from API.".to_string()),
            });
        }
    };

    let payload: ReplyPayload = serde_json::from_str(strip_code_fence(&text)).map_err(|e| {
        ProviderError::InvalidResponse(format!("Could not read the suggested replies: {}", e))
    })?;

    Ok(payload.into_response())
}

#[async_trait]
impl ReplyProvider for GeminiProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<GeneratedResponse, ProviderError> {
        debug!(
            "Generating replies: mode={:?}, tone={}, language={}, emojis={}, style={}",
            request.mode(),
            request.tone(),
            request.language(),
            request.use_emojis(),
            request.text_style()
        );

        let body = self.build_request(&request);
        let response = self.generate_content(&body).await?;
        let generated = parse_response(response)?;

        info!("Gemini returned {} replies", generated.replies.len());
        Ok(generated)
    }

    fn name(&self) -> &str {
        "GeminiProvider"
    }

    async fn is_ready(&self) -> bool {
        !self.config.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reply_core::{GenerationOptions, ImagePayload, ReplyStyle};

    fn provider() -> GeminiProvider {
        let config = GeminiProviderConfig::builder().api_key("test-key").build();
        GeminiProvider::new(config).unwrap()
    }

    fn envelope(text: &str) -> GenerateContentResponse {
        let body = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": text}]}, "finishReason": "STOP"}]
        });
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_build_request_text() {
        let provider = provider();
        let request = GenerationRequest::from_text("hey", GenerationOptions::default());

        let body = provider.build_request(&request);
        assert_eq!(body.contents.len(), 1);
        assert_eq!(body.contents[0].parts.len(), 1);
        assert_eq!(body.generation_config.response_mime_type, "application/json");
    }

    #[test]
    fn test_build_request_image_attaches_inline_data() {
        let provider = provider();
        let image = ImagePayload::from_bytes("image/jpeg", vec![0xff, 0xd8, 0xff]);
        let request = GenerationRequest::from_image(image, GenerationOptions::default());

        let body = provider.build_request(&request);
        let json = serde_json::to_value(&body).unwrap();
        let inline = &json["contents"][0]["parts"][1]["inlineData"];
        assert_eq!(inline["mimeType"], "image/jpeg");
        assert_eq!(inline["data"], "/9j/");
    }

    #[test]
    fn test_custom_system_prompt_changes_fingerprint() {
        let default = provider();
        let custom = GeminiProvider::new(
            GeminiProviderConfig::builder()
                .api_key("test-key")
                .system_prompt("Only Safe replies.")
                .build(),
        )
        .unwrap();

        assert_ne!(default.system_prompt_hash(), custom.system_prompt_hash());
    }

    #[test]
    fn test_parse_response_fenced_json() {
        let text = "```json\n{\"analysis\":{\"stage\":\"Reconnecting\",\"intent\":\"Curious\",\"advice\":\"Be warm.\"},\"replies\":[{\"id\":\"1\",\"text\":\"Long time!\",\"style\":\"Safe\"}]}\n```";
        let generated = parse_response(envelope(text)).unwrap();

        assert_eq!(generated.analysis.stage, "Reconnecting");
        assert_eq!(generated.replies.len(), 1);
        assert_eq!(generated.replies[0].style, ReplyStyle::Safe);
    }

    #[test]
    fn test_parse_response_malformed() {
        let err = parse_response(envelope("not json")).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
        assert!(err.user_message().unwrap().starts_with("Could not read"));
    }

    #[test]
    fn test_parse_response_blocked() {
        let body = serde_json::json!({"promptFeedback": {"blockReason": "SAFETY"}});
        let response: GenerateContentResponse = serde_json::from_value(body).unwrap();

        let err = parse_response(response).unwrap_err();
        assert!(err.user_message().unwrap().contains("SAFETY"));
    }

    #[test]
    fn test_status_message() {
        assert!(status_message(StatusCode::TOO_MANY_REQUESTS, None).contains("Too many"));
        assert_eq!(
            status_message(StatusCode::NOT_FOUND, Some("model not found".to_string())),
            "model not found"
        );
        assert_eq!(status_message(StatusCode::IM_A_TEAPOT, None), "API error (HTTP 418).");
    }

    #[tokio::test]
    async fn test_provider_name_and_ready() {
        let provider = provider();
        assert_eq!(provider.name(), "GeminiProvider");
        assert!(provider.is_ready().await);

        let unkeyed = GeminiProvider::new(GeminiProviderConfig::default()).unwrap();
        assert!(!unkeyed.is_ready().await);
    }
}
