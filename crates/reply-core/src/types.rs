//! Request and response types shared by providers and the orchestrator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::image::ImagePayload;

/// Which payload the user is submitting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InputMode {
    /// A pasted text message.
    #[default]
    Text,
    /// A chat screenshot.
    Image,
}

/// Error returned when an option name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
}

impl ParseOptionError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Emotional register of the suggested replies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    Polite,
    Friendly,
    #[default]
    Confident,
    Playful,
    Flirty,
    Sarcastic,
    Casual,
    Dramatic,
}

impl Tone {
    /// Every tone, in selector order.
    pub const ALL: [Tone; 8] = [
        Tone::Polite,
        Tone::Friendly,
        Tone::Confident,
        Tone::Playful,
        Tone::Flirty,
        Tone::Sarcastic,
        Tone::Casual,
        Tone::Dramatic,
    ];

    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Polite => "Polite",
            Tone::Friendly => "Friendly",
            Tone::Confident => "Confident",
            Tone::Playful => "Playful",
            Tone::Flirty => "Flirty",
            Tone::Sarcastic => "Sarcastic",
            Tone::Casual => "Casual",
            Tone::Dramatic => "Dramatic",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Tone::ALL
            .into_iter()
            .find(|tone| tone.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseOptionError::new("tone", s))
    }
}

/// Language the replies are written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    /// Hindi written in Latin script, mixed with English.
    #[default]
    Hinglish,
    Hindi,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Hinglish, Language::Hindi];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hinglish => "Hinglish",
            Language::Hindi => "Hindi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseOptionError::new("language", s))
    }
}

/// Typing style of the replies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextStyle {
    /// "Okay", "Yes", "You"
    #[default]
    #[serde(rename = "Standard")]
    Standard,
    /// "k", "ya", "u"
    #[serde(rename = "Short/Txt")]
    Short,
    /// "okieee", "yesss", "yuuu"
    #[serde(rename = "Cute/Soft")]
    Cute,
    /// Detailed, full sentences.
    #[serde(rename = "Long/Deep")]
    Long,
}

impl TextStyle {
    pub const ALL: [TextStyle; 4] = [
        TextStyle::Standard,
        TextStyle::Short,
        TextStyle::Cute,
        TextStyle::Long,
    ];

    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextStyle::Standard => "Standard",
            TextStyle::Short => "Short/Txt",
            TextStyle::Cute => "Cute/Soft",
            TextStyle::Long => "Long/Deep",
        }
    }

    /// Short keyword accepted alongside the label.
    fn keyword(&self) -> &'static str {
        match self {
            TextStyle::Standard => "standard",
            TextStyle::Short => "short",
            TextStyle::Cute => "cute",
            TextStyle::Long => "long",
        }
    }

    /// How replies in this style read, for prompting.
    pub fn description(&self) -> &'static str {
        match self {
            TextStyle::Standard => "normal spelling and grammar (\"Okay\", \"Yes\", \"You\")",
            TextStyle::Short => "short texting abbreviations (\"k\", \"ya\", \"u\")",
            TextStyle::Cute => "soft, cute stretched spellings (\"okieee\", \"yesss\", \"yuuu\")",
            TextStyle::Long => "detailed, thoughtful full sentences",
        }
    }
}

impl fmt::Display for TextStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextStyle {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TextStyle::ALL
            .into_iter()
            .find(|style| {
                style.as_str().eq_ignore_ascii_case(s) || style.keyword().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| ParseOptionError::new("text style", s))
    }
}

/// Generation parameters selected by the user.
///
/// Every combination of values is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    pub tone: Tone,
    pub language: Language,
    pub use_emojis: bool,
    pub text_style: TextStyle,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            tone: Tone::default(),
            language: Language::default(),
            use_emojis: true,
            text_style: TextStyle::default(),
        }
    }
}

/// How daring a suggested reply is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReplyStyle {
    Safe,
    Balanced,
    Bold,
}

impl ReplyStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyStyle::Safe => "Safe",
            ReplyStyle::Balanced => "Balanced",
            ReplyStyle::Bold => "Bold",
        }
    }
}

impl fmt::Display for ReplyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One suggested reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyOption {
    pub id: String,
    pub text: String,
    pub style: ReplyStyle,
}

impl ReplyOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>, style: ReplyStyle) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            style,
        }
    }
}

/// The provider's read of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Where the conversation is (e.g. "Early talking stage").
    pub stage: String,
    /// What the other person seems to want.
    pub intent: String,
    /// Free-text advice for the user.
    pub advice: String,
}

impl AnalysisResult {
    pub fn new(
        stage: impl Into<String>,
        intent: impl Into<String>,
        advice: impl Into<String>,
    ) -> Self {
        Self {
            stage: stage.into(),
            intent: intent.into(),
            advice: advice.into(),
        }
    }
}

/// A complete generation result.
///
/// Replies are kept in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedResponse {
    pub analysis: AnalysisResult,
    pub replies: Vec<ReplyOption>,
}

/// What gets sent to a provider for one attempt.
///
/// Built fresh per attempt. Exactly one of `text` / `image` is meaningful;
/// the other is the empty string or `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub text: String,
    pub image: Option<ImagePayload>,
    pub options: GenerationOptions,
}

impl GenerationRequest {
    /// A request for a pasted text message.
    pub fn from_text(text: impl Into<String>, options: GenerationOptions) -> Self {
        Self {
            text: text.into(),
            image: None,
            options,
        }
    }

    /// A request for a chat screenshot.
    pub fn from_image(image: ImagePayload, options: GenerationOptions) -> Self {
        Self {
            text: String::new(),
            image: Some(image),
            options,
        }
    }

    /// The mode this request was built for.
    pub fn mode(&self) -> InputMode {
        if self.image.is_some() {
            InputMode::Image
        } else {
            InputMode::Text
        }
    }

    pub fn tone(&self) -> Tone {
        self.options.tone
    }

    pub fn language(&self) -> Language {
        self.options.language
    }

    pub fn use_emojis(&self) -> bool {
        self.options.use_emojis
    }

    pub fn text_style(&self) -> TextStyle {
        self.options.text_style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_parse() {
        assert_eq!("confident".parse::<Tone>().unwrap(), Tone::Confident);
        assert_eq!(" Flirty ".parse::<Tone>().unwrap(), Tone::Flirty);
        assert!("grumpy".parse::<Tone>().is_err());
    }

    #[test]
    fn test_text_style_parse_label_and_keyword() {
        assert_eq!("short".parse::<TextStyle>().unwrap(), TextStyle::Short);
        assert_eq!("Short/Txt".parse::<TextStyle>().unwrap(), TextStyle::Short);
        assert_eq!("cute/soft".parse::<TextStyle>().unwrap(), TextStyle::Cute);
        let err = "tiny".parse::<TextStyle>().unwrap_err();
        assert_eq!(err.to_string(), "unknown text style: tiny");
    }

    #[test]
    fn test_default_options() {
        let options = GenerationOptions::default();
        assert_eq!(options.tone, Tone::Confident);
        assert_eq!(options.language, Language::Hinglish);
        assert!(options.use_emojis);
        assert_eq!(options.text_style, TextStyle::Standard);
    }

    #[test]
    fn test_serde_labels() {
        assert_eq!(serde_json::to_string(&TextStyle::Long).unwrap(), "\"Long/Deep\"");
        assert_eq!(serde_json::to_string(&Tone::Sarcastic).unwrap(), "\"Sarcastic\"");

        let reply: ReplyOption =
            serde_json::from_str(r#"{"id":"r1","text":"hey","style":"Bold"}"#).unwrap();
        assert_eq!(reply.style, ReplyStyle::Bold);
    }

    #[test]
    fn test_request_mode() {
        let options = GenerationOptions::default();
        let text = GenerationRequest::from_text("hi", options);
        assert_eq!(text.mode(), InputMode::Text);
        assert!(text.image.is_none());

        let image = GenerationRequest::from_image(ImagePayload::from_bytes("image/png", vec![1]), options);
        assert_eq!(image.mode(), InputMode::Image);
        assert!(image.text.is_empty());
    }
}
