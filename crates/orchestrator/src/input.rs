//! Input and options models.

use reply_core::{GenerationOptions, ImagePayload, InputMode, Language, TextStyle, Tone};

/// The active input variant, borrowed from an [`InputModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationInput<'a> {
    Text(&'a str),
    Image(Option<&'a ImagePayload>),
}

impl GenerationInput<'_> {
    pub fn mode(&self) -> InputMode {
        match self {
            GenerationInput::Text(_) => InputMode::Text,
            GenerationInput::Image(_) => InputMode::Image,
        }
    }
}

/// The user's chosen input mode plus both payloads.
///
/// Switching modes keeps the inactive payload, so flipping back and forth
/// loses nothing; only the active one is ever submitted. No validation
/// happens here.
#[derive(Debug, Clone, Default)]
pub struct InputModel {
    mode: InputMode,
    text: String,
    image: Option<ImagePayload>,
}

impl InputModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_image(&mut self, image: Option<ImagePayload>) {
        self.image = image;
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn image(&self) -> Option<&ImagePayload> {
        self.image.as_ref()
    }

    /// The payload that would be submitted right now.
    pub fn active(&self) -> GenerationInput<'_> {
        match self.mode {
            InputMode::Text => GenerationInput::Text(&self.text),
            InputMode::Image => GenerationInput::Image(self.image.as_ref()),
        }
    }
}

/// Generation parameters. Four independent setters, nothing derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionsModel {
    options: GenerationOptions,
}

impl OptionsModel {
    pub fn new(options: GenerationOptions) -> Self {
        Self { options }
    }

    pub fn set_tone(&mut self, tone: Tone) {
        self.options.tone = tone;
    }

    pub fn set_language(&mut self, language: Language) {
        self.options.language = language;
    }

    pub fn set_use_emojis(&mut self, use_emojis: bool) {
        self.options.use_emojis = use_emojis;
    }

    pub fn set_text_style(&mut self, text_style: TextStyle) {
        self.options.text_style = text_style;
    }

    pub fn options(&self) -> GenerationOptions {
        self.options
    }
}
