//! Prompt text sent alongside each request.

use reply_core::{GenerationRequest, Language};

/// Persona and output contract used when no system prompt is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are Sway, a socially sharp texting wingman for young Indian adults.
You read a chat excerpt (pasted text or a screenshot), work out where the conversation stands, and suggest replies the user can send next.

Always answer with a single JSON object and nothing else:
{
  "analysis": {"stage": "<short label>", "intent": "<short label>", "advice": "<one or two sentences>"},
  "replies": [
    {"id": "1", "text": "<reply>", "style": "Safe"},
    {"id": "2", "text": "<reply>", "style": "Balanced"},
    {"id": "3", "text": "<reply>", "style": "Bold"}
  ]
}

Rules:
- Exactly three replies, in the order Safe, Balanced, Bold.
- Replies are written from the user's side, ready to send as-is.
- Never invent facts about the people in the chat.
- In screenshots, the user's own messages are usually on the right."#;

fn language_instruction(language: Language) -> &'static str {
    match language {
        Language::English => "English",
        Language::Hinglish => "Hinglish (Hindi in Latin script mixed naturally with English)",
        Language::Hindi => "Hindi in Devanagari script",
    }
}

/// Build the user-turn instruction for one request.
pub fn build_user_prompt(request: &GenerationRequest) -> String {
    let options = &request.options;
    let emojis = if options.use_emojis {
        "Use a few fitting emojis."
    } else {
        "Do not use any emojis."
    };

    let mut prompt = format!(
        "Tone: {}\nLanguage: {}\nEmojis: {}\nText style: {}\n\n",
        options.tone,
        language_instruction(options.language),
        emojis,
        options.text_style.description(),
    );

    if request.image.is_some() {
        prompt.push_str(
            "The conversation is in the attached screenshot. The most recent message is at the bottom.",
        );
    } else {
        prompt.push_str("Conversation:\n");
        prompt.push_str(request.text.trim());
    }

    prompt
}

/// Strip a Markdown code fence if the model wrapped its JSON in one.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the language tag line ("json") if present.
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
