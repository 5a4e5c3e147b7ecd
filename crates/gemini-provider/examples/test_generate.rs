//! Simple test for GeminiProvider reply generation.
//!
//! Run with: cargo run -p gemini-provider --example test_generate
//! Or with a custom message: cargo run -p gemini-provider --example test_generate -- "Your message here"
//!
//! Make sure to set environment variables in .env:
//!   GEMINI_API_KEY - Gemini API key for authentication

use gemini_provider::{GeminiProvider, GenerationOptions, GenerationRequest, ReplyProvider};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let message_text = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "Them: haha you're actually funny\nThem: so what's your plan for saturday?".to_string()
    };

    println!("Initializing GeminiProvider...");
    let provider = GeminiProvider::from_env()?;

    println!("Provider initialized: {}", provider.name());
    println!("API URL: {}", provider.config().api_url);
    println!("Model: {}", provider.config().model);
    println!("Prompt fingerprint: {}", provider.system_prompt_hash());
    println!();

    let request = GenerationRequest::from_text(message_text, GenerationOptions::default());

    println!("Sending: \"{}\"", request.text);
    println!("Waiting for replies...\n");

    let response = provider.generate(request).await?;

    println!("=== Analysis ===");
    println!("{} • {}", response.analysis.stage, response.analysis.intent);
    println!("\"{}\"", response.analysis.advice);
    println!("=== Replies ===");
    for reply in &response.replies {
        println!("[{}] {}", reply.style, reply.text);
    }
    println!("===============");

    Ok(())
}
