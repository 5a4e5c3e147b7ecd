//! `sway`: reply suggestions for a chat message or a screenshot, from the terminal.
//!
//! Requires `GEMINI_API_KEY` unless `--mock` is given.
//!
//! ```bash
//! sway --text "wyd this weekend?" --tone flirty --language english
//! sway --image chat.png --style short --no-emojis
//! sway --mock --text "hey" --credits 2 --repeat 3
//! ```

use std::path::PathBuf;

use clap::Parser;
use gemini_provider::GeminiProvider;
use mock_provider::CannedProvider;
use orchestrator::{
    GenerationOutcome, LoggingListener, Orchestrator, OrchestratorError, SessionConfig,
    UserCredits,
};
use reply_core::{
    GeneratedResponse, GenerationOptions, ImagePayload, InputMode, Language, ReplyProvider,
    TextStyle, Tone,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sway")]
#[command(about = "Suggest replies to a chat message or a screenshot")]
struct Args {
    /// Message to reply to
    #[arg(long, conflicts_with = "image")]
    text: Option<String>,

    /// Screenshot of the conversation (png, jpeg, webp)
    #[arg(long)]
    image: Option<PathBuf>,

    /// Reply tone (Polite, Friendly, Confident, Playful, Flirty, Sarcastic, Casual, Dramatic)
    #[arg(long, default_value_t = Tone::Confident)]
    tone: Tone,

    /// Reply language (English, Hinglish, Hindi)
    #[arg(long, default_value_t = Language::Hinglish)]
    language: Language,

    /// Leave emojis out of the replies
    #[arg(long)]
    no_emojis: bool,

    /// Reply texting style (standard, short, cute, long)
    #[arg(long, default_value_t = TextStyle::Standard)]
    style: TextStyle,

    /// Free generations to start with. Falls back to SWAY_INITIAL_CREDITS env.
    #[arg(long)]
    credits: Option<u32>,

    /// Start as a premium user
    #[arg(long)]
    premium: bool,

    /// Use canned replies instead of calling Gemini
    #[arg(long)]
    mock: bool,

    /// Number of attempts to run with the same input
    #[arg(long, default_value_t = 1)]
    repeat: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = SessionConfig::from_env();
    if let Some(credits) = args.credits {
        config.initial_credits = credits;
    }

    if args.mock {
        info!("Using canned replies");
        let orchestrator =
            Orchestrator::with_listener(CannedProvider::sample(), config, LoggingListener);
        run(&orchestrator, &args).await
    } else {
        let provider = GeminiProvider::from_env()?;
        info!("Using Gemini model {}", provider.config().model);
        let orchestrator = Orchestrator::with_listener(provider, config, LoggingListener);
        run(&orchestrator, &args).await
    }
}

async fn run<P: ReplyProvider>(
    orchestrator: &Orchestrator<P, LoggingListener>,
    args: &Args,
) -> Result<(), Box<dyn std::error::Error>> {
    if !orchestrator.provider().is_ready().await {
        warn!("Provider {} is not ready", orchestrator.provider().name());
    }

    if args.premium {
        orchestrator.upgrade();
    }

    match &args.image {
        Some(path) => {
            orchestrator.set_mode(InputMode::Image);
            orchestrator.set_image(Some(ImagePayload::from_path(path)?));
        }
        None => orchestrator.set_text(args.text.clone().unwrap_or_default()),
    }

    orchestrator.set_options(GenerationOptions {
        tone: args.tone,
        language: args.language,
        use_emojis: !args.no_emojis,
        text_style: args.style,
    });

    let attempts = args.repeat.max(1);
    for attempt in 1..=attempts {
        if attempts > 1 {
            println!("== Attempt {} of {} ==", attempt, attempts);
        }

        match generate_with_status(orchestrator).await {
            Ok(GenerationOutcome::Generated(response)) => print_response(&response),
            Ok(GenerationOutcome::UpgradeRequired) => {
                println!("You're out of free replies. Run with --premium for unlimited replies.");
                orchestrator.dismiss_upgrade_prompt();
            }
            Err(OrchestratorError::Validation(err)) => {
                println!("{}", err);
                break;
            }
            Err(err) => println!("Error: {}", err),
        }

        print_credits(orchestrator.credits());
        println!();
    }

    Ok(())
}

/// Run one attempt, echoing loading status lines until it settles.
async fn generate_with_status<P: ReplyProvider>(
    orchestrator: &Orchestrator<P, LoggingListener>,
) -> Result<GenerationOutcome, OrchestratorError> {
    let mut status = orchestrator.subscribe_status();
    let generation = orchestrator.generate();
    tokio::pin!(generation);

    loop {
        tokio::select! {
            biased;
            outcome = &mut generation => return outcome,
            changed = status.changed() => {
                if changed.is_err() {
                    return generation.await;
                }
                println!("  {}", status.borrow_and_update().as_str());
            }
        }
    }
}

fn print_response(response: &GeneratedResponse) {
    let analysis = &response.analysis;
    println!("Stage:  {}", analysis.stage);
    println!("Intent: {}", analysis.intent);
    println!("Advice: {}", analysis.advice);
    println!();

    for reply in &response.replies {
        println!("[{}] {}", reply.style, reply.text);
    }
}

fn print_credits(credits: UserCredits) {
    if credits.is_premium {
        println!("Credits: unlimited (premium)");
    } else {
        println!("Credits left: {}", credits.remaining);
    }
}
