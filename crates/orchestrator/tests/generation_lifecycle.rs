//! End-to-end generation lifecycle against mock providers.
//!
//! Timing tests run on a paused clock; checks sit 100ms off the announcer
//! ticks so the order of wakeups is fixed.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mock_provider::{
    sample_response, CannedProvider, DelayedProvider, FailingProvider, RecordingProvider,
};
use orchestrator::{
    GeneratedResponse, GenerationListener, GenerationOutcome, GenerationRequest, ImagePayload,
    InputMode, Language, Orchestrator, OrchestratorError, Phase, ProviderError, ReplyProvider,
    SessionConfig, TextStyle, Tone, UserCredits, ValidationError, GENERIC_ERROR_MESSAGE,
    PREMIUM_CREDITS,
};
use reply_core::{async_trait, AnalysisResult};
use tokio::time::sleep;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Phase(Phase),
    UpgradePrompt,
    Credits(UserCredits),
}

#[derive(Default)]
struct EventLog {
    events: Mutex<Vec<Event>>,
}

impl EventLog {
    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl GenerationListener for EventLog {
    fn on_phase_change(&self, phase: Phase) {
        self.push(Event::Phase(phase));
    }

    fn on_upgrade_prompt(&self) {
        self.push(Event::UpgradePrompt);
    }

    fn on_credits_changed(&self, credits: UserCredits) {
        self.push(Event::Credits(credits));
    }
}

/// Plays back a fixed list of outcomes, then fails.
struct ScriptedProvider {
    outcomes: Mutex<VecDeque<Result<GeneratedResponse, ProviderError>>>,
}

impl ScriptedProvider {
    fn new(outcomes: Vec<Result<GeneratedResponse, ProviderError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
        }
    }
}

#[async_trait]
impl ReplyProvider for ScriptedProvider {
    async fn generate(&self, _request: GenerationRequest) -> Result<GeneratedResponse, ProviderError> {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ProviderError::Unknown))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn config(credits: u32) -> SessionConfig {
    SessionConfig::builder()
        .initial_credits(credits)
        .loading_interval(Duration::from_millis(1500))
        .loading_messages(["one", "two", "three"])
        .build()
}

fn other_response() -> GeneratedResponse {
    GeneratedResponse {
        analysis: AnalysisResult::new("Late night banter", "Wants attention", "Keep it light"),
        replies: Vec::new(),
    }
}

#[tokio::test]
async fn success_charges_one_credit_and_stores_response() {
    let log = Arc::new(EventLog::default());
    let provider = RecordingProvider::new(CannedProvider::sample());
    let orchestrator = Orchestrator::with_listener(provider.clone(), config(3), Arc::clone(&log));

    orchestrator.set_text("are you free saturday?");
    orchestrator.set_language(Language::English);
    orchestrator.set_tone(Tone::Confident);
    orchestrator.set_use_emojis(true);
    orchestrator.set_text_style(TextStyle::Standard);

    let outcome = orchestrator.generate().await.unwrap();
    assert_eq!(outcome, GenerationOutcome::Generated(sample_response()));
    assert_eq!(sample_response().replies.len(), 3);

    assert_eq!(orchestrator.credits(), UserCredits::free(2));
    assert_eq!(orchestrator.last_result(), Some(sample_response()));
    assert!(orchestrator.last_error().is_none());
    assert_eq!(orchestrator.phase(), Phase::Succeeded);

    let request = provider.last_request().await.unwrap();
    assert_eq!(request.text, "are you free saturday?");
    assert!(request.image.is_none());
    assert_eq!(request.language(), Language::English);
    assert_eq!(request.tone(), Tone::Confident);
    assert!(request.use_emojis());
    assert_eq!(request.text_style(), TextStyle::Standard);

    assert_eq!(
        log.events(),
        vec![
            Event::Phase(Phase::Validating),
            Event::Phase(Phase::Generating),
            Event::Credits(UserCredits::free(2)),
            Event::Phase(Phase::Succeeded),
        ]
    );
}

#[tokio::test]
async fn no_credits_offers_upgrade_without_calling_provider() {
    let log = Arc::new(EventLog::default());
    let provider = RecordingProvider::new(CannedProvider::sample());
    let orchestrator = Orchestrator::with_listener(provider.clone(), config(0), Arc::clone(&log));
    orchestrator.set_text("hey");

    let outcome = orchestrator.generate().await.unwrap();
    assert_eq!(outcome, GenerationOutcome::UpgradeRequired);

    assert_eq!(provider.call_count().await, 0);
    assert_eq!(orchestrator.credits(), UserCredits::free(0));
    assert!(orchestrator.upgrade_prompt_visible());
    assert!(orchestrator.last_error().is_none());
    assert!(orchestrator.last_result().is_none());
    assert_eq!(orchestrator.phase(), Phase::Idle);

    assert_eq!(
        log.events(),
        vec![
            Event::Phase(Phase::Validating),
            Event::Phase(Phase::Blocked),
            Event::Phase(Phase::Idle),
            Event::UpgradePrompt,
        ]
    );
}

#[tokio::test]
async fn every_positive_credit_count_is_charged_exactly_once() {
    for remaining in 1..=6 {
        let orchestrator = Orchestrator::with_config(CannedProvider::sample(), config(remaining));
        orchestrator.set_text("hi");

        orchestrator.generate().await.unwrap();
        assert_eq!(orchestrator.credits(), UserCredits::free(remaining - 1));
        assert!(orchestrator.last_result().is_some());
    }
}

#[tokio::test]
async fn credits_run_out_after_last_success() {
    let provider = RecordingProvider::new(CannedProvider::sample());
    let orchestrator = Orchestrator::with_config(provider.clone(), config(2));
    orchestrator.set_text("hi");

    for _ in 0..2 {
        assert!(matches!(
            orchestrator.generate().await.unwrap(),
            GenerationOutcome::Generated(_)
        ));
    }
    assert_eq!(
        orchestrator.generate().await.unwrap(),
        GenerationOutcome::UpgradeRequired
    );
    assert_eq!(provider.call_count().await, 2);
    assert_eq!(orchestrator.credits(), UserCredits::free(0));
}

#[tokio::test]
async fn premium_credits_never_decrease() {
    let orchestrator = Orchestrator::with_config(CannedProvider::sample(), config(1));
    orchestrator.upgrade();
    orchestrator.set_text("hi");

    for _ in 0..10 {
        orchestrator.generate().await.unwrap();
    }
    assert_eq!(orchestrator.credits(), UserCredits::premium());
    assert_eq!(orchestrator.credits().remaining, PREMIUM_CREDITS);
}

#[tokio::test]
async fn blank_text_is_never_dispatched() {
    let log = Arc::new(EventLog::default());
    let provider = RecordingProvider::new(CannedProvider::sample());
    let orchestrator = Orchestrator::with_listener(provider.clone(), config(3), Arc::clone(&log));

    for text in ["", "   ", "\n\t  \n"] {
        orchestrator.set_text(text);
        let err = orchestrator.generate().await.unwrap_err();
        assert!(matches!(
            err,
            OrchestratorError::Validation(ValidationError::MissingText)
        ));
        assert_eq!(
            orchestrator.last_error().as_deref(),
            Some("Please paste a text message first.")
        );
        assert_eq!(orchestrator.phase(), Phase::Idle);
    }

    assert_eq!(provider.call_count().await, 0);
    assert_eq!(orchestrator.credits(), UserCredits::free(3));
    assert!(!log.events().contains(&Event::Phase(Phase::Generating)));
}

#[tokio::test]
async fn image_mode_without_image_is_never_dispatched() {
    let provider = RecordingProvider::new(CannedProvider::sample());
    let orchestrator = Orchestrator::with_config(provider.clone(), config(3));

    orchestrator.set_text("text does not count in image mode");
    orchestrator.set_mode(InputMode::Image);

    let err = orchestrator.generate().await.unwrap_err();
    assert!(matches!(
        err,
        OrchestratorError::Validation(ValidationError::MissingImage)
    ));
    assert_eq!(
        orchestrator.last_error().as_deref(),
        Some("Please upload a screenshot first.")
    );
    assert_eq!(provider.call_count().await, 0);
    assert_eq!(orchestrator.credits(), UserCredits::free(3));
}

#[tokio::test]
async fn image_mode_sends_image_and_empty_text() {
    let provider = RecordingProvider::new(CannedProvider::sample());
    let orchestrator = Orchestrator::with_config(provider.clone(), config(3));

    orchestrator.set_text("left over from text mode");
    orchestrator.set_mode(InputMode::Image);
    orchestrator.set_image(Some(ImagePayload::from_bytes("image/jpeg", vec![0xff, 0xd8])));

    orchestrator.generate().await.unwrap();

    let request = provider.last_request().await.unwrap();
    assert_eq!(request.mode(), InputMode::Image);
    assert!(request.text.is_empty());
    assert_eq!(request.image.unwrap().mime_type, "image/jpeg");
}

#[tokio::test]
async fn validation_error_cleared_by_next_trigger() {
    let orchestrator = Orchestrator::with_config(CannedProvider::sample(), config(3));

    orchestrator.generate().await.unwrap_err();
    assert!(orchestrator.last_error().is_some());

    orchestrator.set_text("ok now");
    orchestrator.generate().await.unwrap();
    assert!(orchestrator.last_error().is_none());
}

#[tokio::test]
async fn upgrade_is_idempotent_and_closes_prompt() {
    let log = Arc::new(EventLog::default());
    let orchestrator =
        Orchestrator::with_listener(CannedProvider::sample(), config(0), Arc::clone(&log));
    orchestrator.set_text("hi");

    orchestrator.generate().await.unwrap();
    assert!(orchestrator.upgrade_prompt_visible());

    let once = orchestrator.upgrade();
    let once_snapshot = orchestrator.snapshot();
    let twice = orchestrator.upgrade();

    assert_eq!(once, twice);
    assert_eq!(once, UserCredits::premium());
    assert_eq!(orchestrator.snapshot(), once_snapshot);
    assert!(!orchestrator.upgrade_prompt_visible());
    assert!(log.events().contains(&Event::Credits(UserCredits::premium())));

    let outcome = orchestrator.generate().await.unwrap();
    assert!(matches!(outcome, GenerationOutcome::Generated(_)));
}

#[tokio::test]
async fn provider_message_surfaced_verbatim() {
    let orchestrator = Orchestrator::with_config(
        FailingProvider::with_message("The model is overloaded. Try again later."),
        config(3),
    );
    orchestrator.set_text("hi");

    let err = orchestrator.generate().await.unwrap_err();
    assert!(matches!(err, OrchestratorError::Provider { .. }));
    assert_eq!(
        orchestrator.last_error().as_deref(),
        Some("The model is overloaded. Try again later.")
    );
    assert_eq!(orchestrator.phase(), Phase::Failed);
    assert_eq!(orchestrator.credits(), UserCredits::free(3));
}

#[tokio::test]
async fn provider_without_message_gets_fallback() {
    let orchestrator = Orchestrator::with_config(FailingProvider::silent(), config(3));
    orchestrator.set_text("hi");

    orchestrator.generate().await.unwrap_err();
    assert_eq!(orchestrator.last_error().as_deref(), Some(GENERIC_ERROR_MESSAGE));
    assert!(!orchestrator.is_busy());
}

#[tokio::test]
async fn failure_keeps_credits_and_prior_result() {
    let provider = ScriptedProvider::new(vec![
        Ok(other_response()),
        Err(ProviderError::Network("Request timed out. Try again.".to_string())),
        Ok(sample_response()),
    ]);
    let orchestrator = Orchestrator::with_config(provider, config(3));
    orchestrator.set_text("hi");

    orchestrator.generate().await.unwrap();
    assert_eq!(orchestrator.credits(), UserCredits::free(2));

    orchestrator.generate().await.unwrap_err();
    assert_eq!(orchestrator.credits(), UserCredits::free(2));
    assert_eq!(orchestrator.last_result(), Some(other_response()));
    assert_eq!(
        orchestrator.last_error().as_deref(),
        Some("Request timed out. Try again.")
    );

    orchestrator.generate().await.unwrap();
    assert_eq!(orchestrator.credits(), UserCredits::free(1));
    assert_eq!(orchestrator.last_result(), Some(sample_response()));
    assert!(orchestrator.last_error().is_none());
}

#[tokio::test(start_paused = true)]
async fn previous_result_hidden_while_generating() {
    let provider = DelayedProvider::with_secs(CannedProvider::sample(), 5);
    let orchestrator = Orchestrator::with_config(provider, config(3));
    orchestrator.set_text("hi");
    orchestrator.generate().await.unwrap();
    assert!(orchestrator.last_result().is_some());

    let (outcome, during) = tokio::join!(orchestrator.generate(), async {
        sleep(Duration::from_millis(100)).await;
        orchestrator.snapshot()
    });

    assert!(outcome.is_ok());
    assert_eq!(during.phase, Phase::Generating);
    assert!(during.last_result.is_none());
    assert_eq!(during.credits, UserCredits::free(2));
    assert_eq!(orchestrator.credits(), UserCredits::free(1));
}

#[tokio::test(start_paused = true)]
async fn second_trigger_while_generating_is_rejected() {
    let provider = RecordingProvider::new(DelayedProvider::with_secs(CannedProvider::sample(), 3));
    let orchestrator = Orchestrator::with_config(provider.clone(), config(3));
    orchestrator.set_text("hi");

    let (first, second) = tokio::join!(orchestrator.generate(), async {
        sleep(Duration::from_millis(100)).await;
        assert!(orchestrator.is_busy());
        orchestrator.generate().await
    });

    assert!(matches!(first, Ok(GenerationOutcome::Generated(_))));
    assert!(matches!(second, Err(OrchestratorError::Busy)));
    assert_eq!(provider.call_count().await, 1);
    assert_eq!(orchestrator.credits(), UserCredits::free(2));
    assert!(orchestrator.last_error().is_none());
    assert!(!orchestrator.is_busy());
}

#[tokio::test(start_paused = true)]
async fn loading_status_cycles_while_generating() {
    let provider = DelayedProvider::with_secs(CannedProvider::sample(), 10);
    let orchestrator = Orchestrator::with_config(provider, config(3));
    orchestrator.set_text("hi");
    assert_eq!(orchestrator.loading_status(), "one");

    let (outcome, seen) = tokio::join!(orchestrator.generate(), async {
        sleep(Duration::from_millis(100)).await;
        let mut seen = vec![orchestrator.loading_status()];
        for _ in 0..4 {
            sleep(Duration::from_millis(1500)).await;
            seen.push(orchestrator.loading_status());
        }
        seen
    });

    assert!(outcome.is_ok());
    assert_eq!(seen, vec!["one", "two", "three", "one", "two"]);

    let mut status = orchestrator.subscribe_status();
    assert_eq!(*status.borrow_and_update(), "one");
    sleep(Duration::from_secs(30)).await;
    assert!(!status.has_changed().unwrap());
}

#[tokio::test(start_paused = true)]
async fn loading_status_stops_on_failure() {
    let provider = DelayedProvider::with_secs(FailingProvider::silent(), 4);
    let orchestrator = Orchestrator::with_config(provider, config(3));
    orchestrator.set_text("hi");
    let mut status = orchestrator.subscribe_status();

    let (outcome, mid) = tokio::join!(orchestrator.generate(), async {
        sleep(Duration::from_millis(3100)).await;
        orchestrator.loading_status()
    });

    assert!(outcome.is_err());
    assert_eq!(mid, "three");
    assert_eq!(orchestrator.loading_status(), "one");

    drop(status.borrow_and_update());
    sleep(Duration::from_secs(30)).await;
    assert!(!status.has_changed().unwrap());
    assert_eq!(orchestrator.phase(), Phase::Failed);
}

#[tokio::test]
async fn header_upgrade_prompt_can_be_dismissed() {
    let orchestrator = Orchestrator::new(CannedProvider::sample());

    orchestrator.open_upgrade_prompt();
    assert!(orchestrator.upgrade_prompt_visible());

    orchestrator.dismiss_upgrade_prompt();
    assert!(!orchestrator.upgrade_prompt_visible());
    assert_eq!(orchestrator.credits(), UserCredits::default());
}

#[tokio::test(start_paused = true)]
async fn zero_loading_interval_set_directly_still_cycles() {
    let mut config = config(3);
    config.loading_interval = Duration::ZERO;
    let provider = DelayedProvider::with_secs(CannedProvider::sample(), 5);
    let orchestrator = Orchestrator::with_config(provider, config);
    orchestrator.set_text("hi");

    let (outcome, status) = tokio::join!(orchestrator.generate(), async {
        sleep(Duration::from_millis(1600)).await;
        orchestrator.loading_status()
    });

    assert!(outcome.is_ok());
    assert_eq!(status, "two");
}

/// Panics when told the attempt is generating.
struct PanicOnGenerating;

impl GenerationListener for PanicOnGenerating {
    fn on_phase_change(&self, phase: Phase) {
        if phase == Phase::Generating {
            panic!("listener failed");
        }
    }
}

#[tokio::test]
async fn panicking_listener_does_not_leave_session_busy() {
    let orchestrator = Arc::new(Orchestrator::with_listener(
        CannedProvider::sample(),
        config(3),
        PanicOnGenerating,
    ));
    orchestrator.set_text("hi");

    let attempt = tokio::spawn({
        let orchestrator = Arc::clone(&orchestrator);
        async move { orchestrator.generate().await }
    });
    assert!(attempt.await.unwrap_err().is_panic());

    assert!(!orchestrator.is_busy());
    assert_eq!(orchestrator.phase(), Phase::Failed);
    assert_eq!(orchestrator.last_error().as_deref(), Some(GENERIC_ERROR_MESSAGE));
    assert_eq!(orchestrator.credits(), UserCredits::free(3));
    assert_eq!(orchestrator.loading_status(), "one");
}
