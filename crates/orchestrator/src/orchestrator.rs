//! Main orchestrator that runs generation attempts.

use std::sync::{Mutex, MutexGuard, PoisonError};

use gemini_provider::GeminiProvider;
use reply_core::{
    GeneratedResponse, GenerationOptions, GenerationRequest, ImagePayload, InputMode, Language,
    ProviderError, ReplyProvider, TextStyle, Tone,
};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::announcer::{AnnouncerGuard, LoadingAnnouncer};
use crate::config::SessionConfig;
use crate::credits::{CreditGate, UserCredits};
use crate::error::{OrchestratorError, ValidationError, GENERIC_ERROR_MESSAGE};
use crate::input::{GenerationInput, InputModel, OptionsModel};
use crate::listener::{GenerationListener, NoOpListener};
use crate::presentation::PresentationState;

/// Where the orchestrator is in the attempt lifecycle.
///
/// `Validating` and `Blocked` are passed through within a single call to
/// [`Orchestrator::generate`]; listeners see them, readers never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    Idle,
    Validating,
    Blocked,
    Generating,
    Succeeded,
    Failed,
}

impl Phase {
    /// Whether an attempt is awaiting the provider.
    pub fn is_busy(&self) -> bool {
        matches!(self, Phase::Generating)
    }
}

/// How a generate call ended, when it did not end in an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The provider answered; the response is now the visible result.
    Generated(GeneratedResponse),
    /// Out of credits; nothing was dispatched and the upgrade offer is showing.
    UpgradeRequired,
}

/// Everything a renderer needs, read under one lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub credits: UserCredits,
    pub mode: InputMode,
    pub options: GenerationOptions,
    pub last_result: Option<GeneratedResponse>,
    pub last_error: Option<String>,
    pub upgrade_prompt_visible: bool,
    pub loading_status: String,
}

/// The state container. Only the orchestrator's transitions mutate it.
#[derive(Debug)]
struct SessionState {
    phase: Phase,
    credits: UserCredits,
    input: InputModel,
    options: OptionsModel,
    presentation: PresentationState,
    upgrade_prompt: bool,
}

impl SessionState {
    fn new(credits: UserCredits) -> Self {
        Self {
            phase: Phase::Idle,
            credits,
            input: InputModel::new(),
            options: OptionsModel::default(),
            presentation: PresentationState::default(),
            upgrade_prompt: false,
        }
    }

    /// Check the active input and build the provider request from it.
    fn build_request(&self) -> Result<GenerationRequest, ValidationError> {
        let options = self.options.options();
        match self.input.active() {
            GenerationInput::Text(text) if text.trim().is_empty() => {
                Err(ValidationError::MissingText)
            }
            GenerationInput::Text(text) => Ok(GenerationRequest::from_text(text, options)),
            GenerationInput::Image(Some(image)) if !image.is_empty() => {
                Ok(GenerationRequest::from_image(image.clone(), options))
            }
            GenerationInput::Image(_) => Err(ValidationError::MissingImage),
        }
    }
}

/// What the locked part of `generate` decided.
enum Dispatch {
    Invalid(ValidationError),
    Blocked,
    Send(GenerationRequest),
}

/// Drives generation attempts: validate, gate, dispatch, settle.
///
/// The orchestrator owns the session state (credits, input, options,
/// presentation) and exposes read accessors plus the lifecycle actions.
/// Share it behind an `Arc` if several tasks need it.
///
/// A trigger while an attempt is in flight is rejected with
/// [`OrchestratorError::Busy`], whatever the UI does.
pub struct Orchestrator<P: ReplyProvider, L: GenerationListener = NoOpListener> {
    /// Generation backend.
    provider: P,
    /// Lifecycle event sink.
    listener: L,
    /// Session state. Never held across an await.
    state: Mutex<SessionState>,
    /// Loading status cycle.
    announcer: LoadingAnnouncer,
}

impl<P: ReplyProvider> Orchestrator<P> {
    /// Create an orchestrator with default session settings.
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, SessionConfig::default())
    }

    /// Create an orchestrator with the given session settings.
    pub fn with_config(provider: P, config: SessionConfig) -> Self {
        Orchestrator::with_listener(provider, config, NoOpListener)
    }
}

impl<L: GenerationListener> Orchestrator<GeminiProvider, L> {
    /// Create an orchestrator backed by Gemini, configured from environment variables.
    ///
    /// See [`GeminiProvider::from_env`] and [`SessionConfig::from_env`].
    pub fn from_env(listener: L) -> Result<Self, ProviderError> {
        let provider = GeminiProvider::from_env()?;
        Ok(Self::with_listener(provider, SessionConfig::from_env(), listener))
    }
}

impl<P: ReplyProvider, L: GenerationListener> Orchestrator<P, L> {
    /// Create an orchestrator that reports lifecycle events to `listener`.
    pub fn with_listener(provider: P, config: SessionConfig, listener: L) -> Self {
        info!(
            "Orchestrator ready: provider={}, credits={}",
            provider.name(),
            config.initial_credits
        );

        Self {
            provider,
            listener,
            state: Mutex::new(SessionState::new(UserCredits::free(config.initial_credits))),
            announcer: LoadingAnnouncer::new(config.loading_messages, config.loading_interval),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, phases: &[Phase]) {
        for phase in phases {
            self.listener.on_phase_change(*phase);
        }
    }

    /// Get a reference to the provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    // --- Accessors ---

    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    /// The busy flag: true while an attempt awaits the provider.
    pub fn is_busy(&self) -> bool {
        self.lock().phase.is_busy()
    }

    pub fn credits(&self) -> UserCredits {
        self.lock().credits
    }

    pub fn mode(&self) -> InputMode {
        self.lock().input.mode()
    }

    pub fn options(&self) -> GenerationOptions {
        self.lock().options.options()
    }

    pub fn last_result(&self) -> Option<GeneratedResponse> {
        self.lock().presentation.last_result().cloned()
    }

    pub fn last_error(&self) -> Option<String> {
        self.lock().presentation.last_error().map(str::to_string)
    }

    pub fn upgrade_prompt_visible(&self) -> bool {
        self.lock().upgrade_prompt
    }

    /// The loading line currently shown (the first line when idle).
    pub fn loading_status(&self) -> String {
        self.announcer.current()
    }

    /// Follow loading status changes.
    pub fn subscribe_status(&self) -> watch::Receiver<String> {
        self.announcer.subscribe()
    }

    /// Read everything at once.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock();
        SessionSnapshot {
            phase: state.phase,
            credits: state.credits,
            mode: state.input.mode(),
            options: state.options.options(),
            last_result: state.presentation.last_result().cloned(),
            last_error: state.presentation.last_error().map(str::to_string),
            upgrade_prompt_visible: state.upgrade_prompt,
            loading_status: self.announcer.current(),
        }
    }

    // --- Input and options ---

    pub fn set_mode(&self, mode: InputMode) {
        self.lock().input.set_mode(mode);
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.lock().input.set_text(text);
    }

    pub fn set_image(&self, image: Option<ImagePayload>) {
        self.lock().input.set_image(image);
    }

    pub fn set_tone(&self, tone: Tone) {
        self.lock().options.set_tone(tone);
    }

    pub fn set_language(&self, language: Language) {
        self.lock().options.set_language(language);
    }

    pub fn set_use_emojis(&self, use_emojis: bool) {
        self.lock().options.set_use_emojis(use_emojis);
    }

    pub fn set_text_style(&self, text_style: TextStyle) {
        self.lock().options.set_text_style(text_style);
    }

    /// Replace all four options at once.
    pub fn set_options(&self, options: GenerationOptions) {
        self.lock().options = OptionsModel::new(options);
    }

    // --- Upgrade offer ---

    /// Switch to premium and close the upgrade offer. Idempotent.
    pub fn upgrade(&self) -> UserCredits {
        let credits = {
            let mut state = self.lock();
            state.credits = CreditGate::upgrade(state.credits);
            state.upgrade_prompt = false;
            state.credits
        };

        info!("Upgraded to premium");
        self.listener.on_credits_changed(credits);
        credits
    }

    /// Show the upgrade offer without an attempt (e.g. from a header button).
    pub fn open_upgrade_prompt(&self) {
        self.lock().upgrade_prompt = true;
    }

    pub fn dismiss_upgrade_prompt(&self) {
        self.lock().upgrade_prompt = false;
    }

    // --- Lifecycle ---

    /// Run one generation attempt.
    ///
    /// 1. Reject if an attempt is already in flight
    /// 2. Clear the previous error
    /// 3. Validate the active input (message stored on failure)
    /// 4. Consult the credit gate (upgrade offer on failure)
    /// 5. Hide the previous result, start the loading announcer, call the provider
    /// 6. On success charge one credit and store the result; on failure store the
    ///    error and show the previous result again
    ///
    /// Nothing is dispatched and no credit moves unless step 4 passes.
    pub async fn generate(&self) -> Result<GenerationOutcome, OrchestratorError> {
        let dispatch = {
            let mut state = self.lock();
            if state.phase.is_busy() {
                warn!("Generate triggered while a generation is in flight; ignoring");
                return Err(OrchestratorError::Busy);
            }

            state.presentation.clear_error();
            state.phase = Phase::Validating;

            match state.build_request() {
                Err(err) => {
                    state.presentation.set_error(err.to_string());
                    state.phase = Phase::Idle;
                    Dispatch::Invalid(err)
                }
                Ok(_) if !CreditGate::can_attempt(&state.credits) => {
                    state.phase = Phase::Idle;
                    state.upgrade_prompt = true;
                    Dispatch::Blocked
                }
                Ok(request) => {
                    state.presentation.hide_result();
                    state.phase = Phase::Generating;
                    Dispatch::Send(request)
                }
            }
        };

        let request = match dispatch {
            Dispatch::Invalid(err) => {
                debug!("Validation failed: {}", err);
                self.emit(&[Phase::Validating, Phase::Idle]);
                return Err(err.into());
            }
            Dispatch::Blocked => {
                info!("No credits left; offering upgrade");
                self.emit(&[Phase::Validating, Phase::Blocked, Phase::Idle]);
                self.listener.on_upgrade_prompt();
                return Ok(GenerationOutcome::UpgradeRequired);
            }
            Dispatch::Send(request) => request,
        };

        info!(
            "Generating replies via {} ({:?} mode, tone={}, language={})",
            self.provider.name(),
            request.mode(),
            request.tone(),
            request.language()
        );
        let in_flight = InFlight {
            orchestrator: self,
            announcer: Some(self.announcer.start()),
        };
        self.emit(&[Phase::Validating, Phase::Generating]);

        let result = self.provider.generate(request).await;
        in_flight.settle(result)
    }

    /// Apply the provider's answer. Charge and result land under one lock.
    fn finish(
        &self,
        result: Result<GeneratedResponse, ProviderError>,
    ) -> Result<GenerationOutcome, OrchestratorError> {
        let mut state = self.lock();
        match result {
            Ok(response) => {
                let before = state.credits;
                state.credits = CreditGate::charge(before);
                state.presentation.set_result(response.clone());
                state.phase = Phase::Succeeded;
                let after = state.credits;
                drop(state);

                info!(
                    "Generated {} replies; {} credits left",
                    response.replies.len(),
                    after.remaining
                );
                if after != before {
                    self.listener.on_credits_changed(after);
                }
                self.emit(&[Phase::Succeeded]);
                Ok(GenerationOutcome::Generated(response))
            }
            Err(source) => {
                warn!("Provider {} failed: {}", self.provider.name(), source);
                let err = OrchestratorError::provider(source);
                state.presentation.set_error(err.to_string());
                state.presentation.reveal_result();
                state.phase = Phase::Failed;
                drop(state);

                self.emit(&[Phase::Failed]);
                Err(err)
            }
        }
    }

    /// The generate future was dropped mid-flight. Settle as a failure so
    /// the session never stays in `Generating`.
    fn abandon(&self) {
        let mut state = self.lock();
        if !state.phase.is_busy() {
            return;
        }
        state.presentation.set_error(GENERIC_ERROR_MESSAGE);
        state.presentation.reveal_result();
        state.phase = Phase::Failed;
        drop(state);

        warn!("Generation dropped before the provider settled");
        self.emit(&[Phase::Failed]);
    }
}

/// Scope of one in-flight attempt. Holds the announcer; settling or
/// dropping it stops the announcer before the phase leaves `Generating`.
struct InFlight<'a, P: ReplyProvider, L: GenerationListener> {
    orchestrator: &'a Orchestrator<P, L>,
    announcer: Option<AnnouncerGuard>,
}

impl<P: ReplyProvider, L: GenerationListener> InFlight<'_, P, L> {
    fn settle(
        mut self,
        result: Result<GeneratedResponse, ProviderError>,
    ) -> Result<GenerationOutcome, OrchestratorError> {
        drop(self.announcer.take());
        self.orchestrator.finish(result)
    }
}

impl<P: ReplyProvider, L: GenerationListener> Drop for InFlight<'_, P, L> {
    fn drop(&mut self) {
        if let Some(announcer) = self.announcer.take() {
            drop(announcer);
            self.orchestrator.abandon();
        }
    }
}
