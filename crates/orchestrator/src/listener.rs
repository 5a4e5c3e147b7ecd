//! Listener trait for lifecycle events, and stock implementations.

use crate::credits::UserCredits;
use crate::orchestrator::Phase;

/// Receives lifecycle events from the orchestrator.
///
/// Abstracted to support different front ends (terminal, GUI, tests).
/// Callbacks run after the orchestrator has released its state lock, so
/// they may read the orchestrator freely. Every method defaults to a no-op.
pub trait GenerationListener: Send + Sync {
    /// The orchestrator entered `phase`.
    fn on_phase_change(&self, phase: Phase) {
        let _ = phase;
    }

    /// An attempt was blocked for lack of credits; show the upgrade offer.
    fn on_upgrade_prompt(&self) {}

    /// Credits changed (charge after success, or upgrade).
    fn on_credits_changed(&self, credits: UserCredits) {
        let _ = credits;
    }
}

/// A listener that discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoOpListener;

impl GenerationListener for NoOpListener {}

/// A listener that logs all events.
#[derive(Debug, Clone, Default)]
pub struct LoggingListener;

impl GenerationListener for LoggingListener {
    fn on_phase_change(&self, phase: Phase) {
        tracing::info!("Generation phase: {:?}", phase);
    }

    fn on_upgrade_prompt(&self) {
        tracing::info!("Out of credits, showing upgrade offer");
    }

    fn on_credits_changed(&self, credits: UserCredits) {
        tracing::info!(
            "Credits: {} remaining (premium: {})",
            credits.remaining,
            credits.is_premium
        );
    }
}

impl<L: GenerationListener + ?Sized> GenerationListener for std::sync::Arc<L> {
    fn on_phase_change(&self, phase: Phase) {
        (**self).on_phase_change(phase)
    }

    fn on_upgrade_prompt(&self) {
        (**self).on_upgrade_prompt()
    }

    fn on_credits_changed(&self, credits: UserCredits) {
        (**self).on_credits_changed(credits)
    }
}
