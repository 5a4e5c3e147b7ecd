//! Free-use credits and the gate that spends them.

use serde::{Deserialize, Serialize};

/// Credits granted by the premium upgrade.
pub const PREMIUM_CREDITS: u32 = 9999;

/// Free generations for a new session.
pub const DEFAULT_INITIAL_CREDITS: u32 = 5;

/// Remaining generation allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCredits {
    pub remaining: u32,
    pub is_premium: bool,
}

impl UserCredits {
    /// A non-premium allowance.
    pub fn free(remaining: u32) -> Self {
        Self {
            remaining,
            is_premium: false,
        }
    }

    /// The premium state.
    pub fn premium() -> Self {
        Self {
            remaining: PREMIUM_CREDITS,
            is_premium: true,
        }
    }
}

impl Default for UserCredits {
    fn default() -> Self {
        Self::free(DEFAULT_INITIAL_CREDITS)
    }
}

/// Decides whether an attempt may proceed and settles its cost.
///
/// The gate is consulted before a request is dispatched, and `charge`
/// runs only after the provider has succeeded.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreditGate;

impl CreditGate {
    /// Premium users always pass; everyone else needs a credit left.
    pub fn can_attempt(credits: &UserCredits) -> bool {
        credits.is_premium || credits.remaining > 0
    }

    /// Spend one credit for a successful generation.
    ///
    /// Premium credits are never touched. The count never drops below zero.
    pub fn charge(credits: UserCredits) -> UserCredits {
        if credits.is_premium {
            return credits;
        }
        UserCredits {
            remaining: credits.remaining.saturating_sub(1),
            ..credits
        }
    }

    /// Switch to premium. Idempotent.
    pub fn upgrade(_credits: UserCredits) -> UserCredits {
        UserCredits::premium()
    }
}
