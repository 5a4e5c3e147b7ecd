//! What the rendering layer shows: the last result and the last error.

use reply_core::GeneratedResponse;

/// Last successful result and last error, retained independently.
///
/// An error does not clear an earlier result; a caller can show both or
/// just the error. While a generation is in flight the result is hidden,
/// then either replaced (success) or shown again (failure). Only the
/// orchestrator mutates this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentationState {
    last_result: Option<GeneratedResponse>,
    last_error: Option<String>,
    hidden: bool,
}

impl PresentationState {
    pub fn last_result(&self) -> Option<&GeneratedResponse> {
        if self.hidden {
            return None;
        }
        self.last_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True while the initial empty hero state would be shown.
    pub fn is_empty(&self) -> bool {
        self.last_result().is_none()
    }

    pub(crate) fn set_result(&mut self, response: GeneratedResponse) {
        self.last_result = Some(response);
        self.hidden = false;
    }

    /// Keep the result out of view until the next [`reveal_result`](Self::reveal_result)
    /// or [`set_result`](Self::set_result).
    pub(crate) fn hide_result(&mut self) {
        self.hidden = true;
    }

    pub(crate) fn reveal_result(&mut self) {
        self.hidden = false;
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub(crate) fn clear_error(&mut self) {
        self.last_error = None;
    }
}
