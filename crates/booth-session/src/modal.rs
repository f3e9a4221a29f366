use shared::{RequestEvent, RequestState};

/// Result of feeding a session-start answer into the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The session started; the modal closed.
    Started,
    /// The request failed; the modal stays open showing the message.
    Failed(String),
    /// No request was outstanding, so the answer was dropped.
    Stale,
}

/// Confirmation dialog guarding the session-start request.
#[derive(Debug, Clone, Default)]
pub struct SessionModal {
    open: bool,
    request: RequestState,
}

impl SessionModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_busy(&self) -> bool {
        self.request.is_busy()
    }

    pub fn error(&self) -> Option<&str> {
        self.request.error_message()
    }

    /// Opens the dialog with a clean slate. Returns `false` if it was already open.
    pub fn open(&mut self) -> bool {
        if self.open {
            return false;
        }

        self.open = true;
        self.request = RequestEvent::Reset.apply_to_state(std::mem::take(&mut self.request));
        true
    }

    /// Closes the dialog. Refused while a request is in flight.
    pub fn close(&mut self) -> bool {
        if !self.open || self.request.is_busy() {
            return false;
        }

        self.open = false;
        true
    }

    /// Accepts a confirm press. Returns `true` when the caller must send the request.
    pub fn confirm(&mut self) -> bool {
        if !self.open || !self.request.can_submit() {
            return false;
        }

        self.request = RequestEvent::Submit.apply_to_state(std::mem::take(&mut self.request));
        true
    }

    pub fn finish(&mut self, result: Result<(), String>) -> ConfirmOutcome {
        if !self.open || !self.request.is_busy() {
            return ConfirmOutcome::Stale;
        }

        let current = std::mem::take(&mut self.request);
        match result {
            Ok(()) => {
                self.request = RequestEvent::Succeeded.apply_to_state(current);
                self.open = false;
                ConfirmOutcome::Started
            }
            Err(message) => {
                self.request = RequestEvent::Failed(message.clone()).apply_to_state(current);
                ConfirmOutcome::Failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_is_idempotent() {
        let mut modal = SessionModal::new();

        assert!(modal.open());
        assert!(!modal.open());
        assert!(modal.is_open());
    }

    #[test]
    fn test_confirm_requires_open_modal() {
        let mut modal = SessionModal::new();
        assert!(!modal.confirm());
    }

    #[test]
    fn test_concurrent_confirms_ignored() {
        let mut modal = SessionModal::new();
        modal.open();

        assert!(modal.confirm());
        assert!(modal.is_busy());
        assert!(!modal.confirm());
        assert!(!modal.close());
    }

    #[test]
    fn test_failure_keeps_modal_open() {
        let mut modal = SessionModal::new();
        modal.open();
        modal.confirm();

        let outcome = modal.finish(Err("Camera offline".to_string()));

        assert_eq!(outcome, ConfirmOutcome::Failed("Camera offline".to_string()));
        assert!(modal.is_open());
        assert!(!modal.is_busy());
        assert_eq!(modal.error(), Some("Camera offline"));

        // User can try again
        assert!(modal.confirm());
        assert_eq!(modal.error(), None);
    }

    #[test]
    fn test_success_closes_modal() {
        let mut modal = SessionModal::new();
        modal.open();
        modal.confirm();

        assert_eq!(modal.finish(Ok(())), ConfirmOutcome::Started);
        assert!(!modal.is_open());
        assert_eq!(modal.finish(Ok(())), ConfirmOutcome::Stale);
    }

    #[test]
    fn test_reopening_clears_previous_error() {
        let mut modal = SessionModal::new();
        modal.open();
        modal.confirm();
        modal.finish(Err("nope".to_string()));
        modal.close();

        modal.open();

        assert_eq!(modal.error(), None);
    }
}
