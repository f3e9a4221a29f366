use std::fmt;

/// Progress of the single outbound request the kiosk makes (session start).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Busy,
    Failed(String),
}

impl RequestState {
    pub fn is_idle(&self) -> bool {
        matches!(self, RequestState::Idle)
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, RequestState::Busy)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RequestState::Failed(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.is_busy()
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestState::Idle => write!(f, "Idle"),
            RequestState::Busy => write!(f, "Busy"),
            RequestState::Failed(msg) => write!(f, "Error: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestEvent {
    Submit,
    Succeeded,
    Failed(String),
    Reset,
}

impl RequestEvent {
    pub fn apply_to_state(self, current_state: RequestState) -> RequestState {
        match (self, current_state) {
            (RequestEvent::Submit, _) => RequestState::Busy,
            (RequestEvent::Succeeded, RequestState::Busy) => RequestState::Idle,
            (RequestEvent::Failed(msg), RequestState::Busy) => RequestState::Failed(msg),
            // A result without an outstanding request is stale
            (RequestEvent::Succeeded | RequestEvent::Failed(_), state) => state,
            (RequestEvent::Reset, RequestState::Busy) => RequestState::Busy,
            (RequestEvent::Reset, _) => RequestState::Idle,
        }
    }
}
