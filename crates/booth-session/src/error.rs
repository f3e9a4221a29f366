use thiserror::Error;

/// Shown when the backend gives no usable explanation.
pub const GENERIC_ERROR_MESSAGE: &str = "Unable to start the session. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session service unreachable: {0}")]
    Transport(String),
    #[error("Session service returned {status}")]
    Status { status: u16, message: Option<String> },
    #[error("Session service returned {status} with an unreadable body")]
    MalformedBody { status: u16 },
    #[error("Invalid session service address: {0}")]
    InvalidUrl(String),
}

impl SessionError {
    /// Message supplied by the backend, if it sent a non-blank one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            SessionError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message.trim()),
            _ => None,
        }
    }

    /// The single string shown to the kiosk user for this failure.
    pub fn user_message(&self) -> String {
        self.user_message_or(GENERIC_ERROR_MESSAGE)
    }

    pub fn user_message_or(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

impl From<reqwest::Error> for SessionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            SessionError::InvalidUrl(err.to_string())
        } else {
            SessionError::Transport(err.to_string())
        }
    }
}
