pub mod client;
pub mod error;
pub mod modal;

pub use client::{SessionClient, SessionPhase, SessionSnapshot};
pub use error::{GENERIC_ERROR_MESSAGE, SessionError};
pub use modal::{ConfirmOutcome, SessionModal};
