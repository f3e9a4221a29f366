use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::error::SessionError;

/// Where the backend says the current session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    Idle,
    InProgress,
    Completed,
    Failed,
    #[default]
    Unknown,
}

impl SessionPhase {
    fn parse(status: Option<&str>) -> Self {
        match status {
            Some("idle") => SessionPhase::Idle,
            Some("in_progress") => SessionPhase::InProgress,
            Some("completed") => SessionPhase::Completed,
            Some("error") => SessionPhase::Failed,
            _ => SessionPhase::Unknown,
        }
    }

    /// The booth is no longer busy with a session.
    pub fn is_over(self) -> bool {
        matches!(
            self,
            SessionPhase::Idle | SessionPhase::Completed | SessionPhase::Failed
        )
    }
}

/// Session state as last reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub status: Option<String>,
    pub started_at: Option<String>,
    pub completed_at: Option<String>,
    pub error: Option<String>,
}

impl SessionSnapshot {
    pub fn phase(&self) -> SessionPhase {
        SessionPhase::parse(self.status.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct StateResponse {
    #[serde(default)]
    state: Option<StateBody>,
}

#[derive(Debug, Deserialize)]
struct StateBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    started_at: Option<String>,
    #[serde(default)]
    completed_at: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.message.or_else(|| {
            self.detail
                .as_ref()
                .and_then(|detail| detail.as_str())
                .map(str::to_owned)
        })
    }
}

/// Client for the backend session service.
#[derive(Clone, Debug)]
pub struct SessionClient {
    client: Client,
    base_url: String,
}

impl SessionClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SessionError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        tracing::info!("session client targeting {base_url}");

        Ok(Self { client, base_url })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/session/{path}", self.base_url)
    }

    /// `POST {base_url}/session/start` with an empty body.
    pub async fn start(&self) -> Result<SessionSnapshot, SessionError> {
        let result = self.send(self.client.post(self.endpoint("start"))).await;
        match &result {
            Ok(state) => tracing::info!(
                "session started (status {:?}, at {:?})",
                state.status,
                state.started_at
            ),
            Err(err) => tracing::warn!("session start failed: {err}"),
        }
        result
    }

    /// `POST {base_url}/session/reset`: puts the backend back to idle so the
    /// next start is accepted.
    pub async fn reset(&self) -> Result<SessionSnapshot, SessionError> {
        let result = self.send(self.client.post(self.endpoint("reset"))).await;
        if let Err(err) = &result {
            tracing::warn!("session reset failed: {err}");
        }
        result
    }

    /// `GET {base_url}/session/status`.
    pub async fn status(&self) -> Result<SessionSnapshot, SessionError> {
        self.send(self.client.get(self.endpoint("status"))).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<SessionSnapshot, SessionError> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("{} answered {status}", response.url());
        let body = response.bytes().await?;

        interpret_response(status, &body)
    }
}

/// Maps a raw HTTP answer from the session service to an outcome.
///
/// Any 2xx is a success, even with a body that does not parse.
pub fn interpret_response(
    status: StatusCode,
    body: &[u8],
) -> Result<SessionSnapshot, SessionError> {
    if status.is_success() {
        let snapshot = serde_json::from_slice::<StateResponse>(body)
            .ok()
            .and_then(|response| response.state)
            .map(|state| SessionSnapshot {
                status: state.status,
                started_at: state.started_at,
                completed_at: state.completed_at,
                error: state.error,
            })
            .unwrap_or_default();
        return Ok(snapshot);
    }

    let status = status.as_u16();
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(SessionError::Status {
            status,
            message: None,
        });
    }

    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(error) => Err(SessionError::Status {
            status,
            message: error.into_message(),
        }),
        Err(_) => Err(SessionError::MalformedBody { status }),
    }
}
