use booth_session::{SessionClient, SessionError, SessionPhase};
use std::time::Duration;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

/// Serves one canned HTTP response and hands back the request line it saw.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            request.extend_from_slice(&buf[..n]);
            if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();

        String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });

    (format!("http://{addr}"), handle)
}

#[tokio::test]
async fn test_start_posts_to_session_endpoint() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"ok":true,"state":{"status":"in_progress","started_at":"2026-10-18T09:30:00"}}"#,
    )
    .await;
    let client = SessionClient::new(base_url, Duration::from_secs(5)).unwrap();

    let started = client.start().await.unwrap();

    assert_eq!(started.status.as_deref(), Some("in_progress"));
    assert_eq!(server.await.unwrap(), "POST /session/start HTTP/1.1");
}

#[tokio::test]
async fn test_server_error_carries_message() {
    let (base_url, _server) =
        serve_once("500 Internal Server Error", r#"{"message":"Camera offline"}"#).await;
    let client = SessionClient::new(base_url, Duration::from_secs(5)).unwrap();

    let err = client.start().await.unwrap_err();

    assert_eq!(err.user_message(), "Camera offline");
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    // Bind then drop to get a port nobody is listening on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = SessionClient::new(format!("http://{addr}"), Duration::from_secs(5)).unwrap();

    let err = client.start().await.unwrap_err();

    assert!(matches!(err, SessionError::Transport(_)));
    assert_eq!(err.user_message(), booth_session::GENERIC_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_reset_posts_to_reset_endpoint() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"ok":true,"state":{"status":"idle","started_at":null}}"#,
    )
    .await;
    let client = SessionClient::new(base_url, Duration::from_secs(5)).unwrap();

    let state = client.reset().await.unwrap();

    assert_eq!(state.phase(), SessionPhase::Idle);
    assert_eq!(server.await.unwrap(), "POST /session/reset HTTP/1.1");
}

#[tokio::test]
async fn test_status_reports_finished_session() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"ok":true,"state":{"status":"completed","completed_at":"2026-10-18T09:35:00","asset_url":null}}"#,
    )
    .await;
    let client = SessionClient::new(base_url, Duration::from_secs(5)).unwrap();

    let state = client.status().await.unwrap();

    assert!(state.phase().is_over());
    assert_eq!(state.completed_at.as_deref(), Some("2026-10-18T09:35:00"));
    assert_eq!(server.await.unwrap(), "GET /session/status HTTP/1.1");
}

#[tokio::test]
async fn test_start_conflict_while_session_running() {
    let (base_url, _server) = serve_once(
        "409 Conflict",
        r#"{"ok":false,"state":{"status":"in_progress"},"message":"Session already in progress"}"#,
    )
    .await;
    let client = SessionClient::new(base_url, Duration::from_secs(5)).unwrap();

    let err = client.start().await.unwrap_err();

    assert_eq!(err.user_message(), "Session already in progress");
}
