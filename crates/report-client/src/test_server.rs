//! One-shot HTTP server for exercising the client against canned responses.
//!
//! Serves an axum router on a loopback port, records the first request and
//! answers it with the configured response, then shuts down. Enabled for
//! dependents through the `test-helpers` feature.

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Response the server answers with
#[derive(Debug, Clone)]
pub struct CannedResponse {
    status: u16,
    content_type: &'static str,
    body: String,
}

impl CannedResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.into(),
        }
    }
}

impl IntoResponse for CannedResponse {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

/// What the client sent
#[derive(Debug, Clone, Default)]
pub struct RecordedRequest {
    pub method: String,
    /// Path without the query string, e.g. `/api/course-reports`
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json_body(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

/// Handle to a running one-shot server
pub struct OneShotServer {
    /// Base URL including the `/api` prefix
    pub base_url: String,
    request_rx: oneshot::Receiver<RecordedRequest>,
}

impl OneShotServer {
    /// Wait for the recorded request. Returns an empty request if the
    /// client never connected.
    pub async fn request(self) -> RecordedRequest {
        self.request_rx.await.unwrap_or_default()
    }
}

#[derive(Clone)]
struct ServerState {
    response: CannedResponse,
    request_tx: Arc<Mutex<Option<oneshot::Sender<RecordedRequest>>>>,
    done_tx: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

async fn record(
    State(state): State<ServerState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> CannedResponse {
    let recorded = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        headers: headers
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect(),
        body: body.to_vec(),
    };

    if let Some(tx) = state.request_tx.lock().ok().and_then(|mut slot| slot.take()) {
        let _ = tx.send(recorded);
    }
    if let Some(tx) = state.done_tx.lock().ok().and_then(|mut slot| slot.take()) {
        let _ = tx.send(());
    }

    state.response
}

/// Start a server that answers a single request with `response`
pub async fn spawn_one_shot(response: CannedResponse) -> OneShotServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("test listener address");
    let (request_tx, request_rx) = oneshot::channel();
    let (done_tx, done_rx) = oneshot::channel::<()>();

    let state = ServerState {
        response,
        request_tx: Arc::new(Mutex::new(Some(request_tx))),
        done_tx: Arc::new(Mutex::new(Some(done_tx))),
    };
    let app = Router::new().fallback(record).with_state(state);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = done_rx.await;
            })
            .await;
    });

    OneShotServer {
        base_url: format!("http://{}/api", addr),
        request_rx,
    }
}

/// Base URL of a port nothing listens on
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("test listener address");
    drop(listener);
    format!("http://{}/api", addr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    #[tokio::test]
    async fn test_chunked_body_recorded_whole() {
        let server = spawn_one_shot(CannedResponse::json(201, json!({"id": 1}))).await;
        let host = server
            .base_url
            .trim_start_matches("http://")
            .trim_end_matches("/api")
            .to_string();

        let mut stream = TcpStream::connect(&host).await.unwrap();
        let first = r#"{"course_id":42,"#;
        let second = r#""reason":"spam"}"#;
        let raw = format!(
            "POST /api/course-reports HTTP/1.1\r\nHost: {host}\r\n\
             Content-Type: application/json\r\nTransfer-Encoding: chunked\r\n\
             Connection: close\r\n\r\n\
             {:x}\r\n{first}\r\n{:x}\r\n{second}\r\n0\r\n\r\n",
            first.len(),
            second.len(),
        );
        stream.write_all(raw.as_bytes()).await.unwrap();

        let mut reply = Vec::new();
        stream.read_to_end(&mut reply).await.unwrap();
        assert!(String::from_utf8_lossy(&reply).starts_with("HTTP/1.1 201"));

        let request = server.request().await;
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/api/course-reports");
        assert_eq!(request.header("transfer-encoding"), Some("chunked"));
        assert_eq!(
            request.json_body(),
            json!({"course_id": 42, "reason": "spam"})
        );
    }

    #[tokio::test]
    async fn test_canned_status_and_content_type() {
        let server = spawn_one_shot(CannedResponse::text(502, "Bad Gateway")).await;
        let url = format!("{}/anything", server.base_url);

        let resp = reqwest::Client::new().get(&url).send().await.unwrap();
        assert_eq!(resp.status().as_u16(), 502);
        assert_eq!(
            resp.headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok()),
            Some("text/plain")
        );
        assert_eq!(resp.text().await.unwrap(), "Bad Gateway");

        let request = server.request().await;
        assert_eq!(request.method, "GET");
        assert!(request.body.is_empty());
    }
}
