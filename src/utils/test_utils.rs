//! Shared fixtures for unit tests: an in-process HTTP server and a scripted
//! [`ChatGateway`].

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::api::{ApiError, ChatGateway, StreamChunk};
use crate::core::model::ChatTarget;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    /// Bytes promised by `content-length` but never sent.
    pub missing_bytes: usize,
}

impl MockResponse {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
            missing_bytes: 0,
        }
    }

    pub fn event_stream(events: &[&str]) -> Self {
        let body = events
            .iter()
            .map(|event| format!("data: {event}\n\n"))
            .collect::<String>();
        Self {
            status: 200,
            content_type: "Text/Event-Stream; Charset=UTF-8",
            body,
            missing_bytes: 0,
        }
    }

    /// Advertises `missing` more body bytes than are written, so the client
    /// sees the connection close mid-body.
    pub fn cut_short(mut self, missing: usize) -> Self {
        self.missing_bytes = missing;
        self
    }

    fn into_http(self) -> String {
        let reason = match self.status {
            200 => "OK",
            404 => "Not Found",
            500 => "Internal Server Error",
            503 => "Service Unavailable",
            _ => "Status",
        };
        format!(
            "HTTP/1.1 {} {}\r\ncontent-type: {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            self.status,
            reason,
            self.content_type,
            self.body.len() + self.missing_bytes,
            self.body
        )
    }
}

/// Serves scripted responses in order, then `500` for anything further.
pub struct MockServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_mock_server(responses: Vec<MockResponse>) -> MockServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");
    let requests: Arc<Mutex<Vec<CapturedRequest>>> = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&requests);
    let mut scripted: VecDeque<MockResponse> = responses.into();

    let handle = tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let Ok(request) = read_http_request(&mut stream).await else {
                continue;
            };
            captured.lock().expect("requests lock").push(request);

            let response = scripted
                .pop_front()
                .unwrap_or_else(|| MockResponse::json(500, r#"{"detail":"unscripted"}"#));
            let _ = stream.write_all(response.into_http().as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    MockServer {
        base_url: format!("http://{addr}/api"),
        requests,
        handle,
    }
}

async fn read_http_request(stream: &mut TcpStream) -> Result<CapturedRequest, String> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        if let Some(pos) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
            break pos;
        }
        let read = stream
            .read(&mut chunk)
            .await
            .map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP headers".to_string());
        }
        buffer.extend_from_slice(&chunk[..read]);
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buffer[header_end + 4..].to_vec();
    while body.len() < content_length {
        let read = stream
            .read(&mut chunk)
            .await
            .map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP body".to_string());
        }
        body.extend_from_slice(&chunk[..read]);
    }
    body.truncate(content_length);

    Ok(CapturedRequest {
        method,
        path,
        headers,
        body,
    })
}

/// A client that ignores proxy environment variables.
pub fn test_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("test client should build")
}

/// Outcome the scripted gateway produces for one `send_message` call.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Chunks(Vec<StreamChunk>),
    Status(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentRequest {
    pub content: String,
    pub target: ChatTarget,
    pub reasoning: bool,
}

/// In-memory [`ChatGateway`] that replays scripted replies and records calls.
#[derive(Default)]
pub struct MockGateway {
    replies: Mutex<VecDeque<ScriptedReply>>,
    health: Mutex<VecDeque<bool>>,
    sent: Mutex<Vec<SentRequest>>,
    health_checks: Mutex<usize>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, reply: ScriptedReply) -> Self {
        self.replies.lock().expect("replies lock").push_back(reply);
        self
    }

    pub fn with_health(self, results: &[bool]) -> Self {
        self.health
            .lock()
            .expect("health lock")
            .extend(results.iter().copied());
        self
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().expect("sent lock").clone()
    }

    pub fn health_checks(&self) -> usize {
        *self.health_checks.lock().expect("health lock")
    }
}

#[async_trait]
impl ChatGateway for MockGateway {
    async fn check_health(&self) -> bool {
        *self.health_checks.lock().expect("health lock") += 1;
        self.health
            .lock()
            .expect("health lock")
            .pop_front()
            .unwrap_or(false)
    }

    async fn send_message(
        &self,
        content: &str,
        target: &ChatTarget,
        reasoning: bool,
        on_chunk: &mut (dyn FnMut(StreamChunk) + Send),
    ) -> Result<(), ApiError> {
        self.sent.lock().expect("sent lock").push(SentRequest {
            content: content.to_string(),
            target: target.clone(),
            reasoning,
        });
        let reply = self
            .replies
            .lock()
            .expect("replies lock")
            .pop_front()
            .unwrap_or(ScriptedReply::Chunks(Vec::new()));
        match reply {
            ScriptedReply::Chunks(chunks) => {
                for chunk in chunks {
                    on_chunk(chunk);
                }
                Ok(())
            }
            ScriptedReply::Status(code) => Err(ApiError::Status {
                status: reqwest::StatusCode::from_u16(code)
                    .unwrap_or(reqwest::StatusCode::INTERNAL_SERVER_ERROR),
                body: String::new(),
            }),
        }
    }
}
