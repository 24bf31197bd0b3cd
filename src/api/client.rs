//! HTTP gateway to the agent backend.
//!
//! Streaming replies are read from the body of the original POST; no second
//! request is issued to obtain the event stream.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use memchr::memchr;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::{ApiError, ChatQuery, StreamChunk};
use crate::core::model::{Agent, ChatTarget, Team};
use crate::utils::url::{chat_endpoint, construct_api_url};

const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Outbound calls the chat flow and health monitor depend on.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// `true` when the backend answers its health endpoint with a 2xx.
    /// Connectivity failures are reported as `false`, never as errors.
    async fn check_health(&self) -> bool;

    /// Sends `content` to `target` and feeds every decoded reply chunk to
    /// `on_chunk` in arrival order.
    ///
    /// A non-success status is returned as an error before any chunk is
    /// delivered. Malformed stream payloads are logged and dropped.
    async fn send_message(
        &self,
        content: &str,
        target: &ChatTarget,
        reasoning: bool,
        on_chunk: &mut (dyn FnMut(StreamChunk) + Send),
    ) -> Result<(), ApiError>;
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub async fn get_agents(&self) -> Result<Vec<Agent>, ApiError> {
        let mut agents: Vec<Agent> = self.get_json("agents").await?;
        for agent in &mut agents {
            agent.is_custom = false;
        }
        Ok(agents)
    }

    pub async fn get_teams(&self) -> Result<Vec<Team>, ApiError> {
        let mut teams: Vec<Team> = self.get_json("teams").await?;
        for team in &mut teams {
            team.is_custom = false;
        }
        Ok(teams)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = construct_api_url(&self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ChatGateway for ApiClient {
    async fn check_health(&self) -> bool {
        let url = construct_api_url(&self.base_url, "health");
        match self.client.get(&url).timeout(HEALTH_TIMEOUT).send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                debug!(error = %err, "health check failed to connect");
                false
            }
        }
    }

    async fn send_message(
        &self,
        content: &str,
        target: &ChatTarget,
        reasoning: bool,
        on_chunk: &mut (dyn FnMut(StreamChunk) + Send),
    ) -> Result<(), ApiError> {
        let url = construct_api_url(&self.base_url, &chat_endpoint(target, reasoning));
        info!(%url, reasoning, "sending chat message");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&ChatQuery {
                query: content.to_string(),
            })
            .send()
            .await?;
        let response = ensure_success(response).await?;

        if is_event_stream(&response) {
            read_event_stream(response, on_chunk).await;
            return Ok(());
        }

        let body = response.bytes().await?;
        let chunk = StreamChunk::from_reply_body(&body)?;
        on_chunk(chunk);
        Ok(())
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<no body>".to_string());
    warn!(%status, "backend returned an error status");
    Err(ApiError::Status { status, body })
}

fn is_event_stream(response: &reqwest::Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase().contains("text/event-stream"))
        .unwrap_or(false)
}

fn extract_data_payload(line: &str) -> Option<&str> {
    line.strip_prefix("data:").map(str::trim_start)
}

/// Handles one SSE line. Returns `true` when the stream signalled its end.
fn process_sse_line(line: &str, on_chunk: &mut (dyn FnMut(StreamChunk) + Send)) -> bool {
    let Some(payload) = extract_data_payload(line) else {
        return false;
    };
    if payload == "[DONE]" {
        return true;
    }
    if payload.trim().is_empty() {
        return false;
    }

    match StreamChunk::from_event_data(payload) {
        Ok(chunk) => on_chunk(chunk),
        Err(err) => warn!(error = %err, payload, "dropping malformed stream payload"),
    }
    false
}

async fn read_event_stream(
    response: reqwest::Response,
    on_chunk: &mut (dyn FnMut(StreamChunk) + Send),
) {
    let mut stream = response.bytes_stream();
    let mut buffer: Vec<u8> = Vec::new();

    while let Some(chunk) = stream.next().await {
        let chunk_bytes = match chunk {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(error = %err, "event stream closed with an error");
                return;
            }
        };
        buffer.extend_from_slice(&chunk_bytes);

        while let Some(newline_pos) = memchr(b'\n', &buffer) {
            let should_end = match std::str::from_utf8(&buffer[..newline_pos]) {
                Ok(line) => process_sse_line(line.trim(), on_chunk),
                Err(err) => {
                    warn!(error = %err, "invalid UTF-8 in event stream");
                    false
                }
            };
            buffer.drain(..=newline_pos);
            if should_end {
                debug!("event stream signalled completion");
                return;
            }
        }
    }

    if let Ok(line) = std::str::from_utf8(&buffer) {
        process_sse_line(line.trim(), on_chunk);
    }
    debug!("event stream ended");
}
