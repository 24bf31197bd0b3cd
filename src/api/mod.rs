use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;

pub mod client;

pub use client::{ApiClient, ChatGateway};

/// Request body for the chat endpoints.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatQuery {
    pub query: String,
}

/// One decoded unit of a chat reply, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamChunk {
    /// Partial answer text; the reply is still streaming.
    ContentChunk {
        #[serde(default)]
        content: String,
    },
    /// Final answer text; streaming ends.
    AnswerChunk {
        #[serde(default)]
        content: String,
    },
    ReasoningChunk {
        #[serde(default)]
        content: String,
    },
    ToolCall {
        #[serde(default, alias = "name")]
        tool_name: String,
    },
    /// End-of-stream summary sent by the backend after the last chunk.
    Completion {
        #[serde(default)]
        answer_content: String,
    },
    Error {
        #[serde(default)]
        error: String,
    },
    #[serde(other)]
    Unrecognized,
}

impl StreamChunk {
    /// Decodes one SSE `data:` payload.
    pub fn from_event_data(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    /// Decodes a non-streaming reply body.
    ///
    /// Bodies carrying a `type` decode like stream events. A body without one
    /// but with a string `response` field is the backend's plain reply shape
    /// and becomes an [`StreamChunk::AnswerChunk`].
    pub fn from_reply_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if value.get("type").is_some() {
            return serde_json::from_value(value);
        }
        match value.get("response").and_then(|v| v.as_str()) {
            Some(response) => Ok(StreamChunk::AnswerChunk {
                content: response.to_string(),
            }),
            None => Ok(StreamChunk::Unrecognized),
        }
    }
}

/// Failures surfaced by the API gateway.
#[derive(Debug)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    Transport(reqwest::Error),

    /// The backend answered with a non-success status.
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body was not the expected JSON.
    Decode(serde_json::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(source) => write!(f, "request failed: {source}"),
            ApiError::Status { status, body } => {
                let body = body.trim();
                if body.is_empty() {
                    write!(f, "HTTP error! status: {status}")
                } else {
                    write!(f, "HTTP error! status: {status}: {body}")
                }
            }
            ApiError::Decode(source) => write!(f, "invalid response body: {source}"),
        }
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ApiError::Transport(source) => Some(source),
            ApiError::Status { .. } => None,
            ApiError::Decode(source) => Some(source),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        ApiError::Transport(value)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        ApiError::Decode(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_each_known_chunk_type() {
        let cases = [
            (
                r#"{"type":"content_chunk","content":"Hel","timestamp":"2025-01-01T00:00:00"}"#,
                StreamChunk::ContentChunk {
                    content: "Hel".into(),
                },
            ),
            (
                r#"{"type":"answer_chunk","content":"Hello"}"#,
                StreamChunk::AnswerChunk {
                    content: "Hello".into(),
                },
            ),
            (
                r#"{"type":"reasoning_chunk","content":"thinking"}"#,
                StreamChunk::ReasoningChunk {
                    content: "thinking".into(),
                },
            ),
            (
                r#"{"type":"tool_call","tool_name":"search_documentation"}"#,
                StreamChunk::ToolCall {
                    tool_name: "search_documentation".into(),
                },
            ),
            (
                r#"{"type":"completion","answer_content":"Hello","total_tools":0}"#,
                StreamChunk::Completion {
                    answer_content: "Hello".into(),
                },
            ),
            (
                r#"{"type":"error","error":"boom"}"#,
                StreamChunk::Error {
                    error: "boom".into(),
                },
            ),
        ];

        for (payload, expected) in cases {
            assert_eq!(StreamChunk::from_event_data(payload).expect(payload), expected);
        }
    }

    #[test]
    fn unknown_chunk_types_are_unrecognized() {
        let chunk = StreamChunk::from_event_data(
            r#"{"type":"reasoning_mode_active","content":"Reasoning mode activated"}"#,
        )
        .expect("decodes");
        assert_eq!(chunk, StreamChunk::Unrecognized);
    }

    #[test]
    fn payload_without_type_is_an_error_for_events() {
        assert!(StreamChunk::from_event_data(r#"{"content":"x"}"#).is_err());
        assert!(StreamChunk::from_event_data("not json").is_err());
    }

    #[test]
    fn reply_body_falls_back_to_response_field() {
        let chunk = StreamChunk::from_reply_body(br#"{"response":"Lambda is...","status":"success"}"#)
            .expect("decodes");
        assert_eq!(
            chunk,
            StreamChunk::AnswerChunk {
                content: "Lambda is...".into()
            }
        );

        let typed = StreamChunk::from_reply_body(br#"{"type":"answer_chunk","content":"ok"}"#)
            .expect("decodes");
        assert_eq!(typed, StreamChunk::AnswerChunk { content: "ok".into() });

        let other = StreamChunk::from_reply_body(br#"{"status":"queued"}"#).expect("decodes");
        assert_eq!(other, StreamChunk::Unrecognized);
    }

    #[test]
    fn status_error_display_includes_body() {
        let err = ApiError::Status {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            body: " {\"detail\":\"down\"} ".into(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP error! status: 503 Service Unavailable: {\"detail\":\"down\"}"
        );
    }
}
