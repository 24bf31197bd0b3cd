//! Send-message orchestration.
//!
//! The flow is split so the terminal loop can run the network half on a
//! background task: [`begin_send`] validates and stages the transcript,
//! [`apply_chunk`] routes each decoded chunk, and [`finish_send`] settles the
//! in-flight state. [`send_message`] composes the three around a gateway call.

use tracing::{debug, info, warn};

use crate::api::{ApiError, ChatGateway, StreamChunk};
use crate::core::message::{MessageId, MessagePatch, NewMessage};
use crate::core::model::ChatTarget;
use crate::core::session::SessionStore;

pub const NO_SELECTION_NOTICE: &str = "Please select an agent or team before sending a message.";
pub const FAILURE_NOTICE: &str =
    "Sorry, an error occurred while processing your message. Please try again.";

/// A staged send: the user message and placeholder are already in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    pub content: String,
    pub target: ChatTarget,
    pub reasoning: bool,
    /// The streaming placeholder that receives the reply.
    pub response_id: MessageId,
}

/// Validates `input` and stages the transcript for a send.
///
/// Returns `None` without touching the store for blank input or while another
/// send is in flight. Without a selection a single system notice is appended
/// and `None` is returned.
pub fn begin_send(store: &mut SessionStore, input: &str) -> Option<SendRequest> {
    let content = input.trim();
    if content.is_empty() || store.is_sending() {
        return None;
    }

    let Some(target) = store.target() else {
        store.add_message(NewMessage::system(NO_SELECTION_NOTICE));
        return None;
    };
    let author = store.selected_name().unwrap_or_else(|| target.id()).to_string();

    store.add_message(NewMessage::user(content));
    let response_id = store.add_message(NewMessage::placeholder(author));
    store.set_sending(true);

    info!(target = target.id(), reasoning = store.reasoning_enabled(), "sending message");
    Some(SendRequest {
        content: content.to_string(),
        target,
        reasoning: store.reasoning_enabled(),
        response_id,
    })
}

/// Routes one decoded chunk into the transcript.
pub fn apply_chunk(store: &mut SessionStore, response_id: &MessageId, chunk: StreamChunk) {
    match chunk {
        StreamChunk::ContentChunk { content } => {
            store.update_message(response_id, MessagePatch::content(content, true));
        }
        StreamChunk::AnswerChunk { content } => {
            store.update_message(response_id, MessagePatch::content(content, false));
        }
        StreamChunk::ReasoningChunk { content } => {
            store.add_message(NewMessage::reasoning(content));
        }
        StreamChunk::ToolCall { tool_name } => {
            store.add_message(NewMessage::tool_call(&tool_name));
        }
        StreamChunk::Completion { answer_content } => {
            let unanswered = store
                .message(response_id)
                .is_some_and(|message| message.content.is_empty());
            let patch = if unanswered && !answer_content.is_empty() {
                MessagePatch::content(answer_content, false)
            } else {
                MessagePatch::finish_streaming()
            };
            store.update_message(response_id, patch);
        }
        StreamChunk::Error { error } => {
            warn!(%error, "backend reported a stream error");
            store.add_message(NewMessage::system(format!("Error: {error}")));
        }
        StreamChunk::Unrecognized => {
            debug!("ignoring unrecognized chunk");
        }
    }
}

/// Settles a send. A failure appends the generic notice. The in-flight flag
/// is always cleared, as is a placeholder left streaming.
pub fn finish_send(store: &mut SessionStore, response_id: &MessageId, failure: Option<&str>) {
    if let Some(reason) = failure {
        warn!(reason, "send failed");
        store.add_message(NewMessage::system(FAILURE_NOTICE));
    }
    if store
        .message(response_id)
        .is_some_and(|message| message.is_streaming)
    {
        store.update_message(response_id, MessagePatch::finish_streaming());
    }
    store.set_sending(false);
}

/// Runs the whole flow against `gateway`. Chunks are applied as they arrive.
/// Returns the gateway error, if any, after the failure notice is recorded.
pub async fn send_message(
    store: &mut SessionStore,
    gateway: &dyn ChatGateway,
    input: &str,
) -> Result<(), ApiError> {
    let Some(request) = begin_send(store, input) else {
        return Ok(());
    };

    let response_id = request.response_id.clone();
    let result = {
        let mut on_chunk = |chunk: StreamChunk| apply_chunk(store, &response_id, chunk);
        gateway
            .send_message(
                &request.content,
                &request.target,
                request.reasoning,
                &mut on_chunk,
            )
            .await
    };

    match result {
        Ok(()) => {
            finish_send(store, &response_id, None);
            Ok(())
        }
        Err(err) => {
            finish_send(store, &response_id, Some(&err.to_string()));
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::{MessageKind, SYSTEM_AUTHOR};
    use crate::utils::test_utils::{MockGateway, ScriptedReply};

    fn content(text: &str) -> StreamChunk {
        StreamChunk::ContentChunk {
            content: text.into(),
        }
    }

    fn answer(text: &str) -> StreamChunk {
        StreamChunk::AnswerChunk {
            content: text.into(),
        }
    }

    #[tokio::test]
    async fn no_selection_appends_one_notice_without_network() {
        let gateway = MockGateway::new();
        let mut store = SessionStore::new();

        let result = send_message(&mut store, &gateway, "hello").await;

        assert!(result.is_ok());
        assert!(gateway.sent().is_empty());
        assert_eq!(store.messages().len(), 1);
        let notice = &store.messages()[0];
        assert_eq!(notice.agent_name.as_deref(), Some(SYSTEM_AUTHOR));
        assert_eq!(notice.content, NO_SELECTION_NOTICE);
        assert!(!store.is_sending());
    }

    #[test]
    fn blank_input_and_in_flight_sends_are_rejected() {
        let mut store = SessionStore::new();
        store.set_selected_agent(Some("aws-docs"));

        assert!(begin_send(&mut store, "   \n").is_none());
        assert!(store.messages().is_empty());

        let first = begin_send(&mut store, "one").expect("first send staged");
        assert!(store.is_sending());
        assert!(begin_send(&mut store, "two").is_none());
        assert_eq!(store.messages().len(), 2);

        finish_send(&mut store, &first.response_id, None);
        assert!(!store.is_sending());
    }

    #[test]
    fn begin_send_trims_and_stages_placeholder() {
        let mut store = SessionStore::new();
        store.set_selected_team(Some("mcp-route"));
        store.set_reasoning(true);

        let request = begin_send(&mut store, "  hi there  ").expect("staged");

        assert_eq!(request.content, "hi there");
        assert_eq!(request.target, ChatTarget::Team("mcp-route".into()));
        assert!(request.reasoning);
        let messages = store.messages();
        assert_eq!(messages[0].kind, MessageKind::User);
        assert_eq!(messages[0].content, "hi there");
        assert_eq!(messages[1].id, request.response_id);
        assert!(messages[1].is_streaming);
        assert_eq!(messages[1].agent_name.as_deref(), store.selected_name());
    }

    #[tokio::test]
    async fn content_then_answer_leaves_one_final_entry() {
        let gateway = MockGateway::new().with_reply(ScriptedReply::Chunks(vec![
            content("Hel"),
            content("Hello"),
            answer("Hello, world"),
        ]));
        let mut store = SessionStore::new();
        store.set_selected_agent(Some("arxiv"));

        send_message(&mut store, &gateway, "greet me")
            .await
            .expect("send succeeds");

        let agent_entries: Vec<_> = store
            .messages()
            .iter()
            .filter(|m| m.kind == MessageKind::Agent)
            .collect();
        assert_eq!(agent_entries.len(), 1);
        assert_eq!(agent_entries[0].content, "Hello, world");
        assert!(!agent_entries[0].is_streaming);
        assert_eq!(agent_entries[0].agent_name.as_deref(), Some("Arxiv Agent"));
    }

    #[tokio::test]
    async fn each_reasoning_chunk_gets_its_own_entry() {
        let gateway = MockGateway::new().with_reply(ScriptedReply::Chunks(vec![
            StreamChunk::ReasoningChunk {
                content: "step 1".into(),
            },
            StreamChunk::ReasoningChunk {
                content: "step 2".into(),
            },
            StreamChunk::ReasoningChunk {
                content: "step 3".into(),
            },
            answer("done"),
        ]));
        let mut store = SessionStore::new();
        store.set_selected_agent(Some("arxiv"));
        store.set_reasoning(true);

        send_message(&mut store, &gateway, "think").await.expect("ok");

        let reasoning: Vec<_> = store
            .messages()
            .iter()
            .filter(|m| m.kind == MessageKind::Reasoning)
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(reasoning, ["step 1", "step 2", "step 3"]);
        assert!(gateway.sent()[0].reasoning);
    }

    #[tokio::test]
    async fn tool_call_becomes_a_notice() {
        let gateway = MockGateway::new().with_reply(ScriptedReply::Chunks(vec![
            StreamChunk::ToolCall {
                tool_name: "duckduckgo_search".into(),
            },
            StreamChunk::Unrecognized,
            answer("found it"),
        ]));
        let mut store = SessionStore::new();
        store.set_selected_agent(Some("aws-docs"));

        send_message(&mut store, &gateway, "search").await.expect("ok");

        let tool = store
            .messages()
            .iter()
            .find(|m| m.kind == MessageKind::Tool)
            .expect("tool notice");
        assert_eq!(tool.content, "Using tool: duckduckgo_search");
        assert_eq!(store.messages().len(), 3);
    }

    #[tokio::test]
    async fn gateway_failure_appends_generic_notice_and_clears_flags() {
        let gateway = MockGateway::new().with_reply(ScriptedReply::Status(500));
        let mut store = SessionStore::new();
        store.set_selected_agent(Some("aws-docs"));

        let result = send_message(&mut store, &gateway, "hello").await;

        assert!(matches!(result, Err(ApiError::Status { .. })));
        assert!(!store.is_sending());
        let last = store.messages().last().expect("notice");
        assert_eq!(last.content, FAILURE_NOTICE);
        assert!(last.is_system());
        assert!(store.messages().iter().all(|m| !m.is_streaming));
    }

    #[test]
    fn completion_fills_only_unanswered_placeholders() {
        let mut store = SessionStore::new();
        store.set_selected_agent(Some("aws-docs"));
        let request = begin_send(&mut store, "q").expect("staged");

        apply_chunk(
            &mut store,
            &request.response_id,
            StreamChunk::Completion {
                answer_content: "from completion".into(),
            },
        );
        let message = store.message(&request.response_id).expect("placeholder");
        assert_eq!(message.content, "from completion");
        assert!(!message.is_streaming);

        apply_chunk(&mut store, &request.response_id, answer("real answer"));
        apply_chunk(
            &mut store,
            &request.response_id,
            StreamChunk::Completion {
                answer_content: "ignored".into(),
            },
        );
        let message = store.message(&request.response_id).expect("placeholder");
        assert_eq!(message.content, "real answer");
    }

    #[test]
    fn stream_error_chunk_becomes_system_notice() {
        let mut store = SessionStore::new();
        store.set_selected_agent(Some("aws-docs"));
        let request = begin_send(&mut store, "q").expect("staged");

        apply_chunk(
            &mut store,
            &request.response_id,
            StreamChunk::Error {
                error: "model overloaded".into(),
            },
        );
        finish_send(&mut store, &request.response_id, None);

        let last = store.messages().last().expect("notice");
        assert!(last.is_system());
        assert_eq!(last.content, "Error: model overloaded");
        assert!(!store.message(&request.response_id).expect("placeholder").is_streaming);
    }

    #[tokio::test]
    async fn aws_docs_question_routes_to_agent_endpoint() {
        let gateway = MockGateway::new().with_reply(ScriptedReply::Chunks(vec![answer(
            "AWS Lambda is a serverless compute service.",
        )]));
        let mut store = SessionStore::new();
        store.set_selected_agent(Some("aws-docs"));

        send_message(&mut store, &gateway, "What is AWS Lambda?")
            .await
            .expect("ok");

        let sent = gateway.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].content, "What is AWS Lambda?");
        assert_eq!(sent[0].target, ChatTarget::Agent("aws-docs".into()));
        assert!(!sent[0].reasoning);
        let texts: Vec<_> = store.messages().iter().map(|m| m.to_plain_text()).collect();
        assert_eq!(
            texts,
            [
                "You: What is AWS Lambda?",
                "AWS Documentation Agent: AWS Lambda is a serverless compute service."
            ]
        );
    }
}
