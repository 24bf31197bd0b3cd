use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::{ChatGateway, StreamChunk};
use crate::core::send_flow::SendRequest;

/// Progress of one background send, tagged with its stream id on the channel.
/// `Failed` and `End` are terminal; exactly one of them closes each stream
/// that is not cancelled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamMessage {
    Chunk(StreamChunk),
    Failed(String),
    End,
}

#[derive(Clone)]
pub struct ChatStreamService {
    gateway: Arc<dyn ChatGateway>,
    tx: mpsc::UnboundedSender<(StreamMessage, u64)>,
}

impl ChatStreamService {
    pub fn new(
        gateway: Arc<dyn ChatGateway>,
    ) -> (Self, mpsc::UnboundedReceiver<(StreamMessage, u64)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { gateway, tx }, rx)
    }

    /// Runs the gateway call for `request` on a new task. Cancelling the token
    /// abandons the request and sends nothing further for `stream_id`.
    pub fn spawn_stream(
        &self,
        request: SendRequest,
        stream_id: u64,
        cancel_token: CancellationToken,
    ) {
        let gateway = Arc::clone(&self.gateway);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let SendRequest {
                content,
                target,
                reasoning,
                ..
            } = request;

            let mut forward = |chunk: StreamChunk| {
                let _ = tx.send((StreamMessage::Chunk(chunk), stream_id));
            };

            tokio::select! {
                biased;
                _ = cancel_token.cancelled() => {
                    debug!(stream_id, "stream cancelled");
                }
                result = gateway.send_message(&content, &target, reasoning, &mut forward) => {
                    let terminal = match result {
                        Ok(()) => StreamMessage::End,
                        Err(err) => StreamMessage::Failed(err.to_string()),
                    };
                    let _ = tx.send((terminal, stream_id));
                }
            }
        });
    }
}
