use futures::StreamExt;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::Duration;

use crate::config::Config;
use crate::events::Message;
use crate::streaming::DeltaDecoder;

/// Role/content pair in the upstream request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.sender.role().to_string(),
            content: message.text.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: &'a [ChatMessage],
    stream: bool,
}

/// Events emitted while a reply streams in. Every execution path of the
/// transport task ends with `Done` or `Failed`; the channel closing
/// counts as terminal on the consumer side as well.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    Delta(String),
    Done,
    Failed(ChatError),
}

/// Failure taxonomy for one streamed reply.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChatError {
    /// The request could not be established, or returned a non-success
    /// status before any streaming began.
    #[error("request failed: {0}")]
    Transport(String),
    /// The connection dropped after partial data had arrived.
    #[error("stream interrupted: {0}")]
    Interrupted(String),
}

/// Client for the Haowise chat-completions endpoint.
#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ChatClient {
    pub fn new(config: &Config) -> Self {
        // Bound the connect wait only; an overall timeout would sever
        // long-running streams.
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.api.base_url.clone(),
            api_key: config.api_key(),
        }
    }

    /// Send the conversation upstream and stream the reply back as
    /// events. The caller is expected to have appended the user's message
    /// to `history` already.
    pub fn stream_reply(&self, history: &[Message]) -> mpsc::Receiver<ChatEvent> {
        let (tx, rx) = mpsc::channel(256);

        let messages: Vec<ChatMessage> = history.iter().map(ChatMessage::from).collect();
        let client = self.client.clone();
        let url = format!("{}/chat/completions", self.base_url);
        let api_key = self.api_key.clone();

        tokio::spawn(async move {
            if let Err(error) = run_stream(client, url, api_key, messages, &tx).await {
                tracing::warn!(%error, "chat stream ended abnormally");
                let _ = tx.send(ChatEvent::Failed(error)).await;
            }
        });

        rx
    }
}

async fn run_stream(
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    messages: Vec<ChatMessage>,
    tx: &mpsc::Sender<ChatEvent>,
) -> Result<(), ChatError> {
    let payload = ChatRequest {
        messages: &messages,
        stream: true,
    };

    let mut request = client
        .post(&url)
        .header("Content-Type", "application/json")
        .json(&payload);
    if let Some(key) = &api_key {
        request = request.header("Authorization", format!("Bearer {key}"));
    }

    let response = request
        .send()
        .await
        .map_err(|err| ChatError::Transport(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ChatError::Transport(format!("API error: {status} {body}")));
    }

    let mut stream = response.bytes_stream();
    let mut decoder = DeltaDecoder::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|err| ChatError::Interrupted(err.to_string()))?;
        for delta in decoder.feed(&chunk) {
            // A closed receiver means the view was torn down; stop
            // consuming frames and release the connection.
            if tx.send(ChatEvent::Delta(delta)).await.is_err() {
                return Ok(());
            }
        }
        if decoder.finished() {
            break;
        }
    }

    for delta in decoder.finish() {
        if tx.send(ChatEvent::Delta(delta)).await.is_err() {
            return Ok(());
        }
    }

    let _ = tx.send(ChatEvent::Done).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Sender;

    #[test]
    fn transcript_messages_map_to_role_content_pairs() {
        let history = vec![
            Message::new(Sender::Assistant, "你好！"),
            Message::new(Sender::User, "介绍一下你们的产品"),
        ];
        let mapped: Vec<ChatMessage> = history.iter().map(ChatMessage::from).collect();

        assert_eq!(mapped[0].role, "assistant");
        assert_eq!(mapped[0].content, "你好！");
        assert_eq!(mapped[1].role, "user");
        assert_eq!(mapped[1].content, "介绍一下你们的产品");
    }

    #[test]
    fn request_body_carries_messages_and_the_stream_flag() {
        let messages = vec![ChatMessage {
            role: "user".to_string(),
            content: "hello".to_string(),
        }];
        let payload = ChatRequest {
            messages: &messages,
            stream: true,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["stream"], serde_json::json!(true));
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
    }
}
