use memchr::memchr;
use serde::Deserialize;

use crate::chat::{ChatError, ChatEvent};

const DATA_PREFIX: &str = "data:";
const DONE_SENTINEL: &str = "[DONE]";

/// Payload of one chat-completion chunk. Only the first choice's delta
/// content matters; everything else in the record is ignored.
#[derive(Debug, Deserialize)]
struct ChunkPayload {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    content: Option<String>,
}

/// Incremental decoder for the event-framed response body.
///
/// Network frames arrive with no relation to logical lines: a frame may
/// split a line (or a UTF-8 sequence) anywhere, or carry several lines at
/// once. Bytes accumulate in a rolling buffer and are only interpreted at
/// `\n` boundaries, so framing can never affect the decoded output.
pub struct DeltaDecoder {
    buffer: Vec<u8>,
    finished: bool,
}

impl DeltaDecoder {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            finished: false,
        }
    }

    /// True once the end-of-stream sentinel has been observed. Any input
    /// fed after that is not processed.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Feed one raw frame; returns the text deltas completed by it, in
    /// arrival order.
    pub fn feed(&mut self, frame: &[u8]) -> Vec<String> {
        let mut deltas = Vec::new();
        if self.finished {
            return deltas;
        }

        self.buffer.extend_from_slice(frame);

        while let Some(newline_pos) = memchr(b'\n', &self.buffer) {
            let line = match std::str::from_utf8(&self.buffer[..newline_pos]) {
                Ok(s) => s.trim().to_string(),
                Err(err) => {
                    tracing::warn!(error = %err, "invalid UTF-8 line in stream, skipping");
                    self.buffer.drain(..=newline_pos);
                    continue;
                }
            };
            self.buffer.drain(..=newline_pos);

            if decode_line(&line, &mut deltas) {
                self.finished = true;
                break;
            }
        }

        deltas
    }

    /// Flush the trailing unterminated line once the transport reports
    /// end-of-data.
    pub fn finish(&mut self) -> Vec<String> {
        let mut deltas = Vec::new();
        if self.finished {
            return deltas;
        }
        self.finished = true;

        if let Ok(line) = std::str::from_utf8(&self.buffer) {
            let line = line.trim();
            if !line.is_empty() {
                decode_line(line, &mut deltas);
            }
        }
        self.buffer.clear();
        deltas
    }
}

/// Classify one line. Returns true when the line is the end-of-stream
/// sentinel. Malformed payloads are skipped, never fatal; lines without
/// the data prefix are protocol noise and ignored.
fn decode_line(line: &str, deltas: &mut Vec<String>) -> bool {
    let Some(payload) = line.strip_prefix(DATA_PREFIX).map(str::trim_start) else {
        return false;
    };

    if payload == DONE_SENTINEL {
        return true;
    }

    match serde_json::from_str::<ChunkPayload>(payload) {
        Ok(chunk) => {
            if let Some(content) = chunk
                .choices
                .first()
                .and_then(|choice| choice.delta.content.as_ref())
            {
                deltas.push(content.clone());
            }
        }
        Err(err) => {
            tracing::debug!(error = %err, "skipping malformed stream record");
        }
    }

    false
}

/// Lifecycle of one streamed reply. Terminal states are never left; a new
/// submission starts a fresh `ReplyStream`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPhase {
    Idle,
    Requesting,
    Streaming,
    Completed,
    Failed,
}

/// What an applied event means for observers.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamUpdate {
    /// Text was appended; the in-flight message should re-render.
    Delta(String),
    /// Clean end of stream.
    Completed,
    /// The stream failed; text applied so far is retained.
    Failed(ChatError),
    /// Event arrived after a terminal state and was ignored.
    None,
}

/// Folds chat events into the text of the current placeholder message and
/// tracks where in its lifecycle the reply is.
pub struct ReplyStream {
    phase: StreamPhase,
    text: String,
}

impl ReplyStream {
    pub fn new() -> Self {
        Self {
            phase: StreamPhase::Idle,
            text: String::new(),
        }
    }

    /// The request is being opened; the in-flight indicator should be on
    /// from this point until a terminal update.
    pub fn begin(&mut self) {
        if self.phase == StreamPhase::Idle {
            self.phase = StreamPhase::Requesting;
        }
    }

    pub fn phase(&self) -> StreamPhase {
        self.phase
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn has_content(&self) -> bool {
        !self.text.is_empty()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, StreamPhase::Completed | StreamPhase::Failed)
    }

    /// Apply one event from the transport task.
    pub fn apply(&mut self, event: ChatEvent) -> StreamUpdate {
        if self.is_terminal() {
            return StreamUpdate::None;
        }

        match event {
            ChatEvent::Delta(delta) => {
                self.phase = StreamPhase::Streaming;
                self.text.push_str(&delta);
                StreamUpdate::Delta(delta)
            }
            ChatEvent::Done => {
                self.phase = StreamPhase::Completed;
                StreamUpdate::Completed
            }
            ChatEvent::Failed(error) => {
                self.phase = StreamPhase::Failed;
                StreamUpdate::Failed(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta_line(content: &str) -> String {
        format!(
            "data: {{\"choices\":[{{\"delta\":{{\"content\":{}}}}}]}}\n",
            serde_json::to_string(content).unwrap()
        )
    }

    #[test]
    fn frame_boundaries_do_not_affect_output() {
        let body = format!(
            "{}{}{}data: [DONE]\n",
            delta_line("Hello"),
            delta_line(", "),
            delta_line("world")
        );
        let bytes = body.as_bytes();

        // Try every split point, including mid-line positions.
        for split in 0..=bytes.len() {
            let mut decoder = DeltaDecoder::new();
            let mut collected = String::new();
            for delta in decoder.feed(&bytes[..split]) {
                collected.push_str(&delta);
            }
            for delta in decoder.feed(&bytes[split..]) {
                collected.push_str(&delta);
            }
            for delta in decoder.finish() {
                collected.push_str(&delta);
            }
            assert_eq!(collected, "Hello, world", "split at byte {split}");
            assert!(decoder.finished());
        }
    }

    #[test]
    fn splitting_inside_a_utf8_sequence_is_safe() {
        let body = format!("{}data: [DONE]\n", delta_line("你好，世界"));
        let bytes = body.as_bytes();

        for split in 0..=bytes.len() {
            let mut decoder = DeltaDecoder::new();
            let mut collected = String::new();
            for delta in decoder.feed(&bytes[..split]) {
                collected.push_str(&delta);
            }
            for delta in decoder.feed(&bytes[split..]) {
                collected.push_str(&delta);
            }
            assert_eq!(collected, "你好，世界", "split at byte {split}");
        }
    }

    #[test]
    fn several_lines_in_one_frame_apply_in_order() {
        let body = format!("{}{}{}", delta_line("a"), delta_line("b"), delta_line("c"));
        let mut decoder = DeltaDecoder::new();
        let deltas = decoder.feed(body.as_bytes());
        assert_eq!(deltas, vec!["a", "b", "c"]);
    }

    #[test]
    fn sentinel_stops_processing_even_with_more_data_available() {
        let body = format!(
            "{}{}data: [DONE]\n{}",
            delta_line("one"),
            delta_line("two"),
            delta_line("ignored")
        );
        let mut decoder = DeltaDecoder::new();
        let deltas = decoder.feed(body.as_bytes());
        assert_eq!(deltas, vec!["one", "two"]);
        assert!(decoder.finished());

        // Frames after the sentinel are not processed either.
        assert!(decoder.feed(delta_line("late").as_bytes()).is_empty());
        assert!(decoder.finish().is_empty());
    }

    #[test]
    fn malformed_records_are_skipped_without_dropping_valid_ones() {
        let body = format!(
            "{}data: {{not json at all\n{}",
            delta_line("first"),
            delta_line("second")
        );
        let mut decoder = DeltaDecoder::new();
        let deltas = decoder.feed(body.as_bytes());
        assert_eq!(deltas, vec!["first", "second"]);
    }

    #[test]
    fn non_data_lines_are_ignored() {
        let body = format!(
            ": keep-alive\n\nevent: message\n{}",
            delta_line("payload")
        );
        let mut decoder = DeltaDecoder::new();
        let deltas = decoder.feed(body.as_bytes());
        assert_eq!(deltas, vec!["payload"]);
    }

    #[test]
    fn records_without_content_produce_no_delta() {
        let body = "data: {\"choices\":[{\"delta\":{},\"finish_reason\":\"stop\"}]}\n";
        let mut decoder = DeltaDecoder::new();
        assert!(decoder.feed(body.as_bytes()).is_empty());
        assert!(!decoder.finished());
    }

    #[test]
    fn trailing_line_without_newline_is_flushed_at_end_of_data() {
        let line = delta_line("tail");
        let unterminated = &line.as_bytes()[..line.len() - 1];
        let mut decoder = DeltaDecoder::new();
        assert!(decoder.feed(unterminated).is_empty());
        assert_eq!(decoder.finish(), vec!["tail"]);
    }

    #[test]
    fn reply_stream_accumulates_in_arrival_order() {
        let mut reply = ReplyStream::new();
        reply.begin();
        assert_eq!(reply.phase(), StreamPhase::Requesting);

        assert_eq!(
            reply.apply(ChatEvent::Delta("he".to_string())),
            StreamUpdate::Delta("he".to_string())
        );
        assert_eq!(reply.phase(), StreamPhase::Streaming);
        reply.apply(ChatEvent::Delta("llo".to_string()));
        assert_eq!(reply.text(), "hello");

        assert_eq!(reply.apply(ChatEvent::Done), StreamUpdate::Completed);
        assert_eq!(reply.phase(), StreamPhase::Completed);
    }

    #[test]
    fn terminal_states_are_never_left() {
        let mut reply = ReplyStream::new();
        reply.begin();
        reply.apply(ChatEvent::Done);

        assert_eq!(
            reply.apply(ChatEvent::Delta("late".to_string())),
            StreamUpdate::None
        );
        assert_eq!(reply.text(), "");
        assert_eq!(reply.phase(), StreamPhase::Completed);
    }

    #[test]
    fn failure_retains_partial_text() {
        let mut reply = ReplyStream::new();
        reply.begin();
        reply.apply(ChatEvent::Delta("partial ".to_string()));
        reply.apply(ChatEvent::Delta("reply".to_string()));

        let update = reply.apply(ChatEvent::Failed(ChatError::Interrupted(
            "connection reset".to_string(),
        )));
        assert!(matches!(update, StreamUpdate::Failed(_)));
        assert_eq!(reply.text(), "partial reply");
        assert_eq!(reply.phase(), StreamPhase::Failed);
    }
}
