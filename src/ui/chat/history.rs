//! Conversation transcript display component.

use crate::events::{Message, Sender};
use crate::i18n::{tr, Language};
use crate::ui::wrap_text;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use uuid::Uuid;

/// Append-only conversation transcript with at most one in-flight
/// message. Earlier messages are immutable once appended; only the
/// message addressed by `in_flight` may still receive text.
#[derive(Clone)]
pub struct Transcript {
    messages: Vec<Message>,
    in_flight: Option<Uuid>,
    typing: bool,
    language: Language,
}

impl Transcript {
    /// New transcript seeded with the localized assistant greeting.
    pub fn new(language: Language) -> Self {
        Self {
            messages: vec![Message::new(Sender::Assistant, tr(language, "chatGreeting"))],
            in_flight: None,
            typing: false,
            language,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Language used for transcript chrome (labels, typing indicator).
    /// Existing message text is left as delivered.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn push_user(&mut self, text: String) {
        self.messages.push(Message::new(Sender::User, text));
    }

    pub fn push_assistant(&mut self, text: String) {
        self.messages.push(Message::new(Sender::Assistant, text));
    }

    /// Append the empty placeholder for a new reply and raise the typing
    /// indicator. Returns the placeholder id.
    pub fn begin_reply(&mut self) -> Uuid {
        let placeholder = Message::placeholder();
        let id = placeholder.id;
        self.messages.push(placeholder);
        self.in_flight = Some(id);
        self.typing = true;
        id
    }

    /// Append streamed text to the in-flight message.
    pub fn append_delta(&mut self, delta: &str) {
        let Some(id) = self.in_flight else {
            return;
        };
        if let Some(message) = self.messages.iter_mut().find(|m| m.id == id) {
            message.text.push_str(delta);
        }
    }

    /// Replace the in-flight message's text wholesale (fallback copy on
    /// transport failure).
    pub fn set_in_flight_text(&mut self, text: String) {
        let Some(id) = self.in_flight else {
            return;
        };
        if let Some(message) = self.messages.iter_mut().find(|m| m.id == id) {
            message.text = text;
        }
    }

    /// Freeze the in-flight message and clear the typing indicator. Safe
    /// to call on every exit path; it is idempotent.
    pub fn finish_reply(&mut self) {
        self.in_flight = None;
        self.typing = false;
    }

    pub fn in_flight(&self) -> Option<Uuid> {
        self.in_flight
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn in_flight_text(&self) -> Option<&str> {
        let id = self.in_flight?;
        self.messages
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.text.as_str())
    }
}

impl Widget for Transcript {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(tr(self.language, "chatTitle"));

        let inner_area = block.inner(area);
        block.render(area, buf);
        if inner_area.width == 0 || inner_area.height == 0 {
            return;
        }

        let mut all_lines: Vec<Line> = Vec::new();
        for message in &self.messages {
            all_lines.extend(self.render_message(message, inner_area.width));
            all_lines.push(Line::from(vec![Span::raw("")]));
        }

        if self.typing {
            all_lines.push(Line::from(vec![Span::styled(
                tr(self.language, "chatTyping"),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )]));
        }

        // Bottom-anchored: show the most recent lines that fit.
        let height = inner_area.height as usize;
        let start = all_lines.len().saturating_sub(height);
        for (i, line) in all_lines[start..].iter().enumerate() {
            buf.set_line(inner_area.x, inner_area.y + i as u16, line, inner_area.width);
        }
    }
}

impl Transcript {
    fn render_message(&self, message: &Message, width: u16) -> Vec<Line> {
        let mut lines = Vec::new();

        let label_key = match message.sender {
            Sender::User => "chatYou",
            Sender::Assistant => "chatAssistant",
        };
        let header = format!(
            "{} {}",
            tr(self.language, label_key),
            message.timestamp.format("%H:%M")
        );
        lines.push(Line::from(vec![Span::styled(
            header,
            Style::default().fg(Color::DarkGray),
        )]));

        let is_in_flight = self.in_flight == Some(message.id);
        let content_style = match message.sender {
            Sender::User => Style::default().fg(Color::Blue),
            Sender::Assistant => Style::default().fg(Color::Green),
        };

        let content_lines = wrap_text(&message.text, width.saturating_sub(2) as usize);
        let last = content_lines.len().saturating_sub(1);
        for (i, content_line) in content_lines.into_iter().enumerate() {
            let mut spans = vec![Span::raw("  "), Span::styled(content_line, content_style)];
            if is_in_flight && i == last {
                spans.push(Span::styled("▋", Style::default().fg(Color::Yellow)));
            }
            lines.push(Line::from(spans));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_starts_with_the_localized_greeting() {
        let transcript = Transcript::new(Language::Zh);
        assert_eq!(transcript.message_count(), 1);
        assert_eq!(transcript.messages()[0].sender, Sender::Assistant);
        assert_eq!(transcript.messages()[0].text, "你好！有什么可以帮助你的吗？");

        let transcript = Transcript::new(Language::En);
        assert_eq!(transcript.messages()[0].text, "Hello! How can I help you today?");
    }

    #[test]
    fn deltas_only_touch_the_in_flight_message() {
        let mut transcript = Transcript::new(Language::Zh);
        transcript.push_user("hi".to_string());
        let greeting = transcript.messages()[0].text.clone();

        transcript.begin_reply();
        transcript.append_delta("he");
        transcript.append_delta("llo");

        assert_eq!(transcript.in_flight_text(), Some("hello"));
        assert_eq!(transcript.messages()[0].text, greeting);
        assert_eq!(transcript.messages()[1].text, "hi");
    }

    #[test]
    fn finish_reply_freezes_the_message_and_clears_typing() {
        let mut transcript = Transcript::new(Language::Zh);
        transcript.push_user("hi".to_string());
        transcript.begin_reply();
        assert!(transcript.is_typing());

        transcript.append_delta("done");
        transcript.finish_reply();

        assert!(!transcript.is_typing());
        assert!(transcript.in_flight().is_none());

        // Late deltas are dropped once the reply is frozen.
        transcript.append_delta(" extra");
        assert_eq!(transcript.messages().last().unwrap().text, "done");
    }

    #[test]
    fn messages_are_never_removed_or_reordered() {
        let mut transcript = Transcript::new(Language::Zh);
        for i in 0..20 {
            transcript.push_user(format!("message {i}"));
        }
        assert_eq!(transcript.message_count(), 21);
        assert_eq!(transcript.messages()[1].text, "message 0");
        assert_eq!(transcript.messages()[20].text, "message 19");
    }
}
