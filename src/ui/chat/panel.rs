use crate::chat::{ChatClient, ChatError, ChatEvent};
use crate::config::Config;
use crate::events::Page;
use crate::i18n::{tr, Language};
use crate::streaming::{ReplyStream, StreamUpdate};
use crate::ui::chat::commands::{get_help_text, ParsedCommand, SlashCommand};
use crate::ui::chat::composer::{ChatComposer, ComposerResult};
use crate::ui::chat::history::Transcript;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

/// Actions the chat panel asks the application to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    None,
    SwitchLanguage(Language),
    SwitchPage(Page),
    Exit,
}

/// The embedded chat assistant: transcript plus composer, wired to the
/// streaming client. One reply can be in flight at a time; submissions
/// made while streaming are ignored.
pub struct ChatPanel {
    transcript: Transcript,
    composer: ChatComposer,
    client: ChatClient,
    language: Language,
    minimized: bool,
    reply: Option<ReplyStream>,
    events_rx: Option<mpsc::Receiver<ChatEvent>>,
}

impl ChatPanel {
    pub fn new(config: &Config) -> Self {
        let language = config.language;
        Self {
            transcript: Transcript::new(language),
            composer: ChatComposer::new(language),
            client: ChatClient::new(config),
            language,
            minimized: false,
            reply: None,
            events_rx: None,
        }
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn is_streaming(&self) -> bool {
        self.events_rx.is_some()
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.transcript.set_language(language);
        self.composer.set_language(language);
    }

    /// Route a key press. Returns any action the application must apply.
    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> PanelAction {
        match self.composer.handle_key(key) {
            ComposerResult::Submitted(input) => {
                self.submit(input);
                PanelAction::None
            }
            ComposerResult::Command(command) => self.handle_slash_command(command),
            ComposerResult::None => PanelAction::None,
        }
    }

    /// Send a user message and start streaming the reply. A no-op while a
    /// reply is already in flight or when the input is blank.
    pub fn submit(&mut self, input: String) {
        if input.trim().is_empty() || self.is_streaming() {
            return;
        }

        self.transcript.push_user(input);

        // Context is the full transcript up to and including the new user
        // message; the placeholder is appended after the snapshot so it
        // is never sent upstream.
        let history = self.transcript.messages().to_vec();
        self.transcript.begin_reply();

        let mut reply = ReplyStream::new();
        reply.begin();
        self.reply = Some(reply);
        self.composer.set_focus(false);
        self.events_rx = Some(self.client.stream_reply(&history));
    }

    /// Drain pending stream events; called once per tick so each delta is
    /// visible on the next draw. The typing indicator clears on every
    /// terminal path, including the channel closing without a terminal
    /// event (task dropped).
    pub fn pump(&mut self) {
        loop {
            let received = match self.events_rx.as_mut() {
                Some(rx) => rx.try_recv(),
                None => return,
            };

            match received {
                Ok(event) => {
                    let update = match self.reply.as_mut() {
                        Some(reply) => reply.apply(event),
                        None => StreamUpdate::None,
                    };
                    match update {
                        StreamUpdate::Delta(delta) => self.transcript.append_delta(&delta),
                        StreamUpdate::Completed => {
                            self.finish(None);
                            return;
                        }
                        StreamUpdate::Failed(error) => {
                            self.finish(Some(error));
                            return;
                        }
                        StreamUpdate::None => {}
                    }
                }
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    self.finish(None);
                    return;
                }
            }
        }
    }

    /// Close out the in-flight reply. On failure the fixed localized
    /// fallback is surfaced: it replaces the placeholder when nothing
    /// arrived, otherwise the partial text stays (no rollback) and the
    /// fallback is appended as its own message.
    fn finish(&mut self, error: Option<ChatError>) {
        if let Some(reply) = &self.reply {
            tracing::debug!(phase = ?reply.phase(), chars = reply.text().len(), "reply stream closed");
        }

        if let Some(error) = error {
            tracing::warn!(%error, "reply stream failed");
            let fallback = tr(self.language, "chatError");
            let has_partial = self.reply.as_ref().is_some_and(|reply| reply.has_content());
            if has_partial {
                self.transcript.finish_reply();
                self.transcript.push_assistant(fallback);
            } else {
                self.transcript.set_in_flight_text(fallback);
            }
        }

        self.transcript.finish_reply();
        self.composer.set_focus(true);
        self.reply = None;
        self.events_rx = None;
    }

    fn handle_slash_command(&mut self, command: ParsedCommand) -> PanelAction {
        match command.command {
            SlashCommand::Lang => {
                let target = command
                    .language_target()
                    .unwrap_or_else(|| self.language.toggled());
                PanelAction::SwitchLanguage(target)
            }
            SlashCommand::Page => match command.page_target() {
                Some(page) => PanelAction::SwitchPage(page),
                None => PanelAction::None,
            },
            SlashCommand::Chat => {
                self.minimized = !self.minimized;
                PanelAction::None
            }
            SlashCommand::Help => {
                self.transcript.push_assistant(get_help_text());
                PanelAction::None
            }
            SlashCommand::Bye => PanelAction::Exit,
        }
    }

    /// Render the panel: transcript over composer, or just the composer
    /// with a hint line while minimized.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if self.minimized {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Length(3)])
                .split(area);

            let hint = Line::from(vec![Span::styled(
                tr(self.language, "chatMinimized"),
                Style::default().fg(Color::DarkGray),
            )]);
            buf.set_line(chunks[0].x, chunks[0].y, &hint, chunks[0].width);
            self.composer.clone().render(chunks[1], buf);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(area);

        self.transcript.clone().render(chunks[0], buf);
        self.composer.clone().render(chunks[1], buf);
    }

    #[cfg(test)]
    pub(crate) fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Wire a reply directly to a test channel, bypassing the network.
    #[cfg(test)]
    pub(crate) fn begin_reply_for_test(&mut self, rx: mpsc::Receiver<ChatEvent>) {
        self.transcript.begin_reply();
        let mut reply = ReplyStream::new();
        reply.begin();
        self.reply = Some(reply);
        self.events_rx = Some(rx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Sender;

    fn panel() -> ChatPanel {
        ChatPanel::new(&Config::default())
    }

    #[test]
    fn deltas_stream_into_the_placeholder_incrementally() {
        let mut panel = panel();
        panel.transcript.push_user("hi".to_string());
        let (tx, rx) = mpsc::channel(16);
        panel.begin_reply_for_test(rx);
        assert!(panel.transcript().is_typing());

        tx.try_send(ChatEvent::Delta("你".to_string())).unwrap();
        panel.pump();
        // Partial text is visible before the stream ends.
        assert_eq!(panel.transcript().in_flight_text(), Some("你"));
        assert!(panel.transcript().is_typing());

        tx.try_send(ChatEvent::Delta("好".to_string())).unwrap();
        tx.try_send(ChatEvent::Done).unwrap();
        panel.pump();

        let last = panel.transcript().messages().last().unwrap();
        assert_eq!(last.text, "你好");
        assert_eq!(last.sender, Sender::Assistant);
        assert!(!panel.transcript().is_typing());
        assert!(!panel.is_streaming());
    }

    #[test]
    fn transport_failure_yields_exactly_one_fallback_message() {
        let mut panel = panel();
        panel.transcript.push_user("hi".to_string());
        let before = panel.transcript().message_count();
        let (tx, rx) = mpsc::channel(16);
        panel.begin_reply_for_test(rx);

        tx.try_send(ChatEvent::Failed(ChatError::Transport(
            "API error: 500".to_string(),
        )))
        .unwrap();
        panel.pump();

        // Only the placeholder was added, and it now carries the fallback.
        assert_eq!(panel.transcript().message_count(), before + 1);
        let last = panel.transcript().messages().last().unwrap();
        assert_eq!(last.text, "抱歉，连接时出现错误。");
        assert!(!panel.transcript().is_typing());
    }

    #[test]
    fn interruption_keeps_partial_text_and_appends_the_fallback() {
        let mut panel = panel();
        panel.transcript.push_user("hi".to_string());
        let (tx, rx) = mpsc::channel(16);
        panel.begin_reply_for_test(rx);

        tx.try_send(ChatEvent::Delta("partial ".to_string())).unwrap();
        tx.try_send(ChatEvent::Delta("answer".to_string())).unwrap();
        tx.try_send(ChatEvent::Failed(ChatError::Interrupted(
            "connection reset".to_string(),
        )))
        .unwrap();
        panel.pump();

        let messages = panel.transcript().messages();
        assert_eq!(messages[messages.len() - 2].text, "partial answer");
        assert_eq!(messages[messages.len() - 1].text, "抱歉，连接时出现错误。");
        assert!(!panel.transcript().is_typing());
    }

    #[test]
    fn channel_closing_without_a_terminal_event_clears_the_indicator() {
        let mut panel = panel();
        panel.transcript.push_user("hi".to_string());
        let (tx, rx) = mpsc::channel(16);
        panel.begin_reply_for_test(rx);

        tx.try_send(ChatEvent::Delta("half".to_string())).unwrap();
        drop(tx);
        panel.pump();

        assert!(!panel.transcript().is_typing());
        assert!(!panel.is_streaming());
        assert_eq!(panel.transcript().messages().last().unwrap().text, "half");
    }

    #[test]
    fn submissions_are_ignored_while_a_reply_is_in_flight() {
        let mut panel = panel();
        let (_tx, rx) = mpsc::channel(16);
        panel.begin_reply_for_test(rx);
        let before = panel.transcript().message_count();

        panel.submit("second question".to_string());
        assert_eq!(panel.transcript().message_count(), before);
    }

    #[test]
    fn slash_commands_map_to_panel_actions() {
        let mut panel = panel();
        let lang = crate::ui::chat::commands::parse_slash_command("/lang en").unwrap();
        assert_eq!(
            panel.handle_slash_command(lang),
            PanelAction::SwitchLanguage(Language::En)
        );

        let bare_lang = crate::ui::chat::commands::parse_slash_command("/lang").unwrap();
        assert_eq!(
            panel.handle_slash_command(bare_lang),
            PanelAction::SwitchLanguage(Language::En)
        );

        let page = crate::ui::chat::commands::parse_slash_command("/page about").unwrap();
        assert_eq!(
            panel.handle_slash_command(page),
            PanelAction::SwitchPage(Page::About)
        );

        let chat = crate::ui::chat::commands::parse_slash_command("/chat").unwrap();
        assert_eq!(panel.handle_slash_command(chat), PanelAction::None);
        assert!(panel.is_minimized());

        let bye = crate::ui::chat::commands::parse_slash_command("/bye").unwrap();
        assert_eq!(panel.handle_slash_command(bye), PanelAction::Exit);
    }
}
