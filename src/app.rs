use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    widgets::Widget,
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

use crate::config::Config;
use crate::events::Page;
use crate::i18n::Language;
use crate::ui::chat::{ChatPanel, PanelAction};
use crate::ui::header::Header;
use crate::ui::pages::PageView;

const TICK: Duration = Duration::from_millis(50);

/// Application state: current section, persisted language, chat panel.
pub struct App {
    config: Config,
    page: Page,
    panel: ChatPanel,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let panel = ChatPanel::new(&config);
        Self {
            config,
            page: Page::Home,
            panel,
            should_quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::F(2) => {
                self.set_language(self.config.language.toggled());
                return;
            }
            KeyCode::Tab => {
                self.page = self.page.next();
                return;
            }
            KeyCode::BackTab => {
                self.page = self.page.previous();
                return;
            }
            _ => {}
        }

        match self.panel.handle_key(key) {
            PanelAction::None => {}
            PanelAction::SwitchLanguage(language) => self.set_language(language),
            PanelAction::SwitchPage(page) => self.page = page,
            PanelAction::Exit => self.should_quit = true,
        }
    }

    /// Apply and persist a language change, like the site persists its
    /// locale selection.
    fn set_language(&mut self, language: Language) {
        if language == self.config.language {
            return;
        }
        self.config.set_language(language);
        self.panel.set_language(language);
        if let Err(error) = self.config.save() {
            tracing::warn!(%error, "failed to persist language selection");
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.size();
        let buf = frame.buffer_mut();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        Header::new(self.page, self.config.language).render(rows[0], buf);

        if self.panel.is_minimized() {
            let body = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(4)])
                .split(rows[1]);
            PageView::new(self.page, self.config.language).render(body[0], buf);
            self.panel.render(body[1], buf);
        } else {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
                .split(rows[1]);
            PageView::new(self.page, self.config.language).render(body[0], buf);
            self.panel.render(body[1], buf);
        }
    }
}

/// Run the TUI until the user exits.
pub async fn run(config: Config) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, App::new(config)).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> Result<()> {
    while !app.should_quit {
        // Fold any stream progress into the transcript before drawing so
        // each delta is visible on the next frame.
        app.panel.pump();
        terminal.draw(|frame| app.draw(frame))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn tab_cycles_through_sections() {
        let mut app = App::new(Config::default());
        assert_eq!(app.page, Page::Home);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.page, Page::Solutions);
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.page, Page::Home);
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.page, Page::Contact);
    }

    #[test]
    fn ctrl_c_requests_exit() {
        let mut app = App::new(Config::default());
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
