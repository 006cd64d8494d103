//! Full-screen host for reveals and chat
//!
//! Bot messages are revealed by one [`RevealController`] each, all sharing a
//! single event channel. The view re-renders on every frame event but only
//! follows to the bottom at checkpoints.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use gander_core::chat::{ChatClient, Conversation, Role};
use gander_core::format::{FormatterOptions, Segment};
use gander_core::reveal::{
    RevealController, RevealEvent, RevealEventKind, RevealId, RevealPacing, TypingTracker,
};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::render::{render_segments, Palette};
use super::scroll::ScrollState;
use super::utils::text::wrap_lines;

const BOT_NAME: &str = "gander";
const PAGE_ROWS: usize = 10;
const CHAT_HINT: &str = "Say hello to start the conversation.";

enum Mode {
    /// Reveal a fixed text, no input box
    Reveal,
    Chat(ChatClient),
}

/// Live render state of one bot message
struct BotView {
    controller: RevealController,
    segments: Vec<Segment>,
    options: Arc<FormatterOptions>,
}

pub struct App {
    mode: Mode,
    pacing: RevealPacing,
    options: Arc<FormatterOptions>,
    conversation: Conversation,
    views: HashMap<RevealId, BotView>,
    typing: TypingTracker,
    scroll: ScrollState,
    input: String,
    loading: bool,
    should_quit: bool,
    reveal_tx: mpsc::UnboundedSender<RevealEvent>,
    reveal_rx: mpsc::UnboundedReceiver<RevealEvent>,
    reply_tx: mpsc::UnboundedSender<String>,
    reply_rx: mpsc::UnboundedReceiver<String>,
}

impl App {
    fn new(mode: Mode, pacing: RevealPacing, options: FormatterOptions) -> Self {
        let (reveal_tx, reveal_rx) = mpsc::unbounded_channel();
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        Self {
            mode,
            pacing,
            options: Arc::new(options),
            conversation: Conversation::new(),
            views: HashMap::new(),
            typing: TypingTracker::new(),
            scroll: ScrollState::new(),
            input: String::new(),
            loading: false,
            should_quit: false,
            reveal_tx,
            reveal_rx,
            reply_tx,
            reply_rx,
        }
    }

    /// Reveal one fixed reply
    pub fn reveal(text: String, pacing: RevealPacing, options: FormatterOptions) -> Self {
        let mut app = Self::new(Mode::Reveal, pacing, options);
        app.add_bot_message(text);
        app
    }

    /// Interactive chat against the proxy
    pub fn chat(client: ChatClient, pacing: RevealPacing, options: FormatterOptions) -> Self {
        Self::new(Mode::Chat(client), pacing, options)
    }

    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut terminal_events = EventStream::new();

        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            tokio::select! {
                maybe_event = terminal_events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) => self.handle_key(key),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => self.should_quit = true,
                },
                Some(event) = self.reveal_rx.recv() => {
                    self.handle_reveal_event(event);
                    // Batch queued ticks into one redraw
                    while let Ok(event) = self.reveal_rx.try_recv() {
                        self.handle_reveal_event(event);
                    }
                }
                Some(reply) = self.reply_rx.recv() => self.on_reply(reply),
            }
        }

        info!(messages = self.conversation.messages().len(), "Leaving");
        Ok(())
    }

    fn add_bot_message(&mut self, text: String) {
        let id = self.conversation.push_bot(text.clone()).id;
        let mut controller = RevealController::new(
            id,
            self.pacing,
            Arc::clone(&self.options),
            self.reveal_tx.clone(),
        );
        controller.set_source(text);
        self.views.insert(
            controller.id(),
            BotView {
                controller,
                segments: Vec::new(),
                options: Arc::clone(&self.options),
            },
        );
        self.scroll.request_follow();
    }

    fn on_reply(&mut self, reply: String) {
        self.loading = false;
        self.add_bot_message(reply);
    }

    fn submit(&mut self) {
        let Mode::Chat(client) = &self.mode else {
            return;
        };
        if self.loading || self.input.trim().is_empty() {
            return;
        }

        let message = std::mem::take(&mut self.input);
        self.conversation.push_user(message.clone());
        self.loading = true;
        self.scroll.scroll_to_bottom();

        let client = client.clone();
        let tx = self.reply_tx.clone();
        tokio::spawn(async move {
            let reply = client.reply_or_apology(&message).await;
            let _ = tx.send(reply);
        });
    }

    /// Stop whichever reply is still typing
    fn cancel_typing(&mut self) {
        if let Some(id) = self.typing.typing_reveal() {
            if let Some(view) = self.views.get(&id) {
                debug!(reveal = id, "Cancel requested");
                view.controller.cancel();
            }
        }
    }

    fn handle_reveal_event(&mut self, event: RevealEvent) {
        let Some(view) = self.views.get_mut(&event.reveal) else {
            return;
        };
        if event.generation != view.controller.generation() {
            return;
        }

        match event.kind {
            RevealEventKind::Frame(frame) => {
                view.segments = frame.segments;
                view.options = frame.options;
            }
            RevealEventKind::Checkpoint { .. } => self.scroll.request_follow(),
            RevealEventKind::TypingStatus(is_typing) => {
                self.typing.update(event.reveal, is_typing);
            }
            RevealEventKind::Cancelled { revealed } => {
                info!(reveal = event.reveal, revealed, "Reply stopped");
                self.scroll.request_follow();
            }
            RevealEventKind::Complete => self.scroll.request_follow(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => self.should_quit = true,
            (KeyCode::Esc, _) => {
                if self.typing.any_typing() {
                    self.cancel_typing();
                } else if matches!(self.mode, Mode::Reveal) {
                    self.should_quit = true;
                }
            }
            (KeyCode::Up, _) => self.scroll.scroll_up(1),
            (KeyCode::Down, _) => self.scroll.scroll_down(1),
            (KeyCode::PageUp, _) => self.scroll.scroll_up(PAGE_ROWS),
            (KeyCode::PageDown, _) => self.scroll.scroll_down(PAGE_ROWS),
            (KeyCode::End, _) => self.scroll.scroll_to_bottom(),
            (KeyCode::Char('q'), _) if matches!(self.mode, Mode::Reveal) => {
                self.should_quit = true;
            }
            (KeyCode::Enter, _) => self.submit(),
            (KeyCode::Backspace, _) => {
                self.input.pop();
            }
            (KeyCode::Char(c), _) if matches!(self.mode, Mode::Chat(_)) => self.input.push(c),
            _ => {}
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let input_rows = if matches!(self.mode, Mode::Chat(_)) { 3 } else { 0 };
        let [messages_area, input_area, status_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(input_rows),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.draw_messages(frame, messages_area);
        if input_rows > 0 {
            self.draw_input(frame, input_area);
        }
        self.draw_status(frame, status_area);
    }

    fn draw_messages(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2) as usize;
        let inner_height = area.height.saturating_sub(2) as usize;
        let rows = wrap_lines(&self.message_lines(), inner_width);
        self.scroll.set_content(rows.len(), inner_height);

        let paragraph = Paragraph::new(rows)
            .block(Block::bordered().title(format!(" {BOT_NAME} ")))
            .scroll((u16::try_from(self.scroll.offset).unwrap_or(u16::MAX), 0));
        frame.render_widget(paragraph, area);
    }

    fn message_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        if self.conversation.is_empty() && matches!(self.mode, Mode::Chat(_)) {
            lines.push(Line::from(Span::styled(
                CHAT_HINT,
                Style::default().fg(Color::DarkGray),
            )));
        }
        for message in self.conversation.messages() {
            match message.role {
                Role::User => {
                    lines.push(Line::from(Span::styled(
                        "you",
                        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
                    )));
                    lines.extend(message.message.lines().map(|l| Line::from(l.to_string())));
                }
                Role::Bot => {
                    lines.push(Line::from(Span::styled(
                        BOT_NAME,
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    )));
                    if let Some(view) = self.views.get(&message.id) {
                        let palette = Palette::from_options(&view.options);
                        lines.extend(render_segments(&view.segments, &palette));
                    }
                }
            }
            lines.push(Line::default());
        }
        if self.loading {
            lines.push(Line::from(Span::styled(
                ". . .",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
        }
        lines
    }

    fn draw_input(&self, frame: &mut Frame, area: Rect) {
        let title = if self.loading { " waiting… " } else { " message " };
        let input = Paragraph::new(self.input.as_str()).block(Block::bordered().title(title));
        frame.render_widget(input, area);

        let width = unicode_width::UnicodeWidthStr::width(self.input.as_str());
        let width = u16::try_from(width).unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(width)
            .min(area.right().saturating_sub(2));
        frame.set_cursor_position((x, area.y + 1));
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        if self.typing.any_typing() {
            spans.push(Span::styled(
                " typing… ",
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ));
            spans.push(Span::raw(" Esc stop"));
        }
        if !self.scroll.is_following() {
            spans.push(Span::raw("  End follow"));
        }
        spans.push(Span::styled(
            match self.mode {
                Mode::Reveal => "  q quit",
                Mode::Chat(_) => "  Enter send  Ctrl-C quit",
            },
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn drain_until_idle(app: &mut App) {
        while app.typing.any_typing() || app.views.values().any(|v| v.segments.is_empty()) {
            match app.reveal_rx.recv().await {
                Some(event) => app.handle_reveal_event(event),
                None => break,
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_reveal_mode_renders_final_segments() {
        let mut app = App::reveal(
            "**Done?** yes".to_string(),
            RevealPacing::default(),
            FormatterOptions::default(),
        );
        drain_until_idle(&mut app).await;

        let lines = app.message_lines();
        let text: Vec<String> = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(text, vec!["gander", "Done? yes", ""]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_escape_cancels_typing_reply() {
        let mut app = App::reveal(
            "a long enough reply to interrupt".to_string(),
            RevealPacing::default(),
            FormatterOptions::default(),
        );
        while let Some(event) = app.reveal_rx.recv().await {
            let is_frame = matches!(event.kind, RevealEventKind::Frame(_));
            app.handle_reveal_event(event);
            if is_frame && app.typing.any_typing() {
                break;
            }
        }

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.should_quit);
        while app.typing.any_typing() {
            let event = app.reveal_rx.recv().await.unwrap();
            app.handle_reveal_event(event);
        }
        let snapshot = app.views[&1].controller.snapshot();
        assert!(snapshot.revealed < snapshot.total);

        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_chat_input_editing() {
        let client = ChatClient::new(&gander_core::config::BackendConfig::default()).unwrap();
        let mut app = App::chat(client, RevealPacing::immediate(), FormatterOptions::default());
        for c in "hi!".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.input, "hi");

        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.input, "hiq");
    }

    fn chat_app() -> App {
        let client = ChatClient::new(&gander_core::config::BackendConfig::default()).unwrap();
        App::chat(client, RevealPacing::immediate(), FormatterOptions::default())
    }

    #[tokio::test]
    async fn test_empty_chat_shows_hint() {
        let mut app = chat_app();
        let text: Vec<String> = app
            .message_lines()
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(text, vec![CHAT_HINT]);

        app.on_reply("hi".to_string());
        assert!(app
            .message_lines()
            .iter()
            .all(|l| l.spans.iter().all(|s| s.content != CHAT_HINT)));
    }

    #[tokio::test]
    async fn test_long_input_keeps_cursor_in_box() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let mut app = chat_app();
        app.input = "x".repeat(70_000);
        let mut terminal = Terminal::new(TestBackend::new(20, 8)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let cursor = terminal.get_cursor_position().unwrap();
        assert_eq!(cursor.x, 18);
    }

    #[tokio::test]
    async fn test_scroll_extent_counts_drawn_rows() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let mut app = chat_app();
        app.conversation.push_user("a    b    c    d    e    f");
        // 6 columns and 4 rows inside the message border
        let mut terminal = Terminal::new(TestBackend::new(8, 10)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();

        // "you", three rows of "a    b", and the trailing blank line
        assert_eq!(app.scroll.max_scroll, 5 - 4);
    }
}
