//! # Chat Input Example
//!
//! A chat composer with a syntax-highlighted input and a select for the
//! reply style. Colors come from the generated design tokens.
//!
//! - `Tab` moves focus between the select and the composer
//! - the select opens with `Enter`/`Space`/arrows or a click, and typing a
//!   letter while it is closed jumps straight to a matching style
//! - in the composer, `Enter` sends and `Ctrl+J` inserts a newline
//!
//! Logs go to `chat_input.log` (`RUST_LOG=debug` for select transitions).
//!
//! Run with: `cargo run --example chat_input`

use std::cell::Cell;

use floe::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use floe::ratatui::layout::{Constraint, Layout};
use floe::ratatui::style::{Color, Modifier, Style};
use floe::ratatui::text::{Line, Span};
use floe::ratatui::widgets::{Block, Paragraph};
use floe::ratatui::Frame;
use floe::widgets::input_highlight::{self, InputHighlight, ScrollTarget};
use floe::widgets::select::{self, Select, SelectOption};
use floe::widgets::theme::{self, Appearance};
use floe::{terminal_events, Command, Component, Model, ProgramOptions, Subscription, TerminalEvent};

/// Which pane receives keys. The select keeps them while its panel is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Style,
    Composer,
}

impl Pane {
    fn other(self) -> Self {
        match self {
            Pane::Style => Pane::Composer,
            Pane::Composer => Pane::Style,
        }
    }
}

/// Multi-line text buffer that scrolls to keep its last line visible.
#[derive(Default)]
struct Composer {
    text: String,
    scroll_top: u16,
    size: Cell<(u16, u16)>,
}

impl Composer {
    fn line_count(&self) -> u16 {
        self.text.split('\n').count() as u16
    }

    fn follow_end(&mut self) {
        let (_, height) = self.size.get();
        self.scroll_top = self.line_count().saturating_sub(height.max(1));
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<String> {
        match key.code {
            KeyCode::Enter => {
                let sent = std::mem::take(&mut self.text);
                self.scroll_top = 0;
                return (!sent.trim().is_empty()).then_some(sent);
            }
            KeyCode::Char('j') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.text.push('\n');
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.text.push(c);
            }
            KeyCode::Backspace => {
                self.text.pop();
            }
            KeyCode::Up => self.scroll_top = self.scroll_top.saturating_sub(1),
            KeyCode::Down => {
                let max = self.line_count().saturating_sub(1);
                self.scroll_top = (self.scroll_top + 1).min(max);
                return None;
            }
            _ => return None,
        }
        self.follow_end();
        None
    }
}

impl ScrollTarget for Composer {
    fn viewport_size(&self) -> (u16, u16) {
        self.size.get()
    }

    fn scroll_top(&self) -> u16 {
        self.scroll_top
    }
}

struct ChatApp {
    reply_style: Select,
    composer: Composer,
    highlight: InputHighlight,
    pane: Pane,
    transcript: Vec<(String, String)>,
    border: Style,
}

#[derive(Debug)]
enum Msg {
    Style(select::Message),
    Highlight(input_highlight::Message),
    Terminal(TerminalEvent),
}

impl ChatApp {
    fn style_label(&self) -> String {
        self.reply_style
            .selected_option()
            .map(|o| o.label.clone())
            .unwrap_or_default()
    }

    fn sync_highlight(&mut self) -> Command<Msg> {
        self.highlight.sync_from(&self.composer);
        self.highlight
            .update(input_highlight::Message::SetValue(self.composer.text.clone()))
            .map(Msg::Highlight)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Msg> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Command::quit();
        }
        if key.code == KeyCode::Tab && !self.reply_style.is_open() {
            self.pane = self.pane.other();
            self.reply_style.set_focused(self.pane == Pane::Style);
            return Command::none();
        }
        if self.reply_style.focused() || self.pane == Pane::Style {
            return self
                .reply_style
                .update(select::Message::KeyPress(key))
                .map(Msg::Style);
        }
        if let Some(sent) = self.composer.handle_key(key) {
            log::info!("sent {} bytes as {}", sent.len(), self.style_label());
            self.transcript.push((self.style_label(), sent));
        }
        self.sync_highlight()
    }
}

impl Model for ChatApp {
    type Message = Msg;
    type Flags = ();

    fn init(_: ()) -> (Self, Command<Msg>) {
        let tokens = theme::generate_custom_token(&theme::builtin(), Appearance::Dark);
        let border = tokens
            .get("grayBorder")
            .map_or(Style::default(), |&c| Style::default().fg(c));

        let mut reply_style = Select::new(vec![
            SelectOption::text("concise", "Concise").with_icon("•"),
            SelectOption::text("balanced", "Balanced").with_icon("•"),
            SelectOption::text("detailed", "Detailed").with_icon("•"),
            SelectOption::text("code", "Code only").with_icon("•"),
            SelectOption::empty("No preference"),
        ])
        .default_value(1)
        .with_tokens(&tokens, "primary")
        .with_id("reply-style");
        reply_style.set_focused(true);

        (
            ChatApp {
                reply_style,
                composer: Composer::default(),
                highlight: InputHighlight::new(),
                pane: Pane::Style,
                transcript: Vec::new(),
                border,
            },
            Command::none(),
        )
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Style(select::Message::Changed(index)) => {
                log::info!("reply style -> {index}");
                Command::none()
            }
            Msg::Style(m) => self.reply_style.update(m).map(Msg::Style),
            Msg::Highlight(m) => self.highlight.update(m).map(Msg::Highlight),
            Msg::Terminal(TerminalEvent::Mouse(ev)) => self
                .reply_style
                .update(select::Message::Mouse(ev))
                .map(Msg::Style),
            Msg::Terminal(TerminalEvent::Resize(..)) => {
                self.composer.follow_end();
                self.sync_highlight()
            }
            Msg::Terminal(TerminalEvent::Paste(text)) => {
                if self.pane == Pane::Composer {
                    self.composer.text.push_str(&text);
                    self.composer.follow_end();
                }
                self.sync_highlight()
            }
            Msg::Terminal(ev) => match ev.key_press() {
                Some(key) => self.handle_key(key),
                None => Command::none(),
            },
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [title_area, style_area, transcript_area, composer_area, help_area] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(6),
                Constraint::Length(1),
            ])
            .areas(frame.area());

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Chat",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            title_area,
        );

        let [label_area, select_area] =
            Layout::horizontal([Constraint::Length(14), Constraint::Length(20)]).areas(style_area);
        frame.render_widget(Paragraph::new("Reply style: "), label_area);

        let lines: Vec<Line> = self
            .transcript
            .iter()
            .flat_map(|(style, text)| {
                let head = Line::from(Span::styled(
                    format!("you ({style})"),
                    Style::default().fg(Color::DarkGray),
                ));
                std::iter::once(head).chain(text.lines().map(|l| Line::from(l.to_string())))
            })
            .collect();
        let skip = lines.len().saturating_sub(transcript_area.height as usize);
        frame.render_widget(
            Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>()),
            transcript_area,
        );

        let focused = self.pane == Pane::Composer;
        let block = Block::bordered()
            .title(" Message ")
            .border_style(if focused { self.border.fg(Color::Cyan) } else { self.border });
        let inner = block.inner(composer_area);
        frame.render_widget(block, composer_area);
        self.composer.size.set((inner.width, inner.height));
        self.highlight.view(frame, inner);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Tab", Style::default().fg(Color::DarkGray)),
                Span::raw(" focus  "),
                Span::styled("Enter", Style::default().fg(Color::DarkGray)),
                Span::raw(" send  "),
                Span::styled("Ctrl+J", Style::default().fg(Color::DarkGray)),
                Span::raw(" newline  "),
                Span::styled("Ctrl+C", Style::default().fg(Color::DarkGray)),
                Span::raw(" quit"),
            ])),
            help_area,
        );

        // Last, so the open panel is drawn above everything else.
        self.reply_style.view(frame, select_area);
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![terminal_events(|ev| Some(Msg::Terminal(ev)))];
        subs.extend(
            self.reply_style
                .subscriptions()
                .into_iter()
                .map(|s| s.map(Msg::Style)),
        );
        subs
    }
}

#[floe::tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let file = floe::log_to_file("chat_input.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    let options = ProgramOptions {
        mouse_capture: true,
        ..ProgramOptions::default()
    };
    floe::run_with::<ChatApp>((), options).await?;
    Ok(())
}
