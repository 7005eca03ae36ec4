//! Highlight layer drawn over a text input.
//!
//! [`InputHighlight`] mirrors the value of an input and paints it with
//! syntax colors at exactly the input's size and scroll position, so the
//! host can draw it over (or instead of) the raw text. The host keeps it in
//! sync by forwarding the input's value, size and scroll top, or by calling
//! [`InputHighlight::sync_from`] with anything implementing
//! [`ScrollTarget`].

use crate::highlight::Highlighter;
use floe_core::{Command, Component};
use ratatui::layout::Rect;
use ratatui::text::{Line, Text};
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;

/// A scrollable element the overlay follows.
pub trait ScrollTarget {
    /// Visible `(width, height)` in cells.
    fn viewport_size(&self) -> (u16, u16);
    /// First visible line.
    fn scroll_top(&self) -> u16;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    SetValue(String),
    TargetScrolled(u16),
    TargetResized { width: u16, height: u16 },
}

/// Syntax-highlighted mirror of a text input.
pub struct InputHighlight {
    highlighter: Highlighter,
    language: String,
    value: String,
    lines: Vec<Line<'static>>,
    size: Option<(u16, u16)>,
    scroll_top: u16,
}

impl Default for InputHighlight {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHighlight {
    /// An empty overlay highlighting markdown.
    pub fn new() -> Self {
        Self {
            highlighter: Highlighter::new(),
            language: "markdown".to_string(),
            value: String::new(),
            lines: Vec::new(),
            size: None,
            scroll_top: 0,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self.rehighlight();
        self
    }

    pub fn with_highlighter(mut self, highlighter: Highlighter) -> Self {
        self.highlighter = highlighter;
        self.rehighlight();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Last known target size, if any.
    pub fn size(&self) -> Option<(u16, u16)> {
        self.size
    }

    pub fn scroll_top(&self) -> u16 {
        self.scroll_top
    }

    /// The highlighted lines of the trimmed value.
    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    /// Mirror a new input value. Unchanged values are not re-highlighted.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value != self.value {
            self.value = value;
            self.rehighlight();
        }
    }

    /// Copy size and scroll position from `target`.
    pub fn sync_from(&mut self, target: &impl ScrollTarget) {
        self.size = Some(target.viewport_size());
        self.scroll_top = target.scroll_top();
    }

    fn rehighlight(&mut self) {
        self.lines = self.highlighter.highlight(self.value.trim(), &self.language);
    }
}

impl Component for InputHighlight {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::SetValue(value) => self.set_value(value),
            Message::TargetScrolled(top) => self.scroll_top = top,
            Message::TargetResized { width, height } => self.size = Some((width, height)),
        }
        Command::none()
    }

    /// `area` is the input's area; its origin positions the overlay, the
    /// target size (when known) sizes it.
    fn view(&self, frame: &mut Frame, area: Rect) {
        let (width, height) = self.size.unwrap_or((area.width, area.height));
        let overlay = Rect::new(area.x, area.y, width, height).intersection(frame.area());
        if overlay.is_empty() {
            return;
        }
        frame.render_widget(Clear, overlay);
        frame.render_widget(
            Paragraph::new(Text::from(self.lines.clone())).scroll((self.scroll_top, 0)),
            overlay,
        );
    }
}
