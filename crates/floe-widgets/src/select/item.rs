//! One row of the option panel.

use super::style::SelectStyle;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

const SELECTED_MARK: &str = "✓";

/// Visual state of a row. Both flags may be set at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemState {
    /// Highlighted by keyboard or pointer.
    pub active: bool,
    /// The current value.
    pub selected: bool,
}

/// Renders a marker column, an optional icon and the label.
pub struct SelectItem<'a> {
    label: Line<'a>,
    icon: Option<&'a str>,
    state: ItemState,
    style: &'a SelectStyle,
}

impl<'a> SelectItem<'a> {
    pub fn new(label: impl Into<Line<'a>>, style: &'a SelectStyle) -> Self {
        Self {
            label: label.into(),
            icon: None,
            state: ItemState::default(),
            style,
        }
    }

    pub fn icon(mut self, icon: Option<&'a str>) -> Self {
        self.icon = icon;
        self
    }

    pub fn state(mut self, state: ItemState) -> Self {
        self.state = state;
        self
    }

    /// Columns needed to show a row without truncation.
    pub fn width(label: &Line<'_>, icon: Option<&str>) -> u16 {
        let icon = icon.map_or(0, |i| i.width() + 1);
        (1 + icon + label.width() + 1) as u16
    }
}

impl Widget for SelectItem<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut style = self.style.item;
        if self.state.selected {
            style = style.patch(self.style.selected);
        }
        if self.state.active {
            style = style.patch(self.style.active);
        }

        let mark = if self.state.selected { SELECTED_MARK } else { " " };
        let mut spans = vec![Span::raw(mark)];
        if let Some(icon) = self.icon {
            spans.push(Span::raw(icon));
            spans.push(Span::raw(" "));
        }
        spans.extend(self.label.spans);

        Paragraph::new(Line::from(spans)).style(style).render(area, buf);
    }
}
