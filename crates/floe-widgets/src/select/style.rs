use crate::theme::{camel_case, TokenMap};
use ratatui::style::{Color, Modifier, Style};

/// Style configuration for the select trigger and panel.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStyle {
    /// The closed trigger.
    pub trigger: Style,
    /// The trigger while focused or open.
    pub trigger_active: Style,
    /// Panel border.
    pub border: Style,
    /// Rows in their default state.
    pub item: Style,
    /// Patched over `item` for the highlighted row.
    pub active: Style,
    /// Patched over `item` for the current value.
    pub selected: Style,
}

impl Default for SelectStyle {
    fn default() -> Self {
        Self {
            trigger: Style::default(),
            trigger_active: Style::default().fg(Color::Cyan),
            border: Style::default().fg(Color::DarkGray),
            item: Style::default(),
            active: Style::default().bg(Color::DarkGray),
            selected: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        }
    }
}

impl SelectStyle {
    /// Build a style from generated design tokens.
    ///
    /// `prefix` scopes the lookup: `native-select` reads `nativeSelectBg`,
    /// `nativeSelectBgHover`, `nativeSelectBorder`, `nativeSelectText`,
    /// `nativeSelectTextHover` and `nativeSelectTextActive`. Missing tokens
    /// keep the default style.
    pub fn from_tokens(tokens: &TokenMap, prefix: &str) -> Self {
        let prefix = camel_case(prefix);
        let token = |suffix: &str| tokens.get(&format!("{prefix}{suffix}")).copied();
        let mut style = Self::default();

        if let Some(fg) = token("Text") {
            style.trigger = style.trigger.fg(fg);
            style.item = style.item.fg(fg);
        }
        if let Some(bg) = token("Bg") {
            style.item = style.item.bg(bg);
        }
        if let Some(bg) = token("BgHover") {
            style.active = style.active.bg(bg);
        }
        if let Some(fg) = token("TextHover") {
            style.active = style.active.fg(fg);
        }
        if let Some(fg) = token("TextActive") {
            style.selected = style.selected.fg(fg);
            style.trigger_active = style.trigger_active.fg(fg);
        }
        if let Some(fg) = token("Border") {
            style.border = style.border.fg(fg);
        }
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tokens_keep_defaults() {
        assert_eq!(SelectStyle::from_tokens(&TokenMap::new(), "select"), SelectStyle::default());
    }

    #[test]
    fn prefix_is_camel_cased() {
        let mut tokens = TokenMap::new();
        tokens.insert("nativeSelectBgHover".into(), Color::Rgb(1, 2, 3));
        tokens.insert("nativeSelectBorder".into(), Color::Rgb(4, 5, 6));
        let style = SelectStyle::from_tokens(&tokens, "native-select");
        assert_eq!(style.active.bg, Some(Color::Rgb(1, 2, 3)));
        assert_eq!(style.border.fg, Some(Color::Rgb(4, 5, 6)));
    }
}
