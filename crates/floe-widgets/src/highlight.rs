//! Syntax highlighting into ratatui [`Line`]s.
//!
//! Uses [`syntect`] with its bundled syntax definitions and themes, loaded
//! once per [`Highlighter`]. Output lines carry no trailing newline and no
//! decoration, so they lay out cell-for-cell like the source text.
//!
//! This module is feature-gated behind `syntax-highlighting`.
//!
//! ```ignore
//! use floe_widgets::highlight::Highlighter;
//!
//! let hl = Highlighter::new();
//! let lines = hl.highlight("**bold** and `code`", "markdown");
//! ```

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Syntax highlighter backed by [`syntect`].
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Highlighter")
            .field("theme_name", &self.theme_name)
            .finish_non_exhaustive()
    }
}

impl Highlighter {
    /// Create a highlighter using the `base16-ocean.dark` theme.
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: DEFAULT_THEME.to_string(),
        }
    }

    /// Set the syntect theme by name. Unknown names keep the current theme.
    pub fn with_theme(mut self, theme: &str) -> Self {
        if self.theme_set.themes.contains_key(theme) {
            self.theme_name = theme.to_string();
        } else {
            log::warn!("unknown highlight theme {theme:?}, keeping {}", self.theme_name);
        }
        self
    }

    pub fn theme_name(&self) -> &str {
        &self.theme_name
    }

    /// Names of the bundled themes.
    pub fn available_themes(&self) -> Vec<&str> {
        self.theme_set.themes.keys().map(|s| s.as_str()).collect()
    }

    fn theme(&self) -> Option<&Theme> {
        self.theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
    }

    /// Highlight `code` and return one styled [`Line`] per source line.
    ///
    /// `language` is matched as a syntect token (name or extension), then as
    /// a file extension. Unknown languages render as plain text.
    pub fn highlight(&self, code: &str, language: &str) -> Vec<Line<'static>> {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(language)
            .or_else(|| self.syntax_set.find_syntax_by_extension(language))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let Some(theme) = self.theme() else {
            return plain(code);
        };
        let mut highlighter = HighlightLines::new(syntax, theme);

        LinesWithEndings::from(code)
            .map(|line| match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => Line::from(
                    ranges
                        .iter()
                        .filter_map(|(style, text)| {
                            let text = strip_newline(text);
                            (!text.is_empty()).then(|| Span::styled(text.to_string(), convert(style)))
                        })
                        .collect::<Vec<_>>(),
                ),
                Err(err) => {
                    log::debug!("highlighting failed, using plain text: {err}");
                    Line::from(strip_newline(line).to_string())
                }
            })
            .collect()
    }
}

fn strip_newline(text: &str) -> &str {
    text.trim_end_matches(['\n', '\r'])
}

fn plain(code: &str) -> Vec<Line<'static>> {
    code.lines().map(|l| Line::from(l.to_string())).collect()
}

fn convert(style: &syntect::highlighting::Style) -> Style {
    let fg = style.foreground;
    let mut out = Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b));
    if style.font_style.contains(FontStyle::BOLD) {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn default_theme() {
        assert_eq!(Highlighter::new().theme_name(), "base16-ocean.dark");
    }

    #[test]
    fn one_line_per_source_line_without_newlines() {
        let lines = Highlighter::new().highlight("# Title\n\nsome *text*\n", "markdown");
        assert_eq!(lines.len(), 3);
        assert_eq!(text(&lines[0]), "# Title");
        assert_eq!(text(&lines[1]), "");
        assert_eq!(text(&lines[2]), "some *text*");
    }

    #[test]
    fn spans_are_colored() {
        let lines = Highlighter::new().highlight("fn main() {}", "rust");
        assert!(lines[0].spans.iter().all(|s| matches!(s.style.fg, Some(Color::Rgb(..)))));
    }

    #[test]
    fn unknown_language_falls_back_to_plain_text() {
        let lines = Highlighter::new().highlight("some text", "nonexistent_lang_xyz");
        assert_eq!(text(&lines[0]), "some text");
    }

    #[test]
    fn with_theme_valid_and_invalid() {
        assert_eq!(Highlighter::new().with_theme("InspiredGitHub").theme_name(), "InspiredGitHub");
        assert_eq!(Highlighter::new().with_theme("does_not_exist").theme_name(), "base16-ocean.dark");
    }

    #[test]
    fn available_themes_not_empty() {
        assert!(!Highlighter::new().available_themes().is_empty());
    }
}
