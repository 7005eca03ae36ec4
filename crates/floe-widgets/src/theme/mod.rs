//! Design-token generation from base color scales.
//!
//! A [`ColorScale`] holds 13 solid and 13 translucent steps for each
//! [`Appearance`]. The generator flattens scales into a [`TokenMap`] of named
//! colors: numbered step tokens (`gray1` .. `gray11`, `gray1A` .. `gray11A`)
//! and semantic tokens (`grayBg`, `grayBorder`, `grayText`, ...). Widgets
//! read the semantic tokens, e.g.
//! [`SelectStyle::from_tokens`](crate::select::SelectStyle::from_tokens).
//!
//! ```rust
//! use floe_widgets::theme::{self, Appearance};
//!
//! let tokens = theme::generate_custom_token(&theme::builtin(), Appearance::Dark);
//! assert!(tokens.contains_key("primaryBg"));
//! assert!(tokens.contains_key("gray11A"));
//! ```

mod builtin;
mod scale;
mod token;

pub use builtin::{builtin, gray, primary};
pub use scale::{parse_hex, ColorScale, SCALE_STEPS};
pub use token::{generate_color_palette, generate_custom_color_palette, generate_custom_token};

use ratatui::style::Color;
use std::collections::BTreeMap;

/// Generated tokens, keyed by token name.
pub type TokenMap = BTreeMap<String, Color>;

/// Light or dark theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Appearance {
    #[default]
    Light,
    Dark,
}

/// Errors from parsing or loading color scales.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("invalid hex color {0:?}")]
    InvalidHex(String),

    #[error("scale field `{field}` has {len} colors, expected {SCALE_STEPS}")]
    ScaleLength { field: &'static str, len: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convert a scale or widget name to the camelCase form used in token
/// names: `native-select` becomes `nativeSelect`.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, word) in words(name).iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Split on separators and case boundaries (`fooBar`, `HTTPServer`).
fn words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_splits_separators() {
        assert_eq!(camel_case("native-select"), "nativeSelect");
        assert_eq!(camel_case("chat_input area"), "chatInputArea");
        assert_eq!(camel_case("__gray__"), "gray");
    }

    #[test]
    fn camel_case_splits_case_boundaries() {
        assert_eq!(camel_case("primary"), "primary");
        assert_eq!(camel_case("fooBar"), "fooBar");
        assert_eq!(camel_case("FooBar"), "fooBar");
        assert_eq!(camel_case("HTTPServer"), "httpServer");
    }

    #[test]
    fn camel_case_empty() {
        assert_eq!(camel_case(""), "");
        assert_eq!(camel_case("--"), "");
    }
}
