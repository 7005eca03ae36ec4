//! Option values shown by a [`Select`](super::Select).

use std::fmt;

/// The key identifying an option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum OptionValue {
    Text(String),
    Number(i64),
    /// An option with no value, e.g. a "none" placeholder entry.
    #[default]
    None,
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Text(s) => f.write_str(s),
            OptionValue::Number(n) => write!(f, "{n}"),
            OptionValue::None => Ok(()),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

impl From<i64> for OptionValue {
    fn from(n: i64) -> Self {
        OptionValue::Number(n)
    }
}

/// One entry of the option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: OptionValue,
    pub label: String,
    pub icon: Option<String>,
}

impl SelectOption {
    pub fn new(value: impl Into<OptionValue>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            icon: None,
        }
    }

    /// An option keyed by a string.
    pub fn text(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(OptionValue::Text(value.into()), label)
    }

    /// An option keyed by a number.
    pub fn number(value: i64, label: impl Into<String>) -> Self {
        Self::new(OptionValue::Number(value), label)
    }

    /// An option without a value.
    pub fn empty(label: impl Into<String>) -> Self {
        Self::new(OptionValue::None, label)
    }

    /// Show `icon` before the label.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}
