//! Jump to an option by typing the start of its label.

use crate::deferred::{Deferred, TimerId};
use floe_core::Command;
use std::time::Duration;

/// Typeahead buffer with an inactivity reset.
///
/// Matching is a case-insensitive prefix test. The search starts just after
/// the origin (the selected item when the panel opened, later the previous
/// match) and wraps around. Typing the same first letter again cycles
/// through the items starting with it, unless some label starts with a
/// doubled letter, in which case the letters accumulate into a word.
#[derive(Debug, Default)]
pub struct Typeahead {
    buffer: String,
    origin: Option<usize>,
    last_match: Option<usize>,
    reset: Deferred,
}

impl Typeahead {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh session searching after `origin`.
    pub fn seed(&mut self, origin: Option<usize>) {
        self.clear();
        self.origin = origin;
        self.last_match = origin;
    }

    /// Whether a word is being typed. A space typed now belongs to the word.
    pub fn is_typing(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// The characters typed so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Drop the buffer and any pending reset.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.reset.cancel();
        self.origin = None;
        self.last_match = None;
    }

    /// Feed one character. Returns the matching index, if any, and the reset
    /// timer command.
    pub fn push<Msg: Send + 'static>(
        &mut self,
        c: char,
        labels: &[&str],
        delay: Duration,
        to_msg: impl FnOnce(TimerId) -> Msg,
    ) -> (Option<usize>, Command<Msg>) {
        let rapid = labels.iter().all(|label| {
            let mut chars = label.chars().flat_map(char::to_lowercase);
            match (chars.next(), chars.next()) {
                (Some(a), Some(b)) => a != b,
                _ => true,
            }
        });
        if rapid && self.buffer.chars().eq(std::iter::once(c)) {
            self.buffer.clear();
            self.origin = self.last_match;
        }
        self.buffer.push(c);
        let cmd = self.reset.schedule(delay, to_msg);

        let found = find_prefix(labels, &self.buffer, self.origin);
        match found {
            Some(index) => self.last_match = Some(index),
            None if c != ' ' => {
                self.buffer.clear();
                self.reset.cancel();
                return (None, Command::none());
            }
            None => {}
        }
        (found, cmd)
    }

    /// Handle a delivered reset timer. Stale timers are ignored.
    pub fn fire(&mut self, id: TimerId) {
        if self.reset.fire(id) {
            log::trace!("typeahead reset after {:?}", self.buffer);
            self.buffer.clear();
            self.origin = self.last_match;
        }
    }
}

/// First label after `origin` (wrapping) that starts with `query`, ignoring
/// case.
fn find_prefix(labels: &[&str], query: &str, origin: Option<usize>) -> Option<usize> {
    let n = labels.len();
    if n == 0 {
        return None;
    }
    let query = query.to_lowercase();
    let start = origin.map_or(0, |o| o + 1);
    (0..n)
        .map(|k| (start + k) % n)
        .find(|&i| labels[i].to_lowercase().starts_with(&query))
}
