//! Built-in subscription sources.
//!
//! - **Terminal events** ([`terminal_events`]) -- keyboard, mouse, resize,
//!   focus and paste events from the terminal.
//! - **Intervals** ([`Every`]) -- a repeating tick, also the basis of
//!   "keep positioned while open" watchers in the widget crate.

mod terminal;
mod timer;

pub use terminal::*;
pub use timer::*;
