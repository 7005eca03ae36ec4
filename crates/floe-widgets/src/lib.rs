//! Chat UI widgets for the **floe** toolkit.
//!
//! Every widget implements [`floe_core::Component`], so it can live inside
//! any [`floe_core::Model`] and be laid out with [`ratatui`].
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`select`] | Select control with a floating option panel, typeahead and touch-safe commit |
//! | [`input_highlight`] | Syntax-highlighted mirror of a text input, scroll-synced (feature `syntax-highlighting`) |
//!
//! # Utilities
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`theme`] | Design tokens generated from color scales |
//! | [`highlight`] | [`syntect`]-backed highlighting into ratatui lines (feature `syntax-highlighting`) |
//! | [`focus`] | Focus trapping for floating panels |
//! | [`key`] | Key-binding helpers |
//! | [`deferred`] | Cancellable one-shot timers |
//! | [`overlay`] | Geometry and drawing helpers for floating panels |

pub mod deferred;
pub mod focus;
#[cfg(feature = "syntax-highlighting")]
pub mod highlight;
#[cfg(feature = "syntax-highlighting")]
pub mod input_highlight;
pub mod key;
pub mod overlay;
pub mod select;
pub mod theme;
