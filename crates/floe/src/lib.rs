//! **floe** -- chat UI widgets on an Elm-style runtime for [`ratatui`].
//!
//! The umbrella crate re-exports everything needed to build a floe
//! application from a single dependency.
//!
//! # Re-exports
//!
//! * Everything public in [`floe_core`] is available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Subscription`], [`Program`],
//!   [`run`], [`run_with`], the [`testing`] harnesses).
//! * The [`widgets`] module re-exports [`floe_widgets`]: the select control,
//!   the input highlight overlay and the design-token generator.
//! * [`ratatui`], [`crossterm`] and [`tokio`] are re-exported so downstream
//!   crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use floe::widgets::select::{self, Select, SelectOption};
//! use floe::{Command, Component, Model, Subscription};
//! use ratatui::layout::Rect;
//! use ratatui::Frame;
//!
//! struct App {
//!     model: Select,
//! }
//!
//! enum Msg {
//!     Model(select::Message),
//! }
//!
//! impl Model for App {
//!     type Message = Msg;
//!     type Flags = ();
//!
//!     fn init(_: ()) -> (Self, Command<Msg>) {
//!         let options = vec![
//!             SelectOption::text("gpt", "GPT"),
//!             SelectOption::text("claude", "Claude"),
//!         ];
//!         (App { model: Select::new(options) }, Command::none())
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Command<Msg> {
//!         match msg {
//!             Msg::Model(m) => self.model.update(m).map(Msg::Model),
//!         }
//!     }
//!
//!     fn view(&self, frame: &mut Frame) {
//!         self.model.view(frame, Rect::new(2, 2, 20, 1));
//!     }
//!
//!     fn subscriptions(&self) -> Vec<Subscription<Msg>> {
//!         self.model
//!             .subscriptions()
//!             .into_iter()
//!             .map(|s| s.map(Msg::Model))
//!             .collect()
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     floe::run::<App>(()).await.unwrap();
//! }
//! ```

pub use floe_core::*;
pub mod widgets {
    pub use floe_widgets::*;
}

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
pub use ratatui;
pub use tokio;
