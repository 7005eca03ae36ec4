use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::Frame;

/// The root of a floe application.
///
/// A model owns all application state. The [`Program`](crate::Program)
/// calls [`init`](Model::init) once, then alternates between
/// [`update`](Model::update) for every incoming message and
/// [`view`](Model::view) at most once per frame. Widgets such as the select
/// live inside a model as [`Component`](crate::Component)s and receive
/// wrapped messages from it.
pub trait Model: Sized + Send + 'static {
    /// Everything that can happen to the application.
    type Message: Send + 'static;

    /// Startup arguments handed to [`Model::init`].
    type Flags: Send + 'static;

    /// Build the initial state.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Handle one message. The returned command runs before the next message
    /// is processed, and [`subscriptions`](Model::subscriptions) is
    /// re-evaluated afterwards.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Draw the whole screen. Widgets may cache layout through interior
    /// mutability here, but application state must not change.
    fn view(&self, frame: &mut Frame);

    /// Event sources that should be live for the current state.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
