use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that renders into a given [`Rect`] area.
///
/// `Component` mirrors [`Model`](crate::Model) with one difference: its
/// [`view`](Component::view) receives the `area` chosen by the parent. For
/// floating widgets the area is the *anchor*; a component may draw outside
/// it (for example a dropdown panel), clamped to the frame.
///
/// # Composition pattern
///
/// Wrap the child's message type in a parent variant and lift commands with
/// [`Command::map`]:
///
/// ```rust,ignore
/// use floe_core::{Command, Component, Model};
/// use floe_widgets::select::{self, Select, SelectOption};
///
/// struct App { model: Select }
///
/// enum AppMsg { Model(select::Message) }
///
/// impl Model for App {
///     type Message = AppMsg;
///     type Flags = ();
///
///     fn init(_: ()) -> (Self, Command<AppMsg>) {
///         let options = vec![SelectOption::text("fast", "Fast")];
///         (App { model: Select::new(options) }, Command::none())
///     }
///
///     fn update(&mut self, msg: AppMsg) -> Command<AppMsg> {
///         match msg {
///             AppMsg::Model(select::Message::Changed(i)) => {
///                 // react to the committed index
///                 Command::none()
///             }
///             AppMsg::Model(m) => self.model.update(m).map(AppMsg::Model),
///         }
///     }
///
///     fn view(&self, frame: &mut ratatui::Frame) {
///         self.model.view(frame, frame.area());
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] for side effects.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into a specific `area` of the [`Frame`].
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Declare active subscriptions for this component.
    ///
    /// The parent collects these and includes them in its own
    /// [`Model::subscriptions`](crate::Model::subscriptions), mapping
    /// messages appropriately. Because the runtime diffs subscriptions after
    /// every update, returning a subscription only in some states scopes its
    /// lifetime to those states.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }

    /// Whether this component currently wants keyboard input.
    fn focused(&self) -> bool {
        false
    }
}
