//! Headless harnesses for unit-testing models and components.
//!
//! Both harnesses run every update synchronously and keep a *virtual clock*:
//! timers created with [`Command::after`] are queued with a deadline and only
//! fire when the test calls `advance`. Futures are dropped, since there is no
//! executor.

use crate::command::{Command, CommandInner};
use crate::component::Component;
use crate::model::Model;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use std::collections::VecDeque;
use std::time::Duration;

struct Timer<Msg> {
    due: Duration,
    seq: u64,
    msg: Msg,
}

/// Virtual-time timer queue shared by the harnesses.
struct Timers<Msg> {
    now: Duration,
    seq: u64,
    queue: Vec<Timer<Msg>>,
}

impl<Msg> Timers<Msg> {
    fn new() -> Self {
        Self {
            now: Duration::ZERO,
            seq: 0,
            queue: Vec::new(),
        }
    }

    fn schedule(&mut self, delay: Duration, msg: Msg) {
        self.seq += 1;
        self.queue.push(Timer {
            due: self.now + delay,
            seq: self.seq,
            msg,
        });
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its deadline.
    fn pop_due(&mut self, until: Duration) -> Option<Msg> {
        let idx = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;
        let timer = self.queue.remove(idx);
        self.now = self.now.max(timer.due);
        Some(timer.msg)
    }
}

/// Split a command into immediate messages and timers.
fn collect<Msg: Send + 'static>(cmd: Command<Msg>, out: &mut VecDeque<Msg>, timers: &mut Timers<Msg>) {
    match cmd.inner {
        CommandInner::None | CommandInner::Quit | CommandInner::Future(_) => {}
        CommandInner::Message(msg) => out.push_back(msg),
        CommandInner::After { delay, msg } => timers.schedule(delay, msg),
        CommandInner::Batch(cmds) => {
            for cmd in cmds {
                collect(cmd, out, timers);
            }
        }
    }
}

fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut output = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            output.push_str(buf[(x, y)].symbol());
        }
        if y + 1 < area.bottom() {
            output.push('\n');
        }
    }
    output
}

fn draw(width: u16, height: u16, f: impl FnOnce(&mut Frame)) -> Buffer {
    let backend = ratatui::backend::TestBackend::new(width, height);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(err) => panic!("test backend: {err}"),
    };
    if let Err(err) = terminal.draw(f) {
        panic!("test draw: {err}");
    }
    terminal.backend().buffer().clone()
}

/// A headless test harness that drives a [`Model`] without a real terminal.
///
/// ```rust,ignore
/// let mut prog = TestProgram::<App>::new(());
/// prog.send(Msg::Open);
/// prog.advance(Duration::from_millis(350));
/// assert!(prog.model().ready());
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending: VecDeque<M::Message>,
    timers: Timers<M::Message>,
}

impl<M: Model> TestProgram<M> {
    /// Create a test program by calling [`Model::init`] with the given flags.
    pub fn new(flags: M::Flags) -> Self {
        let (model, cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending: VecDeque::new(),
            timers: Timers::new(),
        };
        collect(cmd, &mut program.pending, &mut program.timers);
        program
    }

    /// Send a message, triggering a single update cycle. Immediate messages
    /// produced by the update are queued; see
    /// [`drain_messages`](TestProgram::drain_messages).
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        collect(cmd, &mut self.pending, &mut self.timers);
    }

    /// Process queued immediate messages until none are left.
    pub fn drain_messages(&mut self) {
        while let Some(msg) = self.pending.pop_front() {
            self.send(msg);
        }
    }

    /// Move the virtual clock forward, firing due timers in deadline order.
    /// Immediate messages produced by each timer are drained before the next
    /// timer fires.
    pub fn advance(&mut self, by: Duration) {
        let until = self.timers.now + by;
        while let Some(msg) = self.timers.pop_due(until) {
            self.send(msg);
            self.drain_messages();
        }
        self.timers.now = until;
    }

    /// Virtual time elapsed since the harness was created.
    pub fn now(&self) -> Duration {
        self.timers.now
    }

    /// Get a shared reference to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model for direct test setup.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Render the model to a ratatui [`Buffer`] of the given dimensions.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        draw(width, height, |frame| self.model.view(frame))
    }

    /// Render the model and return the visible content, one line per row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }
}

/// A headless harness for a single [`Component`].
///
/// Every immediate message the component emits is recorded in
/// [`emitted`](TestComponent::emitted), which is how tests observe outbound
/// notifications. Emitted messages are *not* fed back automatically; call
/// [`drain_messages`](TestComponent::drain_messages) to do that.
pub struct TestComponent<C: Component>
where
    C::Message: Clone,
{
    component: C,
    emitted: Vec<C::Message>,
    pending: VecDeque<C::Message>,
    timers: Timers<C::Message>,
}

impl<C: Component> TestComponent<C>
where
    C::Message: Clone,
{
    /// Wrap a component.
    pub fn new(component: C) -> Self {
        Self {
            component,
            emitted: Vec::new(),
            pending: VecDeque::new(),
            timers: Timers::new(),
        }
    }

    /// Run one update with `msg`.
    pub fn send(&mut self, msg: C::Message) {
        let cmd = self.component.update(msg);
        self.absorb(cmd);
    }

    /// Route a command produced outside `update` (e.g. by a direct method
    /// call on the component) through the harness.
    pub fn absorb(&mut self, cmd: Command<C::Message>) {
        let mut out = VecDeque::new();
        collect(cmd, &mut out, &mut self.timers);
        self.emitted.extend(out.iter().cloned());
        self.pending.extend(out);
    }

    /// Call a method on the component and route its command.
    pub fn with(&mut self, f: impl FnOnce(&mut C) -> Command<C::Message>) {
        let cmd = f(&mut self.component);
        self.absorb(cmd);
    }

    /// Feed emitted-but-undelivered messages back into the component.
    pub fn drain_messages(&mut self) {
        while let Some(msg) = self.pending.pop_front() {
            self.send(msg);
        }
    }

    /// Move the virtual clock forward, firing due timers in deadline order.
    pub fn advance(&mut self, by: Duration) {
        let until = self.timers.now + by;
        while let Some(msg) = self.timers.pop_due(until) {
            self.send(msg);
        }
        self.timers.now = until;
    }

    /// Move the virtual clock to an absolute time (no-op if already past it).
    pub fn advance_to(&mut self, at: Duration) {
        let by = at.saturating_sub(self.timers.now);
        self.advance(by);
    }

    /// Virtual time elapsed since the harness was created.
    pub fn now(&self) -> Duration {
        self.timers.now
    }

    /// Number of timers still waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.timers.queue.len()
    }

    /// Every immediate message emitted so far, oldest first.
    pub fn emitted(&self) -> &[C::Message] {
        &self.emitted
    }

    /// Forget recorded emissions.
    pub fn clear_emitted(&mut self) {
        self.emitted.clear();
        self.pending.clear();
    }

    /// Shared access to the component.
    pub fn component(&self) -> &C {
        &self.component
    }

    /// Mutable access to the component, bypassing the message cycle.
    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// Render the component into the full frame of the given size.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        self.render_at(width, height, Rect::new(0, 0, width, height))
    }

    /// Render the component into `area` of a frame of the given size.
    pub fn render_at(&self, width: u16, height: u16, area: Rect) -> Buffer {
        draw(width, height, |frame| self.component.view(frame, area))
    }

    /// Render and return the visible content, one line per row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    struct Blinker {
        lit: bool,
        toggles: u32,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum BlinkMsg {
        Start,
        Toggle,
        Notify(u32),
    }

    impl Model for Blinker {
        type Message = BlinkMsg;
        type Flags = ();

        fn init(_: ()) -> (Self, Command<BlinkMsg>) {
            (
                Blinker {
                    lit: false,
                    toggles: 0,
                },
                Command::none(),
            )
        }

        fn update(&mut self, msg: BlinkMsg) -> Command<BlinkMsg> {
            match msg {
                BlinkMsg::Start => Command::after(Duration::from_millis(100), BlinkMsg::Toggle),
                BlinkMsg::Toggle => {
                    self.lit = !self.lit;
                    self.toggles += 1;
                    Command::message(BlinkMsg::Notify(self.toggles))
                }
                BlinkMsg::Notify(_) => Command::none(),
            }
        }

        fn view(&self, frame: &mut Frame) {
            let text = if self.lit { "on" } else { "off" };
            frame.render_widget(Paragraph::new(text), frame.area());
        }
    }

    impl Component for Blinker {
        type Message = BlinkMsg;

        fn update(&mut self, msg: BlinkMsg) -> Command<BlinkMsg> {
            Model::update(self, msg)
        }

        fn view(&self, frame: &mut Frame, area: Rect) {
            let text = if self.lit { "on" } else { "off" };
            frame.render_widget(Paragraph::new(text), area);
        }
    }

    #[test]
    fn timer_waits_for_virtual_clock() {
        let mut prog = TestProgram::<Blinker>::new(());
        prog.send(BlinkMsg::Start);
        prog.advance(Duration::from_millis(99));
        assert!(!prog.model().lit);

        prog.advance(Duration::from_millis(1));
        assert!(prog.model().lit);
        assert_eq!(prog.now(), Duration::from_millis(100));
    }

    #[test]
    fn render_string_reflects_state() {
        let mut prog = TestProgram::<Blinker>::new(());
        assert!(prog.render_string(10, 1).starts_with("off"));
        prog.send(BlinkMsg::Toggle);
        assert!(prog.render_string(10, 1).starts_with("on"));
    }

    #[test]
    fn component_records_emitted_messages() {
        let mut harness = TestComponent::new(Blinker {
            lit: false,
            toggles: 0,
        });
        harness.send(BlinkMsg::Start);
        assert_eq!(harness.pending_timers(), 1);
        assert!(harness.emitted().is_empty());

        harness.advance_to(Duration::from_millis(150));
        assert_eq!(harness.emitted(), &[BlinkMsg::Notify(1)]);
        assert_eq!(harness.pending_timers(), 0);
    }

    #[test]
    fn timers_fire_in_deadline_order() {
        let mut harness = TestComponent::new(Blinker {
            lit: false,
            toggles: 0,
        });
        harness.absorb(Command::batch(vec![
            Command::after(Duration::from_millis(50), BlinkMsg::Notify(2)),
            Command::after(Duration::from_millis(10), BlinkMsg::Notify(1)),
        ]));
        harness.advance(Duration::from_millis(60));
        // Timer messages are delivered to the component, not recorded as
        // emissions.
        assert!(harness.emitted().is_empty());
        assert_eq!(harness.now(), Duration::from_millis(60));
    }
}
