//! Select control with a floating option panel.
//!
//! [`Select`] shows the current option on a one-line trigger. Opening it
//! draws a bordered panel over the rest of the frame, positioned by a
//! [`PositionResolver`]: by default the selected item sits on the trigger
//! row, and when that does not fit the panel falls back to a plain
//! dropdown below (or above) the trigger.
//!
//! Pointer releases are guarded by a grace period after opening, so the
//! release that ends the press which opened the panel does not also pick
//! whatever item ended up under the pointer. Keyboard input and touch on an
//! item lift the guard immediately.
//!
//! Selection can be owned by the select or by its parent, see
//! [`ValueSource`]. Either way a finished selection is reported as
//! [`Message::Changed`].
//!
//! # Example
//!
//! ```ignore
//! use floe_widgets::select::{Message, Select, SelectOption};
//!
//! let mut select = Select::new(vec![
//!     SelectOption::text("concise", "Concise"),
//!     SelectOption::text("detailed", "Detailed"),
//! ])
//! .with_id("reply-style");
//!
//! // In the parent's update:
//! match msg {
//!     Message::Changed(index) => { /* react */ }
//!     other => return select.update(other).map(AppMsg::Style),
//! }
//! ```

pub mod item;
pub mod option;
pub mod position;
mod style;
pub mod typeahead;
pub mod value;

pub use item::{ItemState, SelectItem};
pub use option::{OptionValue, SelectOption};
pub use position::{
    FloatingResolver, Placement, PlacementMode, PlacementRequest, PositionResolver, Side,
};
pub use style::SelectStyle;
pub use typeahead::Typeahead;
pub use value::{MergedValue, ValueSource};

use crate::deferred::{Deferred, TimerId};
use crate::focus::{FocusScope, FocusTrap};
use crate::key::{printable, Binding, KeyCombination};
use crate::overlay::{hit, render_overlay};
use crate::theme::TokenMap;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use floe_core::{Command, Component, Subscription};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use std::cell::Cell;
use std::time::Duration;

type RenderFn = Box<dyn Fn(&SelectOption, usize) -> Line<'static> + Send>;
type ValueFn = Box<dyn Fn(usize) -> Line<'static> + Send>;

/// Timing and layout knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectConfig {
    /// How long after opening a pointer release may not commit.
    pub grace_period: Duration,
    /// Typeahead inactivity before the typed word is forgotten.
    pub typeahead_reset: Duration,
    /// Gap kept between the panel and the frame edge.
    pub padding: u16,
    /// Rows anchored placement must show for touch input.
    pub min_items_visible_touch: usize,
    /// Rows anchored placement must show for mouse input.
    pub min_items_visible_pointer: usize,
    /// Rows the trigger may stick out of the padded frame in anchored mode.
    pub reference_overflow_threshold: u16,
    /// Row cap for the fallback dropdown.
    pub max_visible: usize,
    /// How often an open panel re-checks its placement.
    pub watch_interval: Duration,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            grace_period: Duration::from_millis(300),
            typeahead_reset: Duration::from_millis(750),
            padding: 1,
            min_items_visible_touch: 8,
            min_items_visible_pointer: 4,
            reference_overflow_threshold: 1,
            max_visible: 10,
            watch_interval: Duration::from_millis(100),
        }
    }
}

/// What opened the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenReason {
    /// Enter, Space or an arrow key: the selected item starts highlighted.
    Keyboard,
    /// Click or tap: nothing is highlighted until the pointer moves.
    Pointer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

/// Ephemeral state of one open session.
///
/// While closed, everything except `touch` reads as its default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub open: bool,
    /// Highlighted item, not yet committed.
    pub active: Option<usize>,
    /// Whether the panel uses the fallback dropdown placement.
    pub fallback: bool,
    pub scroll_offset: i32,
    /// Whether the last input came from touch.
    pub touch: bool,
    /// Set while wheel scrolling moves items under a still pointer.
    pub block_selection: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A key press routed to the select.
    KeyPress(KeyEvent),
    /// A raw mouse event, hit-tested against the last rendered layout.
    Mouse(MouseEvent),
    /// Press on the trigger: toggles the panel.
    TriggerPress,
    /// Touch began on the trigger. Only records the input kind; the
    /// following press opens the panel.
    TriggerTouchStart,
    TriggerPointerMove(PointerKind),
    ItemTouchStart(usize),
    ItemHover(usize),
    ItemClick(usize),
    ItemMouseUp(usize),
    Wheel { down: bool },
    Open(OpenReason),
    Close,
    /// Highlight an item without selecting it.
    Navigate(usize),
    /// Re-check placement against the current layout.
    Reposition,
    /// Placement mode reported by an external resolver.
    FallbackChanged(bool),
    GraceElapsed(TimerId),
    TypeaheadReset(TimerId),
    /// Emitted: the user finished selecting this index.
    Changed(usize),
}

/// Key bindings used while the select has focus.
#[derive(Debug, Clone)]
pub struct SelectKeys {
    /// Open the closed panel.
    pub open: Binding,
    pub up: Binding,
    pub down: Binding,
    pub first: Binding,
    pub last: Binding,
    pub page_up: Binding,
    pub page_down: Binding,
    /// Choose the highlighted item.
    pub commit: Binding,
    pub dismiss: Binding,
}

impl Default for SelectKeys {
    fn default() -> Self {
        let k = KeyCombination::new;
        Self {
            open: Binding::new(
                [
                    k(KeyCode::Enter),
                    k(KeyCode::Char(' ')),
                    k(KeyCode::Up),
                    k(KeyCode::Down),
                ],
                "open",
            ),
            up: Binding::new([k(KeyCode::Up)], "previous"),
            down: Binding::new([k(KeyCode::Down)], "next"),
            first: Binding::new([k(KeyCode::Home)], "first"),
            last: Binding::new([k(KeyCode::End)], "last"),
            page_up: Binding::new([k(KeyCode::PageUp)], "page up"),
            page_down: Binding::new([k(KeyCode::PageDown)], "page down"),
            commit: Binding::new([k(KeyCode::Enter), k(KeyCode::Char(' '))], "select"),
            dismiss: Binding::new([k(KeyCode::Esc), k(KeyCode::Tab)], "close"),
        }
    }
}

/// A select control. See the [module docs](self).
pub struct Select {
    options: Vec<SelectOption>,
    value: MergedValue,
    state: InteractionState,
    allow_select: bool,
    allow_mouse_up: bool,
    grace: Deferred,
    typeahead: Typeahead,
    pressed: Option<usize>,
    focus: Box<dyn FocusScope>,
    resolver: Box<dyn PositionResolver>,
    config: SelectConfig,
    style: SelectStyle,
    trigger_style: Option<Style>,
    render_value: Option<ValueFn>,
    render_item: Option<RenderFn>,
    keys: SelectKeys,
    id: String,
    // Layout of the last frame, used for hit-testing and placement.
    anchor: Cell<Rect>,
    viewport: Cell<Rect>,
    placement: Cell<Option<Placement>>,
}

impl Select {
    /// An uncontrolled select starting at the first option.
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            value: MergedValue::default(),
            state: InteractionState::default(),
            allow_select: false,
            allow_mouse_up: true,
            grace: Deferred::new(),
            typeahead: Typeahead::new(),
            pressed: None,
            focus: Box::new(FocusTrap::new()),
            resolver: Box::new(FloatingResolver),
            config: SelectConfig::default(),
            style: SelectStyle::default(),
            trigger_style: None,
            render_value: None,
            render_item: None,
            keys: SelectKeys::default(),
            id: "select".to_string(),
            anchor: Cell::new(Rect::default()),
            viewport: Cell::new(Rect::default()),
            placement: Cell::new(None),
        }
    }

    pub fn with_value(mut self, source: ValueSource) -> Self {
        self.value = MergedValue::new(source);
        self
    }

    /// Let the parent own the value; it pushes changes back with
    /// [`set_value`](Self::set_value).
    pub fn controlled(self, value: usize) -> Self {
        self.with_value(ValueSource::Controlled(value))
    }

    pub fn default_value(self, value: usize) -> Self {
        self.with_value(ValueSource::Uncontrolled(value))
    }

    pub fn with_config(mut self, config: SelectConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_style(mut self, style: SelectStyle) -> Self {
        self.style = style;
        self
    }

    /// Style generated design tokens under `prefix`, see
    /// [`SelectStyle::from_tokens`].
    pub fn with_tokens(mut self, tokens: &TokenMap, prefix: &str) -> Self {
        self.style = SelectStyle::from_tokens(tokens, prefix);
        self
    }

    /// Replace the trigger's style entirely.
    pub fn with_trigger_style(mut self, style: Style) -> Self {
        self.trigger_style = Some(style);
        self
    }

    /// Custom content for the trigger, called with the selected index even
    /// when it is out of range (empty or shrunk option list).
    pub fn with_render_value(mut self, f: impl Fn(usize) -> Line<'static> + Send + 'static) -> Self {
        self.render_value = Some(Box::new(f));
        self
    }

    /// Custom label for each panel row.
    pub fn with_render_item(
        mut self,
        f: impl Fn(&SelectOption, usize) -> Line<'static> + Send + 'static,
    ) -> Self {
        self.render_item = Some(Box::new(f));
        self
    }

    pub fn with_keys(mut self, keys: SelectKeys) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_focus_scope(mut self, focus: impl FocusScope + 'static) -> Self {
        self.focus = Box::new(focus);
        self
    }

    pub fn with_resolver(mut self, resolver: impl PositionResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Identity of this select's subscriptions. Give each select on screen
    /// its own id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Replace the options. The selected index is kept as is, even if it is
    /// now out of range.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        self.normalize();
    }

    /// The selected index, which may be out of range for the options.
    pub fn selected_index(&self) -> usize {
        self.value.current()
    }

    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.options.get(self.value.current())
    }

    /// Adopt a value from the parent.
    pub fn set_value(&mut self, index: usize) {
        self.value.sync(index);
    }

    pub fn is_open(&self) -> bool {
        self.state.open
    }

    /// The ephemeral state, already reset when closed.
    pub fn interaction(&self) -> InteractionState {
        self.state
    }

    /// Whether the host should stop background scrolling.
    pub fn locks_scroll(&self) -> bool {
        self.state.open && !self.state.touch
    }

    /// Tell the select whether the host gave its trigger focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.focus.set_trigger_focused(focused);
    }

    /// Record the trigger and frame rects ahead of the next render.
    pub fn set_layout(&mut self, anchor: Rect, viewport: Rect) {
        self.anchor.set(one_row(anchor));
        self.viewport.set(viewport);
        self.normalize();
    }

    /// Open as if clicked.
    pub fn open(&mut self) -> Command<Message> {
        self.open_with(OpenReason::Pointer)
    }

    pub fn open_with(&mut self, reason: OpenReason) -> Command<Message> {
        if self.state.open {
            return Command::none();
        }
        self.state.open = true;
        self.allow_select = false;
        self.allow_mouse_up = true;
        let cmd = self
            .grace
            .schedule(self.config.grace_period, Message::GraceElapsed);
        self.focus.activate();

        let selected = self.selected_in_range();
        self.typeahead.seed(selected);
        self.state.active = match reason {
            OpenReason::Keyboard => selected.or((!self.options.is_empty()).then_some(0)),
            OpenReason::Pointer => None,
        };
        log::debug!("{}: open ({reason:?})", self.id);
        self.reposition();
        cmd
    }

    /// Close and forget the session. Safe to call when already closed.
    pub fn close(&mut self) {
        if self.state.open {
            log::debug!("{}: close", self.id);
        }
        self.state.open = false;
        self.grace.cancel();
        self.allow_select = false;
        self.allow_mouse_up = true;
        self.pressed = None;
        self.typeahead.clear();
        self.focus.deactivate();
        self.normalize();
    }

    /// Make `index` the selection and report it.
    pub fn select_index(&mut self, index: usize) -> Command<Message> {
        if index >= self.options.len() {
            log::warn!(
                "{}: ignoring selection of {index}, only {} options",
                self.id,
                self.options.len()
            );
            return Command::none();
        }
        self.value.set(index);
        log::debug!("{}: selected {index}", self.id);
        Command::message(Message::Changed(index))
    }

    /// Highlight `index` in the open panel.
    pub fn navigate(&mut self, index: usize) {
        if !self.state.open || index >= self.options.len() {
            return;
        }
        self.state.active = Some(index);
        self.scroll_into_view(index);
    }

    /// Typeahead. Closed, a match is selected right away; open, it is only
    /// highlighted.
    pub fn match_typed_text(&mut self, text: &str) -> Command<Message> {
        let mut cmds = Vec::new();
        for c in text.chars() {
            if !self.typeahead.is_typing() {
                let origin = self.state.active.or(self.selected_in_range());
                self.typeahead.seed(origin);
            }
            let labels: Vec<&str> = self.options.iter().map(|o| o.label.as_str()).collect();
            let (found, timer) = self.typeahead.push(
                c,
                &labels,
                self.config.typeahead_reset,
                Message::TypeaheadReset,
            );
            cmds.push(timer);
            if let Some(index) = found {
                if self.state.open {
                    self.navigate(index);
                } else {
                    cmds.push(self.select_index(index));
                }
            }
        }
        Command::batch(cmds)
    }

    fn selected_in_range(&self) -> Option<usize> {
        let i = self.value.current();
        (i < self.options.len()).then_some(i)
    }

    fn mode(&self) -> PlacementMode {
        if self.state.fallback {
            PlacementMode::Fallback {
                touch: self.state.touch,
            }
        } else {
            PlacementMode::Anchored
        }
    }

    fn item_line(&self, index: usize) -> Line<'static> {
        let option = &self.options[index];
        match &self.render_item {
            Some(f) => f(option, index),
            None => Line::from(option.label.clone()),
        }
    }

    fn request(&self, mode: PlacementMode) -> PlacementRequest {
        let anchor = self.anchor.get();
        let widest = (0..self.options.len())
            .map(|i| SelectItem::width(&self.item_line(i), self.options[i].icon.as_deref()))
            .max()
            .unwrap_or(0);
        let min_items_visible = if self.state.touch {
            self.config.min_items_visible_touch
        } else {
            self.config.min_items_visible_pointer
        };
        PlacementRequest {
            anchor,
            viewport: self.viewport.get(),
            item_count: self.options.len(),
            selected: self.value.current(),
            width: (widest + 2).max(anchor.width.saturating_add(2)),
            mode,
            scroll_offset: self.state.scroll_offset,
            padding: self.config.padding,
            min_items_visible,
            overflow_threshold: self.config.reference_overflow_threshold,
            max_visible: self.config.max_visible,
        }
    }

    /// Placement to draw: the current mode, or the fallback when anchored
    /// placement does not fit.
    fn resolve(&self) -> Placement {
        let placement = self.resolver.resolve(&self.request(self.mode()));
        if placement.fits {
            return placement;
        }
        let touch = self.state.touch;
        self.resolver
            .resolve(&self.request(PlacementMode::Fallback { touch }))
    }

    fn has_layout(&self) -> bool {
        !self.viewport.get().is_empty()
    }

    fn reposition(&mut self) {
        if !self.state.open || !self.has_layout() || self.state.fallback {
            return;
        }
        let anchored = self.resolver.resolve(&self.request(PlacementMode::Anchored));
        if !anchored.fits {
            log::debug!("{}: anchored placement does not fit, falling back", self.id);
            self.state.fallback = true;
            self.state.scroll_offset = 0;
        }
        self.normalize();
    }

    /// Clamp ephemeral state. Runs after every transition so nothing ever
    /// observes a closed select with leftover session state.
    fn normalize(&mut self) {
        if !self.state.open {
            self.state.active = None;
            self.state.fallback = false;
            self.state.scroll_offset = 0;
            self.state.block_selection = false;
            return;
        }
        if self.state.active.is_some_and(|a| a >= self.options.len()) {
            self.state.active = None;
        }
        if self.has_layout() {
            self.state.scroll_offset = self.resolve().scroll_offset;
        }
    }

    fn scroll_into_view(&mut self, index: usize) {
        let Some(p) = self.placement.get() else {
            return;
        };
        if p.visible_rows == 0 || p.row_of(index).is_some() {
            return;
        }
        let last = p.first_visible + p.visible_rows - 1;
        self.state.scroll_offset += if index < p.first_visible {
            -((p.first_visible - index) as i32)
        } else {
            (index - last) as i32
        };
        // Keep hit-testing in step until the next frame.
        let mut moved = p;
        moved.first_visible = if index < p.first_visible {
            index
        } else {
            index + 1 - p.visible_rows
        };
        self.placement.set(Some(moved));
    }

    fn page_rows(&self) -> usize {
        self.placement
            .get()
            .map_or(self.config.max_visible, |p| p.visible_rows)
            .max(1)
    }

    fn try_commit(&mut self, index: usize) -> Option<Command<Message>> {
        if !self.state.open || index >= self.options.len() {
            return None;
        }
        if !self.allow_select || self.state.block_selection {
            log::trace!("{}: selection of {index} blocked", self.id);
            return None;
        }
        let cmd = self.select_index(index);
        self.close();
        Some(cmd)
    }

    fn mouse_up(&mut self, index: usize) -> Command<Message> {
        if !self.state.open || !self.allow_mouse_up {
            return Command::none();
        }
        if let Some(cmd) = self.try_commit(index) {
            return cmd;
        }
        self.grace.schedule(Duration::ZERO, Message::GraceElapsed)
    }

    fn toggle(&mut self, reason: OpenReason) -> Command<Message> {
        if self.state.open {
            self.close();
            Command::none()
        } else {
            self.open_with(reason)
        }
    }

    fn move_active(&mut self, target: impl FnOnce(usize, usize) -> usize) {
        let n = self.options.len();
        if n == 0 {
            return;
        }
        let next = match self.state.active {
            Some(active) => target(active, n).min(n - 1),
            None => self.selected_in_range().unwrap_or(0),
        };
        self.navigate(next);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        if !self.state.open {
            if self.keys.open.matches(&key) {
                return self.open_with(OpenReason::Keyboard);
            }
            return match printable(&key) {
                Some(c) => self.match_typed_text(&c.to_string()),
                None => Command::none(),
            };
        }

        self.allow_select = true;
        self.state.block_selection = false;
        let typing_space = key.code == KeyCode::Char(' ') && self.typeahead.is_typing();
        if typing_space {
            return self.match_typed_text(" ");
        }
        let rows = self.page_rows();
        if self.keys.dismiss.matches(&key) {
            self.close();
        } else if self.keys.commit.matches(&key) {
            match self.state.active {
                Some(active) => return self.try_commit(active).unwrap_or_else(Command::none),
                None => self.close(),
            }
        } else if self.keys.up.matches(&key) {
            self.move_active(|a, _| a.saturating_sub(1));
        } else if self.keys.down.matches(&key) {
            self.move_active(|a, _| a + 1);
        } else if self.keys.first.matches(&key) {
            self.move_active(|_, _| 0);
        } else if self.keys.last.matches(&key) {
            self.move_active(|_, n| n - 1);
        } else if self.keys.page_up.matches(&key) {
            self.move_active(|a, _| a.saturating_sub(rows));
        } else if self.keys.page_down.matches(&key) {
            self.move_active(|a, _| a + rows);
        } else if let Some(c) = printable(&key) {
            return self.match_typed_text(&c.to_string());
        }
        Command::none()
    }

    /// Item under `(column, row)` in the last drawn panel.
    fn item_at(&self, column: u16, row: u16) -> Option<usize> {
        let p = self.placement.get()?;
        let inner_left = p.area.x + 1;
        let inner_right = p.area.right().saturating_sub(1);
        if column < inner_left || column >= inner_right {
            return None;
        }
        p.item_at(row).filter(|&i| i < self.options.len())
    }

    fn handle_mouse(&mut self, ev: MouseEvent) -> Command<Message> {
        let (column, row) = (ev.column, ev.row);
        let panel = self.placement.get().filter(|_| self.state.open);
        let on_panel = panel.is_some_and(|p| hit(p.area, column, row));
        let on_trigger = hit(self.anchor.get(), column, row);
        let item = if on_panel { self.item_at(column, row) } else { None };

        match ev.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if on_panel {
                    self.pressed = item;
                    Command::none()
                } else if on_trigger {
                    self.toggle(OpenReason::Pointer)
                } else {
                    self.close();
                    Command::none()
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let pressed = self.pressed.take();
                let Some(index) = item else {
                    return Command::none();
                };
                let released = self.mouse_up(index);
                if self.state.open && pressed == Some(index) {
                    let clicked = self.try_commit(index).unwrap_or_else(Command::none);
                    Command::batch([released, clicked])
                } else {
                    released
                }
            }
            MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(index) = item {
                    self.hover(index);
                } else if on_trigger && !on_panel {
                    self.state.touch = false;
                }
                Command::none()
            }
            MouseEventKind::ScrollDown if on_panel => {
                self.wheel(true);
                Command::none()
            }
            MouseEventKind::ScrollUp if on_panel => {
                self.wheel(false);
                Command::none()
            }
            _ => Command::none(),
        }
    }

    fn hover(&mut self, index: usize) {
        if self.state.open && index < self.options.len() {
            self.state.active = Some(index);
            self.state.block_selection = false;
        }
    }

    fn wheel(&mut self, down: bool) {
        if !self.state.open {
            return;
        }
        self.state.scroll_offset += if down { 1 } else { -1 };
        if !self.state.fallback {
            self.state.block_selection = true;
        }
    }

    fn trigger_line(&self) -> Line<'static> {
        let mut spans = vec![Span::raw(" ")];
        let index = self.value.current();
        let label = match (&self.render_value, self.options.get(index)) {
            (Some(f), _) => f(index),
            (None, Some(option)) => Line::from(option.label.clone()),
            (None, None) => Line::default(),
        };
        spans.extend(label.spans);
        Line::from(spans)
    }

    fn render_trigger(&self, frame: &mut Frame, area: Rect) {
        let style = self.trigger_style.unwrap_or_else(|| {
            if self.state.open || self.focus.trigger_focused() {
                self.style.trigger.patch(self.style.trigger_active)
            } else {
                self.style.trigger
            }
        });
        frame.render_widget(Paragraph::new(self.trigger_line()).style(style), area);
        if area.width >= 3 {
            let arrow = if self.state.open { "▴" } else { "▾" };
            let cell = Rect::new(area.right() - 1, area.y, 1, 1);
            frame.render_widget(Span::styled(arrow, style), cell);
        }
    }

    fn render_panel(&self, frame: &mut Frame, placement: &Placement) {
        let block = Block::bordered().border_style(self.style.border);
        let inner = render_overlay(frame, placement.area, Some(&block));
        let selected = self.value.current();
        for k in 0..placement.visible_rows {
            let index = placement.first_visible + k;
            let y = inner.y + k as u16;
            if index >= self.options.len() || y >= inner.bottom() {
                break;
            }
            let state = ItemState {
                active: self.state.active == Some(index),
                selected: selected == index,
            };
            let item = SelectItem::new(self.item_line(index), &self.style)
                .icon(self.options[index].icon.as_deref())
                .state(state);
            frame.render_widget(item, Rect::new(inner.x, y, inner.width, 1));
        }
    }
}

fn one_row(area: Rect) -> Rect {
    Rect {
        height: area.height.min(1),
        ..area
    }
}

impl Component for Select {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        let cmd = match msg {
            Message::KeyPress(key) => self.handle_key(key),
            Message::Mouse(ev) => self.handle_mouse(ev),
            Message::TriggerPress => self.toggle(OpenReason::Pointer),
            Message::TriggerTouchStart => {
                self.state.touch = true;
                Command::none()
            }
            Message::TriggerPointerMove(kind) => {
                if kind != PointerKind::Touch {
                    self.state.touch = false;
                }
                Command::none()
            }
            Message::ItemTouchStart(_) => {
                if self.state.open {
                    self.state.touch = true;
                    self.allow_select = true;
                    self.allow_mouse_up = false;
                }
                Command::none()
            }
            Message::ItemHover(index) => {
                self.hover(index);
                Command::none()
            }
            Message::ItemClick(index) => self.try_commit(index).unwrap_or_else(Command::none),
            Message::ItemMouseUp(index) => self.mouse_up(index),
            Message::Wheel { down } => {
                self.wheel(down);
                Command::none()
            }
            Message::Open(reason) => self.open_with(reason),
            Message::Close => {
                self.close();
                Command::none()
            }
            Message::Navigate(index) => {
                self.navigate(index);
                Command::none()
            }
            Message::Reposition => {
                self.reposition();
                Command::none()
            }
            Message::FallbackChanged(fallback) => {
                if self.state.open && self.state.fallback != fallback {
                    log::debug!("{}: fallback placement {fallback}", self.id);
                    self.state.fallback = fallback;
                    self.state.scroll_offset = 0;
                }
                Command::none()
            }
            Message::GraceElapsed(id) => {
                if self.grace.fire(id) {
                    log::trace!("{}: grace period over", self.id);
                    self.allow_select = true;
                }
                Command::none()
            }
            Message::TypeaheadReset(id) => {
                self.typeahead.fire(id);
                Command::none()
            }
            Message::Changed(_) => Command::none(),
        };
        self.normalize();
        cmd
    }

    /// `area` is the trigger. The panel is drawn over the rest of the frame.
    fn view(&self, frame: &mut Frame, area: Rect) {
        let anchor = one_row(area);
        self.anchor.set(anchor);
        self.viewport.set(frame.area());
        self.render_trigger(frame, anchor);

        if !self.state.open {
            self.placement.set(None);
            return;
        }
        let placement = self.resolve();
        self.placement.set(Some(placement));
        self.render_panel(frame, &placement);
    }

    /// Repositions periodically while open.
    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        if !self.state.open {
            return vec![];
        }
        vec![position::watch(&self.id, self.config.watch_interval, || {
            Message::Reposition
        })]
    }

    fn focused(&self) -> bool {
        self.focus.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use floe_core::testing::TestComponent;

    const ANCHOR: Rect = Rect {
        x: 5,
        y: 5,
        width: 12,
        height: 1,
    };
    const FRAME: Rect = Rect {
        x: 0,
        y: 0,
        width: 40,
        height: 20,
    };

    fn key(code: KeyCode) -> Message {
        Message::KeyPress(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Message {
        Message::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn abc() -> Vec<SelectOption> {
        vec![
            SelectOption::number(1, "A"),
            SelectOption::number(2, "B"),
            SelectOption::number(3, "C"),
        ]
    }

    fn harness(options: Vec<SelectOption>) -> TestComponent<Select> {
        let mut select = Select::new(options);
        select.set_layout(ANCHOR, FRAME);
        TestComponent::new(select)
    }

    fn changes(h: &TestComponent<Select>) -> Vec<usize> {
        h.emitted()
            .iter()
            .filter_map(|m| match m {
                Message::Changed(i) => Some(*i),
                _ => None,
            })
            .collect()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn render(h: &TestComponent<Select>) -> Vec<String> {
        let out = h.render_at(FRAME.width, FRAME.height, ANCHOR);
        (0..FRAME.height)
            .map(|y| (0..FRAME.width).map(|x| out[(x, y)].symbol()).collect())
            .collect()
    }

    fn cols(row: &str, from: usize, n: usize) -> String {
        row.chars().skip(from).take(n).collect()
    }

    #[test]
    fn select_index_updates_and_notifies_once() {
        for i in 0..3 {
            let mut h = harness(abc());
            h.with(|s| s.select_index(i));
            assert_eq!(h.component().selected_index(), i);
            assert_eq!(changes(&h), vec![i]);
        }
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut h = harness(abc());
        h.with(|s| s.select_index(3));
        assert_eq!(h.component().selected_index(), 0);
        assert!(h.emitted().is_empty());
    }

    #[test]
    fn close_resets_session_state() {
        let mut h = harness(abc());
        h.send(Message::Open(OpenReason::Keyboard));
        h.send(Message::Navigate(2));
        h.send(Message::FallbackChanged(true));
        h.send(Message::Wheel { down: true });
        let during = h.component().interaction();
        assert!(during.open && during.fallback);
        assert_eq!(during.active, Some(2));

        h.send(Message::Close);
        assert_eq!(h.component().interaction(), InteractionState::default());
        h.send(Message::Close);
        assert_eq!(h.component().interaction(), InteractionState::default());
    }

    #[test]
    fn escape_and_tab_dismiss() {
        for code in [KeyCode::Esc, KeyCode::Tab] {
            let mut h = harness(abc());
            h.send(Message::Open(OpenReason::Keyboard));
            h.send(Message::Wheel { down: true });
            h.send(key(code));
            assert_eq!(h.component().interaction(), InteractionState::default());
            assert!(h.emitted().is_empty());
        }
    }

    #[test]
    fn commit_closes_and_resets() {
        let mut h = harness(abc());
        h.send(Message::Open(OpenReason::Pointer));
        h.send(Message::ItemHover(1));
        h.advance(ms(300));
        h.send(Message::ItemClick(1));
        assert_eq!(changes(&h), vec![1]);
        assert_eq!(h.component().interaction(), InteractionState::default());
        assert_eq!(h.pending_timers(), 0);
    }

    #[test]
    fn release_inside_grace_period_does_not_commit() {
        let mut h = harness(abc());
        h.send(Message::Open(OpenReason::Pointer));
        h.advance_to(ms(100));
        h.send(Message::ItemMouseUp(2));
        assert!(changes(&h).is_empty());
        assert!(h.component().is_open());
    }

    #[test]
    fn release_after_grace_period_commits() {
        let mut h = harness(abc());
        h.send(Message::Open(OpenReason::Pointer));
        h.advance_to(ms(350));
        h.send(Message::ItemMouseUp(2));
        assert_eq!(changes(&h), vec![2]);
        assert!(!h.component().is_open());
    }

    #[test]
    fn early_release_unblocks_the_next_one() {
        let mut h = harness(abc());
        h.send(Message::Open(OpenReason::Pointer));
        h.advance_to(ms(100));
        h.send(Message::ItemMouseUp(1));
        h.advance(Duration::ZERO);
        h.send(Message::ItemMouseUp(2));
        assert_eq!(changes(&h), vec![2]);
    }

    #[test]
    fn key_press_lifts_the_guard() {
        let mut h = harness(abc());
        h.send(Message::Open(OpenReason::Pointer));
        h.send(key(KeyCode::Down));
        h.send(Message::ItemClick(1));
        assert_eq!(changes(&h), vec![1]);
    }

    #[test]
    fn touch_lifts_the_guard_and_ignores_mouse_up() {
        let mut h = harness(abc());
        h.send(Message::Open(OpenReason::Pointer));
        h.send(Message::ItemTouchStart(1));
        h.send(Message::ItemMouseUp(1));
        assert!(changes(&h).is_empty());
        assert!(h.component().is_open());
        h.send(Message::ItemClick(1));
        assert_eq!(changes(&h), vec![1]);
        assert!(h.component().interaction().touch);
    }

    #[test]
    fn reopening_cancels_stale_grace_timer() {
        let mut h = harness(abc());
        h.send(Message::Open(OpenReason::Pointer));
        h.advance_to(ms(50));
        h.send(Message::Close);
        h.advance_to(ms(100));
        h.send(Message::Open(OpenReason::Pointer));

        // The first session's timer fires at 300 and must be ignored.
        h.advance_to(ms(350));
        h.send(Message::ItemClick(1));
        assert!(changes(&h).is_empty());

        h.advance_to(ms(400));
        h.send(Message::ItemClick(1));
        assert_eq!(changes(&h), vec![1]);
    }

    #[test]
    fn navigate_then_commit_picks_c() {
        let mut h = harness(abc());
        h.send(Message::Open(OpenReason::Keyboard));
        h.send(Message::Navigate(2));
        assert!(changes(&h).is_empty());
        h.send(key(KeyCode::Enter));
        assert_eq!(changes(&h), vec![2]);
        let select = h.component();
        assert_eq!(select.selected_index(), 2);
        assert_eq!(select.selected_option().map(|o| o.label.as_str()), Some("C"));
    }

    #[test]
    fn navigate_is_ignored_while_closed() {
        let mut h = harness(abc());
        h.send(Message::Navigate(2));
        assert_eq!(h.component().interaction().active, None);
    }

    #[test]
    fn typing_while_closed_selects() {
        let mut h = harness(abc());
        h.send(key(KeyCode::Char('b')));
        assert_eq!(changes(&h), vec![1]);
        assert!(!h.component().is_open());
        assert_eq!(h.component().selected_index(), 1);
    }

    #[test]
    fn typing_while_open_only_highlights() {
        let mut h = harness(abc());
        h.send(Message::Open(OpenReason::Pointer));
        h.send(key(KeyCode::Char('c')));
        assert!(changes(&h).is_empty());
        assert_eq!(h.component().interaction().active, Some(2));
        assert_eq!(h.component().selected_index(), 0);
    }

    #[test]
    fn typeahead_word_resets_after_inactivity() {
        let options = vec![
            SelectOption::text("ba", "Banana"),
            SelectOption::text("bl", "Blueberry"),
            SelectOption::text("br", "Brie"),
        ];
        let mut h = harness(options);
        h.send(Message::Open(OpenReason::Pointer));
        h.send(key(KeyCode::Char('b')));
        h.send(key(KeyCode::Char('r')));
        assert_eq!(h.component().interaction().active, Some(2));

        h.advance(ms(750));
        h.send(key(KeyCode::Char('b')));
        assert_eq!(h.component().interaction().active, Some(0));
    }

    #[test]
    fn space_during_typeahead_does_not_commit() {
        let options = vec![
            SelectOption::text("ny", "New York"),
            SelectOption::text("nw", "Newark"),
        ];
        let mut h = harness(options);
        h.send(Message::Open(OpenReason::Pointer));
        h.send(key(KeyCode::Char('n')));
        h.send(key(KeyCode::Char(' ')));
        assert!(h.component().is_open());
        assert!(changes(&h).is_empty());
    }

    #[test]
    fn arrows_move_without_wrapping() {
        let mut h = harness(abc());
        h.send(key(KeyCode::Enter));
        assert!(h.component().is_open());
        assert_eq!(h.component().interaction().active, Some(0));

        h.send(key(KeyCode::Up));
        assert_eq!(h.component().interaction().active, Some(0));
        for _ in 0..5 {
            h.send(key(KeyCode::Down));
        }
        assert_eq!(h.component().interaction().active, Some(2));
        h.send(key(KeyCode::Home));
        assert_eq!(h.component().interaction().active, Some(0));
        h.send(key(KeyCode::End));
        assert_eq!(h.component().interaction().active, Some(2));
    }

    #[test]
    fn first_arrow_after_pointer_open_lands_on_selection() {
        let mut h = harness(abc());
        h.component_mut().set_value(1);
        h.send(Message::Open(OpenReason::Pointer));
        assert_eq!(h.component().interaction().active, None);
        h.send(key(KeyCode::Down));
        assert_eq!(h.component().interaction().active, Some(1));
    }

    #[test]
    fn wheel_blocks_selection_until_pointer_moves() {
        let mut h = harness(abc());
        h.send(Message::Open(OpenReason::Pointer));
        h.advance(ms(300));
        h.send(Message::Wheel { down: true });
        assert!(h.component().interaction().block_selection);
        h.send(Message::ItemClick(1));
        assert!(changes(&h).is_empty());

        h.send(Message::ItemHover(1));
        h.send(Message::ItemClick(1));
        assert_eq!(changes(&h), vec![1]);
    }

    #[test]
    fn keyboard_commit_ignores_wheel_block() {
        let mut h = harness(abc());
        h.send(Message::Open(OpenReason::Keyboard));
        h.send(Message::Wheel { down: true });
        h.send(key(KeyCode::Down));
        assert!(!h.component().interaction().block_selection);
        h.send(key(KeyCode::Enter));
        assert_eq!(changes(&h), vec![1]);
        assert!(!h.component().is_open());
    }

    #[test]
    fn render_value_draws_out_of_range_placeholder() {
        let select = Select::new(Vec::new()).with_render_value(|i| {
            if i == 0 {
                Line::from("pick one")
            } else {
                Line::from(format!("#{i}"))
            }
        });
        let mut h = TestComponent::new(select);
        h.component_mut().set_layout(ANCHOR, FRAME);
        let rows = render(&h);
        assert_eq!(cols(&rows[5], 5, 10), " pick one ");
    }

    #[test]
    fn trigger_shows_label_without_icon() {
        let h = harness(vec![SelectOption::text("a", "Alpha").with_icon("◆")]);
        let rows = render(&h);
        assert_eq!(cols(&rows[5], 5, 7), " Alpha ");
    }

    #[test]
    fn controlled_value_waits_for_parent() {
        let mut select = Select::new(abc()).controlled(0);
        select.set_layout(ANCHOR, FRAME);
        let mut h = TestComponent::new(select);
        h.send(key(KeyCode::Char('c')));
        assert_eq!(changes(&h), vec![2]);
        assert_eq!(h.component().selected_index(), 0);

        h.component_mut().set_value(2);
        assert_eq!(h.component().selected_index(), 2);
    }

    #[test]
    fn cramped_frame_switches_to_fallback() {
        let options: Vec<_> = (0..6).map(|i| SelectOption::number(i, format!("n{i}"))).collect();
        let mut select = Select::new(options);
        select.set_layout(Rect::new(5, 5, 10, 1), Rect::new(0, 0, 40, 9));
        let mut h = TestComponent::new(select);
        h.send(Message::Open(OpenReason::Pointer));
        assert!(h.component().interaction().fallback);

        h.send(Message::Close);
        assert!(!h.component().interaction().fallback);
    }

    #[test]
    fn roomy_frame_stays_anchored() {
        let mut h = harness(abc());
        h.send(Message::Open(OpenReason::Pointer));
        h.send(Message::Reposition);
        assert!(!h.component().interaction().fallback);
    }

    #[test]
    fn watch_subscription_only_while_open() {
        let mut h = harness(abc());
        assert!(h.component().subscriptions().is_empty());
        h.send(Message::Open(OpenReason::Pointer));
        assert_eq!(h.component().subscriptions().len(), 1);
        h.send(Message::Close);
        assert!(h.component().subscriptions().is_empty());
    }

    #[test]
    fn focus_is_trapped_while_open() {
        let mut h = harness(abc());
        assert!(!h.component().focused());
        h.send(Message::Open(OpenReason::Keyboard));
        assert!(h.component().focused());
        h.send(key(KeyCode::Esc));
        assert!(!h.component().focused());
    }

    #[test]
    fn scroll_lock_only_for_pointer_input() {
        let mut h = harness(abc());
        h.send(Message::Open(OpenReason::Pointer));
        assert!(h.component().locks_scroll());
        h.send(Message::Close);
        h.send(Message::TriggerTouchStart);
        h.send(Message::TriggerPress);
        assert!(h.component().is_open());
        assert!(!h.component().locks_scroll());
        h.send(Message::TriggerPointerMove(PointerKind::Mouse));
        assert!(h.component().locks_scroll());
    }

    #[test]
    fn trigger_shows_selected_label() {
        let h = harness(abc());
        let rows = render(&h);
        assert_eq!(cols(&rows[5], 5, 3), " A ");
        assert_eq!(cols(&rows[5], 16, 1), "▾");
    }

    #[test]
    fn out_of_range_value_shows_no_label() {
        let mut h = harness(abc());
        h.component_mut().set_value(7);
        let rows = render(&h);
        assert_eq!(cols(&rows[5], 5, 11).trim(), "");
        assert!(h.emitted().is_empty());
    }

    #[test]
    fn open_panel_puts_selection_on_trigger_row() {
        let mut h = harness(abc());
        h.component_mut().set_value(1);
        h.send(Message::Open(OpenReason::Keyboard));
        let rows = render(&h);
        assert_eq!(cols(&rows[3], 4, 1), "┌");
        assert_eq!(cols(&rows[4], 5, 2), " A");
        assert_eq!(cols(&rows[5], 5, 2), "✓B");
        assert_eq!(cols(&rows[6], 5, 2), " C");
        assert_eq!(cols(&rows[7], 4, 1), "└");
    }

    #[test]
    fn empty_list_opens_empty_panel() {
        let mut h = harness(Vec::new());
        h.send(key(KeyCode::Enter));
        assert!(h.component().is_open());
        assert_eq!(h.component().interaction().active, None);
        let rows = render(&h);
        assert_eq!(cols(&rows[4], 4, 1), "┌");
        h.send(key(KeyCode::Down));
        h.send(key(KeyCode::Enter));
        assert!(h.emitted().is_empty());
        assert!(!h.component().is_open());
    }

    #[test]
    fn mouse_click_opens_and_release_commits_after_grace() {
        let mut h = harness(abc());
        render(&h);
        h.send(mouse(MouseEventKind::Down(MouseButton::Left), 8, 5));
        assert!(h.component().is_open());
        render(&h);

        // The release ending the opening click lands on an item.
        h.send(mouse(MouseEventKind::Up(MouseButton::Left), 8, 5));
        assert!(h.component().is_open());
        assert!(changes(&h).is_empty());

        h.send(mouse(MouseEventKind::Moved, 8, 7));
        assert_eq!(h.component().interaction().active, Some(2));
        h.advance(ms(300));
        h.send(mouse(MouseEventKind::Down(MouseButton::Left), 8, 7));
        h.send(mouse(MouseEventKind::Up(MouseButton::Left), 8, 7));
        assert_eq!(changes(&h), vec![2]);
        assert!(!h.component().is_open());
    }

    #[test]
    fn click_outside_dismisses() {
        let mut h = harness(abc());
        h.send(Message::Open(OpenReason::Pointer));
        render(&h);
        h.send(mouse(MouseEventKind::Down(MouseButton::Left), 30, 15));
        assert!(!h.component().is_open());
        assert!(h.emitted().is_empty());
    }

    #[test]
    fn long_list_scrolls_active_into_view() {
        let options: Vec<_> = (0..30).map(|i| SelectOption::number(i, format!("item {i}"))).collect();
        let mut h = harness(options);
        h.send(Message::Open(OpenReason::Keyboard));
        let rows = render(&h);
        assert_eq!(cols(&rows[5], 5, 7), "✓item 0");

        h.send(key(KeyCode::End));
        assert_eq!(h.component().interaction().active, Some(29));
        assert!(h.component().interaction().scroll_offset > 0);
        let rows = render(&h);
        assert!(rows.iter().any(|r| r.contains("item 29")));
    }
}
