//! Keyboard focus utilities.
//!
//! [`FocusScope`] is the capability a floating panel uses to capture the
//! keyboard while it is open and hand focus back to its trigger when it
//! closes.

/// Capability for capturing keyboard focus inside a floating panel.
///
/// The owner calls [`activate`](FocusScope::activate) exactly when the panel
/// opens and [`deactivate`](FocusScope::deactivate) exactly when it closes;
/// both must be idempotent.
pub trait FocusScope: Send {
    /// Start trapping focus inside the panel.
    fn activate(&mut self);
    /// Stop trapping and restore focus to whatever held it before.
    fn deactivate(&mut self);
    /// Whether focus is currently trapped.
    fn is_active(&self) -> bool;
    /// Whether the element that opened the panel holds focus.
    fn trigger_focused(&self) -> bool;
    /// Move focus onto or away from the trigger (ignored while trapped).
    fn set_trigger_focused(&mut self, focused: bool);
}

/// Default [`FocusScope`]: a trap flag plus the trigger's focus state.
///
/// Activating remembers whether the trigger was focused; deactivating
/// returns focus to the trigger regardless, since closing a panel always
/// lands the user back on the control that opened it.
#[derive(Debug, Default, Clone)]
pub struct FocusTrap {
    active: bool,
    trigger: bool,
    trigger_before: bool,
}

impl FocusTrap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the trigger was focused when the trap last activated.
    pub fn trigger_was_focused(&self) -> bool {
        self.trigger_before
    }
}

impl FocusScope for FocusTrap {
    fn activate(&mut self) {
        if self.active {
            return;
        }
        self.trigger_before = self.trigger;
        self.active = true;
    }

    fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.trigger = true;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn trigger_focused(&self) -> bool {
        self.trigger
    }

    fn set_trigger_focused(&mut self, focused: bool) {
        if !self.active {
            self.trigger = focused;
        }
    }
}
