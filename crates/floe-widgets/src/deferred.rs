//! Handle for a single pending one-shot timer.
//!
//! Commands cannot be recalled once handed to the runtime, so cancellation
//! works by identity: each [`schedule`](Deferred::schedule) mints a fresh
//! [`TimerId`], the timer message carries it back, and
//! [`fire`](Deferred::fire) accepts only the id that is still pending.
//! Cancelled or superseded timers arrive later and are ignored.

use floe_core::Command;
use std::time::Duration;

/// Identity of one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// At most one pending timer; scheduling replaces the previous one.
#[derive(Debug, Default)]
pub struct Deferred {
    next: u64,
    pending: Option<TimerId>,
}

impl Deferred {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a timer, cancelling any pending one. `to_msg` wraps the new
    /// id into the message delivered after `delay`.
    pub fn schedule<Msg: Send + 'static>(
        &mut self,
        delay: Duration,
        to_msg: impl FnOnce(TimerId) -> Msg,
    ) -> Command<Msg> {
        self.next += 1;
        let id = TimerId(self.next);
        self.pending = Some(id);
        Command::after(delay, to_msg(id))
    }

    /// Forget the pending timer.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a timer is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume a delivered timer. Returns `true` only for the pending id.
    pub fn fire(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            log::trace!("ignoring stale timer {id:?}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(d: &mut Deferred) -> TimerId {
        let mut captured = None;
        let _cmd: Command<()> = d.schedule(Duration::from_millis(300), |id| {
            captured = Some(id);
        });
        captured.unwrap()
    }

    #[test]
    fn fire_accepts_pending_once() {
        let mut d = Deferred::new();
        let id = schedule(&mut d);
        assert!(d.is_pending());
        assert!(d.fire(id));
        assert!(!d.is_pending());
        assert!(!d.fire(id));
    }

    #[test]
    fn cancel_makes_fire_stale() {
        let mut d = Deferred::new();
        let id = schedule(&mut d);
        d.cancel();
        assert!(!d.fire(id));
    }

    #[test]
    fn reschedule_supersedes_previous() {
        let mut d = Deferred::new();
        let first = schedule(&mut d);
        let second = schedule(&mut d);
        assert_ne!(first, second);
        assert!(!d.fire(first));
        assert!(d.fire(second));
    }

    #[test]
    fn schedule_returns_timer_command() {
        let mut d = Deferred::new();
        let cmd = d.schedule(Duration::from_millis(750), |id| id);
        assert_eq!(cmd.timer_delays(), vec![Duration::from_millis(750)]);
    }
}
