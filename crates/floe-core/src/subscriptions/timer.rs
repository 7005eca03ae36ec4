use crate::subscription::{SubscriptionId, SubscriptionSource};
use futures::stream::BoxStream;
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;

/// A repeating timer that fires at a fixed interval.
///
/// Each tick emits the current [`Instant`]. The `id` string keeps several
/// `Every` subscriptions apart, e.g. one per select widget.
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use floe_core::{subscribe, Every};
///
/// let sub = subscribe(Every::new(Duration::from_millis(100), "reposition"))
///     .map(|_| Msg::Reposition);
/// ```
pub struct Every {
    /// The interval between ticks.
    pub interval: Duration,
    /// Identifier distinguishing this timer from others.
    pub id: String,
}

impl Every {
    /// Create a new repeating timer with the given interval and identifier.
    pub fn new(interval: Duration, id: impl Into<String>) -> Self {
        Self {
            interval,
            id: id.into(),
        }
    }
}

impl SubscriptionSource for Every {
    type Output = Instant;

    fn id(&self) -> SubscriptionId {
        SubscriptionId::with_str::<Self>(&self.id)
    }

    fn stream(self) -> BoxStream<'static, Instant> {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Box::pin(tokio_stream::wrappers::IntervalStream::new(interval).map(|t| t.into_std()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_id_depends_on_name() {
        let a = Every::new(Duration::from_millis(100), "a");
        let b = Every::new(Duration::from_millis(100), "b");
        assert_ne!(a.id(), b.id());
        assert_eq!(a.id(), Every::new(Duration::from_secs(1), "a").id());
    }
}
