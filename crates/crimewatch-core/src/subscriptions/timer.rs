use crate::subscription::{SubscriptionId, SubscriptionSource};
use futures::stream::BoxStream;
use futures::StreamExt;
use std::time::{Duration, Instant};

/// Shortest period a timer will tick at; zero would panic in tokio.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// A repeating timer that yields the current [`Instant`] every `interval`.
///
/// Intervals below one millisecond are raised to one millisecond.
///
/// The `id` string keeps several timers apart; the feed uses a single one
/// named after the spinner.
///
/// ```rust,ignore
/// subscribe(Every::new(Duration::from_millis(80), "spinner")).map(|_| Msg::Tick)
/// ```
pub struct Every {
    /// The interval between ticks.
    pub interval: Duration,
    /// Distinguishes this timer from others.
    pub id: &'static str,
}

impl Every {
    /// Create a new repeating timer.
    pub fn new(interval: Duration, id: &'static str) -> Self {
        Self { interval, id }
    }
}

impl SubscriptionSource for Every {
    type Output = Instant;

    fn id(&self) -> SubscriptionId {
        SubscriptionId::keyed("every", self.id)
    }

    fn stream(self) -> BoxStream<'static, Instant> {
        let period = self.interval.max(MIN_INTERVAL);
        futures::stream::once(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            tokio_stream::wrappers::IntervalStream::new(interval)
        })
        .flatten()
        .map(|tick| tick.into_std())
        .boxed()
    }
}
