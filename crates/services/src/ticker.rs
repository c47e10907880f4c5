use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Marker sent once per timer period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick;

/// Owned repeating timer driving the session countdown.
///
/// The task's lifetime belongs to whoever holds the `SessionTicker`:
/// dropping it (or calling [`stop`](Self::stop)) aborts the task, which
/// closes the channel, so no tick can fire after teardown. This replaces
/// an ambient global interval with an explicitly owned one.
pub struct SessionTicker {
    handle: JoinHandle<()>,
}

impl SessionTicker {
    /// Spawn the timer task. The first tick arrives one full `period`
    /// after the call, then once per period.
    #[must_use]
    pub fn start(period: Duration) -> (Self, UnboundedReceiver<Tick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // `interval` fires immediately; swallow that so the countdown
            // does not lose a second on startup.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(Tick).is_err() {
                    break;
                }
            }
        });
        (Self { handle }, rx)
    }

    /// Stop the timer deterministically. Equivalent to dropping.
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for SessionTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
