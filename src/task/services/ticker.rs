//! Repeating timer that invalidates time-derived output.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Shortest accepted tick period.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Cancellable repeating timer.
///
/// Each tick bumps a counter on a watch channel. Ticks carry no data and
/// never touch the task collection; subscribers use them only as a signal
/// to recompute countdowns. The timer stops on [`cancel`](Self::cancel) or
/// when the `Ticker` is dropped, after which subscribers observe a closed
/// channel.
#[derive(Debug)]
pub struct Ticker {
    ticks: watch::Receiver<u64>,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Starts a timer on the current tokio runtime. The first tick fires
    /// one `period` after the call.
    #[must_use]
    pub fn spawn(period: Duration) -> Self {
        let tick_period = period.max(MIN_PERIOD);
        let (sender, ticks) = watch::channel(0_u64);
        let handle = tokio::spawn(async move {
            let first = tokio::time::Instant::now() + tick_period;
            let mut interval = tokio::time::interval_at(first, tick_period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                sender.send_modify(|count| *count = count.wrapping_add(1));
            }
        });
        Self { ticks, handle }
    }

    /// Returns a receiver notified on every tick.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.ticks.clone()
    }

    /// Returns the number of ticks fired so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        *self.ticks.borrow()
    }

    /// Stops the timer.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Returns `true` once the timer has stopped.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
