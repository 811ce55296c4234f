//! Wiring of controller, timer and board for one running tracker.

use crate::config::TrackerConfig;
use crate::task::{adapters::timeout::TimeoutTaskStore, ports::TaskStore};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

use super::{Notification, TaskBoard, TaskCollectionController, Ticker};

/// Controller type used by a session: the store wrapped with its timeout.
pub type SessionController<S> = TaskCollectionController<TimeoutTaskStore<S>>;

/// A running tracker.
///
/// The controller is the only writer of the collection. The board reads
/// snapshots and wakes on ticks from the session's own ticker.
pub struct TrackerSession<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    controller: SessionController<S>,
    board: TaskBoard<C>,
    ticker: Ticker,
}

impl<S, C> TrackerSession<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Wraps `store` with the configured timeout, loads the collection and
    /// starts the countdown timer.
    ///
    /// The returned notification reports the initial load; a failed load
    /// leaves the session running with an empty collection.
    pub async fn start(store: S, clock: Arc<C>, config: &TrackerConfig) -> (Self, Notification) {
        let bounded = TimeoutTaskStore::new(store, config.store_timeout());
        let mut controller = TaskCollectionController::new(Arc::new(bounded));
        let loaded = controller.load().await;

        let ticker = Ticker::spawn(config.tick_interval());
        let board = TaskBoard::new(controller.subscribe(), ticker.subscribe(), clock);
        info!(
            tick_ms = config.tick_interval_ms,
            timeout_ms = config.store_timeout_ms,
            "tracker session started"
        );

        (
            Self {
                controller,
                board,
                ticker,
            },
            loaded,
        )
    }

    /// Returns the collection controller.
    #[must_use]
    pub const fn controller(&self) -> &SessionController<S> {
        &self.controller
    }

    /// Returns the collection controller for mutation.
    pub const fn controller_mut(&mut self) -> &mut SessionController<S> {
        &mut self.controller
    }

    /// Returns the board.
    #[must_use]
    pub const fn board(&self) -> &TaskBoard<C> {
        &self.board
    }

    /// Returns the board for sorting changes and frame waits.
    pub const fn board_mut(&mut self) -> &mut TaskBoard<C> {
        &mut self.board
    }

    /// Stops the countdown timer and consumes the session.
    pub fn shutdown(self) {
        self.ticker.cancel();
        info!("tracker session stopped");
    }
}
