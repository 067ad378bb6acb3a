//! Game Session
//!
//! Async front for a `Railyard`. A periodic ticker task and player chat
//! share one `tokio::sync::Mutex`, so a tick never observes a train in the
//! middle of a chat exchange and chat never observes a half-run tick.

use railyard_events::{ChatReply, SessionSnapshot, TickReport};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::config::RailyardConfig;
use crate::error::RailyardError;
use crate::railyard::Railyard;
use crate::setup::RosterSummary;

/// Receives one report per tick, the last one carrying the outcome
pub type TickFeed = mpsc::UnboundedReceiver<TickReport>;

pub struct GameSession {
    railyard: Arc<Mutex<Railyard>>,
    tick_interval: Duration,
    ticker: Option<JoinHandle<()>>,
}

impl GameSession {
    pub fn new(railyard: Railyard) -> Self {
        let tick_interval = railyard.config().session.tick_interval();
        Self {
            railyard: Arc::new(Mutex::new(railyard)),
            tick_interval,
            ticker: None,
        }
    }

    pub fn from_config(config: RailyardConfig) -> Result<Self, RailyardError> {
        Ok(Self::new(Railyard::new(config)?))
    }

    /// Starts the game and the periodic ticker. The first tick fires one
    /// period after start.
    pub async fn start(&mut self) -> Result<TickFeed, RailyardError> {
        self.railyard.lock().await.start()?;

        let (feed, reports) = mpsc::unbounded_channel();
        let railyard = Arc::clone(&self.railyard);
        self.ticker = Some(tokio::spawn(run_ticker(railyard, self.tick_interval, feed)));
        Ok(reports)
    }

    /// Handles one player message under the session lock. Addressed trains
    /// answer in roster order; the task yields between trains without
    /// releasing the lock.
    pub async fn send_player_message(&self, text: &str) -> Vec<ChatReply> {
        let mut railyard = self.railyard.lock().await;
        let mut replies = Vec::new();
        for train in railyard.addressed(text) {
            if let Some(reply) = railyard.respond(train, text) {
                replies.push(reply);
            }
            tokio::task::yield_now().await;
        }
        replies
    }

    pub async fn report_broken_promise(&self, text: &str) -> usize {
        self.railyard.lock().await.report_broken_promise(text)
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.railyard.lock().await.snapshot()
    }

    pub async fn roster_summary(&self) -> RosterSummary {
        self.railyard.lock().await.roster_summary()
    }

    pub async fn is_active(&self) -> bool {
        self.railyard.lock().await.is_active()
    }

    /// True while the ticker task is still running.
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stops the ticker. The session state is left as it is.
    pub fn shutdown(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            tracing::info!("Ticker stopped");
        }
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run_ticker(
    railyard: Arc<Mutex<Railyard>>,
    period: Duration,
    feed: mpsc::UnboundedSender<TickReport>,
) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    loop {
        interval.tick().await;

        let Some(report) = railyard.lock().await.tick() else {
            break;
        };
        let finished = report.is_terminal();
        // A dropped feed does not stop the game
        let _ = feed.send(report);
        if finished {
            tracing::debug!("Ticker finished with the session");
            break;
        }
    }
}
