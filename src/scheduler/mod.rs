//! Background synchronization loop.

pub mod schedule;

use std::sync::Arc;

use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio::sync::watch;

use crate::data::station::StationRepository;
use crate::model::sync::SyncOutcome;
use crate::scheduler::schedule::{decide, delay_until_next_window, ScheduleConfig};
use crate::service::sync::SyncService;

/// Polls the schedule and runs syncs when they are due.
///
/// The checkpoint is re-read from the database on every tick rather than
/// held in memory, so a sync completed by another instance debounces this
/// one too.
pub struct SyncLoop {
    db: DatabaseConnection,
    sync_service: Arc<SyncService>,
    config: ScheduleConfig,
    shutdown: watch::Receiver<bool>,
}

impl SyncLoop {
    pub fn new(
        db: DatabaseConnection,
        sync_service: Arc<SyncService>,
        config: ScheduleConfig,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            db,
            sync_service,
            config,
            shutdown,
        }
    }

    pub async fn run(mut self) {
        tracing::info!("price sync loop started");

        loop {
            let delay = self.tick().await;

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = self.shutdown.changed() => {
                    if *self.shutdown.borrow() {
                        tracing::info!("price sync loop stopping");
                        return;
                    }
                }
            }
        }
    }

    /// Evaluates one tick and returns how long to sleep before the next one.
    async fn tick(&self) -> std::time::Duration {
        let checkpoint = match StationRepository::new(&self.db).latest_sync_timestamp().await {
            Ok(checkpoint) => checkpoint,
            Err(err) => {
                tracing::error!("failed to read sync checkpoint: {err}");
                return self.config.failure_backoff;
            }
        };

        let now = Utc::now();
        let decision = decide(&self.config, now, checkpoint);
        if !decision.should_run {
            let until_next = delay_until_next_window(&self.config, now);
            tracing::debug!(
                reason = ?decision.reason,
                next_window_in_minutes = until_next.num_minutes(),
                "sync not due"
            );
            return self.config.poll_interval;
        }

        tracing::info!(reason = ?decision.reason, "starting price sync");
        match self.sync_service.synchronize().await {
            Ok(SyncOutcome::Completed(stats)) => {
                tracing::info!(
                    stations = stats.stations,
                    prices = stats.prices,
                    history_rows = stats.history_rows,
                    "price sync completed"
                );
                self.config.poll_interval
            }
            Ok(SyncOutcome::SkippedConcurrent) => {
                tracing::info!("price sync already running on another instance");
                self.config.poll_interval
            }
            Err(err) => {
                tracing::error!("price sync failed: {err}");
                self.config.failure_backoff
            }
        }
    }
}
