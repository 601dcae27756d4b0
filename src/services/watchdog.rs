//! Watchdog service that times out abandoned evaluation jobs.
//!
//! Workers report progress over the job callback endpoint; if a worker dies
//! mid-evaluation its job would otherwise sit in a non-terminal status
//! forever. The watchdog sweeps periodically and moves such jobs to ERROR.

use std::time::Duration;

use tokio::time::interval;
use tracing::{info, warn};

use crate::models::{WsEvent, WsEventMessage};
use crate::services::EventBroadcaster;
use crate::store::Store;

/// Configuration for the watchdog service.
#[derive(Clone)]
pub struct WatchdogConfig {
    /// Minutes a job may sit in a non-terminal status before expiring
    pub job_timeout_minutes: u64,
    /// How often to sweep (in seconds)
    pub interval_secs: u64,
}

/// Start the watchdog background task.
///
/// Spawns a tokio task that periodically expires jobs stuck past the
/// configured timeout and publishes a job_updated event for each.
pub fn start_watchdog_task(store: Store, broadcaster: EventBroadcaster, config: WatchdogConfig) {
    tokio::spawn(async move {
        info!(
            "Starting job watchdog (timeout: {} minutes, interval: {} seconds)",
            config.job_timeout_minutes, config.interval_secs
        );

        let mut ticker = interval(Duration::from_secs(config.interval_secs));

        loop {
            ticker.tick().await;
            run_sweep(&store, &broadcaster, &config).await;
        }
    });
}

/// Run a single watchdog sweep.
async fn run_sweep(store: &Store, broadcaster: &EventBroadcaster, config: &WatchdogConfig) {
    let max_age = chrono::Duration::minutes(config.job_timeout_minutes as i64);
    let expired = store.tests.expire_stale_jobs(max_age).await;

    if expired.is_empty() {
        return;
    }

    warn!("Watchdog expired {} stale evaluation job(s)", expired.len());

    for record in expired {
        warn!(
            test_id = %record.id,
            job_id = %record.job.id,
            "Job exceeded {} minute timeout, moved to ERROR",
            config.job_timeout_minutes
        );
        broadcaster.send(WsEventMessage::new(WsEvent::job_updated(
            record.id,
            record.job.id,
            record.job.status,
            record.job.message.clone(),
        )));
    }
}
