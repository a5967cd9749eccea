//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! Postgres has no TTL index, so expired one-time codes are purged by a
//! periodic job instead. Verification never relies on the purge: it checks
//! expiry itself, the purge only keeps the table small.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::kernel::BaseCredentialStore;

/// Every minute, on the minute
const OTP_PURGE_SCHEDULE: &str = "0 * * * * *";

/// Start all scheduled tasks
pub async fn start_scheduler(store: Arc<dyn BaseCredentialStore>) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let purge_store = store.clone();
    let purge_job = Job::new_async(OTP_PURGE_SCHEDULE, move |_uuid, _lock| {
        let store = purge_store.clone();
        Box::pin(async move {
            if let Err(e) = run_otp_purge(store.as_ref(), Utc::now()).await {
                tracing::error!("OTP purge task failed: {}", e);
            }
        })
    })?;

    scheduler.add(purge_job).await?;
    scheduler.start().await?;

    tracing::info!("Scheduled tasks started (expired OTP purge every minute)");
    Ok(scheduler)
}

/// Delete one-time codes that expired at or before `now`
pub async fn run_otp_purge(store: &dyn BaseCredentialStore, now: DateTime<Utc>) -> Result<u64> {
    let purged = store.purge_expired_codes(now).await?;

    if purged > 0 {
        tracing::info!(purged, "Purged expired one-time codes");
    } else {
        tracing::debug!("No expired one-time codes to purge");
    }

    Ok(purged)
}
