//! In-process scheduler for the insight job
//!
//! `glint schedule` runs the job on a fixed interval in the foreground,
//! for deployments without an external scheduler. Configuration:
//!
//! - `--every-hours N`: interval in hours (default: 24)
//! - `GLINT_SCHEDULE`: interval in hours, overrides the flag
//!
//! Each tick is an independent run; a failed run is logged and the loop
//! keeps going.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tokio::time::interval;
use tracing::{error, info, warn};

use glint_core::{run_daily_job, ProviderConfig};

use super::open_db;

/// Resolve the interval in hours: GLINT_SCHEDULE env var wins over the flag
fn resolve_interval_hours(flag_hours: u64) -> u64 {
    match std::env::var("GLINT_SCHEDULE").ok().and_then(|s| s.parse().ok()) {
        Some(0) => {
            warn!("GLINT_SCHEDULE is 0, falling back to --every-hours");
            flag_hours
        }
        Some(hours) => hours,
        None => flag_hours,
    }
}

pub async fn cmd_schedule(db_path: &Path, every_hours: u64) -> Result<()> {
    let db = open_db(db_path)?;
    let interval_hours = resolve_interval_hours(every_hours);

    anyhow::ensure!(interval_hours > 0, "Interval must be at least 1 hour");

    info!(
        "Starting scheduler: insight job every {} hours",
        interval_hours
    );
    println!("⏰ Scheduler running (every {} hours). Ctrl-C to stop.", interval_hours);

    let mut ticker = interval(Duration::from_secs(interval_hours * 3600));

    // Skip the first immediate tick - we don't want to run on startup
    ticker.tick().await;

    loop {
        ticker.tick().await;

        info!("Running scheduled insight job...");

        // Credentials are re-read each tick so a key rotation takes effect
        // without restarting the scheduler.
        let config = ProviderConfig::from_env();
        match run_daily_job(&db, &config).await {
            Ok(Some(report)) => {
                info!(
                    succeeded = report.succeeded(),
                    failed = report.failed(),
                    "Scheduled run completed"
                );
            }
            Ok(None) => {
                info!("Scheduled run skipped: no provider configured");
            }
            Err(e) => {
                error!("Scheduled run failed: {}", e);
            }
        }
    }
}
