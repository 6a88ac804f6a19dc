//! Background jobs.
//!
//! - `publish` - Every minute, publishes scheduled blog posts whose time has come
//! - `recount` - Daily at 03:00 UTC, reconciles denormalized counters

pub mod publish;
pub mod recount;

use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::JobScheduler;

use crate::server::error::AppError;

/// Registers every job on one scheduler and starts it.
///
/// The returned scheduler must be kept alive for the jobs to keep running.
pub async fn start_scheduler(db: DatabaseConnection) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    scheduler.add(publish::job(db.clone())?).await?;
    scheduler.add(recount::job(db)?).await?;
    scheduler.start().await?;

    tracing::info!("Scheduler started");

    Ok(scheduler)
}
