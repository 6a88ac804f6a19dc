use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::Job;

use crate::server::{error::AppError, service::maintenance::MaintenanceService};

/// Daily at 03:00:00 UTC.
pub const SCHEDULE: &str = "0 0 3 * * *";

pub fn job(db: DatabaseConnection) -> Result<Job, AppError> {
    let job = Job::new_async(SCHEDULE, move |_uuid, _lock| {
        let db = db.clone();

        Box::pin(async move {
            if let Err(e) = MaintenanceService::new(&db).recount_counters().await {
                tracing::error!("Error recounting counters: {}", e);
            }
        })
    })?;

    Ok(job)
}
