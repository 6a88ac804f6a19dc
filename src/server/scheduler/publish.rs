use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::Job;

use crate::server::{error::AppError, service::blog::BlogService};

/// Every minute at second zero.
pub const SCHEDULE: &str = "0 * * * * *";

pub fn job(db: DatabaseConnection) -> Result<Job, AppError> {
    let job = Job::new_async(SCHEDULE, move |_uuid, _lock| {
        let db = db.clone();

        Box::pin(async move {
            if let Err(e) = publish_due_posts(&db).await {
                tracing::error!("Error publishing scheduled blog posts: {}", e);
            }
        })
    })?;

    Ok(job)
}

async fn publish_due_posts(db: &DatabaseConnection) -> Result<(), AppError> {
    let published = BlogService::new(db).publish_due(Utc::now()).await?;

    if published > 0 {
        tracing::info!("Published {} scheduled blog post(s)", published);
    }

    Ok(())
}
