//! Counter reconciliation.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{data::counter::CounterRepository, error::AppError, model::counter::RecountReport};

pub struct MaintenanceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MaintenanceService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Recomputes genre, tag and category counters from the content tables.
    pub async fn recount_counters(&self) -> Result<RecountReport, AppError> {
        let txn = self.db.begin().await?;
        let report = CounterRepository::new(&txn).recount().await?;
        txn.commit().await?;

        if report.total() > 0 {
            tracing::info!(
                "Recount corrected {} genre, {} tag and {} category counters",
                report.genres,
                report.tags,
                report.categories
            );
        }

        Ok(report)
    }
}
