//! Newsletter subscriptions.

use chrono::{DateTime, Utc};
use rand::{distr::Alphanumeric, Rng};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::subscriber::SubscriberRepository,
    error::AppError,
    model::subscriber::{PaginatedSubscribers, SubscribeParams, Subscriber, SubscriberFilter},
    util::pagination::PageRequest,
};

const TOKEN_LENGTH: usize = 48;

pub struct SubscriberService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SubscriberService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Subscribes an address, reactivating it when it had unsubscribed before.
    ///
    /// # Returns
    /// - `Ok(Subscriber)` - Active subscriber with a fresh unsubscribe token
    /// - `Err(AppError::BadRequest)` - Address is already subscribed
    pub async fn subscribe(&self, params: SubscribeParams) -> Result<Subscriber, AppError> {
        let repo = SubscriberRepository::new(self.db);

        match repo.find_by_email(&params.email).await? {
            Some(existing) if existing.is_active() => {
                Err(AppError::BadRequest("already subscribed".to_string()))
            }
            Some(existing) => {
                let subscriber = repo
                    .reactivate(existing.id, params.name, generate_token())
                    .await?
                    .ok_or_else(|| AppError::NotFound("Subscriber not found".to_string()))?;

                tracing::info!("Subscriber {} resubscribed", subscriber.id);
                Ok(subscriber)
            }
            None => {
                let subscriber = repo.create(params, generate_token()).await?;

                tracing::info!("New subscriber {}", subscriber.id);
                Ok(subscriber)
            }
        }
    }

    /// Unsubscribes the owner of `token`. Repeated calls are no-ops.
    ///
    /// # Returns
    /// - `Ok(())` - Subscriber is unsubscribed
    /// - `Err(AppError::NotFound)` - Unknown token
    pub async fn unsubscribe(&self, token: &str, now: DateTime<Utc>) -> Result<(), AppError> {
        let repo = SubscriberRepository::new(self.db);

        let Some(subscriber) = repo.find_by_token(token.trim()).await? else {
            return Err(AppError::NotFound("Subscription not found".to_string()));
        };

        if subscriber.is_active() {
            repo.mark_unsubscribed(subscriber.id, now).await?;
            tracing::info!("Subscriber {} unsubscribed", subscriber.id);
        }

        Ok(())
    }

    pub async fn get(&self, id: i32) -> Result<Subscriber, AppError> {
        SubscriberRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Subscriber not found".to_string()))
    }

    pub async fn get_paginated(
        &self,
        filter: SubscriberFilter,
        page: PageRequest,
    ) -> Result<PaginatedSubscribers, AppError> {
        let (subscribers, total) = SubscriberRepository::new(self.db)
            .get_paginated(&filter, page)
            .await?;

        Ok(PaginatedSubscribers {
            subscribers,
            total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages(total),
        })
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !SubscriberRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound("Subscriber not found".to_string()));
        }
        Ok(())
    }
}

fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}
