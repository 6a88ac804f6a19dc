//! Newsletter subscriber factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use entity::subscriber::SubscriberStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test subscribers.
pub struct SubscriberFactory<'a> {
    db: &'a DatabaseConnection,
    email: String,
    status: SubscriberStatus,
    token: String,
    subscribed_at: DateTime<Utc>,
}

impl<'a> SubscriberFactory<'a> {
    /// Creates an active subscriber `"reader{id}@example.com"` with token `"token-{id}"`.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            email: format!("reader{}@example.com", id),
            status: SubscriberStatus::Active,
            token: format!("token-{}", id),
            subscribed_at: Utc::now(),
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn unsubscribed(mut self) -> Self {
        self.status = SubscriberStatus::Unsubscribed;
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn subscribed_at(mut self, subscribed_at: DateTime<Utc>) -> Self {
        self.subscribed_at = subscribed_at;
        self
    }

    pub async fn build(self) -> Result<entity::subscriber::Model, DbErr> {
        let unsubscribed_at =
            (self.status == SubscriberStatus::Unsubscribed).then_some(self.subscribed_at);
        entity::subscriber::ActiveModel {
            email: ActiveValue::Set(self.email),
            name: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            unsubscribe_token: ActiveValue::Set(self.token),
            subscribed_at: ActiveValue::Set(self.subscribed_at),
            unsubscribed_at: ActiveValue::Set(unsubscribed_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active subscriber with default values.
pub async fn create_subscriber(
    db: &DatabaseConnection,
) -> Result<entity::subscriber::Model, DbErr> {
    SubscriberFactory::new(db).build().await
}
