//! Newsletter subscriber domain models and parameters.

use chrono::{DateTime, Utc};
use entity::subscriber::SubscriberStatus;

use crate::{
    model::subscriber::{
        PaginatedSubscribersDto, SubscribeDto, SubscriberDto, SubscriberStatusDto, SubscriptionDto,
    },
    server::{error::AppError, util::validate},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Subscriber {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
    pub status: SubscriberStatus,
    /// Secret presented by the subscriber to opt out.
    pub unsubscribe_token: String,
    pub subscribed_at: DateTime<Utc>,
    pub unsubscribed_at: Option<DateTime<Utc>>,
}

impl Subscriber {
    pub fn from_entity(entity: entity::subscriber::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            status: entity.status,
            unsubscribe_token: entity.unsubscribe_token,
            subscribed_at: entity.subscribed_at,
            unsubscribed_at: entity.unsubscribed_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SubscriberStatus::Active
    }

    /// Converts to a DTO; the unsubscribe token is not included.
    pub fn into_dto(self) -> SubscriberDto {
        SubscriberDto {
            id: self.id,
            email: self.email,
            name: self.name,
            status: self.status.into(),
            subscribed_at: self.subscribed_at,
            unsubscribed_at: self.unsubscribed_at,
        }
    }

    /// Response to the subscriber themselves, carrying the unsubscribe token.
    pub fn into_subscription_dto(self) -> SubscriptionDto {
        SubscriptionDto {
            unsubscribe_token: self.unsubscribe_token.clone(),
            subscriber: self.into_dto(),
        }
    }
}

impl From<SubscriberStatus> for SubscriberStatusDto {
    fn from(status: SubscriberStatus) -> Self {
        match status {
            SubscriberStatus::Active => SubscriberStatusDto::Active,
            SubscriberStatus::Unsubscribed => SubscriberStatusDto::Unsubscribed,
        }
    }
}

impl From<SubscriberStatusDto> for SubscriberStatus {
    fn from(status: SubscriberStatusDto) -> Self {
        match status {
            SubscriberStatusDto::Active => SubscriberStatus::Active,
            SubscriberStatusDto::Unsubscribed => SubscriberStatus::Unsubscribed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubscribeParams {
    /// Lowercased email address.
    pub email: String,
    pub name: Option<String>,
}

impl SubscribeParams {
    pub fn from_dto(dto: SubscribeDto) -> Result<Self, AppError> {
        Ok(Self {
            email: validate::email(&dto.email)?,
            name: validate::optional_text("name", dto.name, 100)?,
        })
    }
}

/// Admin listing filter for subscribers.
#[derive(Debug, Clone, Default)]
pub struct SubscriberFilter {
    pub status: Option<SubscriberStatus>,
    /// Case-insensitive substring of email or name.
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedSubscribers {
    pub subscribers: Vec<Subscriber>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl PaginatedSubscribers {
    pub fn into_dto(self) -> PaginatedSubscribersDto {
        PaginatedSubscribersDto {
            subscribers: self
                .subscribers
                .into_iter()
                .map(Subscriber::into_dto)
                .collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}
