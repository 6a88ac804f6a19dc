use chrono::{DateTime, Utc};
use entity::subscriber::SubscriberStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    model::subscriber::{SubscribeParams, Subscriber, SubscriberFilter},
    util::pagination::PageRequest,
};

pub struct SubscriberRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SubscriberRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an active subscriber.
    pub async fn create(&self, params: SubscribeParams, token: String) -> Result<Subscriber, DbErr> {
        let entity = entity::subscriber::ActiveModel {
            email: ActiveValue::Set(params.email),
            name: ActiveValue::Set(params.name),
            status: ActiveValue::Set(SubscriberStatus::Active),
            unsubscribe_token: ActiveValue::Set(token),
            subscribed_at: ActiveValue::Set(Utc::now()),
            unsubscribed_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Subscriber::from_entity(entity))
    }

    /// Reactivates an unsubscribed address with a fresh token.
    ///
    /// The name is only replaced when a new one is given.
    pub async fn reactivate(
        &self,
        id: i32,
        name: Option<String>,
        token: String,
    ) -> Result<Option<Subscriber>, DbErr> {
        let Some(subscriber) = entity::prelude::Subscriber::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::subscriber::ActiveModel = subscriber.into();
        if name.is_some() {
            active_model.name = ActiveValue::Set(name);
        }
        active_model.status = ActiveValue::Set(SubscriberStatus::Active);
        active_model.unsubscribe_token = ActiveValue::Set(token);
        active_model.subscribed_at = ActiveValue::Set(Utc::now());
        active_model.unsubscribed_at = ActiveValue::Set(None);

        let entity = active_model.update(self.db).await?;

        Ok(Some(Subscriber::from_entity(entity)))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Subscriber>, DbErr> {
        let entity = entity::prelude::Subscriber::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(Subscriber::from_entity))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, DbErr> {
        let entity = entity::prelude::Subscriber::find()
            .filter(entity::subscriber::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(entity.map(Subscriber::from_entity))
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Option<Subscriber>, DbErr> {
        let entity = entity::prelude::Subscriber::find()
            .filter(entity::subscriber::Column::UnsubscribeToken.eq(token))
            .one(self.db)
            .await?;

        Ok(entity.map(Subscriber::from_entity))
    }

    /// Marks a subscriber as unsubscribed at `now`.
    pub async fn mark_unsubscribed(&self, id: i32, now: DateTime<Utc>) -> Result<(), DbErr> {
        entity::prelude::Subscriber::update_many()
            .set(entity::subscriber::ActiveModel {
                status: ActiveValue::Set(SubscriberStatus::Unsubscribed),
                unsubscribed_at: ActiveValue::Set(Some(now)),
                ..Default::default()
            })
            .filter(entity::subscriber::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Gets subscribers matching `filter`, newest first.
    ///
    /// # Returns
    /// - `Ok((subscribers, total))` - Subscribers for the page and the total match count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_paginated(
        &self,
        filter: &SubscriberFilter,
        page: PageRequest,
    ) -> Result<(Vec<Subscriber>, u64), DbErr> {
        let mut query = entity::prelude::Subscriber::find();
        if let Some(status) = filter.status {
            query = query.filter(entity::subscriber::Column::Status.eq(status));
        }
        if let Some(search) = &filter.search {
            query = query.filter(
                Condition::any()
                    .add(entity::subscriber::Column::Email.contains(search.as_str()))
                    .add(entity::subscriber::Column::Name.contains(search.as_str())),
            );
        }

        let paginator = query
            .order_by_desc(entity::subscriber::Column::SubscribedAt)
            .order_by_desc(entity::subscriber::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let subscribers = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(Subscriber::from_entity)
            .collect();

        Ok((subscribers, total))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Subscriber::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
