//! Read-only aggregation queries behind the admin analytics endpoints.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use entity::subscriber::SubscriberStatus;
use sea_orm::{
    sea_query::{Expr, Func},
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::server::model::analytics::{ActivityPoint, AnalyticsWindow, Metric, TopContentItem};

pub struct AnalyticsRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AnalyticsRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Non-deleted comics, counted by `created_at`.
    pub async fn comic_metric(&self, window: &AnalyticsWindow) -> Result<Metric, DbErr> {
        use entity::comic::Column;

        let live = || entity::prelude::Comic::find().filter(Column::DeletedAt.is_null());

        Ok(Metric {
            total: live().count(self.db).await? as i64,
            current: live()
                .filter(Column::CreatedAt.gte(window.current_start()))
                .filter(Column::CreatedAt.lt(window.now))
                .count(self.db)
                .await? as i64,
            previous: live()
                .filter(Column::CreatedAt.gte(window.previous_start()))
                .filter(Column::CreatedAt.lt(window.current_start()))
                .count(self.db)
                .await? as i64,
        })
    }

    /// Non-deleted blog posts, counted by `created_at`.
    pub async fn blog_post_metric(&self, window: &AnalyticsWindow) -> Result<Metric, DbErr> {
        use entity::blog_post::Column;

        let live = || entity::prelude::BlogPost::find().filter(Column::DeletedAt.is_null());

        Ok(Metric {
            total: live().count(self.db).await? as i64,
            current: live()
                .filter(Column::CreatedAt.gte(window.current_start()))
                .filter(Column::CreatedAt.lt(window.now))
                .count(self.db)
                .await? as i64,
            previous: live()
                .filter(Column::CreatedAt.gte(window.previous_start()))
                .filter(Column::CreatedAt.lt(window.current_start()))
                .count(self.db)
                .await? as i64,
        })
    }

    /// Active subscribers in total; window counts use `subscribed_at` across all statuses.
    pub async fn subscriber_metric(&self, window: &AnalyticsWindow) -> Result<Metric, DbErr> {
        use entity::subscriber::Column;

        Ok(Metric {
            total: entity::prelude::Subscriber::find()
                .filter(Column::Status.eq(SubscriberStatus::Active))
                .count(self.db)
                .await? as i64,
            current: entity::prelude::Subscriber::find()
                .filter(Column::SubscribedAt.gte(window.current_start()))
                .filter(Column::SubscribedAt.lt(window.now))
                .count(self.db)
                .await? as i64,
            previous: entity::prelude::Subscriber::find()
                .filter(Column::SubscribedAt.gte(window.previous_start()))
                .filter(Column::SubscribedAt.lt(window.current_start()))
                .count(self.db)
                .await? as i64,
        })
    }

    pub async fn user_metric(&self, window: &AnalyticsWindow) -> Result<Metric, DbErr> {
        use entity::user::Column;

        Ok(Metric {
            total: entity::prelude::User::find().count(self.db).await? as i64,
            current: entity::prelude::User::find()
                .filter(Column::CreatedAt.gte(window.current_start()))
                .filter(Column::CreatedAt.lt(window.now))
                .count(self.db)
                .await? as i64,
            previous: entity::prelude::User::find()
                .filter(Column::CreatedAt.gte(window.previous_start()))
                .filter(Column::CreatedAt.lt(window.current_start()))
                .count(self.db)
                .await? as i64,
        })
    }

    /// Sum of like counters on live content; window counts use the timestamps of like rows
    /// on that same live content.
    pub async fn like_metric(&self, window: &AnalyticsWindow) -> Result<Metric, DbErr> {
        let comic_likes: Option<Option<i64>> = entity::prelude::Comic::find()
            .select_only()
            .column_as(Expr::from(Func::sum(Expr::col(entity::comic::Column::Likes))), "total")
            .filter(entity::comic::Column::DeletedAt.is_null())
            .into_tuple()
            .one(self.db)
            .await?;
        let post_likes: Option<Option<i64>> = entity::prelude::BlogPost::find()
            .select_only()
            .column_as(Expr::from(Func::sum(Expr::col(entity::blog_post::Column::Likes))), "total")
            .filter(entity::blog_post::Column::DeletedAt.is_null())
            .into_tuple()
            .one(self.db)
            .await?;

        let count_between = |from: DateTime<Utc>, to: DateTime<Utc>| async move {
            let comics = entity::prelude::ComicLike::find()
                .inner_join(entity::prelude::Comic)
                .filter(entity::comic::Column::DeletedAt.is_null())
                .filter(entity::comic_like::Column::CreatedAt.gte(from))
                .filter(entity::comic_like::Column::CreatedAt.lt(to))
                .count(self.db)
                .await?;
            let posts = entity::prelude::BlogPostLike::find()
                .inner_join(entity::prelude::BlogPost)
                .filter(entity::blog_post::Column::DeletedAt.is_null())
                .filter(entity::blog_post_like::Column::CreatedAt.gte(from))
                .filter(entity::blog_post_like::Column::CreatedAt.lt(to))
                .count(self.db)
                .await?;
            Ok::<i64, DbErr>((comics + posts) as i64)
        };

        Ok(Metric {
            total: comic_likes.flatten().unwrap_or(0) + post_likes.flatten().unwrap_or(0),
            current: count_between(window.current_start(), window.now).await?,
            previous: count_between(window.previous_start(), window.current_start()).await?,
        })
    }

    /// Sum of view counters on live content; window counts use the view event log.
    pub async fn view_metric(&self, window: &AnalyticsWindow) -> Result<Metric, DbErr> {
        use entity::view_event::Column;

        let comic_views: Option<Option<i64>> = entity::prelude::Comic::find()
            .select_only()
            .column_as(Expr::from(Func::sum(Expr::col(entity::comic::Column::Views))), "total")
            .filter(entity::comic::Column::DeletedAt.is_null())
            .into_tuple()
            .one(self.db)
            .await?;
        let post_views: Option<Option<i64>> = entity::prelude::BlogPost::find()
            .select_only()
            .column_as(Expr::from(Func::sum(Expr::col(entity::blog_post::Column::Views))), "total")
            .filter(entity::blog_post::Column::DeletedAt.is_null())
            .into_tuple()
            .one(self.db)
            .await?;

        Ok(Metric {
            total: comic_views.flatten().unwrap_or(0) + post_views.flatten().unwrap_or(0),
            current: entity::prelude::ViewEvent::find()
                .filter(Column::ViewedAt.gte(window.current_start()))
                .filter(Column::ViewedAt.lt(window.now))
                .count(self.db)
                .await? as i64,
            previous: entity::prelude::ViewEvent::find()
                .filter(Column::ViewedAt.gte(window.previous_start()))
                .filter(Column::ViewedAt.lt(window.current_start()))
                .count(self.db)
                .await? as i64,
        })
    }

    /// Live comics ordered by `order` descending, ties broken by id.
    pub async fn top_comics(
        &self,
        order: entity::comic::Column,
        limit: u64,
    ) -> Result<Vec<TopContentItem>, DbErr> {
        let comics = entity::prelude::Comic::find()
            .filter(entity::comic::Column::DeletedAt.is_null())
            .order_by_desc(order)
            .order_by_asc(entity::comic::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(comics.into_iter().map(TopContentItem::from_comic).collect())
    }

    /// Live blog posts ordered by `order` descending, ties broken by id.
    pub async fn top_blog_posts(
        &self,
        order: entity::blog_post::Column,
        limit: u64,
    ) -> Result<Vec<TopContentItem>, DbErr> {
        let posts = entity::prelude::BlogPost::find()
            .filter(entity::blog_post::Column::DeletedAt.is_null())
            .order_by_desc(order)
            .order_by_asc(entity::blog_post::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(posts
            .into_iter()
            .map(TopContentItem::from_blog_post)
            .collect())
    }

    /// Per-day creation counts over the window's calendar dates, zero days included.
    pub async fn activity(&self, window: &AnalyticsWindow) -> Result<Vec<ActivityPoint>, DbErr> {
        let dates = window.dates();
        let Some(first) = dates.first() else {
            return Ok(Vec::new());
        };
        let since = first.and_time(NaiveTime::MIN).and_utc();

        let comics: Vec<DateTime<Utc>> = entity::prelude::Comic::find()
            .select_only()
            .column(entity::comic::Column::CreatedAt)
            .filter(entity::comic::Column::DeletedAt.is_null())
            .filter(entity::comic::Column::CreatedAt.gte(since))
            .into_tuple()
            .all(self.db)
            .await?;
        let posts: Vec<DateTime<Utc>> = entity::prelude::BlogPost::find()
            .select_only()
            .column(entity::blog_post::Column::CreatedAt)
            .filter(entity::blog_post::Column::DeletedAt.is_null())
            .filter(entity::blog_post::Column::CreatedAt.gte(since))
            .into_tuple()
            .all(self.db)
            .await?;
        let subscribers: Vec<DateTime<Utc>> = entity::prelude::Subscriber::find()
            .select_only()
            .column(entity::subscriber::Column::SubscribedAt)
            .filter(entity::subscriber::Column::SubscribedAt.gte(since))
            .into_tuple()
            .all(self.db)
            .await?;
        let users: Vec<DateTime<Utc>> = entity::prelude::User::find()
            .select_only()
            .column(entity::user::Column::CreatedAt)
            .filter(entity::user::Column::CreatedAt.gte(since))
            .into_tuple()
            .all(self.db)
            .await?;

        let mut points: HashMap<NaiveDate, ActivityPoint> = dates
            .iter()
            .map(|date| (*date, ActivityPoint::empty(*date)))
            .collect();

        for at in comics {
            if let Some(point) = points.get_mut(&at.date_naive()) {
                point.comics += 1;
            }
        }
        for at in posts {
            if let Some(point) = points.get_mut(&at.date_naive()) {
                point.blog_posts += 1;
            }
        }
        for at in subscribers {
            if let Some(point) = points.get_mut(&at.date_naive()) {
                point.subscribers += 1;
            }
        }
        for at in users {
            if let Some(point) = points.get_mut(&at.date_naive()) {
                point.users += 1;
            }
        }

        Ok(dates
            .into_iter()
            .filter_map(|date| points.remove(&date))
            .collect())
    }
}
