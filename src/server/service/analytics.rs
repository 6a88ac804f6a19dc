//! Admin dashboard aggregates.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{analytics::AnalyticsRepository, genre::GenreRepository},
    error::AppError,
    model::analytics::{
        top_limit, Activity, AnalyticsWindow, GenreShare, Overview, TopContent,
    },
};

pub struct AnalyticsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AnalyticsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Totals and window-over-window trends for every tracked collection.
    ///
    /// # Arguments
    /// - `days` - Window length, defaults to 30
    /// - `now` - End of the current window
    ///
    /// # Returns
    /// - `Ok(Overview)` - Metrics for the window
    /// - `Err(AppError::BadRequest)` - `days` outside 1..=365
    pub async fn overview(
        &self,
        days: Option<i64>,
        now: DateTime<Utc>,
    ) -> Result<Overview, AppError> {
        let window = AnalyticsWindow::new(days, now)?;
        let repo = AnalyticsRepository::new(self.db);

        Ok(Overview {
            days: window.days,
            comics: repo.comic_metric(&window).await?,
            blog_posts: repo.blog_post_metric(&window).await?,
            subscribers: repo.subscriber_metric(&window).await?,
            users: repo.user_metric(&window).await?,
            likes: repo.like_metric(&window).await?,
            views: repo.view_metric(&window).await?,
        })
    }

    /// Most viewed and most liked live comics and posts.
    pub async fn top_content(&self, limit: Option<u64>) -> Result<TopContent, AppError> {
        let limit = top_limit(limit);
        let repo = AnalyticsRepository::new(self.db);

        Ok(TopContent {
            comics_by_views: repo
                .top_comics(entity::comic::Column::Views, limit)
                .await?,
            comics_by_likes: repo
                .top_comics(entity::comic::Column::Likes, limit)
                .await?,
            posts_by_views: repo
                .top_blog_posts(entity::blog_post::Column::Views, limit)
                .await?,
            posts_by_likes: repo
                .top_blog_posts(entity::blog_post::Column::Likes, limit)
                .await?,
        })
    }

    /// Share of comics per genre, largest first.
    pub async fn genre_distribution(&self) -> Result<Vec<GenreShare>, AppError> {
        let mut genres = GenreRepository::new(self.db).get_all().await?;
        genres.sort_by(|a, b| {
            b.comic_count
                .cmp(&a.comic_count)
                .then_with(|| a.name.cmp(&b.name))
        });

        Ok(GenreShare::distribute(genres))
    }

    pub async fn activity(
        &self,
        days: Option<i64>,
        now: DateTime<Utc>,
    ) -> Result<Activity, AppError> {
        let window = AnalyticsWindow::new(days, now)?;

        let points = AnalyticsRepository::new(self.db).activity(&window).await?;

        Ok(Activity {
            days: window.days,
            points,
        })
    }
}
