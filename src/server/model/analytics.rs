//! Analytics window and report models.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::{
    model::analytics::{
        ActivityDto, ActivityPointDto, GenreShareDto, MetricDto, OverviewDto, TopContentDto,
        TopContentItemDto,
    },
    server::{
        error::AppError,
        util::trend::{compute_trend, round_to_tenth},
    },
};

pub const DEFAULT_DAYS: i64 = 30;
pub const MAX_DAYS: i64 = 365;
pub const DEFAULT_TOP_LIMIT: u64 = 5;
pub const MAX_TOP_LIMIT: u64 = 50;

/// Current window `[now - days, now)` and previous window `[now - 2*days, now - days)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsWindow {
    pub days: i64,
    pub now: DateTime<Utc>,
}

impl AnalyticsWindow {
    /// # Returns
    /// - `Ok(AnalyticsWindow)` - `days` absent (defaults to 30) or within 1..=365
    /// - `Err(AppError::BadRequest)` - `days` out of range
    pub fn new(days: Option<i64>, now: DateTime<Utc>) -> Result<Self, AppError> {
        let days = days.unwrap_or(DEFAULT_DAYS);
        if !(1..=MAX_DAYS).contains(&days) {
            return Err(AppError::BadRequest(format!(
                "days must be between 1 and {}",
                MAX_DAYS
            )));
        }
        Ok(Self { days, now })
    }

    pub fn current_start(&self) -> DateTime<Utc> {
        self.now - Duration::days(self.days)
    }

    pub fn previous_start(&self) -> DateTime<Utc> {
        self.now - Duration::days(self.days * 2)
    }

    /// Calendar dates covered by the current window, oldest first.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let last = self.now.date_naive();
        (0..self.days)
            .rev()
            .map(|offset| last - Duration::days(offset))
            .collect()
    }
}

/// Clamps the top-content limit to 1..=50, defaulting to 5.
pub fn top_limit(limit: Option<u64>) -> u64 {
    limit.unwrap_or(DEFAULT_TOP_LIMIT).clamp(1, MAX_TOP_LIMIT)
}

/// Totals and window counts for one collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    pub total: i64,
    pub current: i64,
    pub previous: i64,
}

impl Metric {
    pub fn trend(&self) -> f64 {
        compute_trend(self.current, self.previous)
    }

    pub fn into_dto(self) -> MetricDto {
        MetricDto {
            total: self.total,
            current: self.current,
            previous: self.previous,
            trend: round_to_tenth(self.trend()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub days: i64,
    pub comics: Metric,
    pub blog_posts: Metric,
    pub subscribers: Metric,
    pub users: Metric,
    pub likes: Metric,
    pub views: Metric,
}

impl Overview {
    pub fn into_dto(self) -> OverviewDto {
        OverviewDto {
            days: self.days,
            comics: self.comics.into_dto(),
            blog_posts: self.blog_posts.into_dto(),
            subscribers: self.subscribers.into_dto(),
            users: self.users.into_dto(),
            likes: self.likes.into_dto(),
            views: self.views.into_dto(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopContentItem {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub views: i64,
    pub likes: i64,
}

impl TopContentItem {
    pub fn from_comic(entity: entity::comic::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            slug: entity.slug,
            views: entity.views,
            likes: entity.likes,
        }
    }

    pub fn from_blog_post(entity: entity::blog_post::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            slug: entity.slug,
            views: entity.views,
            likes: entity.likes,
        }
    }

    pub fn into_dto(self) -> TopContentItemDto {
        TopContentItemDto {
            id: self.id,
            title: self.title,
            slug: self.slug,
            views: self.views,
            likes: self.likes,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopContent {
    pub comics_by_views: Vec<TopContentItem>,
    pub comics_by_likes: Vec<TopContentItem>,
    pub posts_by_views: Vec<TopContentItem>,
    pub posts_by_likes: Vec<TopContentItem>,
}

impl TopContent {
    pub fn into_dto(self) -> TopContentDto {
        let convert =
            |items: Vec<TopContentItem>| items.into_iter().map(TopContentItem::into_dto).collect();

        TopContentDto {
            comics_by_views: convert(self.comics_by_views),
            comics_by_likes: convert(self.comics_by_likes),
            posts_by_views: convert(self.posts_by_views),
            posts_by_likes: convert(self.posts_by_likes),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenreShare {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub comic_count: i64,
    pub percentage: f64,
}

impl GenreShare {
    /// Computes each genre's share of the summed `comic_count`.
    ///
    /// Percentages are rounded to one decimal place; all zero when no genre has comics.
    pub fn distribute(genres: Vec<entity::genre::Model>) -> Vec<Self> {
        let total: i64 = genres.iter().map(|g| g.comic_count).sum();

        genres
            .into_iter()
            .map(|genre| {
                let percentage = if total > 0 {
                    round_to_tenth(genre.comic_count as f64 / total as f64 * 100.0)
                } else {
                    0.0
                };
                Self {
                    id: genre.id,
                    name: genre.name,
                    slug: genre.slug,
                    comic_count: genre.comic_count,
                    percentage,
                }
            })
            .collect()
    }

    pub fn into_dto(self) -> GenreShareDto {
        GenreShareDto {
            id: self.id,
            name: self.name,
            slug: self.slug,
            comic_count: self.comic_count,
            percentage: self.percentage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityPoint {
    pub date: NaiveDate,
    pub comics: i64,
    pub blog_posts: i64,
    pub subscribers: i64,
    pub users: i64,
}

impl ActivityPoint {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            comics: 0,
            blog_posts: 0,
            subscribers: 0,
            users: 0,
        }
    }

    pub fn into_dto(self) -> ActivityPointDto {
        ActivityPointDto {
            date: self.date,
            comics: self.comics,
            blog_posts: self.blog_posts,
            subscribers: self.subscribers,
            users: self.users,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub days: i64,
    pub points: Vec<ActivityPoint>,
}

impl Activity {
    pub fn into_dto(self) -> ActivityDto {
        ActivityDto {
            days: self.days,
            points: self
                .points
                .into_iter()
                .map(ActivityPoint::into_dto)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn window_defaults_and_bounds() {
        let now = Utc::now();

        assert_eq!(AnalyticsWindow::new(None, now).unwrap().days, 30);
        assert!(AnalyticsWindow::new(Some(0), now).is_err());
        assert!(AnalyticsWindow::new(Some(366), now).is_err());
    }

    #[test]
    fn window_dates_end_today() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let window = AnalyticsWindow::new(Some(3), now).unwrap();

        let dates = window.dates();
        assert_eq!(dates.len(), 3);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2026, 3, 8).unwrap());
        assert_eq!(dates[2], NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
    }

    #[test]
    fn metric_trend_is_rounded() {
        let metric = Metric {
            total: 10,
            current: 1,
            previous: 3,
        };
        assert_eq!(metric.into_dto().trend, -66.7);
    }

    #[test]
    fn top_limit_is_clamped() {
        assert_eq!(top_limit(None), 5);
        assert_eq!(top_limit(Some(0)), 1);
        assert_eq!(top_limit(Some(500)), 50);
    }
}
