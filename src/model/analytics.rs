use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One overview metric with its period-over-period trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MetricDto {
    pub total: i64,
    pub current: i64,
    pub previous: i64,
    /// Percentage change from the previous window, one decimal place.
    pub trend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewDto {
    pub days: i64,
    pub comics: MetricDto,
    pub blog_posts: MetricDto,
    pub subscribers: MetricDto,
    pub users: MetricDto,
    pub likes: MetricDto,
    pub views: MetricDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TopContentItemDto {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub views: i64,
    pub likes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopContentDto {
    pub comics_by_views: Vec<TopContentItemDto>,
    pub comics_by_likes: Vec<TopContentItemDto>,
    pub posts_by_views: Vec<TopContentItemDto>,
    pub posts_by_likes: Vec<TopContentItemDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenreShareDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub comic_count: i64,
    /// Share of all genre-assigned comics, one decimal place.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPointDto {
    pub date: NaiveDate,
    pub comics: i64,
    pub blog_posts: i64,
    pub subscribers: i64,
    pub users: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActivityDto {
    pub days: i64,
    pub points: Vec<ActivityPointDto>,
}

/// Number of counters corrected per collection by a recount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecountReportDto {
    pub genres: u64,
    pub tags: u64,
    pub categories: u64,
}
