use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::api::double_option;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ComicStatusDto {
    Draft,
    Published,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GenreSummaryDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TagSummaryDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComicDto {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub author: String,
    pub cover_image_url: Option<String>,
    pub genre: Option<GenreSummaryDto>,
    pub tags: Vec<TagSummaryDto>,
    pub status: ComicStatusDto,
    pub views: i64,
    pub likes: i64,
    pub published_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateComicDto {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub author: String,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub genre_id: Option<i32>,
    #[serde(default)]
    pub tag_ids: Vec<i32>,
    /// Defaults to `draft`.
    #[serde(default)]
    pub status: Option<ComicStatusDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComicDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub cover_image_url: Option<Option<String>>,
    /// `null` detaches the comic from its genre.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub genre_id: Option<Option<i32>>,
    /// Replaces the full tag set when present.
    #[serde(default)]
    pub tag_ids: Option<Vec<i32>>,
    #[serde(default)]
    pub status: Option<ComicStatusDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedComicsDto {
    pub comics: Vec<ComicDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComicPageDto {
    pub id: i32,
    pub comic_id: i32,
    pub page_number: i32,
    pub image_url: String,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateComicPageDto {
    /// Defaults to one past the current last page.
    #[serde(default)]
    pub page_number: Option<i32>,
    pub image_url: String,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComicPageDto {
    #[serde(default)]
    pub page_number: Option<i32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub caption: Option<Option<String>>,
}
