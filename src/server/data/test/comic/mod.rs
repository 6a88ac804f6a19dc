use crate::server::{
    data::comic::ComicRepository,
    model::{
        comic::{ComicFilter, CreateComicParams, UpdateComicParams},
        sort::ContentSort,
    },
    util::pagination::PageRequest,
};
use chrono::{Duration, Utc};
use entity::comic::ComicStatus;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_paginated;
mod increment_views;
mod set_deleted_at;
mod update;

fn params(title: &str) -> CreateComicParams {
    CreateComicParams {
        title: title.to_string(),
        description: String::new(),
        author: "Writer".to_string(),
        cover_image_url: None,
        genre_id: None,
        tag_ids: Vec::new(),
        status: ComicStatus::Draft,
    }
}
