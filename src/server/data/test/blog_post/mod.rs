use crate::server::{
    data::blog_post::{BlogPostChanges, BlogPostRepository, NewBlogPost},
    model::blog::BlogPostFilter,
    util::pagination::PageRequest,
};
use chrono::{Duration, Utc};
use entity::blog_post::PostStatus;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_paginated;
mod publish_due;
mod update;

fn new_post(title: &str, slug: &str) -> NewBlogPost {
    NewBlogPost {
        title: title.to_string(),
        slug: slug.to_string(),
        excerpt: "Short".to_string(),
        content: "Body text".to_string(),
        author_id: None,
        category_id: None,
        cover_image_url: None,
        status: PostStatus::Draft,
        publish_at: None,
    }
}
