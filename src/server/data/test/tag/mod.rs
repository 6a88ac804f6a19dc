use crate::server::{
    data::tag::TagRepository,
    model::tag::{CreateTagParams, UpdateTagParams},
};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod comic_count;
mod create;
mod delete;
mod get_with_min_count;
