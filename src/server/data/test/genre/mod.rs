use crate::server::{
    data::genre::GenreRepository,
    model::genre::{CreateGenreParams, UpdateGenreParams},
    util::pagination::PageRequest,
};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod get_all_paginated;
mod update;
