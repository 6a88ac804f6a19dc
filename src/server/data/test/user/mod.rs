use crate::server::{
    data::user::UserRepository,
    model::user::CreateUserParams,
    util::pagination::PageRequest,
};
use entity::user::UserRole;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod admin_exists;
mod create;
mod delete;
mod find_by_email;
mod get_all_paginated;
mod login_bookkeeping;
mod set_role;

fn params(username: &str, email: &str) -> CreateUserParams {
    CreateUserParams {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "hash".to_string(),
        role: UserRole::User,
    }
}
