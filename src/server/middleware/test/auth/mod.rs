use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use chrono::Utc;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::{AuthGuard, Permission},
    model::user::User,
    service::auth::token::TokenService,
};

mod optional;
mod require;

fn tokens() -> TokenService {
    TokenService::new("guard-secret", 1)
}

fn bearer(tokens: &TokenService, user: entity::user::Model) -> HeaderMap {
    let token = tokens.issue(&User::from_entity(user), Utc::now()).unwrap();
    header(&format!("Bearer {}", token))
}

fn header(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    headers
}
