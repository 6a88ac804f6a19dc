//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into every handler through Axum's
//! state extraction. Every field is cheap to clone: the database connection is a pool
//! handle, the token service only holds two small HMAC keys and the admin code service
//! shares its code through an `Arc`.

use sea_orm::DatabaseConnection;

use super::service::{admin::code::AdminCodeService, auth::token::TokenService};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Signs and verifies bearer tokens.
    pub tokens: TokenService,

    /// One-time bootstrap code that grants the admin role on registration.
    ///
    /// Only set while no admin account exists.
    pub admin_codes: AdminCodeService,

    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        tokens: TokenService,
        admin_codes: AdminCodeService,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            db,
            tokens,
            admin_codes,
            bcrypt_cost,
        }
    }
}
