use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::User,
    service::auth::token::TokenService,
};

pub enum Permission {
    Admin,
}

/// Resolves the caller from the `Authorization: Bearer` header.
///
/// The token only proves identity; the role is read from the database on every request so
/// that demotions and deletions take effect before the token expires.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenService,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService, headers: &'a HeaderMap) -> Self {
        Self {
            db,
            tokens,
            headers,
        }
    }

    /// Requires an authenticated user holding every listed permission.
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated and authorized user
    /// - `Err(AuthError::MissingToken)` - No bearer token
    /// - `Err(AuthError::InvalidToken)` - Token failed verification
    /// - `Err(AuthError::UserNotInDatabase)` - Token user no longer exists
    /// - `Err(AuthError::AccessDenied)` - User lacks a permission
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let Some(user) = self.optional().await? else {
            return Err(AuthError::MissingToken.into());
        };

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !user.is_admin() {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            "admin role required".to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(user)
    }

    /// Resolves the user when a bearer token is present.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Valid token for an existing user
    /// - `Ok(None)` - No `Authorization` header
    /// - `Err(AppError)` - A token was sent but is invalid or its user is gone
    pub async fn optional(&self) -> Result<Option<User>, AppError> {
        let Some(token) = self.bearer_token()? else {
            return Ok(None);
        };

        let claims = self.tokens.verify(token)?;

        let Some(user) = UserRepository::new(self.db).find_by_id(claims.sub).await? else {
            return Err(AuthError::UserNotInDatabase(claims.sub).into());
        };

        Ok(Some(user))
    }

    fn bearer_token(&self) -> Result<Option<&'a str>, AuthError> {
        let Some(value) = self.headers.get(AUTHORIZATION) else {
            return Ok(None);
        };

        let value = value
            .to_str()
            .map_err(|_| AuthError::InvalidToken("non-ASCII authorization header".to_string()))?;

        match value.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(Some(token.trim())),
            _ => Err(AuthError::InvalidToken(
                "expected a Bearer token".to_string(),
            )),
        }
    }
}
