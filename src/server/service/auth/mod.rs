//! Account registration, login and password management.
//!
//! Passwords are hashed with bcrypt and sessions are stateless HS256 bearer tokens. Failed
//! logins are counted per account: the fifth consecutive failure locks the account for
//! fifteen minutes, during which even the correct password is rejected.

pub mod password;
pub mod token;

use chrono::{DateTime, Duration, Utc};
use entity::user::UserRole;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{
        AuthSession, ChangePasswordParams, CreateUserParams, LoginParams, RegisterParams,
    },
    service::admin::code::AdminCodeService,
};

use self::token::TokenService;

/// Consecutive failures that trigger a lock.
pub const MAX_FAILED_LOGINS: i32 = 5;

/// How long a locked account stays locked.
pub const LOCKOUT_MINUTES: i64 = 15;

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenService,
    bcrypt_cost: u32,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService, bcrypt_cost: u32) -> Self {
        Self {
            db,
            tokens,
            bcrypt_cost,
        }
    }

    /// Creates an account and signs a token for it.
    ///
    /// A supplied admin code that matches the current bootstrap code grants the admin role;
    /// a wrong or expired code is ignored and the account is a regular user.
    ///
    /// # Returns
    /// - `Ok(AuthSession)` - Created user with a fresh token
    /// - `Err(AppError::BadRequest)` - Username or email already taken
    /// - `Err(AppError)` - Hashing, signing or database failure
    pub async fn register(
        &self,
        params: RegisterParams,
        admin_codes: &AdminCodeService,
    ) -> Result<AuthSession, AppError> {
        let repo = UserRepository::new(self.db);

        if repo.username_exists(&params.username).await? {
            return Err(AppError::BadRequest("username already taken".to_string()));
        }
        if repo.email_exists(&params.email).await? {
            return Err(AppError::BadRequest("email already registered".to_string()));
        }

        let role = match params.admin_code.as_deref() {
            Some(code) if admin_codes.validate_and_consume(code).await => UserRole::Admin,
            _ => UserRole::User,
        };

        let password_hash = password::hash(&params.password, self.bcrypt_cost)?;
        let user = repo
            .create(CreateUserParams {
                username: params.username,
                email: params.email,
                password_hash,
                role,
            })
            .await?;

        if user.is_admin() {
            tracing::info!("User {} registered with the bootstrap admin code", user.id);
        }

        let token = self.tokens.issue(&user, Utc::now())?;
        Ok(AuthSession { token, user })
    }

    /// Verifies credentials and applies the lockout policy.
    ///
    /// # Arguments
    /// - `params` - Normalized email and password
    /// - `now` - Current time, used for the lock check and `last_login_at`
    ///
    /// # Returns
    /// - `Ok(AuthSession)` - Credentials accepted
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    /// - `Err(AuthError::AccountLocked)` - Account locked until a future time
    pub async fn login(
        &self,
        params: LoginParams,
        now: DateTime<Utc>,
    ) -> Result<AuthSession, AppError> {
        let repo = UserRepository::new(self.db);

        let Some(user) = repo.find_by_email(&params.email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if user.is_locked(now) {
            tracing::warn!("Login attempt on locked account {}", user.id);
            return Err(AuthError::AccountLocked(user.id).into());
        }

        if !password::verify(&params.password, &user.password_hash) {
            self.record_failure(user.id, now).await?;
            return Err(AuthError::InvalidCredentials.into());
        }

        let Some(user) = repo.record_successful_login(user.id, now).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        let token = self.tokens.issue(&user, now)?;
        Ok(AuthSession { token, user })
    }

    /// Counts a failed login and locks the account once the threshold is reached.
    ///
    /// The increment is a single `col = col + 1` statement, so concurrent failures are
    /// all counted. The lock is applied in the same transaction as the increment.
    async fn record_failure(&self, user_id: i32, now: DateTime<Utc>) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        let repo = UserRepository::new(&txn);

        let Some(attempts) = repo.increment_failed_logins(user_id).await? else {
            return Ok(());
        };

        if attempts >= MAX_FAILED_LOGINS {
            let until = now + Duration::minutes(LOCKOUT_MINUTES);
            repo.lock(user_id, until).await?;
            tracing::warn!("Account {} locked until {}", user_id, until);
        } else {
            tracing::warn!("Failed login {} for account {}", attempts, user_id);
        }

        txn.commit().await?;
        Ok(())
    }

    /// Replaces the password after checking the current one.
    ///
    /// # Returns
    /// - `Ok(())` - Password changed
    /// - `Err(AuthError::UserNotInDatabase)` - User vanished
    /// - `Err(AuthError::InvalidCredentials)` - Current password wrong
    pub async fn change_password(
        &self,
        user_id: i32,
        params: ChangePasswordParams,
    ) -> Result<(), AppError> {
        let repo = UserRepository::new(self.db);

        let Some(user) = repo.find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        if !password::verify(&params.current_password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        let password_hash = password::hash(&params.new_password, self.bcrypt_cost)?;
        repo.update_password_hash(user.id, password_hash).await?;

        Ok(())
    }
}
