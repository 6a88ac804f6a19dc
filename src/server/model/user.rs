//! User domain models and parameters.
//!
//! Provides the account model used by authentication and user administration, plus the
//! validated parameter types built from registration, login and password-change requests.

use chrono::{DateTime, Utc};
use entity::user::UserRole;

use crate::{
    model::{
        auth::{AuthResponseDto, ChangePasswordDto, LoginDto, RegisterDto},
        user::{PaginatedUsersDto, RoleDto, UserDto},
    },
    server::{error::AppError, util::validate},
};

/// Registered account with credential and lockout state.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Bcrypt hash of the password. Never leaves the server.
    pub password_hash: String,
    pub role: UserRole,
    /// Consecutive failed logins since the last success or lock.
    pub failed_login_attempts: i32,
    /// Logins are refused until this instant.
    pub locked_until: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Whether the account is locked at `now`.
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.is_some_and(|until| until > now)
    }

    /// Converts the user domain model to a DTO for API responses.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            username: self.username,
            email: self.email,
            role: self.role.into(),
            last_login_at: self.last_login_at,
            created_at: self.created_at,
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            password_hash: entity.password_hash,
            role: entity.role,
            failed_login_attempts: entity.failed_login_attempts,
            locked_until: entity.locked_until,
            last_login_at: entity.last_login_at,
            created_at: entity.created_at,
        }
    }
}

impl From<UserRole> for RoleDto {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::User => RoleDto::User,
            UserRole::Admin => RoleDto::Admin,
        }
    }
}

impl From<RoleDto> for UserRole {
    fn from(role: RoleDto) -> Self {
        match role {
            RoleDto::User => UserRole::User,
            RoleDto::Admin => UserRole::Admin,
        }
    }
}

/// Parameters for inserting a new account. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// Validated registration request.
#[derive(Debug, Clone)]
pub struct RegisterParams {
    pub username: String,
    /// Lowercased email address.
    pub email: String,
    pub password: String,
    pub admin_code: Option<String>,
}

impl RegisterParams {
    /// Validates username, email and password of a registration request.
    ///
    /// # Returns
    /// - `Ok(RegisterParams)` - All fields valid
    /// - `Err(AppError::BadRequest)` - First failing field with a message naming it
    pub fn from_dto(dto: RegisterDto) -> Result<Self, AppError> {
        let username = validate::username(&dto.username)?;
        let email = validate::email(&dto.email)?;
        validate::password(&dto.password)?;

        Ok(Self {
            username,
            email,
            password: dto.password,
            admin_code: dto.admin_code.filter(|c| !c.trim().is_empty()),
        })
    }
}

/// Login request with the email normalized for lookup.
#[derive(Debug, Clone)]
pub struct LoginParams {
    pub email: String,
    pub password: String,
}

impl LoginParams {
    pub fn from_dto(dto: LoginDto) -> Self {
        Self {
            email: dto.email.trim().to_lowercase(),
            password: dto.password,
        }
    }
}

/// Signed token handed out after registration or login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

impl AuthSession {
    pub fn into_dto(self) -> AuthResponseDto {
        AuthResponseDto {
            token: self.token,
            user: self.user.into_dto(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChangePasswordParams {
    pub current_password: String,
    pub new_password: String,
}

impl ChangePasswordParams {
    pub fn from_dto(dto: ChangePasswordDto) -> Result<Self, AppError> {
        validate::password(&dto.new_password)?;

        Ok(Self {
            current_password: dto.current_password,
            new_password: dto.new_password,
        })
    }
}

/// Paginated collection of users with metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedUsers {
    pub users: Vec<User>,
    pub total: u64,
    /// Current page number (1-based).
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl PaginatedUsers {
    pub fn into_dto(self) -> PaginatedUsersDto {
        PaginatedUsersDto {
            users: self.users.into_iter().map(User::into_dto).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}
