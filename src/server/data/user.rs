//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing account records. It covers
//! registration, credential lookups, login bookkeeping (failed attempts, lockout, last
//! login) and the admin user-management queries, converting entity models to domain models
//! at the infrastructure boundary.

use chrono::{DateTime, Utc};
use entity::user::UserRole;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::counter,
    model::user::{CreateUserParams, User},
    util::pagination::PageRequest,
};

/// Repository providing database operations for user accounts.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or an open transaction
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new account.
    ///
    /// # Arguments
    /// - `params` - Username, lowercased email, bcrypt hash and role
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including unique violations on username or email
    pub async fn create(&self, params: CreateUserParams) -> Result<User, DbErr> {
        let now = Utc::now();
        let entity = entity::user::ActiveModel {
            username: ActiveValue::Set(params.username),
            email: ActiveValue::Set(params.email),
            password_hash: ActiveValue::Set(params.password_hash),
            role: ActiveValue::Set(params.role),
            failed_login_attempts: ActiveValue::Set(0),
            locked_until: ActiveValue::Set(None),
            last_login_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    /// Finds a user by id.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user by email. The caller passes the lowercased address.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Username.eq(username))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks if any admin users exist in the database.
    ///
    /// Used at startup to decide whether a bootstrap admin code must be generated.
    ///
    /// # Returns
    /// - `Ok(true)` - At least one admin user exists
    /// - `Ok(false)` - No admin users exist (first-time setup scenario)
    /// - `Err(DbErr)` - Database error during count query
    pub async fn admin_exists(&self) -> Result<bool, DbErr> {
        let admin_count = entity::prelude::User::find()
            .filter(entity::user::Column::Role.eq(UserRole::Admin))
            .count(self.db)
            .await?;

        Ok(admin_count > 0)
    }

    /// Adds one to the consecutive failure count in a single `UPDATE`.
    ///
    /// # Returns
    /// - `Ok(Some(i32))` - Failure count after the increment
    /// - `Ok(None)` - No user with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn increment_failed_logins(&self, id: i32) -> Result<Option<i32>, DbErr> {
        use entity::user::Column;

        counter::increment::<entity::prelude::User, C>(
            self.db,
            Column::FailedLoginAttempts,
            Column::Id,
            &[id],
        )
        .await?;

        Ok(self.find_by_id(id).await?.map(|user| user.failed_login_attempts))
    }

    /// Locks the account until `until` and starts a fresh failure count.
    pub async fn lock(&self, id: i32, until: DateTime<Utc>) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .set(entity::user::ActiveModel {
                failed_login_attempts: ActiveValue::Set(0),
                locked_until: ActiveValue::Set(Some(until)),
                ..Default::default()
            })
            .filter(entity::user::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Resets lockout state and stamps `last_login_at` after a successful login.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated user
    /// - `Ok(None)` - User vanished between lookup and update
    /// - `Err(DbErr)` - Database error during update
    pub async fn record_successful_login(
        &self,
        id: i32,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, DbErr> {
        entity::prelude::User::update_many()
            .set(entity::user::ActiveModel {
                failed_login_attempts: ActiveValue::Set(0),
                locked_until: ActiveValue::Set(None),
                last_login_at: ActiveValue::Set(Some(now)),
                ..Default::default()
            })
            .filter(entity::user::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        self.find_by_id(id).await
    }

    pub async fn update_password_hash(&self, id: i32, password_hash: String) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .set(entity::user::ActiveModel {
                password_hash: ActiveValue::Set(password_hash),
                updated_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            })
            .filter(entity::user::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Changes a user's role.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated user
    /// - `Ok(None)` - No user with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_role(&self, id: i32, role: UserRole) -> Result<Option<User>, DbErr> {
        let Some(user) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::user::ActiveModel = user.into();
        active_model.role = ActiveValue::Set(role);
        active_model.updated_at = ActiveValue::Set(Utc::now());
        let entity = active_model.update(self.db).await?;

        Ok(Some(User::from_entity(entity)))
    }

    /// Gets users with pagination, ordered by username.
    ///
    /// # Arguments
    /// - `search` - Optional substring matched against username and email
    /// - `page` - Page request (1-based)
    ///
    /// # Returns
    /// - `Ok((users, total))` - Users for the requested page and the total match count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_all_paginated(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<(Vec<User>, u64), DbErr> {
        let mut query = entity::prelude::User::find();
        if let Some(search) = search {
            query = query.filter(
                Condition::any()
                    .add(entity::user::Column::Username.contains(search))
                    .add(entity::user::Column::Email.contains(search)),
            );
        }

        let paginator = query
            .order_by_asc(entity::user::Column::Username)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.index()).await?;
        let users = entities.into_iter().map(User::from_entity).collect();

        Ok((users, total))
    }

    /// Deletes a user. Authored blog posts keep existing with no author.
    ///
    /// # Returns
    /// - `Ok(true)` - User deleted
    /// - `Ok(false)` - No user with that id
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        entity::prelude::BlogPost::update_many()
            .set(entity::blog_post::ActiveModel {
                author_id: ActiveValue::Set(None),
                ..Default::default()
            })
            .filter(entity::blog_post::Column::AuthorId.eq(id))
            .exec(self.db)
            .await?;

        let result = entity::prelude::User::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }
}
