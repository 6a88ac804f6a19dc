//! User administration.

use entity::user::UserRole;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::user::{PaginatedUsers, User},
    util::pagination::PageRequest,
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// # Returns
    /// - `Ok(User)` - User found
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn get(&self, id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Lists users ordered by username, optionally filtered by a username/email substring.
    pub async fn get_paginated(
        &self,
        search: Option<String>,
        page: PageRequest,
    ) -> Result<PaginatedUsers, AppError> {
        let search = search.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        let (users, total) = UserRepository::new(self.db)
            .get_all_paginated(search.as_deref(), page)
            .await?;

        Ok(PaginatedUsers {
            users,
            total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages(total),
        })
    }

    pub async fn set_role(&self, id: i32, role: UserRole) -> Result<User, AppError> {
        let user = UserRepository::new(self.db)
            .set_role(id, role)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!("User {} role set to {:?}", user.id, user.role);
        Ok(user)
    }

    /// Deletes another user's account.
    ///
    /// # Arguments
    /// - `actor_id` - Admin performing the deletion
    /// - `id` - Account to delete
    ///
    /// # Returns
    /// - `Ok(())` - Account deleted
    /// - `Err(AppError::BadRequest)` - Admin tried to delete their own account
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn delete(&self, actor_id: i32, id: i32) -> Result<(), AppError> {
        if actor_id == id {
            return Err(AppError::BadRequest(
                "you cannot delete your own account".to_string(),
            ));
        }

        if !UserRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(())
    }
}
