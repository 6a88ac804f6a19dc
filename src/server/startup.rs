use axum::http::HeaderValue;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};

use crate::server::{
    config::Config,
    data::user::UserRepository,
    error::{config::ConfigError, AppError},
    service::admin::code::AdminCodeService,
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the CORS layer: the configured origin only, or any origin when unset.
///
/// # Returns
/// - `Ok(CorsLayer)` - Layer ready to wrap the router
/// - `Err(AppError::ConfigErr)` - `CORS_ORIGIN` is not a valid header value
pub fn cors_layer(config: &Config) -> Result<CorsLayer, AppError> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    let Some(origin) = config.cors_origin.as_deref() else {
        return Ok(layer.allow_origin(Any));
    };

    let origin = HeaderValue::from_str(origin).map_err(|e| ConfigError::InvalidEnvVar {
        name: "CORS_ORIGIN".to_string(),
        reason: e.to_string(),
    })?;

    Ok(layer.allow_origin(origin))
}

/// Generates and logs a one-time admin code when no admin account exists.
///
/// The first registration that presents the code gets the admin role. The code expires
/// after ten minutes; restarting the server issues a new one.
///
/// # Returns
/// - `Ok(Some(code))` - No admin existed, code generated
/// - `Ok(None)` - An admin already exists
/// - `Err(AppError)` - Database error
pub async fn check_for_admin(
    db: &DatabaseConnection,
    admin_codes: &AdminCodeService,
) -> Result<Option<String>, AppError> {
    if UserRepository::new(db).admin_exists().await? {
        return Ok(None);
    }

    let code = admin_codes.generate().await;

    tracing::info!(
        "No admin account exists. Register with adminCode \"{}\" within 10 minutes to become admin.",
        code
    );

    Ok(Some(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    /// Tests startup without any admin account.
    ///
    /// Expected: a code is generated and stays valid
    #[tokio::test]
    async fn generates_code_without_admin() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::User)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let admin_codes = AdminCodeService::new();

        factory::create_user(db).await?;

        let code = check_for_admin(db, &admin_codes).await?;

        assert!(code.is_some());
        assert!(admin_codes.has_valid_code().await);

        Ok(())
    }

    /// Tests startup when an admin already exists.
    ///
    /// Expected: Ok(None) and no code stored
    #[tokio::test]
    async fn skips_code_when_admin_exists() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::User)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let admin_codes = AdminCodeService::new();

        factory::user::create_admin(db).await?;

        assert!(check_for_admin(db, &admin_codes).await?.is_none());
        assert!(!admin_codes.has_valid_code().await);

        Ok(())
    }
}
