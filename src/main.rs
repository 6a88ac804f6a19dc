mod model;
mod server;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::{expose_error_detail, AppError},
    router, scheduler,
    service::{admin::code::AdminCodeService, auth::token::TokenService},
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    expose_error_detail(!config.is_production());

    let db = startup::connect_to_database(&config).await?;

    let admin_codes = AdminCodeService::new();
    startup::check_for_admin(&db, &admin_codes).await?;

    let _scheduler = scheduler::start_scheduler(db.clone()).await?;

    let tokens = TokenService::new(&config.jwt_secret, config.jwt_expiry_hours);
    let state = AppState::new(db, tokens, admin_codes, config.bcrypt_cost);

    let app = router::router()
        .with_state(state)
        .layer(startup::cors_layer(&config)?)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_address.as_str()).await?;
    tracing::info!("Listening on {} ({})", config.bind_address, config.app_env);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
