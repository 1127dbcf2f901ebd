use std::sync::Arc;

use networth_backend::app;
use networth_backend::auth::AuthManager;
use networth_backend::config::AppConfig;
use networth_backend::logging::{init_logging, LoggingConfig};
use networth_backend::state::AppState;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())?;

    let config = AppConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.database_url)
        .await?;
    tracing::info!("Database connected");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let state = AppState {
        pool,
        auth: Arc::new(AuthManager::new(&config.jwt_secret)),
    };
    let app = app::create_app(state, app::cors_layer(config.cors_allow_origin.as_deref()));

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Net worth backend running at http://{}/", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
