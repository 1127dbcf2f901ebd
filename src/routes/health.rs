use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Router,
};
use tracing::{error, info};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .route("/ready", get(ready))
}

async fn health() -> &'static str {
    "OK"
}

/// Liveness plus a round trip to the database.
async fn ready(State(state): State<AppState>) -> (StatusCode, &'static str) {
    info!("GET /health/ready - Readiness check");
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (StatusCode::OK, "READY"),
        Err(e) => {
            error!("Database not reachable: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "DATABASE UNAVAILABLE")
        }
    }
}
