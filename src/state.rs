use std::sync::Arc;
use sqlx::PgPool;
use crate::auth::AuthManager;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth: Arc<AuthManager>,
}
