pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::parser::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes/parse", post(handlers::handle_parse))
        .route("/api/v1/resumes/upload", post(handlers::handle_upload))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
