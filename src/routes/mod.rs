pub mod auth;
pub mod health;
pub mod ui;
pub mod users;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

use crate::app::AppState;
use crate::error::ApiError;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Public routes
        .route("/health", get(health::health_check))
        .route("/auth/token", post(auth::issue_token))
        .route("/auth/verify", post(auth::verify_token))
        .route("/ui/status-colors", get(ui::status_colors))
        .route("/ui/status-colors/:status", get(ui::status_color_for))
        // Protected routes
        .route("/auth/session", get(auth::get_session))
        .route("/auth/logout", post(auth::logout))
        .route("/users", get(users::list_users))
        .fallback(not_found)
}

async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
