use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::state::AppState;

use super::auth::{api_logout, auth_callback, google_login, logout_action};
use super::middleware::{log_requests, security_headers};
use super::pages::{
    health, index_data, index_page, login_data, login_page, logout_data, logout_page, me,
};

/// Build the full application router with middleware applied.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/login", get(login_page))
        .route("/logout", get(logout_page).post(logout_action))
        .route("/auth/google", get(google_login))
        .route("/auth/callback", get(auth_callback))
        .route("/api/pages/index/data", get(index_data))
        .route("/api/pages/login/data", get(login_data))
        .route("/api/pages/logout/data", get(logout_data))
        .route("/api/pages/logout/logout", post(api_logout))
        .route("/api/me", get(me))
        .route("/api/health", get(health))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}
