//! HTML page handlers and their JSON data counterparts.
//!
//! Each page route has a `/api/pages/<name>/data` sibling returning the same
//! view data inside the API envelope, so clients can re-render without a full
//! page load.

use askama::Template;
use axum::Json;
use axum::extract::{Query, State};
use axum::response::Html;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::state::AppState;
use crate::userdb::User;

use super::envelope::{ApiSuccess, api_success};
use super::error::AppError;
use super::extractor::AuthSession;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    app_name: &'a str,
    user: Option<&'a User>,
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate<'a> {
    app_name: &'a str,
    error: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "logout.html")]
struct LogoutTemplate<'a> {
    app_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct IndexData {
    pub app_name: String,
    pub authenticated: bool,
    pub user: Option<User>,
}

fn index_data_for(state: &AppState, auth: Option<AuthSession>) -> IndexData {
    IndexData {
        app_name: state.config.app_name.clone(),
        authenticated: auth.is_some(),
        user: auth.map(|a| a.user),
    }
}

pub async fn index_page(
    State(state): State<AppState>,
    auth: Option<AuthSession>,
) -> Result<Html<String>, AppError> {
    let template = IndexTemplate {
        app_name: &state.config.app_name,
        user: auth.as_ref().map(|a| &a.user),
    };
    Ok(Html(template.render()?))
}

pub async fn index_data(
    State(state): State<AppState>,
    auth: Option<AuthSession>,
) -> Json<ApiSuccess<IndexData>> {
    api_success(index_data_for(&state, auth))
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    error: Option<String>,
}

pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> Result<Html<String>, AppError> {
    let template = LoginTemplate {
        app_name: &state.config.app_name,
        error: query.error.as_deref(),
    };
    Ok(Html(template.render()?))
}

pub async fn login_data(State(state): State<AppState>) -> Json<ApiSuccess<Value>> {
    api_success(json!({
        "app_name": state.config.app_name,
        "providers": ["google"],
        "oauth_url": "/auth/google",
    }))
}

pub async fn logout_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let template = LogoutTemplate {
        app_name: &state.config.app_name,
    };
    Ok(Html(template.render()?))
}

pub async fn logout_data(State(state): State<AppState>) -> Json<ApiSuccess<Value>> {
    api_success(json!({
        "app_name": state.config.app_name,
        "logout_url": "/logout",
    }))
}

/// Current-user endpoint, only reachable with a valid session.
pub async fn me(auth: AuthSession) -> Json<ApiSuccess<User>> {
    api_success(auth.user)
}

pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}
