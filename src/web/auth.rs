//! OAuth login, callback, and logout handlers.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::TypedHeader;
use axum_extra::headers;
use http::HeaderMap;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::coordination::get_or_create_user;
use crate::session::{
    SESSION_COOKIE_NAME, clear_session_cookie, create_session, delete_session, set_session_cookie,
};
use crate::state::AppState;

use super::envelope::{ApiSuccess, api_success};
use super::error::AppError;

const LOGIN_ERROR_REDIRECT: &str = "/login?error=no_user_info";

/// Start the authorization-code flow by redirecting to the provider.
pub async fn google_login(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let url = state.oauth.begin_authorization(&state.config.callback_url())?;
    Ok(Redirect::to(&url))
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
}

/// Provider redirect target: exchange the code, link the identity, and set
/// the session cookie.
///
/// A callback without a code, or one the provider will not vouch for with
/// user info, bounces back to the login page instead of erroring.
pub async fn auth_callback(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, AppError> {
    let Some(code) = query.code else {
        tracing::warn!("OAuth callback without an authorization code");
        return Ok(Redirect::to(LOGIN_ERROR_REDIRECT).into_response());
    };

    let Some(login) = state
        .oauth
        .complete_authorization(&code, &state.config.callback_url())
        .await?
    else {
        tracing::warn!("Provider returned no user info for OAuth callback");
        return Ok(Redirect::to(LOGIN_ERROR_REDIRECT).into_response());
    };

    let user = get_or_create_user(state.store.as_ref(), state.oauth.provider(), &login).await?;

    let user_agent = headers
        .get(http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let session = create_session(
        state.store.as_ref(),
        &user.id,
        Some(addr.ip().to_string()),
        user_agent,
    )
    .await?;

    let mut response_headers = HeaderMap::new();
    set_session_cookie(&mut response_headers, &session.token, !state.config.debug)?;
    tracing::info!("User {} logged in via {}", user.email, state.oauth.provider());

    Ok((response_headers, Redirect::to("/")).into_response())
}

/// Terminate the session named by the cookie and clear it. `Redirect::to`
/// responds with 303, so the browser re-fetches `/` with GET.
pub async fn logout_action(
    State(state): State<AppState>,
    cookies: Option<TypedHeader<headers::Cookie>>,
) -> Result<Response, AppError> {
    if let Some(token) = cookies
        .as_ref()
        .and_then(|TypedHeader(c)| c.get(SESSION_COOKIE_NAME))
    {
        delete_session(state.store.as_ref(), token).await?;
    }

    let mut response_headers = HeaderMap::new();
    clear_session_cookie(&mut response_headers, !state.config.debug)?;

    Ok((response_headers, Redirect::to("/")).into_response())
}

/// JSON logout used by the logout page's client-side form.
pub async fn api_logout(
    State(state): State<AppState>,
    cookies: Option<TypedHeader<headers::Cookie>>,
) -> Result<(HeaderMap, axum::Json<ApiSuccess<Value>>), AppError> {
    if let Some(token) = cookies
        .as_ref()
        .and_then(|TypedHeader(c)| c.get(SESSION_COOKIE_NAME))
    {
        delete_session(state.store.as_ref(), token).await?;
    }

    let mut response_headers = HeaderMap::new();
    clear_session_cookie(&mut response_headers, !state.config.debug)?;

    Ok((response_headers, api_success(json!({"redirect_url": "/"}))))
}
