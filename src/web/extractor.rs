//! Session-based auth guard, exposed as axum extractors.
//!
//! `AuthSession` is the required form: handlers taking it only run for
//! authenticated requests, everything else receives a 401 envelope.
//! `Option<AuthSession>` is the optional form: resolution failures and
//! missing cookies yield `None` instead of rejecting.

use axum::RequestPartsExt;
use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum_extra::TypedHeader;
use axum_extra::headers;
use http::request::Parts;

use crate::session::{SESSION_COOKIE_NAME, Session, resolve_session};
use crate::state::AppState;
use crate::userdb::User;

use super::error::AppError;

/// The authenticated identity of the current request.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub session: Session,
}

async fn session_from_parts(
    parts: &mut Parts,
    state: &AppState,
) -> Result<Option<AuthSession>, AppError> {
    let Ok(cookies) = parts.extract::<TypedHeader<headers::Cookie>>().await else {
        return Ok(None);
    };
    let Some(token) = cookies.get(SESSION_COOKIE_NAME) else {
        return Ok(None);
    };

    let resolved = resolve_session(state.store.as_ref(), token).await?;
    Ok(resolved.map(|(user, session)| AuthSession { user, session }))
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        session_from_parts(parts, state)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}

impl OptionalFromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        session_from_parts(parts, state).await
    }
}
