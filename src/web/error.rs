use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::coordination::CoordinationError;
use crate::oauth2::OAuth2Error;
use crate::session::SessionError;
use crate::userdb::UserError;
use crate::utils::UtilError;

use super::envelope::{ErrorCode, api_error};

/// Route-level error. Everything that reaches the client goes through the
/// envelope; unexpected failures collapse into a generic 500.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn code(&self) -> ErrorCode {
        match self {
            AppError::Unauthorized => ErrorCode::Unauthorized,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let message = match &self {
            // Internal detail is logged, never sent to the client
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (code.status(), api_error(code, message)).into_response()
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<CoordinationError> for AppError {
    fn from(e: CoordinationError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<OAuth2Error> for AppError {
    fn from(e: OAuth2Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<UserError> for AppError {
    fn from(e: UserError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<UtilError> for AppError {
    fn from(e: UtilError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_unauthorized_maps_to_401() {
        let response = AppError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_maps_to_500() {
        let response = AppError::Internal("database exploded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
