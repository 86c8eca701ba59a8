//! Uniform JSON envelope for API responses.
//!
//! Success responses carry `{"success": true, "data": ...}`; failures carry
//! `{"success": false, "error": {code, message, ...}}`. HTML page routes do
//! not use the envelope.

use std::collections::BTreeMap;

use axum::Json;
use http::StatusCode;
use serde::Serialize;

/// Closed set of machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    NotFound,
    Unauthorized,
    Forbidden,
    InternalError,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiSuccess<T> {
    success: bool,
    data: T,
}

/// Wrap a payload in the success envelope.
pub fn api_success<T: Serialize>(data: T) -> Json<ApiSuccess<T>> {
    Json(ApiSuccess {
        success: true,
        data,
    })
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ApiFailure {
    success: bool,
    error: ErrorBody,
}

/// Wrap an error in the failure envelope.
pub fn api_error(code: ErrorCode, message: impl Into<String>) -> Json<ApiFailure> {
    Json(ApiFailure {
        success: false,
        error: ErrorBody {
            code,
            message: message.into(),
            field_errors: None,
            form_errors: None,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_success_envelope_shape() {
        let Json(body) = api_success(json!({"title": "Hello"}));
        let value = serde_json::to_value(&body).expect("envelope should serialize");

        assert_eq!(value["success"], Value::Bool(true));
        assert_eq!(value["data"]["title"], "Hello");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_error_envelope_shape() {
        let Json(body) = api_error(ErrorCode::Unauthorized, "Authentication required");
        let value = serde_json::to_value(&body).expect("envelope should serialize");

        assert_eq!(value["success"], Value::Bool(false));
        assert_eq!(value["error"]["code"], "UNAUTHORIZED");
        assert_eq!(value["error"]["message"], "Authentication required");
        // Optional detail maps are omitted when absent
        assert!(value["error"].get("field_errors").is_none());
        assert!(value["error"].get("form_errors").is_none());
    }

    #[test]
    fn test_error_codes_serialize_screaming_snake() {
        for (code, expected) in [
            (ErrorCode::ValidationError, "VALIDATION_ERROR"),
            (ErrorCode::NotFound, "NOT_FOUND"),
            (ErrorCode::Unauthorized, "UNAUTHORIZED"),
            (ErrorCode::Forbidden, "FORBIDDEN"),
            (ErrorCode::InternalError, "INTERNAL_ERROR"),
        ] {
            let value = serde_json::to_value(code).expect("code should serialize");
            assert_eq!(value, expected);
        }
    }

    #[test]
    fn test_error_codes_map_to_statuses() {
        assert_eq!(ErrorCode::ValidationError.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ErrorCode::InternalError.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
