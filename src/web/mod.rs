//! HTTP surface: router, handlers, middleware, and the API envelope.

mod auth;
mod envelope;
mod error;
mod extractor;
mod middleware;
mod pages;
mod router;

pub use envelope::{ApiFailure, ApiSuccess, ErrorCode, api_error, api_success};
pub use error::AppError;
pub use extractor::AuthSession;
pub use router::app_router;
