mod cookie;
mod errors;
mod manager;
mod storage;
mod types;

pub use cookie::{clear_session_cookie, set_session_cookie};
pub use errors::SessionError;
pub use manager::{create_session, delete_session, resolve_session};
pub use storage::SessionStore;
pub use types::Session;

/// Name of the browser cookie carrying the opaque session token.
pub const SESSION_COOKIE_NAME: &str = "session_token";

/// Sessions (and their cookies) live for 30 days.
pub const SESSION_EXPIRES_DAYS: i64 = 30;
