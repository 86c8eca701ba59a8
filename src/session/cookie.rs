use http::HeaderMap;
use http::header::SET_COOKIE;

use crate::utils::UtilError;

use super::{SESSION_COOKIE_NAME, SESSION_EXPIRES_DAYS};

fn append_cookie(
    headers: &mut HeaderMap,
    value: &str,
    max_age: i64,
    secure: bool,
) -> Result<(), UtilError> {
    let mut cookie =
        format!("{SESSION_COOKIE_NAME}={value}; SameSite=Lax; HttpOnly; Path=/; Max-Age={max_age}");
    if secure {
        cookie.push_str("; Secure");
    }
    headers.append(
        SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| UtilError::Cookie("Failed to parse cookie".to_string()))?,
    );
    Ok(())
}

/// Append the session cookie to `headers`. The `Secure` attribute is set
/// unless the application runs in debug mode.
pub fn set_session_cookie(
    headers: &mut HeaderMap,
    token: &str,
    secure: bool,
) -> Result<(), UtilError> {
    append_cookie(headers, token, SESSION_EXPIRES_DAYS * 24 * 60 * 60, secure)
}

/// Append an immediately-expiring session cookie, clearing it in the browser.
pub fn clear_session_cookie(headers: &mut HeaderMap, secure: bool) -> Result<(), UtilError> {
    append_cookie(headers, "", 0, secure)
}
