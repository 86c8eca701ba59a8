use thiserror::Error;

#[derive(Debug, Error)]
pub enum OAuth2Error {
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Failed to fetch user info: {0}")]
    FetchUserInfo(String),

    #[error("Serde error: {0}")]
    Serde(String),

    #[error("Invalid authorization URL: {0}")]
    Url(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
