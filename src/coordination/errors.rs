use thiserror::Error;

use crate::oauth2::OAuth2Error;
use crate::userdb::UserError;

/// Errors crossing the user/account linking boundary.
#[derive(Debug, Error)]
pub enum CoordinationError {
    #[error("User error: {0}")]
    User(#[from] UserError),

    #[error("OAuth2 error: {0}")]
    OAuth2(#[from] OAuth2Error),
}
