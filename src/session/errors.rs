use thiserror::Error;

use crate::userdb::UserError;
use crate::utils::UtilError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("User error: {0}")]
    User(#[from] UserError),

    #[error("Utils error: {0}")]
    Util(#[from] UtilError),
}
