use std::sync::Arc;

use crate::config::AppConfig;
use crate::oauth2::OAuthClient;
use crate::storage::{DataStore, FileStore};

/// Shared application state handed to every route handler.
///
/// Everything here is constructed once at startup and immutable afterwards;
/// per-request state lives in the database.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DataStore>,
    pub oauth: Arc<dyn OAuthClient>,
    pub files: Arc<FileStore>,
}
