//! Server-rendered web application starter: Google OAuth login, database
//! backed sessions, and a small page/API surface to build on.

pub mod config;
pub mod coordination;
pub mod oauth2;
pub mod session;
pub mod state;
pub mod storage;
pub mod userdb;
pub mod web;

pub(crate) mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::AppConfig;
pub use state::AppState;
pub use web::app_router;

use storage::DataStore;

/// Create all database tables. Idempotent; called once at startup after the
/// store is connected.
pub async fn init_stores(
    store: &dyn DataStore,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    userdb::UserStore::create_tables(store).await?;
    session::SessionStore::create_tables(store).await?;
    oauth2::AccountStore::create_tables(store).await?;
    Ok(())
}
