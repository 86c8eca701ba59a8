mod postgres;
mod sqlite;

use chrono::{DateTime, Utc};

use crate::storage::DataStore;

use super::errors::SessionError;
use super::types::Session;

pub(crate) const DB_TABLE_SESSIONS: &str = "sessions";

fn unsupported() -> SessionError {
    SessionError::Storage("Unsupported database backend".to_string())
}

/// Store for [`Session`] rows.
pub struct SessionStore;

impl SessionStore {
    pub async fn create_tables(store: &dyn DataStore) -> Result<(), SessionError> {
        if let Some(pool) = store.as_sqlite() {
            sqlite::create_tables_sqlite(pool).await
        } else if let Some(pool) = store.as_postgres() {
            postgres::create_tables_postgres(pool).await
        } else {
            Err(unsupported())
        }
    }

    pub async fn insert(store: &dyn DataStore, session: &Session) -> Result<(), SessionError> {
        if let Some(pool) = store.as_sqlite() {
            sqlite::insert_sqlite(pool, session).await
        } else if let Some(pool) = store.as_postgres() {
            postgres::insert_postgres(pool, session).await
        } else {
            Err(unsupported())
        }
    }

    /// Fetch the session stored under `token`, provided it has not expired
    /// as of `now`. Expired rows are left in place and simply not returned.
    pub async fn get_active_by_token(
        store: &dyn DataStore,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, SessionError> {
        if let Some(pool) = store.as_sqlite() {
            sqlite::get_active_by_token_sqlite(pool, token, now).await
        } else if let Some(pool) = store.as_postgres() {
            postgres::get_active_by_token_postgres(pool, token, now).await
        } else {
            Err(unsupported())
        }
    }

    /// Delete the session stored under `token`; unknown tokens are a no-op.
    pub async fn delete_by_token(store: &dyn DataStore, token: &str) -> Result<(), SessionError> {
        if let Some(pool) = store.as_sqlite() {
            sqlite::delete_by_token_sqlite(pool, token).await
        } else if let Some(pool) = store.as_postgres() {
            postgres::delete_by_token_postgres(pool, token).await
        } else {
            Err(unsupported())
        }
    }
}
