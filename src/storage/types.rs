use std::str::FromStr;
use std::sync::Arc;

use sqlx::{Pool, Postgres, Sqlite};

use super::errors::StorageError;

#[derive(Clone, Debug)]
pub(crate) struct SqliteDataStore {
    pool: sqlx::SqlitePool,
}

#[derive(Clone, Debug)]
pub(crate) struct PostgresDataStore {
    pool: sqlx::PgPool,
}

/// Relational backend behind the stores. Exactly one of the accessors
/// returns a pool.
pub trait DataStore: Send + Sync {
    fn as_sqlite(&self) -> Option<&Pool<Sqlite>>;
    fn as_postgres(&self) -> Option<&Pool<Postgres>>;
}

impl DataStore for SqliteDataStore {
    fn as_sqlite(&self) -> Option<&Pool<Sqlite>> {
        Some(&self.pool)
    }

    fn as_postgres(&self) -> Option<&Pool<Postgres>> {
        None
    }
}

impl DataStore for PostgresDataStore {
    fn as_sqlite(&self) -> Option<&Pool<Sqlite>> {
        None
    }

    fn as_postgres(&self) -> Option<&Pool<Postgres>> {
        Some(&self.pool)
    }
}

/// Connect to the database named by `database_url`. The URL scheme selects
/// the backend: `sqlite:` or `postgres:`.
pub async fn connect(database_url: &str) -> Result<Arc<dyn DataStore>, StorageError> {
    if database_url.starts_with("sqlite") {
        let opts = sqlx::sqlite::SqliteConnectOptions::from_str(database_url)
            .map_err(|e| StorageError::Connection(e.to_string()))?
            .create_if_missing(true);

        // An in-memory SQLite database exists per connection; a single
        // connection keeps every query on the same database.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(opts)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        tracing::info!("Connected to SQLite database: {}", database_url);
        Ok(Arc::new(SqliteDataStore { pool }))
    } else if database_url.starts_with("postgres") {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        tracing::info!("Connected to Postgres database");
        Ok(Arc::new(PostgresDataStore { pool }))
    } else {
        Err(StorageError::UnsupportedScheme(database_url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_in_memory_sqlite() {
        let store = connect("sqlite::memory:").await.expect("connect should succeed");
        assert!(store.as_sqlite().is_some());
        assert!(store.as_postgres().is_none());
    }

    #[tokio::test]
    async fn test_connect_rejects_unknown_scheme() {
        let result = connect("mysql://localhost/app").await;
        assert!(matches!(result, Err(StorageError::UnsupportedScheme(_))));
    }
}
