use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};

use crate::session::errors::SessionError;
use crate::session::types::Session;
use crate::userdb::DB_TABLE_USERS;

use super::DB_TABLE_SESSIONS;

pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), SessionError> {
    let users_table = DB_TABLE_USERS;

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {DB_TABLE_SESSIONS} (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL REFERENCES {users_table}(id) ON DELETE CASCADE,
            token TEXT NOT NULL UNIQUE,
            expires_at TIMESTAMP NOT NULL,
            created_at TIMESTAMP NOT NULL,
            updated_at TIMESTAMP NOT NULL,
            ip_address TEXT,
            user_agent TEXT
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| SessionError::Storage(e.to_string()))?;

    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS idx_{DB_TABLE_SESSIONS}_user_id ON {DB_TABLE_SESSIONS}(user_id)"
    ))
    .execute(pool)
    .await
    .map_err(|e| SessionError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn insert_sqlite(pool: &Pool<Sqlite>, session: &Session) -> Result<(), SessionError> {
    sqlx::query(&format!(
        r#"
        INSERT INTO {DB_TABLE_SESSIONS}
            (id, user_id, token, expires_at, created_at, updated_at, ip_address, user_agent)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#
    ))
    .bind(&session.id)
    .bind(&session.user_id)
    .bind(&session.token)
    .bind(session.expires_at)
    .bind(session.created_at)
    .bind(session.updated_at)
    .bind(&session.ip_address)
    .bind(&session.user_agent)
    .execute(pool)
    .await
    .map_err(|e| SessionError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn get_active_by_token_sqlite(
    pool: &Pool<Sqlite>,
    token: &str,
    now: DateTime<Utc>,
) -> Result<Option<Session>, SessionError> {
    sqlx::query_as::<_, Session>(&format!(
        "SELECT * FROM {DB_TABLE_SESSIONS} WHERE token = ? AND expires_at > ?"
    ))
    .bind(token)
    .bind(now)
    .fetch_optional(pool)
    .await
    .map_err(|e| SessionError::Storage(e.to_string()))
}

pub(super) async fn delete_by_token_sqlite(
    pool: &Pool<Sqlite>,
    token: &str,
) -> Result<(), SessionError> {
    sqlx::query(&format!("DELETE FROM {DB_TABLE_SESSIONS} WHERE token = ?"))
        .bind(token)
        .execute(pool)
        .await
        .map_err(|e| SessionError::Storage(e.to_string()))?;

    Ok(())
}
