use sqlx::{Pool, Postgres};

use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::Account;
use crate::userdb::DB_TABLE_USERS;

use super::DB_TABLE_ACCOUNTS;

pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), OAuth2Error> {
    let users_table = DB_TABLE_USERS;

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {DB_TABLE_ACCOUNTS} (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL REFERENCES {users_table}(id) ON DELETE CASCADE,
            provider TEXT NOT NULL,
            provider_account_id TEXT NOT NULL,
            access_token TEXT,
            refresh_token TEXT,
            access_token_expires_at TIMESTAMPTZ,
            scope TEXT,
            id_token TEXT,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL,
            UNIQUE(provider, provider_account_id)
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| OAuth2Error::Storage(e.to_string()))?;

    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS idx_{DB_TABLE_ACCOUNTS}_user_id ON {DB_TABLE_ACCOUNTS}(user_id)"
    ))
    .execute(pool)
    .await
    .map_err(|e| OAuth2Error::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn get_by_provider_postgres(
    pool: &Pool<Postgres>,
    provider: &str,
    provider_account_id: &str,
) -> Result<Option<Account>, OAuth2Error> {
    sqlx::query_as::<_, Account>(&format!(
        "SELECT * FROM {DB_TABLE_ACCOUNTS} WHERE provider = $1 AND provider_account_id = $2"
    ))
    .bind(provider)
    .bind(provider_account_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| OAuth2Error::Storage(e.to_string()))
}

pub(super) async fn get_for_user_postgres(
    pool: &Pool<Postgres>,
    user_id: &str,
) -> Result<Vec<Account>, OAuth2Error> {
    sqlx::query_as::<_, Account>(&format!(
        "SELECT * FROM {DB_TABLE_ACCOUNTS} WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(|e| OAuth2Error::Storage(e.to_string()))
}

pub(super) async fn upsert_postgres(
    pool: &Pool<Postgres>,
    account: Account,
) -> Result<Account, OAuth2Error> {
    sqlx::query(&format!(
        r#"
        INSERT INTO {DB_TABLE_ACCOUNTS}
            (id, user_id, provider, provider_account_id, access_token, refresh_token,
             access_token_expires_at, scope, id_token, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        ON CONFLICT (provider, provider_account_id) DO UPDATE SET
            user_id = EXCLUDED.user_id,
            access_token = EXCLUDED.access_token,
            refresh_token = EXCLUDED.refresh_token,
            access_token_expires_at = EXCLUDED.access_token_expires_at,
            scope = EXCLUDED.scope,
            id_token = EXCLUDED.id_token,
            updated_at = EXCLUDED.updated_at
        "#
    ))
    .bind(&account.id)
    .bind(&account.user_id)
    .bind(&account.provider)
    .bind(&account.provider_account_id)
    .bind(&account.access_token)
    .bind(&account.refresh_token)
    .bind(account.access_token_expires_at)
    .bind(&account.scope)
    .bind(&account.id_token)
    .bind(account.created_at)
    .bind(account.updated_at)
    .execute(pool)
    .await
    .map_err(|e| OAuth2Error::Storage(e.to_string()))?;

    Ok(account)
}

pub(super) async fn delete_for_user_postgres(
    pool: &Pool<Postgres>,
    user_id: &str,
) -> Result<(), OAuth2Error> {
    sqlx::query(&format!("DELETE FROM {DB_TABLE_ACCOUNTS} WHERE user_id = $1"))
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(|e| OAuth2Error::Storage(e.to_string()))?;

    Ok(())
}
