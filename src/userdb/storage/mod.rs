mod postgres;
mod sqlite;

use crate::storage::DataStore;
use crate::userdb::{errors::UserError, types::User};

pub(crate) const DB_TABLE_USERS: &str = "users";

fn unsupported() -> UserError {
    UserError::Storage("Unsupported database backend".to_string())
}

/// Store for [`User`] rows. Every operation dispatches on the backend held
/// by the injected [`DataStore`].
pub struct UserStore;

impl UserStore {
    /// Create the users table if it does not exist.
    pub async fn create_tables(store: &dyn DataStore) -> Result<(), UserError> {
        if let Some(pool) = store.as_sqlite() {
            sqlite::create_tables_sqlite(pool).await
        } else if let Some(pool) = store.as_postgres() {
            postgres::create_tables_postgres(pool).await
        } else {
            Err(unsupported())
        }
    }

    pub async fn get_user(store: &dyn DataStore, id: &str) -> Result<Option<User>, UserError> {
        if let Some(pool) = store.as_sqlite() {
            sqlite::get_user_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            postgres::get_user_postgres(pool, id).await
        } else {
            Err(unsupported())
        }
    }

    pub async fn get_user_by_email(
        store: &dyn DataStore,
        email: &str,
    ) -> Result<Option<User>, UserError> {
        if let Some(pool) = store.as_sqlite() {
            sqlite::get_user_by_email_sqlite(pool, email).await
        } else if let Some(pool) = store.as_postgres() {
            postgres::get_user_by_email_postgres(pool, email).await
        } else {
            Err(unsupported())
        }
    }

    /// Insert the user, or update every mutable field when the id already
    /// exists. Email uniqueness is enforced by the table constraint.
    pub async fn upsert_user(store: &dyn DataStore, user: User) -> Result<User, UserError> {
        if let Some(pool) = store.as_sqlite() {
            sqlite::upsert_user_sqlite(pool, user).await
        } else if let Some(pool) = store.as_postgres() {
            postgres::upsert_user_postgres(pool, user).await
        } else {
            Err(unsupported())
        }
    }

    /// Update the display name of an existing user. Returns the updated row,
    /// or `None` when no user has that id.
    pub async fn update_profile(
        store: &dyn DataStore,
        id: &str,
        name: &str,
    ) -> Result<Option<User>, UserError> {
        let Some(mut user) = Self::get_user(store, id).await? else {
            return Ok(None);
        };
        user.name = Some(name.to_string());
        user.updated_at = chrono::Utc::now();
        let user = Self::upsert_user(store, user).await?;
        Ok(Some(user))
    }

    pub async fn delete_user(store: &dyn DataStore, id: &str) -> Result<(), UserError> {
        if let Some(pool) = store.as_sqlite() {
            sqlite::delete_user_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            postgres::delete_user_postgres(pool, id).await
        } else {
            Err(unsupported())
        }
    }
}
