use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A local user identity.
///
/// Created on first successful federated login and reused on every
/// subsequent login that resolves to the same email or provider account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct User {
    /// Opaque unique identifier
    pub id: String,
    /// Email address, unique across all users
    pub email: String,
    /// Optional display name
    pub name: Option<String>,
    /// Optional avatar URL
    pub picture: Option<String>,
    /// Whether the email address has been verified
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, name: Option<String>, picture: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            name,
            picture,
            email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}
