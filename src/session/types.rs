use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::SESSION_EXPIRES_DAYS;

/// Server-side record of an authenticated browser session, keyed by an
/// opaque bearer token. Valid only while `expires_at` lies in the future.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    /// Opaque random bearer token, unique across all sessions
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Client IP recorded for audit
    pub ip_address: Option<String>,
    /// Client user agent recorded for audit
    pub user_agent: Option<String>,
}

impl Session {
    pub(super) fn new(
        user_id: &str,
        token: String,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            token,
            expires_at: now + Duration::days(SESSION_EXPIRES_DAYS),
            created_at: now,
            updated_at: now,
            ip_address,
            user_agent,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_expires_in_thirty_days() {
        let session = Session::new("user1", "tok".to_string(), None, None);

        let lifetime = session.expires_at - session.created_at;
        assert_eq!(lifetime, Duration::days(30));
        assert!(!session.is_expired(Utc::now()));
    }

    #[test]
    fn test_is_expired_at_the_boundary() {
        let session = Session::new("user1", "tok".to_string(), None, None);

        // Exactly at expiry counts as expired; validity requires now < expires_at
        assert!(session.is_expired(session.expires_at));
        assert!(session.is_expired(session.expires_at + Duration::seconds(1)));
        assert!(!session.is_expired(session.expires_at - Duration::seconds(1)));
    }
}
