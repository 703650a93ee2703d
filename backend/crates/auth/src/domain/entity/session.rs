//! Auth Session Entity
//!
//! Represents an authenticated user session, stored server-side and
//! referenced by the HMAC-signed cookie token. Expiry is a fixed 30-day
//! window from creation (not sliding).

use chrono::{DateTime, Utc};
use std::net::IpAddr;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

/// Auth session entity
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Session ID (UUID v4), the cookie token payload
    pub session_id: Uuid,
    /// Reference to User
    pub user_id: UserId,
    /// User role at session creation
    pub user_role: UserRole,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Client IP (for logging/display)
    pub client_ip: Option<IpAddr>,
    /// User agent string (for logging/display)
    pub user_agent: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl AuthSession {
    /// Create a new auth session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(
        user_id: UserId,
        user_role: UserRole,
        ttl: Duration,
        client_ip: Option<IpAddr>,
        user_agent: Option<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            user_id,
            user_role,
            expires_at_ms: now.timestamp_millis() + ttl.as_millis() as i64,
            client_ip,
            user_agent,
            created_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Get remaining time until expiration
    pub fn remaining_ms(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        (self.expires_at_ms - now_ms).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expiry_window() {
        let session = AuthSession::new(
            UserId::new(),
            UserRole::Student,
            Duration::from_secs(30 * 24 * 3600),
            None,
            None,
        );

        assert!(!session.is_expired());
        assert!(session.remaining_ms() > 29 * 24 * 3600 * 1000);
    }

    #[test]
    fn test_zero_ttl_session_is_expired() {
        let session = AuthSession::new(
            UserId::new(),
            UserRole::Student,
            Duration::from_secs(0),
            None,
            None,
        );

        // expires_at_ms == created_at; any later instant is past it
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(session.is_expired());
        assert_eq!(session.remaining_ms(), 0);
    }
}
