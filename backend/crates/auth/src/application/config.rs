//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Session time-to-live: 30 days, fixed (not sliding)
pub const SESSION_TTL: Duration = Duration::from_secs(30 * 24 * 3600);

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing
    pub session_secret: Vec<u8>,
    /// Session TTL
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session".to_string(),
            session_secret: Vec::new(),
            session_ttl: SESSION_TTL,
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
        }
    }
}

impl AuthConfig {
    /// Create config with an explicit secret (production)
    pub fn with_secret(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            session_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create config with a random session secret
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            session_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie, random secret)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Get session TTL in seconds (cookie Max-Age)
    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl.as_secs() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl_is_30_days() {
        let config = AuthConfig::default();
        assert_eq!(config.session_ttl_secs(), 30 * 24 * 3600);
    }

    #[test]
    fn test_development_is_insecure_with_secret() {
        let config = AuthConfig::development();
        assert!(!config.cookie_secure);
        assert_eq!(config.session_secret.len(), 32);
    }
}
