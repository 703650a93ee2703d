//! User Entity
//!
//! The authenticated principal's account row. The password hash never
//! leaves this crate: API payloads carry [`UserSummary`] instead.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use serde::Serialize;

use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Login identifier (unique)
    pub email: Email,
    /// Argon2id hash, PHC string
    pub password_hash: HashedPassword,
    /// Display name
    pub name: String,
    /// Role, fixed at registration
    pub role: UserRole,
    /// Optional avatar URL
    pub avatar: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(
        email: Email,
        password_hash: HashedPassword,
        name: String,
        role: UserRole,
        avatar: Option<String>,
    ) -> Self {
        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            name,
            role,
            avatar,
            created_at: Utc::now(),
        }
    }
}

/// Password-free user projection
///
/// The only user shape that crosses the API boundary; there is no
/// password field to strip because the type never had one.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id,
            email: user.email.as_str().to_string(),
            name: user.name.clone(),
            role: user.role,
            avatar: user.avatar.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.user_id,
            email: user.email.into_db(),
            name: user.name,
            role: user.role,
            avatar: user.avatar,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    fn sample_user() -> User {
        let password = ClearTextPassword::new("correct horse battery".to_string()).unwrap();
        User::new(
            Email::new("a@x.edu").unwrap(),
            password.hash().unwrap(),
            "Admin".to_string(),
            UserRole::Admin,
            None,
        )
    }

    #[test]
    fn test_summary_has_no_password_field() {
        let summary = UserSummary::from(sample_user());
        let json = serde_json::to_value(&summary).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();

        assert!(!keys.iter().any(|k| k.to_lowercase().contains("password")));
        assert!(keys.contains(&"id"));
        assert!(keys.contains(&"email"));
        assert!(keys.contains(&"role"));
        assert!(keys.contains(&"createdAt"));
    }

    #[test]
    fn test_summary_role_serializes_as_code() {
        let summary = UserSummary::from(sample_user());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["role"], "admin");
    }
}
