//! Per-user payloads
//!
//! User profiles and derived statistics cached by user id.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric user identifier.
pub type UserId = i64;

/// Named counters, e.g. `"messages_sent" -> 42`.
pub type NamedStats = HashMap<String, i64>;

/// A user profile record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier
    pub id: UserId,
    /// Public handle, if the user has one
    #[serde(default)]
    pub username: Option<String>,
    /// Display name
    pub first_name: String,
    /// Language the user speaks natively
    #[serde(default)]
    pub native_language: Option<String>,
    /// Language the user is learning
    #[serde(default)]
    pub target_language: Option<String>,
    /// Locale the interface is rendered in
    pub interface_language: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a user with only the required fields set.
    pub fn new(
        id: UserId,
        first_name: impl Into<String>,
        interface_language: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            username: None,
            first_name: first_name.into(),
            native_language: None,
            target_language: None,
            interface_language: interface_language.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_new_defaults() {
        let user = User::new(42, "Alice", "en");
        assert_eq!(user.id, 42);
        assert!(user.username.is_none());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_user_serialize_roundtrip_timestamps() {
        let user = User::new(1, "Bob", "ru");
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"interface_language\":\"ru\""));

        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }
}
