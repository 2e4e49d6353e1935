use chrono::{DateTime, Utc};
use serde::Serialize;

pub const STATUS_ENABLED: i32 = 1;
pub const STATUS_DISABLED: i32 = 0;

/// A registered account.
///
/// `password_hash` never leaves the process: it is skipped on serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: Option<String>,
    pub phone: String,
    pub nickname: String,
    pub avatar: String,
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_enabled(&self) -> bool {
        self.status == STATUS_ENABLED
    }
}

/// Row to insert; identity and timestamps are assigned on persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub phone: String,
    pub nickname: String,
    pub avatar: String,
    pub status: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_not_serialized() {
        let now = Utc::now();
        let user = User {
            id: 7,
            username: "alice".into(),
            password_hash: "$2b$12$secret".into(),
            email: Some("alice@example.com".into()),
            phone: String::new(),
            nickname: "Al".into(),
            avatar: String::new(),
            status: STATUS_ENABLED,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "alice");
        assert!(user.is_enabled());
    }
}
