use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row as stored. The hash never leaves this struct.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub full_name: String,
    pub organization: String,
}

/// Client-facing shape: the login response and the users list. Also decodes
/// directly from the password-less SELECT.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub role: String,
    pub full_name: String,
    pub organization: String,
}

impl From<User> for UserProfile {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            role: u.role,
            full_name: u.full_name,
            organization: u.organization,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_serializes_camel_case_without_password() {
        let profile: UserProfile = User {
            id: 7,
            username: "nok".into(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".into(),
            role: "admin".into(),
            full_name: "Nok T.".into(),
            organization: "RID".into(),
        }
        .into();

        let v = serde_json::to_value(&profile).unwrap();
        assert_eq!(v["fullName"], "Nok T.");
        assert!(v.get("password").is_none());
        assert!(v.get("passwordHash").is_none());
        assert!(v.get("password_hash").is_none());
    }
}
