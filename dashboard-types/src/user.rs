use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::Champion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum UserStatus {
    Pending,
    Approved,
    Rejected,
}

/// Public view of an account. Never carries credentials or the private data bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub line_id: String,
    pub role: Role,
    pub status: UserStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserSettings {
    #[serde(default)]
    pub background_image: Option<String>,
}

/// Private per-account data. The admin's bag holds the alliance-wide champion roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserData {
    #[serde(default)]
    pub champions: Vec<Champion>,
    #[serde(default)]
    pub settings: UserSettings,
}

/// An account as persisted in the document, password hash included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StoredUser {
    pub id: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub line_id: String,
    pub role: Role,
    pub status: UserStatus,
    #[serde(default)]
    pub data: UserData,
}

impl StoredUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&StoredUser> for User {
    fn from(stored: &StoredUser) -> Self {
        User {
            id: stored.id.clone(),
            email: stored.email.clone(),
            full_name: stored.full_name.clone(),
            line_id: stored.line_id.clone(),
            role: stored.role,
            status: stored.status,
        }
    }
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> StoredUser {
        StoredUser {
            id: "USR_001".to_string(),
            email: "admin".to_string(),
            password: "$argon2id$secret".to_string(),
            full_name: "Admin User".to_string(),
            line_id: "admin".to_string(),
            role: Role::Admin,
            status: UserStatus::Approved,
            data: UserData::default(),
        }
    }

    #[test]
    fn test_public_view_drops_password_and_data() {
        let public = User::from(&stored());
        let json = serde_json::to_value(&public).unwrap();

        assert!(json.get("password").is_none());
        assert!(json.get("data").is_none());
        assert_eq!(json["fullName"], "Admin User");
        assert_eq!(json["role"], "admin");
        assert_eq!(json["status"], "approved");
    }

    #[test]
    fn test_stored_user_tolerates_missing_data_bag() {
        let json = r#"{
            "id": "USR_9",
            "email": "bob",
            "password": "pw",
            "fullName": "Bob",
            "lineId": "line1",
            "role": "user",
            "status": "pending"
        }"#;
        let user: StoredUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.status, UserStatus::Pending);
        assert!(user.data.champions.is_empty());
        assert!(user.data.settings.background_image.is_none());
    }
}
