use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{Alliance, StoredUser, WarMapData, WarSeason};

/// The whole persisted state: every user, the alliance roster, the war map
/// and the season history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Document {
    #[serde(default)]
    pub users: Vec<StoredUser>,
    #[serde(default)]
    pub alliance: Alliance,
    #[serde(default)]
    pub war_map: WarMapData,
    #[serde(default)]
    pub seasons: Vec<WarSeason>,
}

impl Document {
    /// A fresh document holding only the given admin account, an empty alliance,
    /// the generated war map and no seasons.
    pub fn seeded(admin: StoredUser) -> Self {
        Self {
            users: vec![admin],
            alliance: Alliance::default(),
            war_map: WarMapData::default(),
            seasons: Vec::new(),
        }
    }

    /// The first admin account. Owns the alliance-wide champion roster.
    pub fn admin(&self) -> Option<&StoredUser> {
        self.users.iter().find(|u| u.is_admin())
    }

    pub fn admin_mut(&mut self) -> Option<&mut StoredUser> {
        self.users.iter_mut().find(|u| u.is_admin())
    }

    pub fn user(&self, user_id: &str) -> Option<&StoredUser> {
        self.users.iter().find(|u| u.id == user_id)
    }

    pub fn user_mut(&mut self, user_id: &str) -> Option<&mut StoredUser> {
        self.users.iter_mut().find(|u| u.id == user_id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&StoredUser> {
        self.users.iter().find(|u| u.email == email)
    }
}
