use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Maximum number of members an alliance roster can hold.
pub const ALLIANCE_CAPACITY: usize = 30;

/// One of the three alliance sub-groups. Serialized as the bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Battleground {
    One,
    Two,
    Three,
}

impl Battleground {
    pub const ALL: [Battleground; 3] = [Battleground::One, Battleground::Two, Battleground::Three];
}

impl TryFrom<u8> for Battleground {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Battleground::One),
            2 => Ok(Battleground::Two),
            3 => Ok(Battleground::Three),
            other => Err(format!("unknown battleground {other}")),
        }
    }
}

impl From<Battleground> for u8 {
    fn from(bg: Battleground) -> Self {
        match bg {
            Battleground::One => 1,
            Battleground::Two => 2,
            Battleground::Three => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AllianceMember {
    pub id: String,
    pub name: String,
    pub line_id: String,
    #[serde(default)]
    #[ts(type = "1 | 2 | 3 | null")]
    pub battleground: Option<Battleground>, // None = unassigned
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Alliance {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub members: Vec<AllianceMember>,
}

impl Alliance {
    pub fn is_full(&self) -> bool {
        self.members.len() >= ALLIANCE_CAPACITY
    }

    pub fn member_mut(&mut self, member_id: &str) -> Option<&mut AllianceMember> {
        self.members.iter_mut().find(|m| m.id == member_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battleground_wire_format() {
        let member = AllianceMember {
            id: "MBR_1".to_string(),
            name: "Kang".to_string(),
            line_id: "kang01".to_string(),
            battleground: Some(Battleground::Two),
            is_active: true,
        };
        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(json["battleground"], 2);
        assert_eq!(json["isActive"], true);
        assert_eq!(json["lineId"], "kang01");
    }

    #[test]
    fn test_missing_battleground_is_unassigned() {
        let json = r#"{"id":"a","name":"b","lineId":"c","isActive":false}"#;
        let member: AllianceMember = serde_json::from_str(json).unwrap();
        assert_eq!(member.battleground, None);

        let invalid = r#"{"id":"a","name":"b","lineId":"c","battleground":4,"isActive":false}"#;
        assert!(serde_json::from_str::<AllianceMember>(invalid).is_err());
    }
}
