use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::WarMapData;

/// Append-only history entry. `war_map` is a deep copy taken when the season started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WarSeason {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub start_date: String, // ISO 8601 string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub end_date: Option<String>,
    pub war_map: WarMapData,
}
