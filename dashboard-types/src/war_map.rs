use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Node number reserved for the boss.
pub const BOSS_NODE_NUMBER: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MapDifficulty {
    Challenger,
    Expert,
    Elite,
}

impl MapDifficulty {
    pub const ALL: [MapDifficulty; 3] = [
        MapDifficulty::Challenger,
        MapDifficulty::Expert,
        MapDifficulty::Elite,
    ];

    /// Simultaneous champion bans allowed at this difficulty.
    pub fn max_bans(self) -> usize {
        match self {
            MapDifficulty::Elite => 5,
            MapDifficulty::Challenger | MapDifficulty::Expert => 3,
        }
    }
}

impl std::fmt::Display for MapDifficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MapDifficulty::Challenger => "Challenger",
            MapDifficulty::Expert => "Expert",
            MapDifficulty::Elite => "Elite",
        };
        f.write_str(name)
    }
}

/// One value per map difficulty, serialized as `{"Challenger": .., "Expert": .., "Elite": ..}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PerDifficulty<T> {
    #[serde(rename = "Challenger", default)]
    pub challenger: T,
    #[serde(rename = "Expert", default)]
    pub expert: T,
    #[serde(rename = "Elite", default)]
    pub elite: T,
}

impl<T> PerDifficulty<T> {
    pub fn get(&self, difficulty: MapDifficulty) -> &T {
        match difficulty {
            MapDifficulty::Challenger => &self.challenger,
            MapDifficulty::Expert => &self.expert,
            MapDifficulty::Elite => &self.elite,
        }
    }

    pub fn get_mut(&mut self, difficulty: MapDifficulty) -> &mut T {
        match difficulty {
            MapDifficulty::Challenger => &mut self.challenger,
            MapDifficulty::Expert => &mut self.expert,
            MapDifficulty::Elite => &mut self.elite,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NodeType {
    Normal,
    Boss,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Node {
    pub id: String,
    pub number: u32,
    #[serde(rename = "type")]
    pub node_type: NodeType,
}

/// The fixed map layout: 49 normal nodes followed by the boss.
pub fn generate_nodes() -> Vec<Node> {
    (1..BOSS_NODE_NUMBER)
        .map(|number| Node {
            id: format!("NODE_{number:03}"),
            number,
            node_type: NodeType::Normal,
        })
        .chain(std::iter::once(Node {
            id: "NODE_BOSS".to_string(),
            number: BOSS_NODE_NUMBER,
            node_type: NodeType::Boss,
        }))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NodeTactic {
    pub id: String,
    pub node_id: String,
    pub node_number: u32,
    pub tactic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub notes: Option<String>,
    pub difficulty: MapDifficulty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GlobalTactic {
    pub id: String,
    pub tactic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub notes: Option<String>,
    pub difficulty: MapDifficulty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChampionBan {
    pub id: String,
    pub champion_id: String,
    pub map_difficulty: MapDifficulty,
}

fn default_difficulty() -> MapDifficulty {
    MapDifficulty::Expert
}

/// War-map sub-tree of the document. Also the snapshot kept by each season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WarMapData {
    #[serde(default)]
    pub global_tactics: PerDifficulty<Option<GlobalTactic>>,
    #[serde(default)]
    pub node_tactics: Vec<NodeTactic>,
    #[serde(default = "generate_nodes")]
    pub nodes: Vec<Node>,
    #[serde(default = "default_difficulty")]
    pub difficulty: MapDifficulty,
    #[serde(default)]
    pub champion_bans: PerDifficulty<Vec<ChampionBan>>,
}

impl Default for WarMapData {
    fn default() -> Self {
        Self {
            global_tactics: PerDifficulty::default(),
            node_tactics: Vec::new(),
            nodes: generate_nodes(),
            difficulty: default_difficulty(),
            champion_bans: PerDifficulty::default(),
        }
    }
}

impl WarMapData {
    pub fn node(&self, number: u32) -> Option<&Node> {
        self.nodes.iter().find(|node| node.number == number)
    }

    pub fn node_tactic(&self, difficulty: MapDifficulty, node_number: u32) -> Option<&NodeTactic> {
        self.node_tactics
            .iter()
            .find(|t| t.difficulty == difficulty && t.node_number == node_number)
    }
}
