use std::sync::Arc;

use tokio::sync::watch;

use crate::mirror::{LoadStatus, Mirror, Tracked};
use dashboard_persistence::repositories::WarMapRepository;
use dashboard_types::{
    ChampionBan, DashboardError, GlobalTactic, MapDifficulty, Node, NodeTactic, PerDifficulty,
    WarMapData,
};

#[derive(Debug, Clone, PartialEq)]
pub struct WarMapView {
    pub global_tactics: PerDifficulty<Option<GlobalTactic>>,
    /// Node tactics grouped by the difficulty they were written for.
    pub node_tactics: PerDifficulty<Vec<NodeTactic>>,
    pub nodes: Vec<Node>,
    pub current_difficulty: MapDifficulty,
    pub champion_bans: PerDifficulty<Vec<ChampionBan>>,
    pub status: LoadStatus,
}

impl Default for WarMapView {
    fn default() -> Self {
        Self::from_data(&WarMapData::default())
    }
}

impl WarMapView {
    fn from_data(data: &WarMapData) -> Self {
        let mut node_tactics = PerDifficulty::<Vec<NodeTactic>>::default();
        for tactic in &data.node_tactics {
            node_tactics.get_mut(tactic.difficulty).push(tactic.clone());
        }

        Self {
            global_tactics: data.global_tactics.clone(),
            node_tactics,
            nodes: data.nodes.clone(),
            current_difficulty: data.difficulty,
            champion_bans: data.champion_bans.clone(),
            status: LoadStatus::default(),
        }
    }

    pub fn global_tactic(&self, difficulty: MapDifficulty) -> Option<&GlobalTactic> {
        self.global_tactics.get(difficulty).as_ref()
    }

    pub fn node_tactic(&self, difficulty: MapDifficulty, node_number: u32) -> Option<&NodeTactic> {
        self.node_tactics
            .get(difficulty)
            .iter()
            .find(|t| t.node_number == node_number)
    }

    pub fn bans_for(&self, difficulty: MapDifficulty) -> &[ChampionBan] {
        self.champion_bans.get(difficulty)
    }

    /// Bans still available at the current difficulty.
    pub fn remaining_bans(&self) -> usize {
        self.current_difficulty
            .max_bans()
            .saturating_sub(self.bans_for(self.current_difficulty).len())
    }
}

impl Tracked for WarMapView {
    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

pub struct WarMapState {
    war_map: Arc<WarMapRepository>,
    mirror: Mirror<WarMapView>,
}

impl WarMapState {
    pub fn new(war_map: Arc<WarMapRepository>) -> Self {
        Self {
            war_map,
            mirror: Mirror::new(WarMapView::default()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<WarMapView> {
        self.mirror.subscribe()
    }

    pub fn view(&self) -> WarMapView {
        self.mirror.snapshot()
    }

    pub fn current_difficulty(&self) -> MapDifficulty {
        self.mirror.read(|view| view.current_difficulty)
    }

    pub async fn load_tactics(&self) -> Result<WarMapData, DashboardError> {
        self.mirror
            .track(
                "Failed to load war map",
                self.war_map.get_war_map(),
                |view, data| {
                    let status = std::mem::take(&mut view.status);
                    *view = WarMapView {
                        status,
                        ..WarMapView::from_data(data)
                    };
                },
            )
            .await
    }

    pub async fn set_global_tactic(
        &self,
        difficulty: MapDifficulty,
        tactic: &str,
        notes: Option<&str>,
    ) -> Result<GlobalTactic, DashboardError> {
        self.mirror
            .track(
                "Failed to save global tactic",
                self.war_map.set_global_tactic(difficulty, tactic, notes),
                |view, global| *view.global_tactics.get_mut(difficulty) = Some(global.clone()),
            )
            .await
    }

    pub async fn set_node_tactic(
        &self,
        difficulty: MapDifficulty,
        node_number: u32,
        tactic: &str,
        notes: Option<&str>,
    ) -> Result<NodeTactic, DashboardError> {
        self.mirror
            .track(
                "Failed to save node tactic",
                self.war_map
                    .set_node_tactic(difficulty, node_number, tactic, notes),
                |view, saved| {
                    let tactics = view.node_tactics.get_mut(difficulty);
                    tactics.retain(|t| t.node_number != node_number);
                    tactics.push(saved.clone());
                },
            )
            .await
    }

    /// Lookup against the mirrored copy only.
    pub fn get_global_tactic(&self, difficulty: MapDifficulty) -> Option<GlobalTactic> {
        self.mirror
            .read(|view| view.global_tactic(difficulty).cloned())
    }

    /// Lookup against the mirrored copy only.
    pub fn get_node_tactic(&self, difficulty: MapDifficulty, node_number: u32) -> Option<NodeTactic> {
        self.mirror
            .read(|view| view.node_tactic(difficulty, node_number).cloned())
    }

    pub async fn set_map_difficulty(&self, difficulty: MapDifficulty) -> Result<(), DashboardError> {
        self.mirror
            .track(
                "Failed to change difficulty",
                self.war_map.set_map_difficulty(difficulty),
                |view, _| view.current_difficulty = difficulty,
            )
            .await
    }

    /// Bans a champion at the current difficulty.
    pub async fn add_champion_ban(&self, champion_id: &str) -> Result<ChampionBan, DashboardError> {
        let difficulty = self.current_difficulty();
        self.mirror
            .track(
                "Failed to ban champion",
                self.war_map.add_champion_ban(difficulty, champion_id),
                |view, ban| view.champion_bans.get_mut(difficulty).push(ban.clone()),
            )
            .await
    }

    pub async fn remove_champion_ban(&self, ban_id: &str) -> Result<(), DashboardError> {
        self.mirror
            .track(
                "Failed to remove ban",
                self.war_map.remove_champion_ban(ban_id),
                |view, removed| {
                    if let Some(ban) = removed {
                        view.champion_bans
                            .get_mut(ban.map_difficulty)
                            .retain(|b| b.id != ban.id);
                    }
                },
            )
            .await
            .map(|_| ())
    }
}
