use std::sync::Arc;

use crate::store::DocumentStore;
use dashboard_types::{
    ids, ChampionBan, DashboardError, GlobalTactic, MapDifficulty, NodeTactic, WarMapData,
};

pub struct WarMapRepository {
    store: Arc<DocumentStore>,
}

fn clean_tactic(tactic: &str) -> Result<String, DashboardError> {
    let tactic = tactic.trim();
    if tactic.is_empty() {
        return Err(DashboardError::invalid_input("tactic must not be empty"));
    }
    Ok(tactic.to_string())
}

fn clean_notes(notes: Option<&str>) -> Option<String> {
    notes
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

impl WarMapRepository {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn get_war_map(&self) -> Result<WarMapData, DashboardError> {
        self.store.read(|doc| doc.war_map.clone()).await
    }

    /// Replaces the global tactic for `difficulty` with a newly identified one.
    pub async fn set_global_tactic(
        &self,
        difficulty: MapDifficulty,
        tactic: &str,
        notes: Option<&str>,
    ) -> Result<GlobalTactic, DashboardError> {
        let global = GlobalTactic {
            id: ids::new_id(ids::GLOBAL_TACTIC_PREFIX),
            tactic: clean_tactic(tactic)?,
            notes: clean_notes(notes),
            difficulty,
        };

        self.store
            .update(|doc| {
                *doc.war_map.global_tactics.get_mut(difficulty) = Some(global.clone());
                Ok(())
            })
            .await?;

        tracing::debug!("Global tactic for {} set to {}", difficulty, global.id);
        Ok(global)
    }

    /// Replaces the tactic for one node at one difficulty.
    pub async fn set_node_tactic(
        &self,
        difficulty: MapDifficulty,
        node_number: u32,
        tactic: &str,
        notes: Option<&str>,
    ) -> Result<NodeTactic, DashboardError> {
        let tactic = clean_tactic(tactic)?;
        let notes = clean_notes(notes);

        let node_tactic = self
            .store
            .update(|doc| {
                let node = doc
                    .war_map
                    .node(node_number)
                    .ok_or(DashboardError::NodeNotFound { node_number })?;

                let node_tactic = NodeTactic {
                    id: ids::new_id(ids::NODE_TACTIC_PREFIX),
                    node_id: node.id.clone(),
                    node_number,
                    tactic,
                    notes,
                    difficulty,
                };

                doc.war_map
                    .node_tactics
                    .retain(|t| !(t.node_number == node_number && t.difficulty == difficulty));
                doc.war_map.node_tactics.push(node_tactic.clone());
                Ok(node_tactic)
            })
            .await?;

        tracing::debug!(
            "Tactic for node {} at {} set to {}",
            node_number,
            difficulty,
            node_tactic.id
        );
        Ok(node_tactic)
    }

    pub async fn set_map_difficulty(&self, difficulty: MapDifficulty) -> Result<(), DashboardError> {
        self.store
            .update(|doc| {
                doc.war_map.difficulty = difficulty;
                Ok(())
            })
            .await
    }

    /// Bans a roster champion at `difficulty`, up to [`MapDifficulty::max_bans`].
    pub async fn add_champion_ban(
        &self,
        difficulty: MapDifficulty,
        champion_id: &str,
    ) -> Result<ChampionBan, DashboardError> {
        let ban = self
            .store
            .update(|doc| {
                let on_roster = doc
                    .admin()
                    .ok_or(DashboardError::AdminUserNotFound)?
                    .data
                    .champions
                    .iter()
                    .any(|c| c.id == champion_id);
                if !on_roster {
                    return Err(DashboardError::ChampionNotFound {
                        champion_id: champion_id.to_string(),
                    });
                }

                let bans = doc.war_map.champion_bans.get_mut(difficulty);
                if bans.iter().any(|b| b.champion_id == champion_id) {
                    return Err(DashboardError::ChampionAlreadyBanned {
                        champion_id: champion_id.to_string(),
                        difficulty,
                    });
                }
                let limit = difficulty.max_bans();
                if bans.len() >= limit {
                    return Err(DashboardError::BanLimitReached { difficulty, limit });
                }

                let ban = ChampionBan {
                    id: ids::new_id(ids::BAN_PREFIX),
                    champion_id: champion_id.to_string(),
                    map_difficulty: difficulty,
                };
                bans.push(ban.clone());
                Ok(ban)
            })
            .await?;

        tracing::debug!("Banned champion {} at {}", champion_id, difficulty);
        Ok(ban)
    }

    /// Removes a ban from whichever difficulty holds it. Returns the removed ban, if any.
    pub async fn remove_champion_ban(
        &self,
        ban_id: &str,
    ) -> Result<Option<ChampionBan>, DashboardError> {
        self.store
            .update(|doc| {
                for difficulty in MapDifficulty::ALL {
                    let bans = doc.war_map.champion_bans.get_mut(difficulty);
                    if let Some(index) = bans.iter().position(|b| b.id == ban_id) {
                        return Ok(Some(bans.remove(index)));
                    }
                }
                Ok(None)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_to_memory_store;
    use crate::repositories::ChampionRepository;
    use dashboard_types::{ChampionClass, NewChampion, StarRating};

    async fn setup_test_store() -> Arc<DocumentStore> {
        Arc::new(connect_to_memory_store().await.unwrap())
    }

    async fn add_roster(store: &Arc<DocumentStore>, count: usize) -> Vec<String> {
        let champions = ChampionRepository::new(store.clone());
        let mut ids = Vec::new();
        for i in 0..count {
            let champion = champions
                .add_champion(NewChampion::new(
                    format!("Champion {i}"),
                    ChampionClass::Mystic,
                    StarRating::Six,
                ))
                .await
                .unwrap();
            ids.push(champion.id);
        }
        ids
    }

    #[tokio::test]
    async fn test_global_tactic_is_replaced() {
        let repo = WarMapRepository::new(setup_test_store().await);

        let first = repo
            .set_global_tactic(MapDifficulty::Expert, "Bring bleed immunity", None)
            .await
            .unwrap();
        let second = repo
            .set_global_tactic(MapDifficulty::Expert, "Bring regen", Some("  "))
            .await
            .unwrap();
        assert_ne!(first.id, second.id);
        assert!(second.id.starts_with("GT_"));
        assert!(second.notes.is_none());

        let map = repo.get_war_map().await.unwrap();
        assert_eq!(map.global_tactics.expert, Some(second));
        assert!(map.global_tactics.elite.is_none());
    }

    #[tokio::test]
    async fn test_node_tactic_latest_write_wins() {
        let repo = WarMapRepository::new(setup_test_store().await);

        repo.set_node_tactic(MapDifficulty::Elite, 12, "Parry", Some("watch the unblockable"))
            .await
            .unwrap();
        let latest = repo
            .set_node_tactic(MapDifficulty::Elite, 12, "Dex", Some("block specials"))
            .await
            .unwrap();
        repo.set_node_tactic(MapDifficulty::Expert, 12, "Parry", None)
            .await
            .unwrap();

        let map = repo.get_war_map().await.unwrap();
        let elite: Vec<_> = map
            .node_tactics
            .iter()
            .filter(|t| t.node_number == 12 && t.difficulty == MapDifficulty::Elite)
            .collect();
        assert_eq!(elite.len(), 1);
        assert_eq!(elite[0], &latest);
        assert_eq!(latest.node_id, "NODE_012");
        assert_eq!(latest.notes.as_deref(), Some("block specials"));
        assert_eq!(map.node_tactics.len(), 2);
    }

    #[tokio::test]
    async fn test_node_tactic_on_boss_and_missing_node() {
        let repo = WarMapRepository::new(setup_test_store().await);

        let boss = repo
            .set_node_tactic(MapDifficulty::Challenger, 50, "Save power", None)
            .await
            .unwrap();
        assert_eq!(boss.node_id, "NODE_BOSS");

        for missing in [0, 51] {
            assert_eq!(
                repo.set_node_tactic(MapDifficulty::Challenger, missing, "x", None)
                    .await
                    .unwrap_err(),
                DashboardError::NodeNotFound {
                    node_number: missing
                }
            );
        }
    }

    #[tokio::test]
    async fn test_empty_tactic_is_rejected() {
        let repo = WarMapRepository::new(setup_test_store().await);
        let err = repo
            .set_global_tactic(MapDifficulty::Expert, "   ", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_set_map_difficulty_persists() {
        let repo = WarMapRepository::new(setup_test_store().await);
        repo.set_map_difficulty(MapDifficulty::Elite).await.unwrap();
        assert_eq!(repo.get_war_map().await.unwrap().difficulty, MapDifficulty::Elite);
    }

    #[tokio::test]
    async fn test_ban_cap_per_difficulty() {
        let store = setup_test_store().await;
        let roster = add_roster(&store, 6).await;
        let repo = WarMapRepository::new(store);

        for id in &roster[..3] {
            repo.add_champion_ban(MapDifficulty::Expert, id).await.unwrap();
        }
        assert_eq!(
            repo.add_champion_ban(MapDifficulty::Expert, &roster[3])
                .await
                .unwrap_err(),
            DashboardError::BanLimitReached {
                difficulty: MapDifficulty::Expert,
                limit: 3
            }
        );

        for id in &roster[..5] {
            repo.add_champion_ban(MapDifficulty::Elite, id).await.unwrap();
        }
        assert!(matches!(
            repo.add_champion_ban(MapDifficulty::Elite, &roster[5])
                .await
                .unwrap_err(),
            DashboardError::BanLimitReached { limit: 5, .. }
        ));
    }

    #[tokio::test]
    async fn test_ban_requires_known_unbanned_champion() {
        let store = setup_test_store().await;
        let roster = add_roster(&store, 1).await;
        let repo = WarMapRepository::new(store);

        let ban = repo
            .add_champion_ban(MapDifficulty::Challenger, &roster[0])
            .await
            .unwrap();
        assert!(ban.id.starts_with("BAN_"));
        assert_eq!(ban.map_difficulty, MapDifficulty::Challenger);

        assert!(matches!(
            repo.add_champion_ban(MapDifficulty::Challenger, &roster[0])
                .await
                .unwrap_err(),
            DashboardError::ChampionAlreadyBanned { .. }
        ));
        assert!(matches!(
            repo.add_champion_ban(MapDifficulty::Challenger, "CHAMP_missing")
                .await
                .unwrap_err(),
            DashboardError::ChampionNotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_remove_ban_searches_all_difficulties() {
        let store = setup_test_store().await;
        let roster = add_roster(&store, 1).await;
        let repo = WarMapRepository::new(store);

        let ban = repo
            .add_champion_ban(MapDifficulty::Elite, &roster[0])
            .await
            .unwrap();

        assert_eq!(repo.remove_champion_ban(&ban.id).await.unwrap(), Some(ban));
        assert_eq!(repo.remove_champion_ban("BAN_missing").await.unwrap(), None);
        assert!(repo
            .get_war_map()
            .await
            .unwrap()
            .champion_bans
            .elite
            .is_empty());
    }
}
