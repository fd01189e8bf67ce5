use std::sync::Arc;

use crate::store::DocumentStore;
use dashboard_types::{ids, DashboardError, WarSeason};

pub struct WarSeasonRepository {
    store: Arc<DocumentStore>,
}

impl WarSeasonRepository {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list_seasons(&self) -> Result<Vec<WarSeason>, DashboardError> {
        self.store.read(|doc| doc.seasons.clone()).await
    }

    /// Starts a season holding a snapshot of the current war map.
    pub async fn create_season(&self, name: &str) -> Result<WarSeason, DashboardError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DashboardError::invalid_input("season name must not be empty"));
        }

        let season = self
            .store
            .update(|doc| {
                let season = WarSeason {
                    id: ids::new_id(ids::SEASON_PREFIX),
                    name: name.to_string(),
                    is_active: true,
                    start_date: chrono::Utc::now().to_rfc3339(),
                    end_date: None,
                    war_map: doc.war_map.clone(),
                };
                doc.seasons.push(season.clone());
                Ok(season)
            })
            .await?;

        tracing::info!("Started war season {} ({})", season.name, season.id);
        Ok(season)
    }

    pub async fn end_season(&self, season_id: &str) -> Result<WarSeason, DashboardError> {
        let season = self
            .store
            .update(|doc| {
                let season = doc
                    .seasons
                    .iter_mut()
                    .find(|s| s.id == season_id)
                    .ok_or_else(|| DashboardError::SeasonNotFound {
                        season_id: season_id.to_string(),
                    })?;
                if !season.is_active {
                    return Err(DashboardError::SeasonAlreadyEnded {
                        season_id: season_id.to_string(),
                    });
                }
                season.is_active = false;
                season.end_date = Some(chrono::Utc::now().to_rfc3339());
                Ok(season.clone())
            })
            .await?;

        tracing::info!("Ended war season {} ({})", season.name, season.id);
        Ok(season)
    }

    pub async fn load_season(&self, season_id: &str) -> Result<Option<WarSeason>, DashboardError> {
        self.store
            .read(|doc| doc.seasons.iter().find(|s| s.id == season_id).cloned())
            .await
    }
}
