pub mod alliance;
pub mod auth;
pub mod champions;
pub mod filters;
pub mod mirror;
pub mod seasons;
pub mod war_map;

use std::sync::Arc;

use dashboard_persistence::repositories::{
    AllianceRepository, ChampionRepository, UserRepository, WarMapRepository,
    WarSeasonRepository,
};
use dashboard_persistence::DocumentStore;

// Re-export main components
pub use alliance::*;
pub use auth::*;
pub use champions::*;
pub use filters::*;
pub use mirror::{LoadStatus, Tracked};
pub use seasons::*;
pub use war_map::*;

/// Every state mirror of one dashboard client, wired to a shared store.
pub struct Dashboard {
    pub auth: AuthState,
    pub champions: ChampionState,
    pub alliance: AllianceState,
    pub war_map: WarMapState,
    pub seasons: SeasonState,
}

impl Dashboard {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self {
            auth: AuthState::new(Arc::new(UserRepository::new(store.clone()))),
            champions: ChampionState::new(Arc::new(ChampionRepository::new(store.clone()))),
            alliance: AllianceState::new(Arc::new(AllianceRepository::new(store.clone()))),
            war_map: WarMapState::new(Arc::new(WarMapRepository::new(store.clone()))),
            seasons: SeasonState::new(Arc::new(WarSeasonRepository::new(store))),
        }
    }

    /// Fills every mirror from the store. Stops at the first failure.
    pub async fn load_all(&self) -> Result<(), dashboard_types::DashboardError> {
        self.champions.load_champions().await?;
        self.alliance.load_alliance_data().await?;
        self.war_map.load_tactics().await?;
        self.seasons.load_seasons().await?;
        tracing::debug!("Dashboard mirrors loaded");
        Ok(())
    }
}
