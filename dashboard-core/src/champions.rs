use std::sync::Arc;

use tokio::sync::watch;

use crate::mirror::{LoadStatus, Mirror, Tracked};
use dashboard_persistence::repositories::ChampionRepository;
use dashboard_types::{
    Champion, ChampionClass, ChampionNameSeparators, ChampionUpdate, DashboardError, NewChampion,
    StarRating,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChampionView {
    pub champions: Vec<Champion>,
    pub status: LoadStatus,
}

impl Tracked for ChampionView {
    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

pub struct ChampionState {
    champions: Arc<ChampionRepository>,
    mirror: Mirror<ChampionView>,
}

impl ChampionState {
    pub fn new(champions: Arc<ChampionRepository>) -> Self {
        Self {
            champions,
            mirror: Mirror::new(ChampionView::default()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ChampionView> {
        self.mirror.subscribe()
    }

    pub fn view(&self) -> ChampionView {
        self.mirror.snapshot()
    }

    pub fn champions(&self) -> Vec<Champion> {
        self.mirror.read(|view| view.champions.clone())
    }

    pub async fn load_champions(&self) -> Result<Vec<Champion>, DashboardError> {
        self.mirror
            .track(
                "Failed to load champions",
                self.champions.list_champions(),
                |view, champions| view.champions = champions.clone(),
            )
            .await
    }

    pub async fn add_champion(&self, spec: NewChampion) -> Result<Champion, DashboardError> {
        self.mirror
            .track(
                "Failed to add champion",
                self.champions.add_champion(spec),
                |view, champion| view.champions.push(champion.clone()),
            )
            .await
    }

    pub async fn add_champions_bulk(
        &self,
        names: &[String],
        class: ChampionClass,
        star_rating: StarRating,
    ) -> Result<Vec<Champion>, DashboardError> {
        self.mirror
            .track(
                "Failed to add champions",
                self.champions.add_champions_bulk(names, class, star_rating),
                |view, added| view.champions.extend(added.iter().cloned()),
            )
            .await
    }

    /// Splits `text` into names and adds each one.
    pub async fn add_champions_from_text(
        &self,
        text: &str,
        separators: ChampionNameSeparators,
        class: ChampionClass,
        star_rating: StarRating,
    ) -> Result<Vec<Champion>, DashboardError> {
        self.mirror
            .track(
                "Failed to add champions",
                self.champions
                    .add_champions_from_text(text, separators, class, star_rating),
                |view, added| view.champions.extend(added.iter().cloned()),
            )
            .await
    }

    pub async fn delete_champion(&self, champion_id: &str) -> Result<(), DashboardError> {
        self.mirror
            .track(
                "Failed to delete champion",
                self.champions.delete_champion(champion_id),
                |view, _| view.champions.retain(|c| c.id != champion_id),
            )
            .await
    }

    pub async fn delete_all_champions(&self) -> Result<usize, DashboardError> {
        self.mirror
            .track(
                "Failed to delete champions",
                self.champions.delete_all_champions(),
                |view, _| view.champions.clear(),
            )
            .await
    }

    pub async fn update_champion(
        &self,
        champion_id: &str,
        updates: ChampionUpdate,
    ) -> Result<Champion, DashboardError> {
        self.mirror
            .track(
                "Failed to update champion",
                self.champions.update_champion(champion_id, updates),
                |view, updated| {
                    if let Some(slot) = view.champions.iter_mut().find(|c| c.id == updated.id) {
                        *slot = updated.clone();
                    }
                },
            )
            .await
    }
}
