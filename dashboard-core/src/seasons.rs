use std::sync::Arc;

use tokio::sync::watch;

use crate::mirror::{LoadStatus, Mirror, Tracked};
use dashboard_persistence::repositories::WarSeasonRepository;
use dashboard_types::{DashboardError, WarSeason};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonView {
    pub seasons: Vec<WarSeason>,
    pub active_season: Option<WarSeason>,
    pub status: LoadStatus,
}

impl Tracked for SeasonView {
    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

pub struct SeasonState {
    seasons: Arc<WarSeasonRepository>,
    mirror: Mirror<SeasonView>,
}

impl SeasonState {
    pub fn new(seasons: Arc<WarSeasonRepository>) -> Self {
        Self {
            seasons,
            mirror: Mirror::new(SeasonView::default()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SeasonView> {
        self.mirror.subscribe()
    }

    pub fn view(&self) -> SeasonView {
        self.mirror.snapshot()
    }

    pub async fn load_seasons(&self) -> Result<Vec<WarSeason>, DashboardError> {
        self.mirror
            .track(
                "Failed to load seasons",
                self.seasons.list_seasons(),
                |view, seasons| view.seasons = seasons.clone(),
            )
            .await
    }

    /// Starts a season and makes it the active one.
    pub async fn create_season(&self, name: &str) -> Result<WarSeason, DashboardError> {
        self.mirror
            .track(
                "Failed to create season",
                self.seasons.create_season(name),
                |view, season| {
                    view.seasons.push(season.clone());
                    view.active_season = Some(season.clone());
                },
            )
            .await
    }

    pub async fn end_season(&self, season_id: &str) -> Result<WarSeason, DashboardError> {
        self.mirror
            .track(
                "Failed to end season",
                self.seasons.end_season(season_id),
                |view, ended| {
                    if let Some(slot) = view.seasons.iter_mut().find(|s| s.id == ended.id) {
                        *slot = ended.clone();
                    }
                    if view
                        .active_season
                        .as_ref()
                        .is_some_and(|active| active.id == ended.id)
                    {
                        view.active_season = None;
                    }
                },
            )
            .await
    }

    pub async fn load_season(&self, season_id: &str) -> Result<WarSeason, DashboardError> {
        let lookup = async {
            self.seasons
                .load_season(season_id)
                .await
                .and_then(|found| {
                    found.ok_or_else(|| DashboardError::SeasonNotFound {
                        season_id: season_id.to_string(),
                    })
                })
        };

        self.mirror
            .track("Failed to load season", lookup, |view, season| {
                view.active_season = Some(season.clone());
            })
            .await
    }
}
