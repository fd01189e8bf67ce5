use std::sync::Arc;

use tokio::sync::watch;

use crate::mirror::{LoadStatus, Mirror, Tracked};
use dashboard_persistence::repositories::AllianceRepository;
use dashboard_types::{Alliance, AllianceMember, Battleground, DashboardError};

#[derive(Debug, Clone, PartialEq)]
pub struct AllianceView {
    pub members: Vec<AllianceMember>,
    pub alliance_name: String,
    /// Battleground currently shown in the roster panel. Never persisted.
    pub selected_bg: Battleground,
    pub status: LoadStatus,
}

impl Default for AllianceView {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            alliance_name: String::new(),
            selected_bg: Battleground::One,
            status: LoadStatus::default(),
        }
    }
}

impl AllianceView {
    pub fn members_in_bg(&self, battleground: Battleground) -> Vec<&AllianceMember> {
        self.members
            .iter()
            .filter(|m| m.battleground == Some(battleground))
            .collect()
    }

    pub fn unassigned_members(&self) -> Vec<&AllianceMember> {
        self.members
            .iter()
            .filter(|m| m.battleground.is_none())
            .collect()
    }

    fn replace_member(&mut self, member: &AllianceMember) {
        if let Some(slot) = self.members.iter_mut().find(|m| m.id == member.id) {
            *slot = member.clone();
        }
    }
}

impl Tracked for AllianceView {
    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

pub struct AllianceState {
    alliance: Arc<AllianceRepository>,
    mirror: Mirror<AllianceView>,
}

impl AllianceState {
    pub fn new(alliance: Arc<AllianceRepository>) -> Self {
        Self {
            alliance,
            mirror: Mirror::new(AllianceView::default()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AllianceView> {
        self.mirror.subscribe()
    }

    pub fn view(&self) -> AllianceView {
        self.mirror.snapshot()
    }

    pub async fn load_alliance_data(&self) -> Result<Alliance, DashboardError> {
        self.mirror
            .track(
                "Failed to load alliance",
                self.alliance.get_alliance(),
                |view, alliance| {
                    view.members = alliance.members.clone();
                    view.alliance_name = alliance.name.clone();
                },
            )
            .await
    }

    pub async fn add_member(
        &self,
        name: &str,
        line_id: &str,
    ) -> Result<AllianceMember, DashboardError> {
        self.mirror
            .track(
                "Failed to add member",
                self.alliance.add_member(name, line_id),
                |view, member| view.members.push(member.clone()),
            )
            .await
    }

    pub async fn remove_member(&self, member_id: &str) -> Result<(), DashboardError> {
        self.mirror
            .track(
                "Failed to remove member",
                self.alliance.remove_member(member_id),
                |view, _| view.members.retain(|m| m.id != member_id),
            )
            .await
    }

    pub async fn assign_to_bg(
        &self,
        member_id: &str,
        battleground: Option<Battleground>,
    ) -> Result<AllianceMember, DashboardError> {
        self.mirror
            .track(
                "Failed to assign member",
                self.alliance.assign_to_bg(member_id, battleground),
                |view, member| view.replace_member(member),
            )
            .await
    }

    pub fn set_selected_bg(&self, battleground: Battleground) {
        self.mirror.modify(|view| view.selected_bg = battleground);
    }

    pub async fn toggle_member_status(
        &self,
        member_id: &str,
    ) -> Result<AllianceMember, DashboardError> {
        self.mirror
            .track(
                "Failed to update member",
                self.alliance.toggle_member_status(member_id),
                |view, member| view.replace_member(member),
            )
            .await
    }

    pub async fn update_alliance_name(&self, name: &str) -> Result<String, DashboardError> {
        self.mirror
            .track(
                "Failed to rename alliance",
                self.alliance.update_alliance_name(name),
                |view, name| view.alliance_name = name.clone(),
            )
            .await
    }
}
