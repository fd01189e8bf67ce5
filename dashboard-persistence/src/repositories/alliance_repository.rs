use std::sync::Arc;

use crate::store::DocumentStore;
use dashboard_types::{
    ids, Alliance, AllianceMember, Battleground, DashboardError, ALLIANCE_CAPACITY,
};

pub struct AllianceRepository {
    store: Arc<DocumentStore>,
}

fn member_not_found(member_id: &str) -> DashboardError {
    DashboardError::MemberNotFound {
        member_id: member_id.to_string(),
    }
}

impl AllianceRepository {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn get_alliance(&self) -> Result<Alliance, DashboardError> {
        self.store.read(|doc| doc.alliance.clone()).await
    }

    /// Adds an active, unassigned member. Fails once the roster holds
    /// [`ALLIANCE_CAPACITY`] members.
    pub async fn add_member(
        &self,
        name: &str,
        line_id: &str,
    ) -> Result<AllianceMember, DashboardError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DashboardError::invalid_input("member name must not be empty"));
        }

        let member = AllianceMember {
            id: ids::new_id(ids::MEMBER_PREFIX),
            name: name.to_string(),
            line_id: line_id.trim().to_string(),
            battleground: None,
            is_active: true,
        };

        self.store
            .update(|doc| {
                if doc.alliance.is_full() {
                    return Err(DashboardError::AllianceFull {
                        capacity: ALLIANCE_CAPACITY,
                    });
                }
                doc.alliance.members.push(member.clone());
                Ok(())
            })
            .await?;

        tracing::debug!("Added alliance member {} ({})", member.name, member.id);
        Ok(member)
    }

    /// Removes a member. Unknown ids are ignored.
    pub async fn remove_member(&self, member_id: &str) -> Result<(), DashboardError> {
        self.store
            .update(|doc| {
                doc.alliance.members.retain(|m| m.id != member_id);
                Ok(())
            })
            .await
    }

    /// Moves a member to a battleground, or unassigns them with `None`.
    pub async fn assign_to_bg(
        &self,
        member_id: &str,
        battleground: Option<Battleground>,
    ) -> Result<AllianceMember, DashboardError> {
        self.store
            .update(|doc| {
                let member = doc
                    .alliance
                    .member_mut(member_id)
                    .ok_or_else(|| member_not_found(member_id))?;
                member.battleground = battleground;
                Ok(member.clone())
            })
            .await
    }

    pub async fn toggle_member_status(
        &self,
        member_id: &str,
    ) -> Result<AllianceMember, DashboardError> {
        self.store
            .update(|doc| {
                let member = doc
                    .alliance
                    .member_mut(member_id)
                    .ok_or_else(|| member_not_found(member_id))?;
                member.is_active = !member.is_active;
                Ok(member.clone())
            })
            .await
    }

    pub async fn update_alliance_name(&self, name: &str) -> Result<String, DashboardError> {
        let name = name.trim().to_string();
        self.store
            .update(|doc| {
                doc.alliance.name = name.clone();
                Ok(())
            })
            .await?;
        Ok(name)
    }
}
