use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::{MapDifficulty, UserStatus};

/// Coarse classification of a [`DashboardError`], used for HTTP status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Unauthorized,
    Validation,
    StorageFailure,
}

#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DashboardError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Account not approved")]
    AccountNotApproved,
    #[error("Not logged in")]
    NotAuthenticated,
    #[error("Administrator privileges required")]
    AdminRequired,
    #[error("Email already registered: {email}")]
    EmailAlreadyRegistered { email: String },
    #[error("User not found: {user_id}")]
    UserNotFound { user_id: String },
    #[error("Cannot move account from {from:?} to {to:?}")]
    InvalidStatusTransition { from: UserStatus, to: UserStatus },
    #[error("Admin accounts cannot be deleted")]
    CannotDeleteAdmin,
    #[error("Admin user not found")]
    AdminUserNotFound,
    #[error("Champion not found: {champion_id}")]
    ChampionNotFound { champion_id: String },
    #[error("Alliance is full (max {capacity} members)")]
    AllianceFull { capacity: usize },
    #[error("Member not found: {member_id}")]
    MemberNotFound { member_id: String },
    #[error("Node not found: {node_number}")]
    NodeNotFound { node_number: u32 },
    #[error("Ban limit reached for {difficulty} ({limit} bans)")]
    BanLimitReached { difficulty: MapDifficulty, limit: usize },
    #[error("Champion {champion_id} is already banned for {difficulty}")]
    ChampionAlreadyBanned { champion_id: String, difficulty: MapDifficulty },
    #[error("Season not found: {season_id}")]
    SeasonNotFound { season_id: String },
    #[error("Season already ended: {season_id}")]
    SeasonAlreadyEnded { season_id: String },
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
    #[error("Storage failure: {message}")]
    StorageFailure { message: String },
}

impl DashboardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UserNotFound { .. }
            | Self::AdminUserNotFound
            | Self::ChampionNotFound { .. }
            | Self::MemberNotFound { .. }
            | Self::NodeNotFound { .. }
            | Self::SeasonNotFound { .. } => ErrorKind::NotFound,
            Self::EmailAlreadyRegistered { .. }
            | Self::AllianceFull { .. }
            | Self::InvalidStatusTransition { .. }
            | Self::CannotDeleteAdmin
            | Self::BanLimitReached { .. }
            | Self::ChampionAlreadyBanned { .. }
            | Self::SeasonAlreadyEnded { .. } => ErrorKind::Conflict,
            Self::InvalidCredentials
            | Self::AccountNotApproved
            | Self::NotAuthenticated
            | Self::AdminRequired => ErrorKind::Unauthorized,
            Self::InvalidInput { .. } => ErrorKind::Validation,
            Self::StorageFailure { .. } => ErrorKind::StorageFailure,
        }
    }

    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::StorageFailure {
            message: err.to_string(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(DashboardError::InvalidCredentials.kind(), ErrorKind::Unauthorized);
        assert_eq!(DashboardError::AllianceFull { capacity: 30 }.kind(), ErrorKind::Conflict);
        assert_eq!(
            DashboardError::NodeNotFound { node_number: 51 }.kind(),
            ErrorKind::NotFound
        );
        assert_eq!(DashboardError::storage("disk full").kind(), ErrorKind::StorageFailure);
        assert_eq!(DashboardError::invalid_input("empty").kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DashboardError::AllianceFull { capacity: 30 }.to_string(),
            "Alliance is full (max 30 members)"
        );
        assert_eq!(
            DashboardError::BanLimitReached {
                difficulty: MapDifficulty::Elite,
                limit: 5
            }
            .to_string(),
            "Ban limit reached for Elite (5 bans)"
        );
    }
}
