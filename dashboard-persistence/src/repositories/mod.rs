pub mod alliance_repository;
pub mod champion_repository;
pub mod user_repository;
pub mod war_map_repository;
pub mod war_season_repository;

pub use alliance_repository::AllianceRepository;
pub use champion_repository::ChampionRepository;
pub use user_repository::UserRepository;
pub use war_map_repository::WarMapRepository;
pub use war_season_repository::WarSeasonRepository;
