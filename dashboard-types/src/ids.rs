use uuid::Uuid;

pub const USER_PREFIX: &str = "USR";
pub const MEMBER_PREFIX: &str = "MBR";
pub const CHAMPION_PREFIX: &str = "CHAMP";
pub const GLOBAL_TACTIC_PREFIX: &str = "GT";
pub const NODE_TACTIC_PREFIX: &str = "NT";
pub const BAN_PREFIX: &str = "BAN";
pub const SEASON_PREFIX: &str = "SEASON";

/// Id of the account seeded into a fresh document.
pub const SEED_ADMIN_ID: &str = "USR_001";

/// Generates an id of the form `<PREFIX>_<uuid>`.
pub fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4())
}
