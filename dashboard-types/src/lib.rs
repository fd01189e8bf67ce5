pub mod alliance;
pub mod champion;
pub mod document;
pub mod errors;
pub mod ids;
pub mod season;
pub mod user;
pub mod war_map;

// Re-export all types
pub use alliance::*;
pub use champion::*;
pub use document::*;
pub use errors::*;
pub use season::*;
pub use user::*;
pub use war_map::*;
