pub mod backend;
pub mod connection;
pub mod password;
pub mod repositories;
pub mod store;

pub use backend::{DocumentBackend, JsonFileBackend, MemoryBackend};
pub use store::{AdminSeed, DocumentStore};
