use std::sync::Arc;

use dashboard_core::Dashboard;
use dashboard_persistence::{AdminSeed, DocumentStore, MemoryBackend};
use dashboard_types::{ChampionClass, NewChampion, StarRating};

/// Creates a dashboard over a fresh in-memory document, returning the backend
/// so tests can inject storage failures.
pub async fn setup_test_dashboard() -> (Dashboard, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new());
    let store = DocumentStore::open(backend.clone(), AdminSeed::default())
        .await
        .unwrap();
    (Dashboard::new(Arc::new(store)), backend)
}

/// Creates a dashboard with the seeded admin already logged in.
pub async fn setup_admin_dashboard() -> (Dashboard, Arc<MemoryBackend>) {
    let (dashboard, backend) = setup_test_dashboard().await;
    dashboard.auth.login("admin", "admin").await.unwrap();
    (dashboard, backend)
}

pub fn six_star(name: &str, class: ChampionClass) -> NewChampion {
    NewChampion::new(name, class, StarRating::Six)
}
