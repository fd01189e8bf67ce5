use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, warn};

use crate::backend::DocumentBackend;
use crate::password;
use dashboard_types::{
    ids::SEED_ADMIN_ID, DashboardError, Document, Role, StoredUser, UserData, UserStatus,
};

/// Credentials of the admin account written into a freshly initialized document.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

impl Default for AdminSeed {
    fn default() -> Self {
        Self {
            email: "admin".to_string(),
            password: "admin".to_string(),
        }
    }
}

/// Owner of the persisted document.
///
/// Reads go to the backend and fall back to the last good copy. Writes replace
/// the whole document. Read-modify-write cycles issued through [`DocumentStore::update`]
/// are serialized, so two requests in this process cannot overwrite each other.
pub struct DocumentStore {
    backend: Arc<dyn DocumentBackend>,
    seed: AdminSeed,
    cache: RwLock<Option<Document>>,
    write_lock: Mutex<()>,
}

impl DocumentStore {
    pub fn new(backend: Arc<dyn DocumentBackend>, seed: AdminSeed) -> Self {
        Self {
            backend,
            seed,
            cache: RwLock::new(None),
            write_lock: Mutex::new(()),
        }
    }

    /// Creates the store and performs the initial load, seeding a default
    /// document when the backend has none.
    pub async fn open(
        backend: Arc<dyn DocumentBackend>,
        seed: AdminSeed,
    ) -> Result<Self, DashboardError> {
        let store = Self::new(backend, seed);
        let document = store.load().await?;
        info!(
            "Document store ready on {} ({} users, {} members, {} seasons)",
            store.backend.describe(),
            document.users.len(),
            document.alliance.members.len(),
            document.seasons.len()
        );
        Ok(store)
    }

    /// Returns the full document.
    ///
    /// If the backend cannot be read, the cached copy is returned; without a
    /// cached copy a default document is created and persisted.
    pub async fn load(&self) -> Result<Document, DashboardError> {
        let _guard = self.write_lock.lock().await;
        self.load_locked().await
    }

    /// Body of [`Self::load`]. Callers must hold `write_lock`, since loading
    /// may write the upgraded or default document back.
    async fn load_locked(&self) -> Result<Document, DashboardError> {
        match self.backend.read().await {
            Ok(mut document) => {
                if password::seal_passwords(&mut document)? {
                    info!("Upgrading plaintext passwords in {}", self.backend.describe());
                    self.backend.write(&document).await?;
                }
                *self.cache.write().await = Some(document.clone());
                Ok(document)
            }
            Err(err) => {
                warn!("Failed to load document from {}: {}", self.backend.describe(), err);

                let cached = self.cache.read().await.clone();
                if let Some(document) = cached {
                    return Ok(document);
                }

                info!("No cached document, initializing default document");
                let document = self.default_document()?;
                *self.cache.write().await = Some(document.clone());
                self.backend.write(&document).await.map_err(|err| {
                    error!("Failed to persist default document: {}", err);
                    err
                })?;
                Ok(document)
            }
        }
    }

    /// Overwrites the stored document. Fails if the write does not land.
    pub async fn save(&self, document: Document) -> Result<(), DashboardError> {
        let _guard = self.write_lock.lock().await;
        self.persist(document).await
    }

    /// Loads the document, applies `mutate` and saves the result.
    ///
    /// Nothing is written when `mutate` fails.
    pub async fn update<T, F>(&self, mutate: F) -> Result<T, DashboardError>
    where
        F: FnOnce(&mut Document) -> Result<T, DashboardError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load_locked().await?;
        let outcome = mutate(&mut document)?;
        self.persist(document).await?;
        Ok(outcome)
    }

    /// Loads the document and projects part of it.
    pub async fn read<T, F>(&self, view: F) -> Result<T, DashboardError>
    where
        F: FnOnce(&Document) -> T,
    {
        let document = self.load().await?;
        Ok(view(&document))
    }

    pub async fn cached(&self) -> Option<Document> {
        self.cache.read().await.clone()
    }

    async fn persist(&self, mut document: Document) -> Result<(), DashboardError> {
        password::seal_passwords(&mut document)?;
        self.backend.write(&document).await.map_err(|err| {
            error!("Failed to save document to {}: {}", self.backend.describe(), err);
            err
        })?;
        *self.cache.write().await = Some(document);
        Ok(())
    }

    fn default_document(&self) -> Result<Document, DashboardError> {
        let admin = StoredUser {
            id: SEED_ADMIN_ID.to_string(),
            email: self.seed.email.clone(),
            password: password::hash_password(&self.seed.password)?,
            full_name: "Admin User".to_string(),
            line_id: "admin".to_string(),
            role: Role::Admin,
            status: UserStatus::Approved,
            data: UserData::default(),
        };
        Ok(Document::seeded(admin))
    }
}
