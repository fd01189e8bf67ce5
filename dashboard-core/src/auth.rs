use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::mirror::{LoadStatus, Mirror, Tracked};
use dashboard_persistence::repositories::UserRepository;
use dashboard_types::{DashboardError, User, UserSettings, UserStatus};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthView {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub status: LoadStatus,
}

impl Tracked for AuthView {
    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

/// Session of one dashboard client: who is logged in, plus account administration.
pub struct AuthState {
    users: Arc<UserRepository>,
    mirror: Mirror<AuthView>,
}

impl AuthState {
    pub fn new(users: Arc<UserRepository>) -> Self {
        Self {
            users,
            mirror: Mirror::new(AuthView::default()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthView> {
        self.mirror.subscribe()
    }

    pub fn view(&self) -> AuthView {
        self.mirror.snapshot()
    }

    pub fn current_user(&self) -> Option<User> {
        self.mirror.read(|view| view.user.clone())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, DashboardError> {
        self.mirror
            .track("Login failed", self.users.login(email, password), |view, user| {
                view.user = Some(user.clone());
                view.is_authenticated = true;
            })
            .await
    }

    pub fn logout(&self) {
        self.mirror.modify(|view| {
            view.user = None;
            view.is_authenticated = false;
        });
    }

    /// Registers a pending account. Does not log the new account in.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        line_id: &str,
    ) -> Result<User, DashboardError> {
        self.mirror
            .track(
                "Registration failed",
                self.users.register(email, password, full_name, line_id),
                |_, _| {},
            )
            .await
    }

    pub async fn update_user_status(
        &self,
        user_id: &str,
        status: UserStatus,
    ) -> Result<User, DashboardError> {
        self.mirror
            .track(
                "Failed to update user status",
                self.as_admin(self.users.update_user_status(user_id, status)),
                |_, _| {},
            )
            .await
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<(), DashboardError> {
        self.mirror
            .track(
                "Failed to delete user",
                self.as_admin(self.users.delete_user(user_id)),
                |_, _| {},
            )
            .await
    }

    pub async fn get_users(&self) -> Result<Vec<User>, DashboardError> {
        self.mirror
            .track(
                "Failed to load users",
                self.as_admin(self.users.list_users()),
                |_, _| {},
            )
            .await
    }

    /// Sets the background image of the logged-in account.
    pub async fn update_background(
        &self,
        background_image: Option<String>,
    ) -> Result<UserSettings, DashboardError> {
        let update = async {
            let user = self.current_user().ok_or(DashboardError::NotAuthenticated)?;
            self.users.update_settings(&user.id, background_image).await
        };
        self.mirror
            .track("Failed to update settings", update, |_, _| {})
            .await
    }

    /// Runs `operation` only when an admin is logged in. The operation is not
    /// polled otherwise, so nothing reaches the store.
    async fn as_admin<T>(
        &self,
        operation: impl Future<Output = Result<T, DashboardError>>,
    ) -> Result<T, DashboardError> {
        match self.current_user() {
            None => Err(DashboardError::NotAuthenticated),
            Some(user) if !user.is_admin() => Err(DashboardError::AdminRequired),
            Some(_) => operation.await,
        }
    }
}
