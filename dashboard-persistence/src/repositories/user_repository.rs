use std::sync::Arc;

use crate::password::{hash_password, verify_password};
use crate::store::DocumentStore;
use dashboard_types::{
    ids, DashboardError, Role, StoredUser, User, UserData, UserSettings, UserStatus,
};

pub struct UserRepository {
    store: Arc<DocumentStore>,
}

impl UserRepository {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Checks credentials and returns the public view of the account.
    ///
    /// The email is trimmed the same way [`Self::register`] trims it.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, DashboardError> {
        let email = email.trim();
        let stored = self
            .store
            .read(|doc| doc.user_by_email(email).cloned())
            .await?;

        let user = stored
            .filter(|user| verify_password(password, &user.password))
            .ok_or(DashboardError::InvalidCredentials)?;

        if user.status != UserStatus::Approved {
            return Err(DashboardError::AccountNotApproved);
        }

        tracing::info!("User {} logged in", user.id);
        Ok(User::from(&user))
    }

    /// Creates a pending account.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        line_id: &str,
    ) -> Result<User, DashboardError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(DashboardError::invalid_input("email must not be empty"));
        }
        if password.is_empty() {
            return Err(DashboardError::invalid_input("password must not be empty"));
        }

        let new_user = StoredUser {
            id: ids::new_id(ids::USER_PREFIX),
            email: email.to_string(),
            password: hash_password(password)?,
            full_name: full_name.trim().to_string(),
            line_id: line_id.trim().to_string(),
            role: Role::User,
            status: UserStatus::Pending,
            data: UserData::default(),
        };

        let user = self
            .store
            .update(move |doc| {
                if doc.user_by_email(&new_user.email).is_some() {
                    return Err(DashboardError::EmailAlreadyRegistered {
                        email: new_user.email.clone(),
                    });
                }
                let user = User::from(&new_user);
                doc.users.push(new_user);
                Ok(user)
            })
            .await?;

        tracing::info!("Registered user {} ({}), awaiting approval", user.id, user.email);
        Ok(user)
    }

    /// Approves or rejects a pending account.
    pub async fn update_user_status(
        &self,
        user_id: &str,
        status: UserStatus,
    ) -> Result<User, DashboardError> {
        let user = self
            .store
            .update(|doc| {
                let user = doc.user_mut(user_id).ok_or_else(|| DashboardError::UserNotFound {
                    user_id: user_id.to_string(),
                })?;

                if user.status != UserStatus::Pending || status == UserStatus::Pending {
                    return Err(DashboardError::InvalidStatusTransition {
                        from: user.status,
                        to: status,
                    });
                }

                user.status = status;
                Ok(User::from(&*user))
            })
            .await?;

        tracing::info!("User {} is now {:?}", user.id, user.status);
        Ok(user)
    }

    /// Removes an account. Unknown ids are ignored; admin accounts are protected.
    pub async fn delete_user(&self, user_id: &str) -> Result<(), DashboardError> {
        self.store
            .update(|doc| {
                if doc.user(user_id).is_some_and(StoredUser::is_admin) {
                    return Err(DashboardError::CannotDeleteAdmin);
                }
                doc.users.retain(|u| u.id != user_id);
                Ok(())
            })
            .await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, DashboardError> {
        self.store
            .read(|doc| doc.users.iter().map(User::from).collect())
            .await
    }

    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, DashboardError> {
        self.store
            .read(|doc| doc.user(user_id).map(User::from))
            .await
    }

    pub async fn settings(&self, user_id: &str) -> Result<UserSettings, DashboardError> {
        self.store
            .read(|doc| doc.user(user_id).map(|u| u.data.settings.clone()))
            .await?
            .ok_or_else(|| DashboardError::UserNotFound {
                user_id: user_id.to_string(),
            })
    }

    /// Sets (or clears) the dashboard background of one account.
    pub async fn update_settings(
        &self,
        user_id: &str,
        background_image: Option<String>,
    ) -> Result<UserSettings, DashboardError> {
        self.store
            .update(|doc| {
                let user = doc.user_mut(user_id).ok_or_else(|| DashboardError::UserNotFound {
                    user_id: user_id.to_string(),
                })?;
                user.data.settings.background_image = background_image;
                Ok(user.data.settings.clone())
            })
            .await
    }
}
