use crate::entities::{User, UserId};
use crate::errors::DomainError;
use crate::repositories::UserRepository;
use crate::validation::{validate_email, validate_name};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// User Service - Contains business logic
/// This is the APPLICATION LAYER in clean architecture
///
/// Holds no state of its own: every call is evaluated against whatever the
/// injected repository holds at that moment.
#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// Create a new user. Both fields are checked before anything is written.
    #[instrument(name = "user_service.create_user", skip(self))]
    pub async fn create_user(&self, name: &str, email: &str) -> Result<User, DomainError> {
        if !validate_name(Some(name)) {
            return Err(DomainError::empty_name());
        }
        if !validate_email(Some(email)) {
            return Err(DomainError::invalid_email());
        }

        let user = self.user_repository.save(&User::new(name, email)).await?;
        info!(user_id = ?user.id, "Created user");
        Ok(user)
    }

    #[instrument(name = "user_service.find_by_id", skip(self))]
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let user = self.user_repository.find_by_id(id).await?;
        debug!(found = user.is_some(), "Looked up user");
        Ok(user)
    }

    /// Snapshot of every stored user, in repository order.
    #[instrument(name = "user_service.get_all_users", skip(self))]
    pub async fn get_all_users(&self) -> Result<Vec<User>, DomainError> {
        let users = self.user_repository.find_all().await?;
        debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    /// Merge the supplied fields into an existing user.
    ///
    /// Returns `Ok(None)` when `id` is unknown, before looking at the fields.
    /// A blank name is skipped rather than rejected; an invalid email rejects
    /// the whole call and leaves the stored user untouched, including any name
    /// change that came with it.
    #[instrument(name = "user_service.update_user", skip(self))]
    pub async fn update_user(
        &self,
        id: UserId,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, DomainError> {
        let Some(mut user) = self.user_repository.find_by_id(id).await? else {
            debug!("Update target does not exist");
            return Ok(None);
        };

        if email.is_some() && !validate_email(email) {
            return Err(DomainError::invalid_email());
        }

        if let Some(name) = name.filter(|n| validate_name(Some(*n))) {
            user.name = name.to_string();
        }
        if let Some(email) = email {
            user.email = email.to_string();
        }

        let updated = self.user_repository.save(&user).await?;
        info!("Updated user");
        Ok(Some(updated))
    }

    /// Returns whether a user was actually removed.
    #[instrument(name = "user_service.delete_user", skip(self))]
    pub async fn delete_user(&self, id: UserId) -> Result<bool, DomainError> {
        if !self.user_repository.exists_by_id(id).await? {
            return Ok(false);
        }
        self.user_repository.delete_by_id(id).await?;
        info!("Deleted user");
        Ok(true)
    }

    #[instrument(name = "user_service.get_user_count", skip(self))]
    pub async fn get_user_count(&self) -> Result<u64, DomainError> {
        let count = self.user_repository.count().await?;
        debug!(count, "Counted users");
        Ok(count)
    }

    /// Administrative reset, not part of the public resource contract.
    #[instrument(name = "user_service.clear_all", skip(self))]
    pub async fn clear_all(&self) -> Result<(), DomainError> {
        self.user_repository.delete_all().await?;
        info!("Cleared all users");
        Ok(())
    }
}
