use crate::entities::{User, UserId};
use crate::errors::DomainError;
use async_trait::async_trait;

/// Repository trait - defines what we need from persistence layer
/// This is a PORT in hexagonal architecture
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a user. A user without an id gets a fresh, never reused one;
    /// a user with an id replaces (or recreates) the stored record.
    async fn save(&self, user: &User) -> Result<User, DomainError>;
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;
    async fn exists_by_id(&self, id: UserId) -> Result<bool, DomainError>;
    /// Removing an unknown id is not an error.
    async fn delete_by_id(&self, id: UserId) -> Result<(), DomainError>;
    async fn delete_all(&self) -> Result<(), DomainError>;
    async fn count(&self) -> Result<u64, DomainError>;
}
