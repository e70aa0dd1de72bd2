use async_trait::async_trait;
use domain::{DomainError, User, UserId, UserRepository};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// Process-local user store. Contents are lost when the process exits.
///
/// Ids come from a monotonic counter that `delete_all` does not reset.
pub struct InMemoryUserRepository {
    users: RwLock<BTreeMap<UserId, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<User, DomainError> {
        let mut stored = user.clone();
        let id = match stored.id {
            Some(id) => {
                // Keep the counter ahead of ids that were supplied from outside
                self.next_id.fetch_max(id.saturating_add(1), Ordering::SeqCst);
                id
            }
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        };
        stored.id = Some(id);

        self.users.write().insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.read().values().cloned().collect())
    }

    async fn exists_by_id(&self, id: UserId) -> Result<bool, DomainError> {
        Ok(self.users.read().contains_key(&id))
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), DomainError> {
        self.users.write().remove(&id);
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), DomainError> {
        self.users.write().clear();
        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.users.read().len() as u64)
    }
}
