use anyhow::Context;
use config::{Config, StorageBackend};
use domain::*;
use infrastructure::*;
use std::sync::Arc;
use tracing::info;

/// User Application - wires a storage backend into the user service
#[derive(Clone)]
pub struct UserApp {
    pub user_service: UserService,
}

impl UserApp {
    /// SQLite-backed application; the users table is created if missing.
    pub fn new(database_path: &str) -> anyhow::Result<Self> {
        // Infrastructure layer - database setup
        let database = Database::new(database_path)
            .with_context(|| format!("opening SQLite database at {database_path}"))?;
        database
            .init_schema()
            .context("creating users table")?;

        let user_repository: Arc<dyn UserRepository> =
            Arc::new(SqliteUserRepository::new(database.get_pool().clone()));

        info!(database_path, "Using SQLite user store");
        Ok(Self::with_repository(user_repository))
    }

    pub fn in_memory() -> Self {
        info!("Using in-memory user store");
        Self::with_repository(Arc::new(InMemoryUserRepository::new()))
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        match config.storage_backend {
            StorageBackend::Memory => Ok(Self::in_memory()),
            StorageBackend::Sqlite => Self::new(&config.database_path),
        }
    }

    pub fn with_repository(user_repository: Arc<dyn UserRepository>) -> Self {
        Self {
            user_service: UserService::new(user_repository),
        }
    }
}
