use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use domain::DomainError;
use tracing::debug;

pub mod schema;
pub use schema::*;

pub type SqlitePool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

const IN_MEMORY_PATH: &str = ":memory:";

/// How long a connection waits on another writer's lock before failing.
pub const BUSY_TIMEOUT_MS: u32 = 5000;

/// Per-connection PRAGMAs applied when the pool opens a connection.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas {
    busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;",
            self.busy_timeout_ms
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a connection pool on `database_path`.
    ///
    /// Every SQLite `:memory:` connection is its own database, so that path
    /// gets a pool of exactly one connection that is never recycled. File
    /// databases run in WAL mode and wait up to [`BUSY_TIMEOUT_MS`] for locks.
    pub fn new(database_path: &str) -> Result<Self, DomainError> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_path);
        let mut builder = r2d2::Pool::<ConnectionManager<SqliteConnection>>::builder()
            .connection_customizer(Box::new(SqlitePragmas {
                busy_timeout_ms: BUSY_TIMEOUT_MS,
            }));
        if database_path == IN_MEMORY_PATH {
            builder = builder.max_size(1).max_lifetime(None).idle_timeout(None);
        }
        let pool = builder.build(manager).map_err(DomainError::repository)?;
        debug!(database_path, "Opened SQLite pool");
        Ok(Database { pool })
    }

    pub fn in_memory() -> Result<Self, DomainError> {
        Self::new(IN_MEMORY_PATH)
    }

    pub fn init_schema(&self) -> Result<(), DomainError> {
        let mut conn = self.pool.get().map_err(DomainError::repository)?;
        diesel::sql_query(CREATE_USERS_TABLE)
            .execute(&mut conn)
            .map_err(DomainError::repository)?;
        Ok(())
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }
}
