pub mod error;
pub mod models;
pub mod queries;
pub mod schema;

use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

pub use error::DbError;

pub type Result<T> = std::result::Result<T, DbError>;

/// How long a connection waits on a locked database before giving up.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the SQLite file. Every call opens its own connection and drops
/// it before returning, on success and error alike.
///
/// Writers from this process take `write_lock` first. SQLite returns
/// `SQLITE_BUSY` without waiting when two connections both try to upgrade a
/// read lock to a write lock, so only one writer may be in flight at a time.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        // Bootstrap connection, dropped once the schema exists.
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        schema::run(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run read-only work on a connection scoped to this call.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        debug!("Opened read connection to {}", self.path.display());
        f(&conn)
    }

    /// Run mutating work on a connection scoped to this call. Statements run
    /// in autocommit mode, so each one is committed as soon as it finishes.
    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        // The lock guards no data, so a panic in another writer leaves
        // nothing to repair.
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        debug!("Opened write connection to {}", self.path.display());
        f(&conn)
    }
}
