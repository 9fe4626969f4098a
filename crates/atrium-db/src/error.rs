use rusqlite::ffi;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A UNIQUE or PRIMARY KEY constraint rejected the write.
    #[error("duplicate value: {0}")]
    Duplicate(String),

    #[error("sqlite error: {0}")]
    Sqlite(rusqlite::Error),

    #[error("failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, msg)
                if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                DbError::Duplicate(msg.clone().unwrap_or_else(|| e.to_string()))
            }
            _ => DbError::Sqlite(err),
        }
    }
}

impl DbError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, DbError::Duplicate(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (k TEXT UNIQUE NOT NULL);").unwrap();
        conn
    }

    #[test]
    fn unique_violation_maps_to_duplicate() {
        let conn = conn();
        conn.execute("INSERT INTO t (k) VALUES ('a')", []).unwrap();
        let err: DbError = conn
            .execute("INSERT INTO t (k) VALUES ('a')", [])
            .unwrap_err()
            .into();
        assert!(err.is_duplicate(), "got {err:?}");
    }

    #[test]
    fn not_null_violation_stays_generic() {
        let conn = conn();
        let err: DbError = conn
            .execute("INSERT INTO t (k) VALUES (NULL)", [])
            .unwrap_err()
            .into();
        assert!(matches!(err, DbError::Sqlite(_)), "got {err:?}");
    }
}
