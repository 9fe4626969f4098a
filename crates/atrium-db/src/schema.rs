use rusqlite::Connection;
use tracing::info;

use crate::Result;

/// Create the three tables if they are missing. Existing tables are left
/// alone; there is no version tracking.
pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            email       TEXT UNIQUE NOT NULL,
            password    TEXT NOT NULL,
            role        TEXT DEFAULT 'user'
        );

        CREATE TABLE IF NOT EXISTS ideas (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            content     TEXT NOT NULL,
            author      TEXT NOT NULL,
            timestamp   INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS rooms (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            timestamp   INTEGER NOT NULL
        );
        ",
    )?;

    info!("Database schema ready");
    Ok(())
}
