use crate::models::{IdeaRow, RoomRow, UserRow, UserSummaryRow};
use crate::{Database, Result};
use rusqlite::Connection;
use tracing::debug;

impl Database {
    // -- Users --

    /// Insert a user. A second row with the same email fails with
    /// [`DbError::Duplicate`](crate::DbError::Duplicate).
    pub fn create_user(
        &self,
        name: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
        role: Option<&str>,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO users (name, email, password, role) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![name, email, password, role],
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_email(&self, email: Option<&str>) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_email(conn, email))
    }

    pub fn list_users(&self) -> Result<Vec<UserSummaryRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT name, email, role FROM users")?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(UserSummaryRow {
                        name: row.get(0)?,
                        email: row.get(1)?,
                        role: row.get(2)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Apply each provided field as its own UPDATE, in the order name,
    /// password, role. Every statement commits on its own: if a later one
    /// fails, the earlier ones stay applied.
    pub fn update_user_fields(
        &self,
        email: &str,
        name: Option<&str>,
        password: Option<&str>,
        role: Option<&str>,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            let fields = [
                (UserColumn::Name, name),
                (UserColumn::Password, password),
                (UserColumn::Role, role),
            ];
            for (column, value) in fields {
                if let Some(value) = value {
                    update_user_column(conn, column, email, value)?;
                }
            }
            Ok(())
        })
    }

    pub fn delete_user(&self, email: &str) -> Result<usize> {
        self.with_conn_mut(|conn| {
            let n = conn.execute("DELETE FROM users WHERE email = ?1", [email])?;
            debug!(email, rows = n, "deleted user");
            Ok(n)
        })
    }

    // -- Ideas --

    /// All ideas, newest first. Equal timestamps keep storage order.
    pub fn list_ideas(&self) -> Result<Vec<IdeaRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, content, author, timestamp FROM ideas ORDER BY timestamp DESC",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(IdeaRow {
                        id: row.get(0)?,
                        content: row.get(1)?,
                        author: row.get(2)?,
                        timestamp: row.get(3)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Returns the id assigned by storage.
    pub fn insert_idea(
        &self,
        content: Option<&str>,
        author: Option<&str>,
        timestamp: i64,
    ) -> Result<i64> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO ideas (content, author, timestamp) VALUES (?1, ?2, ?3)",
                rusqlite::params![content, author, timestamp],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn delete_idea(&self, id: i64) -> Result<usize> {
        self.with_conn_mut(|conn| {
            let n = conn.execute("DELETE FROM ideas WHERE id = ?1", [id])?;
            debug!(id, rows = n, "deleted idea");
            Ok(n)
        })
    }

    // -- Rooms --

    pub fn list_rooms(&self) -> Result<Vec<RoomRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, name, timestamp FROM rooms")?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(RoomRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        timestamp: row.get(2)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn insert_room(&self, name: Option<&str>, timestamp: i64) -> Result<i64> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO rooms (name, timestamp) VALUES (?1, ?2)",
                rusqlite::params![name, timestamp],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn rename_room(&self, id: i64, name: Option<&str>) -> Result<usize> {
        self.with_conn_mut(|conn| {
            let n = conn.execute(
                "UPDATE rooms SET name = ?1 WHERE id = ?2",
                rusqlite::params![name, id],
            )?;
            debug!(id, rows = n, "renamed room");
            Ok(n)
        })
    }

    pub fn delete_room(&self, id: i64) -> Result<usize> {
        self.with_conn_mut(|conn| {
            let n = conn.execute("DELETE FROM rooms WHERE id = ?1", [id])?;
            debug!(id, rows = n, "deleted room");
            Ok(n)
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum UserColumn {
    Name,
    Password,
    Role,
}

impl UserColumn {
    // Column names are fixed here, never taken from the request.
    fn update_sql(self) -> &'static str {
        match self {
            UserColumn::Name => "UPDATE users SET name = ?1 WHERE email = ?2",
            UserColumn::Password => "UPDATE users SET password = ?1 WHERE email = ?2",
            UserColumn::Role => "UPDATE users SET role = ?1 WHERE email = ?2",
        }
    }
}

fn update_user_column(
    conn: &Connection,
    column: UserColumn,
    email: &str,
    value: &str,
) -> Result<usize> {
    let n = conn.execute(column.update_sql(), [value, email])?;
    debug!(email, ?column, rows = n, "updated user");
    Ok(n)
}

fn query_user_by_email(conn: &Connection, email: Option<&str>) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, name, email, password, role FROM users WHERE email = ?1")?;

    let row = stmt
        .query_row([email], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                password: row.get(3)?,
                role: row.get(4)?,
            })
        })
        .optional()?;

    Ok(row)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
