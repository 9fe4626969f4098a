//! Database row types. These map directly to SQLite rows and stay separate
//! from the atrium-types wire models so the DB layer has no serde dependency.

pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

/// Columns returned by the user listing. No id, no password.
pub struct UserSummaryRow {
    pub name: String,
    pub email: String,
    pub role: Option<String>,
}

pub struct IdeaRow {
    pub id: i64,
    pub content: String,
    pub author: String,
    pub timestamp: i64,
}

pub struct RoomRow {
    pub id: i64,
    pub name: String,
    pub timestamp: i64,
}
