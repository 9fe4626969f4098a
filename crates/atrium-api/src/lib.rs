pub mod auth;
pub mod error;
pub mod ideas;
pub mod rooms;
pub mod users;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use atrium_db::Database;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}

impl AppStateInner {
    pub fn new(db: Database) -> AppState {
        Arc::new(Self { db })
    }
}

/// All routes, nested under `/api`.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/users", get(users::list_users))
        .route("/users/{email}", put(users::update_user).delete(users::delete_user))
        .route("/ideas", get(ideas::list_ideas).post(ideas::create_idea))
        .route("/ideas/{id}", delete(ideas::delete_idea))
        .route("/rooms", get(rooms::list_rooms).post(rooms::create_room))
        .route("/rooms/{id}", put(rooms::update_room).delete(rooms::delete_room));

    Router::new().nest("/api", api).with_state(state)
}

/// Run blocking DB work off the async runtime.
pub(crate) async fn blocking<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> atrium_db::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    let result = tokio::task::spawn_blocking(move || f(&state.db)).await?;
    Ok(result?)
}

/// Creation timestamps: wall-clock milliseconds since the Unix epoch.
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
