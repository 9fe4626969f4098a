use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use atrium_types::api::{MessageResponse, UpdateUserRequest, UserResponse};

use crate::error::ApiError;
use crate::{AppState, blocking};

pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = blocking(&state, |db| db.list_users()).await?;

    let users: Vec<UserResponse> = rows
        .into_iter()
        .map(|row| UserResponse {
            name: Some(row.name),
            email: Some(row.email),
            role: row.role,
        })
        .collect();

    Ok(Json(users))
}

/// Fields that are absent, null or empty are left untouched. There is no
/// existence check: an unknown email updates nothing and still succeeds.
pub async fn update_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = non_empty(req.name);
    let password = non_empty(req.password);
    let role = non_empty(req.role);

    blocking(&state, move |db| {
        db.update_user_fields(&email, name.as_deref(), password.as_deref(), role.as_deref())
    })
    .await?;

    Ok(Json(MessageResponse::new("User updated")))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    blocking(&state, move |db| db.delete_user(&email)).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
