use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use atrium_types::api::{CreateRoomRequest, MessageResponse, RoomResponse, UpdateRoomRequest};

use crate::error::ApiError;
use crate::{AppState, blocking, now_millis};

pub async fn list_rooms(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = blocking(&state, |db| db.list_rooms()).await?;

    let rooms: Vec<RoomResponse> = rows
        .into_iter()
        .map(|row| RoomResponse {
            id: row.id,
            name: row.name,
            timestamp: row.timestamp,
        })
        .collect();

    Ok(Json(rooms))
}

pub async fn create_room(
    State(state): State<AppState>,
    Json(req): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let timestamp = now_millis();
    let name = req.name;

    let (id, name) = blocking(&state, move |db| {
        let id = db.insert_room(name.as_deref(), timestamp)?;
        Ok((id, name))
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(RoomResponse {
            id,
            name: name.unwrap_or_default(),
            timestamp,
        }),
    ))
}

/// Replaces the name unconditionally. Unknown ids are a silent no-op.
pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateRoomRequest>,
) -> Result<impl IntoResponse, ApiError> {
    blocking(&state, move |db| db.rename_room(id, req.name.as_deref())).await?;
    Ok(Json(MessageResponse::new("Room updated")))
}

pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    blocking(&state, move |db| db.delete_room(id)).await?;
    Ok(Json(MessageResponse::new("Room deleted")))
}
