use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use atrium_types::api::{CreateIdeaRequest, IdeaResponse, MessageResponse};

use crate::error::ApiError;
use crate::{AppState, blocking, now_millis};

pub async fn list_ideas(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = blocking(&state, |db| db.list_ideas()).await?;

    let ideas: Vec<IdeaResponse> = rows
        .into_iter()
        .map(|row| IdeaResponse {
            id: row.id,
            content: row.content,
            author: row.author,
            timestamp: row.timestamp,
        })
        .collect();

    Ok(Json(ideas))
}

pub async fn create_idea(
    State(state): State<AppState>,
    Json(req): Json<CreateIdeaRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let CreateIdeaRequest { content, author } = req;
    let timestamp = now_millis();

    let (id, content, author) = blocking(&state, move |db| {
        let id = db.insert_idea(content.as_deref(), author.as_deref(), timestamp)?;
        Ok((id, content, author))
    })
    .await?;

    // Both columns are NOT NULL, so a successful insert had both values.
    Ok((
        StatusCode::CREATED,
        Json(IdeaResponse {
            id,
            content: content.unwrap_or_default(),
            author: author.unwrap_or_default(),
            timestamp,
        }),
    ))
}

pub async fn delete_idea(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    blocking(&state, move |db| db.delete_idea(id)).await?;
    Ok(Json(MessageResponse::new("Idea deleted")))
}
