use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::{debug, info};

use atrium_types::api::{LoginRequest, RegisterRequest, RegisterResponse, UserResponse};

use crate::error::ApiError;
use crate::{AppState, blocking};

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let role = req.role_or_default();
    let RegisterRequest {
        name,
        email,
        password,
        ..
    } = req;

    let user = UserResponse {
        name: name.clone(),
        email: email.clone(),
        role: role.clone(),
    };

    // Password is stored as sent; no hashing.
    blocking(&state, move |db| {
        db.create_user(
            name.as_deref(),
            email.as_deref(),
            password.as_deref(),
            role.as_deref(),
        )
    })
    .await?;

    info!("Registered user {:?}", user.email);
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered".to_string(),
            user,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let LoginRequest { email, password } = req;

    let user = blocking(&state, move |db| db.get_user_by_email(email.as_deref())).await?;

    // Verbatim comparison against the stored value.
    match user {
        Some(user) if password.as_deref() == Some(user.password.as_str()) => {
            debug!("Login ok for user {}", user.id);
            Ok(Json(UserResponse {
                name: Some(user.name),
                email: Some(user.email),
                role: user.role,
            }))
        }
        _ => Err(ApiError::InvalidCredentials),
    }
}
