use crate::{
    dtos::user::{RegisterRequest, UserResponse},
    error::AppError,
    extractors::{JsonBody, Subject},
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::user::{NewUser, UserService};

/// Registers the caller's identity as a local user account
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Missing email or name"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 409, description = "Identity or email already registered")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Users"
)]
pub async fn register(
    State(state): State<AppState>,
    Subject(subject): Subject,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let is_admin = subject == *state.admin_subject;
    let user = UserService::register(
        &state.db,
        NewUser {
            subject,
            email: body.email,
            name: body.name,
            is_admin,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Returns the account registered for the caller's identity
#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Current account", body = UserResponse),
        (status = 401, description = "Unauthorized or not registered")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Users"
)]
pub async fn me(
    State(state): State<AppState>,
    Subject(subject): Subject,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::find_by_subject(&state.db, &subject)
        .await?
        .ok_or(AppError::Unregistered)?;

    Ok(Json(user.into()))
}
