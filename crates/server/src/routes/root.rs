use crate::{error::AppError, state::AppState};
use axum::{Json, extract::State};
use database::services::car::CarService;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct IndexResponse {
    pub service: String,
    pub version: String,
    pub cars_count: u64,
}

/// Service name, version and catalog size
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service summary", body = IndexResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Health"
)]
pub async fn root(State(state): State<AppState>) -> Result<Json<IndexResponse>, AppError> {
    let cars_count = CarService::count_cars(&state.db).await?;

    Ok(Json(IndexResponse {
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cars_count,
    }))
}
