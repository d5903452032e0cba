use crate::{
    dtos::car::{CarResponse, CreateCarRequest, UpdateCarRequest},
    error::AppError,
    extractors::{CurrentUser, JsonBody},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::car::CarService;
use uuid::Uuid;

/// List all cars, ordered by make and model
#[utoipa::path(
    get,
    path = "/cars",
    responses(
        (status = 200, description = "Car catalog", body = Vec<CarResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Cars"
)]
pub async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<CarResponse>>, AppError> {
    let cars = CarService::list_cars(&state.db).await?;

    Ok(Json(cars.into_iter().map(CarResponse::from).collect()))
}

/// Get a specific car by ID
#[utoipa::path(
    get,
    path = "/cars/{id}",
    params(
        ("id" = Uuid, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Car found", body = CarResponse),
        (status = 404, description = "Car not found")
    ),
    tag = "Cars"
)]
pub async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CarResponse>, AppError> {
    let car = CarService::get_car(&state.db, id).await?;

    Ok(Json(car.into()))
}

/// Add a car to the catalog (admin only)
#[utoipa::path(
    post,
    path = "/cars",
    request_body = CreateCarRequest,
    responses(
        (status = 201, description = "Car created", body = CarResponse),
        (status = 400, description = "Invalid car details"),
        (status = 403, description = "Administrator access required")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Cars"
)]
pub async fn create_car(
    State(state): State<AppState>,
    user: CurrentUser,
    JsonBody(body): JsonBody<CreateCarRequest>,
) -> Result<(StatusCode, Json<CarResponse>), AppError> {
    user.require_admin()?;
    let car = CarService::create_car(&state.db, body.into()).await?;

    Ok((StatusCode::CREATED, Json(car.into())))
}

/// Edit a car (admin only)
#[utoipa::path(
    put,
    path = "/cars/{id}",
    params(
        ("id" = Uuid, Path, description = "Car ID")
    ),
    request_body = UpdateCarRequest,
    responses(
        (status = 200, description = "Car updated", body = CarResponse),
        (status = 400, description = "Invalid car details"),
        (status = 403, description = "Administrator access required"),
        (status = 404, description = "Car not found")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Cars"
)]
pub async fn update_car(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    JsonBody(body): JsonBody<UpdateCarRequest>,
) -> Result<Json<CarResponse>, AppError> {
    user.require_admin()?;
    let car = CarService::update_car(&state.db, id, body.into()).await?;

    Ok(Json(car.into()))
}

/// Delete a car that has never been booked (admin only)
#[utoipa::path(
    delete,
    path = "/cars/{id}",
    params(
        ("id" = Uuid, Path, description = "Car ID")
    ),
    responses(
        (status = 204, description = "Car deleted"),
        (status = 403, description = "Administrator access required"),
        (status = 404, description = "Car not found"),
        (status = 409, description = "Car has booking history")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Cars"
)]
pub async fn delete_car(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    user.require_admin()?;
    CarService::delete_car(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
