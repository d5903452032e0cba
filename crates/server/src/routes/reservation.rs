use crate::{
    dtos::reservation::{
        CancelReservationResponse, CreateReservationRequest, CreateReservationResponse,
        ReservationResponse,
    },
    error::AppError,
    extractors::{CurrentUser, JsonBody},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::reservation::ReservationService;
use uuid::Uuid;

/// Reserve a car for an inclusive date range
#[utoipa::path(
    post,
    path = "/cars/{id}/reservations",
    params(
        ("id" = Uuid, Path, description = "Car ID")
    ),
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = CreateReservationResponse),
        (status = 400, description = "Missing or malformed dates, or end before start"),
        (status = 401, description = "Unauthorized or not registered"),
        (status = 404, description = "Car not found"),
        (status = 409, description = "Car already reserved in the selected period")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Reservations"
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(car_id): Path<Uuid>,
    JsonBody(body): JsonBody<CreateReservationRequest>,
) -> Result<(StatusCode, Json<CreateReservationResponse>), AppError> {
    // An absent date reaches the engine as blank, after the car lookup
    let id = ReservationService::create_reservation(
        &state.db,
        car_id,
        &identity,
        body.start_date.as_deref().unwrap_or_default(),
        body.end_date.as_deref().unwrap_or_default(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(CreateReservationResponse { id })))
}

/// List reservations visible to the caller
///
/// Admins see every reservation with its renter; other users see their own.
#[utoipa::path(
    get,
    path = "/reservations",
    responses(
        (status = 200, description = "Reservations, latest start date first", body = Vec<ReservationResponse>),
        (status = 401, description = "Unauthorized or not registered")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Reservations"
)]
pub async fn list_reservations(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<Vec<ReservationResponse>>, AppError> {
    let reservations = ReservationService::list_reservations(&state.db, &identity).await?;

    Ok(Json(
        reservations
            .into_iter()
            .map(ReservationResponse::from)
            .collect(),
    ))
}

/// Cancel a reservation (admin only)
#[utoipa::path(
    post,
    path = "/reservations/{id}/cancel",
    params(
        ("id" = Uuid, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation cancelled", body = CancelReservationResponse),
        (status = 403, description = "Administrator access required"),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Reservation already cancelled")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Reservations"
)]
pub async fn cancel_reservation(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CancelReservationResponse>, AppError> {
    let cancelled = ReservationService::cancel_reservation(&state.db, id, &identity).await?;

    Ok(Json(cancelled.into()))
}
