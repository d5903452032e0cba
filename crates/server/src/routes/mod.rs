pub mod car;
pub mod health;
pub mod reservation;
pub mod root;
pub mod user;

use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Routes reachable without a bearer token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
        .route("/cars", get(car::list_cars))
        .route("/cars/{id}", get(car::get_car))
}

/// Routes that expect validated token claims in the request extensions
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(user::register))
        .route("/users/me", get(user::me))
        .route("/cars", post(car::create_car))
        .route("/cars/{id}", put(car::update_car).delete(car::delete_car))
        .route("/cars/{id}/reservations", post(reservation::create_reservation))
        .route("/reservations", get(reservation::list_reservations))
        .route(
            "/reservations/{id}/cancel",
            post(reservation::cancel_reservation),
        )
}
