use crate::routes::{car, health, reservation, root, user};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "jwt",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        user::register,
        user::me,
        car::list_cars,
        car::get_car,
        car::create_car,
        car::update_car,
        car::delete_car,
        reservation::create_reservation,
        reservation::list_reservations,
        reservation::cancel_reservation
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service status endpoints"),
        (name = "Users", description = "Account registration"),
        (name = "Cars", description = "Car catalog"),
        (name = "Reservations", description = "Booking and cancellation"),
    ),
    info(
        title = "Car Rental API",
        version = "1.0.0",
        description = "Car catalog and reservation API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_reservation_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/cars/{id}/reservations"));
        assert!(paths.contains_key("/reservations"));
        assert!(paths.contains_key("/reservations/{id}/cancel"));
        assert!(
            doc.components
                .as_ref()
                .is_some_and(|c| c.security_schemes.contains_key("jwt"))
        );
    }
}
