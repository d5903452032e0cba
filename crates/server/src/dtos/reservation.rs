use crate::dtos::car::CarResponse;
use chrono::{NaiveDate, NaiveDateTime};
use database::{entities::reservations, services::reservation::ReservationDetails};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Dates are taken as raw, optional strings so missing or malformed dates
/// surface as a validation error rather than a deserialization failure
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateReservationRequest {
    #[serde(default)]
    #[schema(example = "2024-06-01")]
    pub start_date: Option<String>,
    #[serde(default)]
    #[schema(example = "2024-06-05")]
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateReservationResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RenterResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationResponse {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// `active` or `cancelled`
    pub status: String,
    pub days: i64,
    pub total_price: f64,
    pub created_at: NaiveDateTime,
    pub cancelled_at: Option<NaiveDateTime>,
    pub car: CarResponse,
    /// Present only in admin listings
    pub renter: Option<RenterResponse>,
}

impl From<ReservationDetails> for ReservationResponse {
    fn from(details: ReservationDetails) -> Self {
        let ReservationDetails {
            reservation,
            car,
            renter,
        } = details;

        let days = reservation.range().days();
        Self {
            id: reservation.id,
            start_date: reservation.start_date,
            end_date: reservation.end_date,
            status: reservation.status.to_string(),
            days,
            total_price: days as f64 * car.price_per_day,
            created_at: reservation.created_at,
            cancelled_at: reservation.cancelled_at,
            car: car.into(),
            renter: renter.map(|user| RenterResponse {
                id: user.id,
                name: user.name,
                email: user.email,
            }),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CancelReservationResponse {
    pub id: Uuid,
    pub status: String,
    pub user_id: Uuid,
    pub cancelled_at: Option<NaiveDateTime>,
    pub cancelled_by: Option<Uuid>,
}

impl From<reservations::Model> for CancelReservationResponse {
    fn from(reservation: reservations::Model) -> Self {
        Self {
            id: reservation.id,
            status: reservation.status.to_string(),
            user_id: reservation.user_id,
            cancelled_at: reservation.cancelled_at,
            cancelled_by: reservation.cancelled_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::entities::{cars, users};
    use models::reservation_status::ReservationStatus;

    fn details(renter: Option<users::Model>) -> ReservationDetails {
        let created = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let car = cars::Model {
            id: Uuid::new_v4(),
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2020,
            price_per_day: 120.0,
            available: true,
            created_at: created,
            updated_at: created,
        };
        let reservation = reservations::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            car_id: car.id,
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
            status: ReservationStatus::Active,
            created_at: created,
            cancelled_at: None,
            cancelled_by: None,
        };

        ReservationDetails {
            reservation,
            car,
            renter,
        }
    }

    #[test]
    fn test_price_covers_both_endpoints() {
        let response = ReservationResponse::from(details(None));
        assert_eq!(response.days, 5);
        assert_eq!(response.total_price, 600.0);
        assert_eq!(response.status, "active");
        assert!(response.renter.is_none());
    }

    #[test]
    fn test_renter_is_passed_through() {
        let created = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let renter = users::Model {
            id: Uuid::new_v4(),
            subject: "alice".to_string(),
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
            is_admin: false,
            created_at: created,
        };

        let response = ReservationResponse::from(details(Some(renter.clone())));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["renter"]["email"], "alice@example.com");
        assert_eq!(json["renter"]["id"], renter.id.to_string());
        assert!(json["renter"].get("subject").is_none());
        assert_eq!(json["start_date"], "2024-06-01");
    }
}
