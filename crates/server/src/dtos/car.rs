use database::{
    entities::cars,
    services::car::{CarChanges, NewCar},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct CarResponse {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i16,
    pub price_per_day: f64,
    pub available: bool,
}

impl From<cars::Model> for CarResponse {
    fn from(car: cars::Model) -> Self {
        Self {
            id: car.id,
            make: car.make,
            model: car.model,
            year: car.year,
            price_per_day: car.price_per_day,
            available: car.available,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCarRequest {
    pub make: String,
    pub model: String,
    pub year: i16,
    pub price_per_day: f64,

    #[serde(default = "default_available")]
    pub available: bool,
}

impl From<CreateCarRequest> for NewCar {
    fn from(req: CreateCarRequest) -> Self {
        Self {
            make: req.make,
            model: req.model,
            year: req.year,
            price_per_day: req.price_per_day,
            available: req.available,
        }
    }
}

/// Admin edit; omitted fields keep their current value
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCarRequest {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i16>,
    pub price_per_day: Option<f64>,
    pub available: Option<bool>,
}

impl From<UpdateCarRequest> for CarChanges {
    fn from(req: UpdateCarRequest) -> Self {
        Self {
            make: req.make,
            model: req.model,
            year: req.year,
            price_per_day: req.price_per_day,
            available: req.available,
        }
    }
}

fn default_available() -> bool {
    true
}
