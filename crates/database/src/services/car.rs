use crate::{
    entities::{cars, reservations},
    error::ServiceError,
};
use chrono::Utc;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, TransactionTrait,
};
use uuid::Uuid;

/// Fields of a car to be added to the catalog
#[derive(Clone, Debug, PartialEq)]
pub struct NewCar {
    pub make: String,
    pub model: String,
    pub year: i16,
    pub price_per_day: f64,
    pub available: bool,
}

/// Partial edit of a catalog entry; `None` leaves a field untouched
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CarChanges {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i16>,
    pub price_per_day: Option<f64>,
    pub available: Option<bool>,
}

pub struct CarService;

impl CarService {
    /// Earliest and latest model years accepted in the catalog
    const YEAR_RANGE: std::ops::RangeInclusive<i16> = 1886..=2100;

    /// Selects one car with an exclusive row lock (`FOR UPDATE` on PostgreSQL)
    ///
    /// Bookings, edits and deletions of a car all take this lock first, so
    /// they run one after the other for the same car.
    pub(crate) fn lock_car(car_id: Uuid) -> Select<cars::Entity> {
        cars::Entity::find_by_id(car_id).lock_exclusive()
    }

    /// All cars, ordered by make then model
    pub async fn list_cars(db: &DatabaseConnection) -> Result<Vec<cars::Model>, DbErr> {
        cars::Entity::find()
            .order_by_asc(cars::Column::Make)
            .order_by_asc(cars::Column::Model)
            .all(db)
            .await
    }

    pub async fn get_car(db: &DatabaseConnection, car_id: Uuid) -> Result<cars::Model, ServiceError> {
        cars::Entity::find_by_id(car_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("car"))
    }

    pub async fn count_cars(db: &DatabaseConnection) -> Result<u64, DbErr> {
        cars::Entity::find().count(db).await
    }

    pub async fn create_car(
        db: &DatabaseConnection,
        new_car: NewCar,
    ) -> Result<cars::Model, ServiceError> {
        let make = Self::validate_name("make", &new_car.make)?;
        let model = Self::validate_name("model", &new_car.model)?;
        Self::validate_year(new_car.year)?;
        Self::validate_price(new_car.price_per_day)?;

        let now = Utc::now().naive_utc();
        let car = cars::ActiveModel {
            id: Set(Uuid::new_v4()),
            make: Set(make),
            model: Set(model),
            year: Set(new_car.year),
            price_per_day: Set(new_car.price_per_day),
            available: Set(new_car.available),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;

        info!("Added car {} ({} {} {})", car.id, car.make, car.model, car.year);
        Ok(car)
    }

    /// Applies an admin edit to an existing car
    pub async fn update_car(
        db: &DatabaseConnection,
        car_id: Uuid,
        changes: CarChanges,
    ) -> Result<cars::Model, ServiceError> {
        let txn = db.begin().await?;

        let car = Self::lock_car(car_id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::NotFound("car"))?;

        let mut active: cars::ActiveModel = car.into();
        if let Some(make) = changes.make {
            active.make = Set(Self::validate_name("make", &make)?);
        }
        if let Some(model) = changes.model {
            active.model = Set(Self::validate_name("model", &model)?);
        }
        if let Some(year) = changes.year {
            Self::validate_year(year)?;
            active.year = Set(year);
        }
        if let Some(price_per_day) = changes.price_per_day {
            Self::validate_price(price_per_day)?;
            active.price_per_day = Set(price_per_day);
        }
        if let Some(available) = changes.available {
            active.available = Set(available);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        info!("Updated car {}", updated.id);
        Ok(updated)
    }

    /// Permanently removes a car that has never been booked
    ///
    /// Any reservation, cancelled ones included, counts as booking history
    /// and blocks the deletion.
    pub async fn delete_car(db: &DatabaseConnection, car_id: Uuid) -> Result<(), ServiceError> {
        let txn = db.begin().await?;

        let car = Self::lock_car(car_id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::NotFound("car"))?;

        let history = reservations::Entity::find()
            .filter(reservations::Column::CarId.eq(car.id))
            .count(&txn)
            .await?;

        if history > 0 {
            debug!("Refusing to delete car {car_id}: {history} reservation(s) on record");
            return Err(ServiceError::Conflict(format!(
                "car {car_id} has booking history and cannot be deleted"
            )));
        }

        car.delete(&txn).await?;
        txn.commit().await?;

        info!("Deleted car {car_id}");
        Ok(())
    }

    fn validate_name(field: &str, value: &str) -> Result<String, ServiceError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ServiceError::InvalidInput(format!("{field} must not be empty")));
        }
        Ok(value.to_string())
    }

    fn validate_year(year: i16) -> Result<(), ServiceError> {
        if !Self::YEAR_RANGE.contains(&year) {
            return Err(ServiceError::InvalidInput(format!(
                "year {year} is outside {}..={}",
                Self::YEAR_RANGE.start(),
                Self::YEAR_RANGE.end()
            )));
        }
        Ok(())
    }

    fn validate_price(price_per_day: f64) -> Result<(), ServiceError> {
        if !price_per_day.is_finite() || price_per_day < 0.0 {
            return Err(ServiceError::InvalidInput(format!(
                "price per day must be a non-negative amount, got {price_per_day}"
            )));
        }
        Ok(())
    }
}
