use crate::{
    entities::cars,
    error::ServiceError,
    services::user::{NewUser, UserService},
};
use chrono::Utc;
use log::info;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait, PaginatorTrait};
use uuid::Uuid;

/// Demo catalog inserted into an empty database: make, model, year, price per day
const DEMO_CARS: [(&str, &str, i16, f64); 4] = [
    ("Toyota", "Corolla", 2020, 120.0),
    ("Skoda", "Octavia", 2019, 110.0),
    ("BMW", "3", 2021, 220.0),
    ("Kia", "Ceed", 2018, 95.0),
];

pub const ADMIN_EMAIL: &str = "admin@example.com";

pub struct SeedService;

impl SeedService {
    /// Ensures the admin account and demo cars exist
    ///
    /// Safe to run on every start: existing rows are left alone.
    pub async fn seed(db: &DatabaseConnection, admin_subject: &str) -> Result<(), ServiceError> {
        if UserService::find_by_email(db, ADMIN_EMAIL).await?.is_none()
            && UserService::find_by_subject(db, admin_subject)
                .await?
                .is_none()
        {
            UserService::register(
                db,
                NewUser {
                    subject: admin_subject.to_string(),
                    email: ADMIN_EMAIL.to_string(),
                    name: "Admin".to_string(),
                    is_admin: true,
                },
            )
            .await?;
        }

        if cars::Entity::find().count(db).await? == 0 {
            let now = Utc::now().naive_utc();
            let demo_cars = DEMO_CARS
                .iter()
                .map(|&(make, model, year, price_per_day)| cars::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    make: Set(make.to_string()),
                    model: Set(model.to_string()),
                    year: Set(year),
                    price_per_day: Set(price_per_day),
                    available: Set(true),
                    created_at: Set(now),
                    updated_at: Set(now),
                });

            cars::Entity::insert_many(demo_cars).exec(db).await?;
            info!("Seeded {} demo cars", DEMO_CARS.len());
        }

        Ok(())
    }
}
