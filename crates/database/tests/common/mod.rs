#![allow(dead_code)]

use database::{
    entities::cars,
    services::{
        car::{CarService, NewCar},
        user::{NewUser, UserService},
    },
};
use migration::{Migrator, MigratorTrait};
use models::identity::Identity;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh in-memory database with all migrations applied
///
/// A single pooled connection keeps the in-memory database alive and makes
/// concurrent transactions queue behind each other.
pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub async fn register(db: &DatabaseConnection, subject: &str, is_admin: bool) -> Identity {
    let user = UserService::register(
        db,
        NewUser {
            subject: subject.to_string(),
            email: format!("{subject}@example.com"),
            name: subject.to_string(),
            is_admin,
        },
    )
    .await
    .expect("Failed to register user");

    UserService::identity(&user)
}

pub async fn add_car(db: &DatabaseConnection, make: &str, model: &str) -> cars::Model {
    CarService::create_car(
        db,
        NewCar {
            make: make.to_string(),
            model: model.to_string(),
            year: 2020,
            price_per_day: 120.0,
            available: true,
        },
    )
    .await
    .expect("Failed to add car")
}
