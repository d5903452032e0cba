use crate::m20251019_000001_create_all_tables::{Cars, Reservations};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Conflict checks filter on car, status and the date window
        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_car_status_dates")
                    .table(Reservations::Table)
                    .col(Reservations::CarId)
                    .col(Reservations::Status)
                    .col(Reservations::StartDate)
                    .col(Reservations::EndDate)
                    .to_owned(),
            )
            .await?;

        // Non-admin listings filter on the renter
        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_user_id")
                    .table(Reservations::Table)
                    .col(Reservations::UserId)
                    .to_owned(),
            )
            .await?;

        // Catalog is listed by make, then model
        manager
            .create_index(
                Index::create()
                    .name("idx_cars_make_model")
                    .table(Cars::Table)
                    .col(Cars::Make)
                    .col(Cars::Model)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_cars_make_model")
                    .table(Cars::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_reservations_user_id")
                    .table(Reservations::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_reservations_car_status_dates")
                    .table(Reservations::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
