use crate::{
    entities::{cars, reservations, users},
    error::ServiceError,
    services::car::CarService,
};
use chrono::Utc;
use log::{debug, info};
use models::{
    date_range::DateRange, identity::Identity, reservation_status::ReservationStatus,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// A reservation joined with the car it books and, for admin viewers, its renter
#[derive(Clone, Debug, PartialEq)]
pub struct ReservationDetails {
    pub reservation: reservations::Model,
    pub car: cars::Model,
    pub renter: Option<users::Model>,
}

/// Booking, cancellation and listing of reservations
///
/// Every write runs in its own transaction; dropping the transaction on an
/// early return rolls it back, so a rejected request never leaves a partial
/// write behind.
pub struct ReservationService;

impl ReservationService {
    /// Books `car_id` for the inclusive range `[start_date, end_date]`
    ///
    /// The car row is locked for the duration of the transaction, so two
    /// concurrent requests for the same car run their conflict checks one
    /// after the other.
    pub async fn create_reservation(
        db: &DatabaseConnection,
        car_id: Uuid,
        identity: &Identity,
        start_date: &str,
        end_date: &str,
    ) -> Result<Uuid, ServiceError> {
        let txn = db.begin().await?;

        let car = CarService::lock_car(car_id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::NotFound("car"))?;

        let range = DateRange::parse(start_date, end_date)?;

        if let Some(existing) = Self::find_conflict(&txn, car.id, &range).await? {
            debug!(
                "Rejected booking of car {} for {range}: overlaps reservation {}",
                car.id, existing.id
            );
            return Err(ServiceError::Conflict(format!(
                "car is already reserved from {} to {}",
                existing.start_date, existing.end_date
            )));
        }

        let reservation = reservations::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(identity.user_id),
            car_id: Set(car.id),
            start_date: Set(range.start),
            end_date: Set(range.end),
            status: Set(ReservationStatus::Active),
            created_at: Set(Utc::now().naive_utc()),
            cancelled_at: Set(None),
            cancelled_by: Set(None),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            "User {} reserved car {} for {range} (reservation {})",
            identity.user_id, car.id, reservation.id
        );
        Ok(reservation.id)
    }

    /// Finds a slot-holding reservation of `car_id` intersecting `range`
    ///
    /// Cancelled reservations never conflict.
    pub async fn find_conflict<C: ConnectionTrait>(
        db: &C,
        car_id: Uuid,
        range: &DateRange,
    ) -> Result<Option<reservations::Model>, DbErr> {
        reservations::Entity::find()
            .filter(reservations::Column::CarId.eq(car_id))
            .filter(reservations::Column::Status.is_in(ReservationStatus::slot_holders()))
            .filter(reservations::Column::StartDate.lte(range.end))
            .filter(reservations::Column::EndDate.gte(range.start))
            .one(db)
            .await
    }

    /// Moves a reservation from active to cancelled
    ///
    /// Only admins may cancel, including for their own bookings. The renter
    /// is kept; the acting admin and the time are recorded alongside.
    pub async fn cancel_reservation(
        db: &DatabaseConnection,
        reservation_id: Uuid,
        identity: &Identity,
    ) -> Result<reservations::Model, ServiceError> {
        if !identity.is_admin {
            debug!(
                "User {} is not allowed to cancel reservation {reservation_id}",
                identity.user_id
            );
            return Err(ServiceError::Forbidden(
                "only administrators may cancel reservations",
            ));
        }

        let txn = db.begin().await?;

        let reservation = reservations::Entity::find_by_id(reservation_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ServiceError::NotFound("reservation"))?;

        if !reservation
            .status
            .can_transition_to(ReservationStatus::Cancelled)
        {
            return Err(ServiceError::Conflict(format!(
                "reservation {reservation_id} is already {}",
                reservation.status
            )));
        }

        let mut active: reservations::ActiveModel = reservation.into();
        active.status = Set(ReservationStatus::Cancelled);
        active.cancelled_at = Set(Some(Utc::now().naive_utc()));
        active.cancelled_by = Set(Some(identity.user_id));
        let cancelled = active.update(&txn).await?;

        txn.commit().await?;

        info!(
            "Admin {} cancelled reservation {} of user {}",
            identity.user_id, cancelled.id, cancelled.user_id
        );
        Ok(cancelled)
    }

    /// Lists reservations visible to `viewer`, latest start date first
    ///
    /// Admins see every reservation together with its renter. Other users
    /// see only their own bookings and no renter details.
    pub async fn list_reservations(
        db: &DatabaseConnection,
        viewer: &Identity,
    ) -> Result<Vec<ReservationDetails>, DbErr> {
        let mut query = reservations::Entity::find();
        if !viewer.is_admin {
            query = query.filter(reservations::Column::UserId.eq(viewer.user_id));
        }

        let rows: Vec<(reservations::Model, cars::Model)> = query
            .order_by_desc(reservations::Column::StartDate)
            .order_by_desc(reservations::Column::CreatedAt)
            .find_also_related(cars::Entity)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(reservation, car)| car.map(|c| (reservation, c)))
            .collect();

        let mut renters: HashMap<Uuid, users::Model> = HashMap::new();
        if viewer.is_admin && !rows.is_empty() {
            let user_ids: HashSet<Uuid> = rows.iter().map(|(r, _)| r.user_id).collect();
            for user in users::Entity::find()
                .filter(users::Column::Id.is_in(user_ids))
                .all(db)
                .await?
            {
                renters.insert(user.id, user);
            }
        }

        let details = rows
            .into_iter()
            .map(|(reservation, car)| {
                let renter = renters.get(&reservation.user_id).cloned();
                ReservationDetails {
                    reservation,
                    car,
                    renter,
                }
            })
            .collect();

        Ok(details)
    }
}
