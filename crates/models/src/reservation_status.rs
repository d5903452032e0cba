use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::{EnumIter, IntoEnumIterator};

#[cfg(feature = "database")]
use sea_orm::Value;

/// Lifecycle state of a reservation
///
/// `Active` holds its date range against double-booking. `Cancelled` is
/// terminal and frees the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Active,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the reservation blocks other bookings of the same car
    pub fn holds_slot(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Every status whose reservations block other bookings
    pub fn slot_holders() -> impl Iterator<Item = Self> {
        Self::iter().filter(Self::holds_slot)
    }

    /// Whether `self -> next` is a permitted transition
    pub fn can_transition_to(&self, next: Self) -> bool {
        matches!((self, next), (Self::Active, Self::Cancelled))
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("Unknown reservation status: {s}")),
        }
    }
}

impl Display for ReservationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for ReservationStatus {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::String(Some(s)) => s.parse().map_err(|_| sea_orm::sea_query::ValueTypeErr),
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "ReservationStatus".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::String
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::Text
    }
}

#[cfg(feature = "database")]
impl From<ReservationStatus> for Value {
    fn from(status: ReservationStatus) -> Self {
        Value::String(Some(Box::new(status.as_str().to_string())))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for ReservationStatus {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        let val: String = res.try_get_by(index)?;

        val.parse().map_err(|e: String| {
            sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                "Failed to decode ReservationStatus: {e}"
            )))
        })
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for ReservationStatus {
    fn null() -> Value {
        Value::String(None)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_status_string_form() {
        for status in ReservationStatus::iter() {
            assert_eq!(status.as_str().parse::<ReservationStatus>(), Ok(status));
        }
        assert!("ACTIVE".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn test_only_active_holds_slot() {
        assert!(ReservationStatus::Active.holds_slot());
        assert!(!ReservationStatus::Cancelled.holds_slot());
        assert_eq!(
            ReservationStatus::slot_holders().collect::<Vec<_>>(),
            vec![ReservationStatus::Active]
        );
    }

    #[test]
    fn test_cancelled_is_terminal() {
        assert!(ReservationStatus::Active.can_transition_to(ReservationStatus::Cancelled));
        for next in ReservationStatus::iter() {
            assert!(!ReservationStatus::Cancelled.can_transition_to(next));
        }
        assert!(!ReservationStatus::Active.can_transition_to(ReservationStatus::Active));
    }
}
