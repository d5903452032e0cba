use chrono::NaiveDate;
use models::date_range::DateRangeError;
use sea_orm::DbErr;
use thiserror::Error;

/// Failures of the catalog, user and reservation services
///
/// Every variant except [`ServiceError::Database`] is a rejected request that
/// left storage untouched.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed or missing input, e.g. an unparseable date
    #[error("{0}")]
    InvalidInput(String),

    #[error("end date {end} is before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Double-booking, duplicate registration, or deleting a car with history
    #[error("{0}")]
    Conflict(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    /// The acting identity lacks the admin role
    #[error("{0}")]
    Forbidden(&'static str),

    #[error(transparent)]
    Database(#[from] DbErr),
}

impl From<DateRangeError> for ServiceError {
    fn from(err: DateRangeError) -> Self {
        match err {
            DateRangeError::Missing | DateRangeError::InvalidDate(_) => {
                Self::InvalidInput(err.to_string())
            }
            DateRangeError::Reversed { start, end } => Self::InvalidRange { start, end },
        }
    }
}
