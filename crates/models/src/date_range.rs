use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;

/// Reasons a pair of raw dates cannot form a [`DateRange`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("both a start date and an end date are required")]
    Missing,

    /// One of the inputs is not a `YYYY-MM-DD` calendar date
    #[error("'{0}' is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("end date {end} is before start date {start}")]
    Reversed { start: NaiveDate, end: NaiveDate },
}

/// An inclusive range of calendar days
///
/// Both endpoints belong to the range, so a booking ending on a given day
/// and another starting on that same day overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new range if `end` is not before `start`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (end >= start).then_some(Self { start, end })
    }

    /// Parses both endpoints from ISO-8601 date strings
    ///
    /// Both dates are parsed before the ordering is checked, so a malformed
    /// date is always reported ahead of a reversed range.
    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;

        Self::new(start, end).ok_or(DateRangeError::Reversed { start, end })
    }

    /// Inclusive intersection test
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Number of rental days, counting both endpoints
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Strict `YYYY-MM-DD`; chrono alone would also take `2024-6-1`
fn parse_date(raw: &str) -> Result<NaiveDate, DateRangeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DateRangeError::Missing);
    }

    let well_formed = trimmed.len() == 10
        && trimmed.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(DateRangeError::InvalidDate(raw.to_string()));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| DateRangeError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_rejects_reversed_range() {
        assert!(DateRange::new(date(2024, 6, 5), date(2024, 6, 1)).is_none());
        assert!(DateRange::new(date(2024, 6, 1), date(2024, 6, 1)).is_some());
    }

    #[test]
    fn test_parse() {
        let range = DateRange::parse("2024-06-01", " 2024-06-05 ").unwrap();
        assert_eq!(range.start, date(2024, 6, 1));
        assert_eq!(range.end, date(2024, 6, 5));
        assert_eq!(range.days(), 5);

        assert!(matches!(
            DateRange::parse("2024-02-30", "2024-03-01"),
            Err(DateRangeError::InvalidDate(_))
        ));
        assert!(matches!(
            DateRange::parse("06/01/2024", "2024-06-05"),
            Err(DateRangeError::InvalidDate(_))
        ));
        assert_eq!(
            DateRange::parse("2024-06-01", ""),
            Err(DateRangeError::Missing)
        );
        assert_eq!(
            DateRange::parse("  ", "2024-06-05"),
            Err(DateRangeError::Missing)
        );
    }

    #[test]
    fn test_parse_requires_zero_padding() {
        for raw in ["2024-6-1", "2024-06-1", "24-06-01", "2024-06-01T00:00", "2024/06/01"] {
            assert_eq!(
                DateRange::parse(raw, "2024-06-05"),
                Err(DateRangeError::InvalidDate(raw.to_string())),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_invalid_date_wins_over_reversed() {
        assert!(matches!(
            DateRange::parse("2024-06-10", "not a date"),
            Err(DateRangeError::InvalidDate(_))
        ));
        assert_eq!(
            DateRange::parse("2024-06-10", "2024-06-01"),
            Err(DateRangeError::Reversed {
                start: date(2024, 6, 10),
                end: date(2024, 6, 1),
            })
        );
    }

    #[test]
    fn test_overlaps_is_inclusive() {
        let booked = DateRange::new(date(2024, 6, 1), date(2024, 6, 5)).unwrap();

        let shared_boundary = DateRange::new(date(2024, 6, 5), date(2024, 6, 10)).unwrap();
        assert!(booked.overlaps(&shared_boundary));
        assert!(shared_boundary.overlaps(&booked));

        let next_day = DateRange::new(date(2024, 6, 6), date(2024, 6, 10)).unwrap();
        assert!(!booked.overlaps(&next_day));

        let inside = DateRange::new(date(2024, 6, 2), date(2024, 6, 3)).unwrap();
        assert!(booked.overlaps(&inside));
        assert!(inside.overlaps(&booked));
    }

    #[test]
    fn test_display() {
        let range = DateRange::new(date(2024, 6, 1), date(2024, 6, 5)).unwrap();
        assert_eq!(
            DateRangeError::InvalidDate("junk".to_string()).to_string(),
            "'junk' is not a valid date (expected YYYY-MM-DD)"
        );
        assert_eq!(range.to_string(), "2024-06-01..=2024-06-05");
    }
}
