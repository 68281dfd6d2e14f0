//! Day-granularity date arithmetic.
//!
//! All planning happens on civil calendar days; times of day and time zones
//! never enter the engine.

use std::fmt;

use jiff::{civil::Date, Span};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Returns `date` moved forward by `days` (backwards when negative).
pub fn add_days(date: Date, days: i64) -> Result<Date> {
    let span = Span::new().try_days(days)?;
    Ok(date.checked_add(span)?)
}

/// Returns `date` moved backwards by `days`.
pub fn subtract_days(date: Date, days: i64) -> Result<Date> {
    add_days(date, -days)
}

/// Signed number of days from `from` to `to`.
pub fn days_between(from: Date, to: Date) -> Result<i64> {
    Ok(i64::from(from.until(to)?.get_days()))
}

/// Number of calendar days covered by `[start, end]`, both ends included.
pub fn inclusive_days(start: Date, end: Date) -> Result<i64> {
    Ok(days_between(start, end)? + 1)
}

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    /// Creates a range, rejecting an end before the start.
    pub fn new(start: Date, end: Date) -> Result<Self> {
        if end < start {
            return Err(PlannerError::invalid_input("end_date")
                .with_reason(format!("{end} is before start date {start}")));
        }
        Ok(Self { start, end })
    }

    /// Inclusive intersection test.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Length in days, both ends included.
    pub fn len_days(&self) -> Result<i64> {
        inclusive_days(self.start, self.end)
    }

    /// The same range moved by `days`.
    pub fn shifted(&self, days: i64) -> Result<Self> {
        Ok(Self {
            start: add_days(self.start, days)?,
            end: add_days(self.end, days)?,
        })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} – {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_add_and_subtract_cross_month_and_year() {
        assert_eq!(add_days(date(2025, 1, 30), 3).unwrap(), date(2025, 2, 2));
        assert_eq!(add_days(date(2024, 12, 31), 1).unwrap(), date(2025, 1, 1));
        assert_eq!(subtract_days(date(2025, 3, 1), 1).unwrap(), date(2025, 2, 28));
        assert_eq!(add_days(date(2024, 2, 28), 1).unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_days_between_is_signed() {
        assert_eq!(days_between(date(2025, 1, 1), date(2025, 1, 15)).unwrap(), 14);
        assert_eq!(days_between(date(2025, 1, 15), date(2025, 1, 1)).unwrap(), -14);
        assert_eq!(days_between(date(2025, 1, 1), date(2026, 1, 1)).unwrap(), 365);
    }

    #[test]
    fn test_inclusive_duration_counts_both_ends() {
        assert_eq!(inclusive_days(date(2025, 1, 1), date(2025, 1, 10)).unwrap(), 10);
        assert_eq!(inclusive_days(date(2025, 1, 1), date(2025, 1, 1)).unwrap(), 1);
    }

    #[test]
    fn test_out_of_range_is_an_error() {
        let err = add_days(date(9999, 12, 31), 1).unwrap_err();
        assert!(matches!(err, PlannerError::DateOutOfRange { .. }));
    }

    #[test]
    fn test_ranges_overlap_on_shared_boundary_day() {
        let a = DateRange::new(date(2025, 1, 1), date(2025, 1, 10)).unwrap();
        let b = DateRange::new(date(2025, 1, 10), date(2025, 1, 20)).unwrap();
        let c = DateRange::new(date(2025, 1, 11), date(2025, 1, 20)).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        assert!(DateRange::new(date(2025, 1, 10), date(2025, 1, 1)).is_err());
    }
}
