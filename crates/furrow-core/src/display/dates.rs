//! Date range formatting.

use std::fmt;

use crate::dates::DateRange;

/// A range shown with its length, e.g. `2025-04-01 → 2025-05-01 (31 days)`.
pub struct Season<'a>(pub &'a DateRange);

impl fmt::Display for Season<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.0.start, self.0.end)?;
        match self.0.len_days() {
            Ok(1) => write!(f, " (1 day)"),
            Ok(days) => write!(f, " ({days} days)"),
            Err(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::day;

    #[test]
    fn test_season_display() {
        let range = DateRange::new(day("2025-04-01"), day("2025-05-01")).unwrap();
        assert_eq!(Season(&range).to_string(), "2025-04-01 → 2025-05-01 (31 days)");

        let single = DateRange::new(day("2025-04-01"), day("2025-04-01")).unwrap();
        assert!(Season(&single).to_string().ends_with("(1 day)"));
    }
}
