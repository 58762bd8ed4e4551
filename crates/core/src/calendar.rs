//! Month/year periods used by payroll sheets, holiday calendars and
//! attendance summaries.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::CoreError;

/// Earliest and latest accepted years.
const MIN_YEAR: i32 = 2000;
const MAX_YEAR: i32 = 2100;

/// A validated calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthPeriod {
    pub month: i32,
    pub year: i32,
}

impl MonthPeriod {
    /// Validate `month` (1..=12) and `year`; both are required.
    pub fn new(month: Option<i32>, year: Option<i32>) -> Result<Self, CoreError> {
        let (Some(month), Some(year)) = (month, year) else {
            return Err(CoreError::Validation("Month and year are required".into()));
        };
        if !(1..=12).contains(&month) {
            return Err(CoreError::Validation(format!(
                "Month must be between 1 and 12, got {month}"
            )));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CoreError::Validation(format!(
                "Year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
            )));
        }
        Ok(Self { month, year })
    }

    /// First day of the month.
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month as u32, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// First day of the following month (exclusive upper bound).
    pub fn next_first_day(self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month as u32 + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month as u32
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn valid_period_bounds() {
        let period = MonthPeriod::new(Some(12), Some(2024)).unwrap();
        assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(period.next_first_day(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn missing_or_out_of_range_values_are_rejected() {
        assert_matches!(MonthPeriod::new(None, Some(2024)), Err(CoreError::Validation(_)));
        assert_matches!(MonthPeriod::new(Some(13), Some(2024)), Err(CoreError::Validation(_)));
        assert_matches!(MonthPeriod::new(Some(0), Some(2024)), Err(CoreError::Validation(_)));
        assert_matches!(MonthPeriod::new(Some(5), Some(24)), Err(CoreError::Validation(_)));
    }

    #[test]
    fn contains_checks_month_and_year() {
        let period = MonthPeriod::new(Some(2), Some(2024)).unwrap();
        assert!(period.contains(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2023, 2, 1).unwrap()));
    }
}
