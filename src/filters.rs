//! Filtering module for trip records
//!
//! This module provides the month/day filter applied while loading a city
//! source, and re-applicable to an already-loaded table. Both filters are
//! optional and combine; an unset filter retains every record ("all" at the
//! interactive prompt).
//!
//! # Examples
//!
//! ```
//! use bikestat::filters::TripFilter;
//! use bikestat::types::Month;
//! use chrono::Weekday;
//!
//! // Fridays in March
//! let filter = TripFilter::new()
//!     .with_month(Month::March)
//!     .with_day(Weekday::Fri);
//! ```

use crate::types::{Month, TripRecord};
use chrono::Weekday;

/// Filter configuration for trip records
///
/// Supports filtering by calendar month and day of week. All filters are
/// optional and can be combined.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TripFilter {
    /// Month filter, `None` retains all months
    pub month: Option<Month>,
    /// Day-of-week filter, `None` retains all days
    pub day: Option<Weekday>,
}

impl TripFilter {
    /// Create a new filter with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the month filter
    pub fn with_month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    /// Set the day-of-week filter
    pub fn with_day(mut self, day: Weekday) -> Self {
        self.day = Some(day);
        self
    }

    /// Whether no restriction is set
    pub fn is_unrestricted(&self) -> bool {
        self.month.is_none() && self.day.is_none()
    }

    /// Check if a record passes the filter
    ///
    /// The comparison runs against the record's derived calendar fields,
    /// which [`TripRecord::new`](crate::types::TripRecord::new) keeps
    /// consistent with the start timestamp.
    pub fn matches(&self, record: &TripRecord) -> bool {
        if let Some(month) = self.month {
            if record.month() != month.number() {
                return false;
            }
        }

        if let Some(day) = self.day {
            if record.weekday() != day {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TripRecord, UserType};
    use chrono::NaiveDate;

    fn trip_on(y: i32, m: u32, d: u32) -> TripRecord {
        let start = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        TripRecord::new(start, None, 60.0, "A", "B", UserType::Customer, None, None)
    }

    #[test]
    fn test_unrestricted_filter_matches_everything() {
        let filter = TripFilter::new();
        assert!(filter.is_unrestricted());
        assert!(filter.matches(&trip_on(2017, 1, 1)));
        assert!(filter.matches(&trip_on(2017, 6, 30)));
    }

    #[test]
    fn test_month_filter() {
        let filter = TripFilter::new().with_month(Month::March);

        assert!(filter.matches(&trip_on(2017, 3, 15)));
        assert!(!filter.matches(&trip_on(2017, 4, 15)));
    }

    #[test]
    fn test_day_filter() {
        // 2017-06-05 was a Monday, 2017-06-06 a Tuesday
        let filter = TripFilter::new().with_day(Weekday::Mon);

        assert!(filter.matches(&trip_on(2017, 6, 5)));
        assert!(!filter.matches(&trip_on(2017, 6, 6)));
    }

    #[test]
    fn test_combined_filter() {
        let filter = TripFilter::new()
            .with_month(Month::June)
            .with_day(Weekday::Mon);

        assert!(filter.matches(&trip_on(2017, 6, 5)));
        // right weekday, wrong month
        assert!(!filter.matches(&trip_on(2017, 5, 1)));
        // right month, wrong weekday
        assert!(!filter.matches(&trip_on(2017, 6, 6)));
    }
}
