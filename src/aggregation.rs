//! Aggregation module for trip statistics
//!
//! This module computes the four descriptive reports over a [`TripTable`]:
//! travel times, station popularity, trip durations, and user demographics.
//! Each report is a pure, read-only pass over the table, built with a
//! `from_table` constructor and serializable for JSON output.
//!
//! Every mode computed here breaks ties by first appearance in row order,
//! so results are deterministic for a given table.
//!
//! # Examples
//!
//! ```
//! use bikestat::aggregation::{DurationStats, TimeStats};
//! use bikestat::types::{City, CitySchema, TripRecord, TripTable, UserType};
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2017, 1, 2)
//!     .unwrap()
//!     .and_hms_opt(9, 0, 0)
//!     .unwrap();
//! let trip = TripRecord::new(start, None, 600.0, "A", "B", UserType::Subscriber, None, None);
//! let table = TripTable::new(City::Chicago, CitySchema::default(), vec![trip]);
//!
//! let times = TimeStats::from_table(&table).unwrap();
//! assert_eq!(times.most_common_month, "January");
//!
//! let durations = DurationStats::from_table(&table).unwrap();
//! assert_eq!(durations.total_seconds, 600.0);
//! ```

use crate::error::{BikestatError, Result};
use crate::types::{month_name, weekday_name, TripTable};
use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Most frequent value of `key` over the records, ties broken by the value
/// reaching the maximum count first in row order
fn mode_by<T, K, F>(records: &[T], mut key: F) -> Option<K>
where
    K: Eq + Hash + Clone,
    F: FnMut(&T) -> K,
{
    let mut counts: HashMap<K, u64> = HashMap::new();
    let mut order: Vec<K> = Vec::new();

    for record in records {
        let value = key(record);
        let count = counts.entry(value.clone()).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    let best = counts.values().copied().max()?;
    order.into_iter().find(|value| counts[value] == best)
}

/// Count distinct values of `key`, descending by count, ties in first-seen
/// row order
fn frequency_counts<T, K, F>(records: &[T], mut key: F) -> Vec<(K, u64)>
where
    K: Eq + Hash + Clone,
    F: FnMut(&T) -> Option<K>,
{
    let mut counts: HashMap<K, u64> = HashMap::new();
    let mut order: Vec<K> = Vec::new();

    for record in records {
        let Some(value) = key(record) else { continue };
        let count = counts.entry(value.clone()).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    let mut result: Vec<(K, u64)> = order
        .into_iter()
        .map(|value| {
            let count = counts[&value];
            (value, count)
        })
        .collect();
    // stable sort keeps first-seen order among equal counts
    result.sort_by(|a, b| b.1.cmp(&a.1));
    result
}

/// One value/count pair in a frequency report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyCount {
    /// The counted value's display label
    pub value: String,
    /// How many records carried it
    pub count: u64,
}

/// Statistics on the most frequent times of travel
#[derive(Debug, Clone, Serialize)]
pub struct TimeStats {
    /// Full calendar name of the most common start month
    pub most_common_month: String,
    /// Full name of the most common start weekday
    pub most_common_weekday: String,
    /// Most common start hour (0-23)
    pub most_common_hour: u32,
    /// Wall-clock time the computation took (diagnostic only)
    #[serde(skip)]
    pub elapsed: Duration,
}

impl TimeStats {
    /// Compute the report; fails with [`BikestatError::EmptyTable`] when no
    /// rows reach it, since a mode over nothing is undefined
    pub fn from_table(table: &TripTable) -> Result<Self> {
        let started = Instant::now();
        let records = table.records();

        let month = mode_by(records, |r| r.month()).ok_or(BikestatError::EmptyTable)?;
        let weekday = mode_by(records, |r| r.weekday()).ok_or(BikestatError::EmptyTable)?;
        let hour = mode_by(records, |r| r.hour()).ok_or(BikestatError::EmptyTable)?;

        Ok(Self {
            most_common_month: month_name(month).to_string(),
            most_common_weekday: weekday_name(weekday).to_string(),
            most_common_hour: hour,
            elapsed: started.elapsed(),
        })
    }
}

/// A start/end station pair, keyed structurally
///
/// Station names may contain any separator a concatenation scheme could
/// pick, so the pair is a real struct rather than a joined string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TripEndpoints {
    /// Start station name
    pub start: String,
    /// End station name
    pub end: String,
}

/// Statistics on the most popular stations and trip
#[derive(Debug, Clone, Serialize)]
pub struct StationStats {
    /// Most commonly used start station
    pub most_common_start: String,
    /// Most commonly used end station
    pub most_common_end: String,
    /// Most frequent start/end combination
    pub most_common_trip: TripEndpoints,
    /// Wall-clock time the computation took (diagnostic only)
    #[serde(skip)]
    pub elapsed: Duration,
}

impl StationStats {
    /// Compute the report; fails with [`BikestatError::EmptyTable`] when no
    /// rows reach it
    pub fn from_table(table: &TripTable) -> Result<Self> {
        let started = Instant::now();
        let records = table.records();

        let start =
            mode_by(records, |r| r.start_station.clone()).ok_or(BikestatError::EmptyTable)?;
        let end = mode_by(records, |r| r.end_station.clone()).ok_or(BikestatError::EmptyTable)?;
        let trip = mode_by(records, |r| TripEndpoints {
            start: r.start_station.clone(),
            end: r.end_station.clone(),
        })
        .ok_or(BikestatError::EmptyTable)?;

        Ok(Self {
            most_common_start: start,
            most_common_end: end,
            most_common_trip: trip,
            elapsed: started.elapsed(),
        })
    }
}

/// Statistics on total and average trip duration
#[derive(Debug, Clone, Serialize)]
pub struct DurationStats {
    /// Number of trips aggregated
    pub trips: usize,
    /// Total travel time in seconds
    pub total_seconds: f64,
    /// Mean travel time in seconds
    pub mean_seconds: f64,
    /// Wall-clock time the computation took (diagnostic only)
    #[serde(skip)]
    pub elapsed: Duration,
}

impl DurationStats {
    /// Compute the report; fails with [`BikestatError::EmptyTable`] when no
    /// rows reach it, keeping one empty-table rule across all reports
    /// rather than inventing a sum-without-mean special case
    pub fn from_table(table: &TripTable) -> Result<Self> {
        let started = Instant::now();
        let records = table.records();

        if records.is_empty() {
            return Err(BikestatError::EmptyTable);
        }

        let total: f64 = records.iter().map(|r| r.duration_secs).sum();
        Ok(Self {
            trips: records.len(),
            total_seconds: total,
            mean_seconds: total / records.len() as f64,
            elapsed: started.elapsed(),
        })
    }
}

/// Earliest, most recent, and most common birth year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    /// Numerically smallest birth year
    pub earliest: i32,
    /// Numerically largest birth year
    pub most_recent: i32,
    /// Most common birth year, ties by first appearance
    pub most_common: i32,
}

/// Statistics on the riders themselves
///
/// The gender and birth-year sub-reports are `None` for sources whose
/// schema never carried those columns (Washington), which is an omission,
/// not an error.
#[derive(Debug, Clone, Serialize)]
pub struct UserStats {
    /// User type counts, descending, ties in first-seen order
    pub user_types: Vec<FrequencyCount>,
    /// Gender counts, when the source schema has the column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genders: Option<Vec<FrequencyCount>>,
    /// Birth year summary, when the source schema has the column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_years: Option<BirthYearStats>,
    /// Wall-clock time the computation took (diagnostic only)
    #[serde(skip)]
    pub elapsed: Duration,
}

impl UserStats {
    /// Compute the report
    ///
    /// Unlike the mode-bearing reports this succeeds on an empty table,
    /// yielding empty counts and absent sub-reports.
    pub fn from_table(table: &TripTable) -> Result<Self> {
        let started = Instant::now();
        let records = table.records();
        let schema = table.schema();

        let user_types = frequency_counts(records, |r| Some(r.user_type.to_string()))
            .into_iter()
            .map(|(value, count)| FrequencyCount { value, count })
            .collect();

        let genders = schema.has_gender.then(|| {
            frequency_counts(records, |r| r.gender.as_ref().map(|g| g.to_string()))
                .into_iter()
                .map(|(value, count)| FrequencyCount { value, count })
                .collect()
        });

        let birth_years = if schema.has_birth_year {
            let years: Vec<i32> = records.iter().filter_map(|r| r.birth_year).collect();
            match (
                years.iter().min(),
                years.iter().max(),
                mode_by(&years, |y| *y),
            ) {
                (Some(&earliest), Some(&most_recent), Some(most_common)) => Some(BirthYearStats {
                    earliest,
                    most_recent,
                    most_common,
                }),
                _ => None,
            }
        } else {
            None
        };

        Ok(Self {
            user_types,
            genders,
            birth_years,
            elapsed: started.elapsed(),
        })
    }
}

/// All four reports for one load, ready for rendering
#[derive(Debug, Clone, Serialize)]
pub struct CityReport {
    /// City the table came from
    pub city: crate::types::City,
    /// Number of trips the reports cover
    pub trips: usize,
    /// Travel time report
    pub times: TimeStats,
    /// Station popularity report
    pub stations: StationStats,
    /// Trip duration report
    pub durations: DurationStats,
    /// User demographics report
    pub users: UserStats,
}

impl CityReport {
    /// Run all four reports over a table
    pub fn from_table(table: &TripTable) -> Result<Self> {
        Ok(Self {
            city: table.city(),
            trips: table.len(),
            times: TimeStats::from_table(table)?,
            stations: StationStats::from_table(table)?,
            durations: DurationStats::from_table(table)?,
            users: UserStats::from_table(table)?,
        })
    }
}
