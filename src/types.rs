//! Core domain types for bikestat
//!
//! This module contains the fundamental types used throughout the bikestat
//! library: the closed set of supported cities, the supported filter months,
//! trip records with their derived calendar fields, and the ordered trip
//! table the aggregations consume.

use crate::error::{BikestatError, Result};
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use std::fmt;
use std::str::FromStr;

/// A supported city source
///
/// The city set is closed; anything else fails to parse with
/// [`BikestatError::UnknownCity`].
///
/// # Examples
/// ```
/// use bikestat::types::City;
///
/// let city: City = "New York City".parse().unwrap();
/// assert_eq!(city, City::NewYorkCity);
/// assert_eq!(city.to_string(), "New York City");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// All supported cities, in prompt order
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// File stem of the city's CSV source
    pub fn file_stem(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new_york_city",
            City::Washington => "washington",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            City::Chicago => write!(f, "Chicago"),
            City::NewYorkCity => write!(f, "New York City"),
            City::Washington => write!(f, "Washington"),
        }
    }
}

impl FromStr for City {
    type Err = BikestatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "chicago" => Ok(City::Chicago),
            "new york city" => Ok(City::NewYorkCity),
            "washington" => Ok(City::Washington),
            other => Err(BikestatError::UnknownCity(other.to_string())),
        }
    }
}

/// A month usable as a filter value
///
/// The source datasets cover January through June only, so later months are
/// rejected as filter values. Derived record months still span the full
/// calendar; see [`month_name`].
///
/// # Examples
/// ```
/// use bikestat::types::Month;
///
/// let month: Month = "march".parse().unwrap();
/// assert_eq!(month.number(), 3);
/// assert!("july".parse::<Month>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    /// All filterable months, in calendar order
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    /// 1-based calendar index (January = 1)
    pub fn number(&self) -> u32 {
        match self {
            Month::January => 1,
            Month::February => 2,
            Month::March => 3,
            Month::April => 4,
            Month::May => 5,
            Month::June => 6,
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Month::January => write!(f, "January"),
            Month::February => write!(f, "February"),
            Month::March => write!(f, "March"),
            Month::April => write!(f, "April"),
            Month::May => write!(f, "May"),
            Month::June => write!(f, "June"),
        }
    }
}

impl FromStr for Month {
    type Err = BikestatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "january" => Ok(Month::January),
            "february" => Ok(Month::February),
            "march" => Ok(Month::March),
            "april" => Ok(Month::April),
            "may" => Ok(Month::May),
            "june" => Ok(Month::June),
            other => Err(BikestatError::InvalidMonth(other.to_string())),
        }
    }
}

/// Full calendar name for a derived month number (1-12)
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

/// Full name for a weekday (chrono's `Display` abbreviates)
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Rider category from the `User Type` column
///
/// Labels outside the two documented categories are preserved verbatim
/// rather than discarded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserType {
    Subscriber,
    Customer,
    Other(String),
}

impl UserType {
    /// Parse a source label; never fails. Unrecognized labels are preserved
    /// under `Other`, blank cells become `Other("Unknown")`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "subscriber" => UserType::Subscriber,
            "customer" => UserType::Customer,
            "" => UserType::Other("Unknown".to_string()),
            _ => UserType::Other(label.trim().to_string()),
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserType::Subscriber => write!(f, "Subscriber"),
            UserType::Customer => write!(f, "Customer"),
            UserType::Other(label) => write!(f, "{label}"),
        }
    }
}

/// Rider gender from the optional `Gender` column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other(String),
}

impl Gender {
    /// Parse a source label; never fails, unrecognized labels become `Other`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Other(label.trim().to_string()),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Other(label) => write!(f, "{label}"),
        }
    }
}

/// Which optional columns a city source carries
///
/// Decided once from the CSV header row at load time; the aggregations use
/// it to skip sub-reports for columns the source never had, which is not an
/// error condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct CitySchema {
    /// Source has a `Gender` column
    pub has_gender: bool,
    /// Source has a `Birth Year` column
    pub has_birth_year: bool,
}

/// One bike-share trip
///
/// The calendar fields (month, weekday, start hour) are derived from the
/// start timestamp in [`TripRecord::new`] and are not independently
/// settable, so they are always consistent with it.
///
/// # Examples
/// ```
/// use bikestat::types::{TripRecord, UserType};
/// use chrono::{NaiveDate, Weekday};
///
/// let start = NaiveDate::from_ymd_opt(2017, 3, 6)
///     .unwrap()
///     .and_hms_opt(8, 15, 0)
///     .unwrap();
/// let trip = TripRecord::new(
///     start,
///     None,
///     300.0,
///     "Canal St",
///     "State St",
///     UserType::Subscriber,
///     None,
///     None,
/// );
/// assert_eq!(trip.month(), 3);
/// assert_eq!(trip.weekday(), Weekday::Mon);
/// assert_eq!(trip.hour(), 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// Trip start timestamp (naive local time, as in the source data)
    pub start_time: NaiveDateTime,
    /// Trip end timestamp, when the source carries one
    pub end_time: Option<NaiveDateTime>,
    /// Trip duration in seconds
    pub duration_secs: f64,
    /// Start station name
    pub start_station: String,
    /// End station name
    pub end_station: String,
    /// Rider category
    pub user_type: UserType,
    /// Rider gender, absent in sources without the column
    pub gender: Option<Gender>,
    /// Rider birth year, absent in sources without the column
    pub birth_year: Option<i32>,
    month: u32,
    weekday: Weekday,
    hour: u32,
}

impl TripRecord {
    /// Create a trip record, deriving the calendar fields from `start_time`
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        start_time: NaiveDateTime,
        end_time: Option<NaiveDateTime>,
        duration_secs: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        user_type: UserType,
        gender: Option<Gender>,
        birth_year: Option<i32>,
    ) -> Self {
        Self {
            month: start_time.month(),
            weekday: start_time.weekday(),
            hour: start_time.hour(),
            start_time,
            end_time,
            duration_secs,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type,
            gender,
            birth_year,
        }
    }

    /// Calendar month of the start timestamp (1-12)
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Weekday of the start timestamp
    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Hour of day of the start timestamp (0-23)
    pub fn hour(&self) -> u32 {
        self.hour
    }
}

/// An ordered, immutable collection of trips for one city
///
/// Filtering never mutates in place; it produces a new reduced table whose
/// rows are a stable subsequence of the original.
///
/// # Examples
/// ```
/// use bikestat::filters::TripFilter;
/// use bikestat::types::{City, CitySchema, Month, TripRecord, TripTable, UserType};
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2017, 1, 2)
///     .unwrap()
///     .and_hms_opt(9, 0, 0)
///     .unwrap();
/// let trip = TripRecord::new(start, None, 60.0, "A", "B", UserType::Customer, None, None);
/// let table = TripTable::new(City::Chicago, CitySchema::default(), vec![trip]);
///
/// let filtered = table.filter(&TripFilter::new().with_month(Month::January));
/// assert_eq!(filtered.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TripTable {
    city: City,
    schema: CitySchema,
    records: Vec<TripRecord>,
}

impl TripTable {
    /// Create a table from already-parsed records
    pub fn new(city: City, schema: CitySchema, records: Vec<TripRecord>) -> Self {
        Self {
            city,
            schema,
            records,
        }
    }

    /// The city the records came from
    pub fn city(&self) -> City {
        self.city
    }

    /// Which optional columns the source carried
    pub fn schema(&self) -> CitySchema {
        self.schema
    }

    /// The records, in source order
    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Produce a new table containing only the records the filter retains,
    /// preserving source order
    pub fn filter(&self, filter: &crate::filters::TripFilter) -> TripTable {
        TripTable {
            city: self.city,
            schema: self.schema,
            records: self
                .records
                .iter()
                .filter(|record| filter.matches(record))
                .cloned()
                .collect(),
        }
    }
}
