//! Common test utilities and helpers for bikestat tests
//!
//! Provides a trip builder and small table constructors so tests state only
//! the fields they care about.

#![allow(dead_code)]

use bikestat::types::{City, CitySchema, Gender, TripRecord, TripTable, UserType};
use chrono::NaiveDateTime;

/// Builder for creating test TripRecord instances
pub struct TripBuilder {
    start_time: NaiveDateTime,
    end_time: Option<NaiveDateTime>,
    duration_secs: f64,
    start_station: String,
    end_station: String,
    user_type: UserType,
    gender: Option<Gender>,
    birth_year: Option<i32>,
}

impl TripBuilder {
    /// Create a builder with defaults: a Monday-morning subscriber trip
    pub fn new() -> Self {
        Self {
            start_time: parse_time("2017-01-02 09:00:00"),
            end_time: None,
            duration_secs: 300.0,
            start_station: "Canal St".to_string(),
            end_station: "State St".to_string(),
            user_type: UserType::Subscriber,
            gender: None,
            birth_year: None,
        }
    }

    pub fn start(mut self, timestamp: &str) -> Self {
        self.start_time = parse_time(timestamp);
        self
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration_secs = seconds;
        self
    }

    pub fn stations(mut self, start: &str, end: &str) -> Self {
        self.start_station = start.to_string();
        self.end_station = end.to_string();
        self
    }

    pub fn user_type(mut self, user_type: UserType) -> Self {
        self.user_type = user_type;
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn birth_year(mut self, year: i32) -> Self {
        self.birth_year = Some(year);
        self
    }

    pub fn build(self) -> TripRecord {
        TripRecord::new(
            self.start_time,
            self.end_time,
            self.duration_secs,
            self.start_station,
            self.end_station,
            self.user_type,
            self.gender,
            self.birth_year,
        )
    }
}

impl Default for TripBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a `%Y-%m-%d %H:%M:%S` timestamp, panicking on typos in test data
pub fn parse_time(timestamp: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|e| panic!("bad test timestamp {timestamp:?}: {e}"))
}

/// A Chicago table without demographic columns
pub fn chicago_table(records: Vec<TripRecord>) -> TripTable {
    TripTable::new(City::Chicago, CitySchema::default(), records)
}

/// A New York City table with both demographic columns
pub fn nyc_table(records: Vec<TripRecord>) -> TripTable {
    TripTable::new(
        City::NewYorkCity,
        CitySchema {
            has_gender: true,
            has_birth_year: true,
        },
        records,
    )
}
