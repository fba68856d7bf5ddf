//! Data loader module for reading city trip CSVs
//!
//! This module resolves each supported city to its CSV source and parses the
//! rows into an in-memory [`TripTable`], applying the month/day filter as it
//! goes. The city-to-file mapping is an immutable [`CitySources`] value built
//! once at startup rather than a module-level global.
//!
//! The default source directory is `./data`, overridable with the
//! `BIKESTAT_DATA_DIR` environment variable or an explicit directory.
//!
//! # Malformed rows
//!
//! A row whose required fields (start time, duration) fail to parse is
//! dropped with a warning carrying the line number and cause; the load
//! continues and the dropped count is logged at the end. Malformed values in
//! the optional demographic columns are treated as absent rather than
//! condemning the whole row.
//!
//! # Examples
//!
//! ```no_run
//! use bikestat::data_loader::{CitySources, TripLoader};
//! use bikestat::filters::TripFilter;
//! use bikestat::types::{City, Month};
//!
//! # fn example() -> bikestat::Result<()> {
//! let loader = TripLoader::new(CitySources::from_env());
//! let table = loader.load(
//!     City::Chicago,
//!     &TripFilter::new().with_month(Month::March),
//! )?;
//! println!("{} trips in March", table.len());
//! # Ok(())
//! # }
//! ```

use crate::error::{BikestatError, Result};
use crate::filters::TripFilter;
use crate::types::{City, CitySchema, Gender, TripRecord, TripTable, UserType};
use chrono::NaiveDateTime;
use csv::StringRecord;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Timestamp format used by all three city exports
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Environment variable overriding the default source directory
pub const DATA_DIR_ENV: &str = "BIKESTAT_DATA_DIR";

/// Immutable mapping from city to CSV source path
///
/// Built once at process start and handed to the loader, so nothing global
/// and mutable is involved in resolving a city.
#[derive(Debug, Clone)]
pub struct CitySources {
    paths: HashMap<City, PathBuf>,
}

impl CitySources {
    /// Map every supported city to `<dir>/<city>.csv`
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let paths = City::ALL
            .iter()
            .map(|&city| (city, dir.join(format!("{}.csv", city.file_stem()))))
            .collect();
        Self { paths }
    }

    /// Resolve the source directory from `BIKESTAT_DATA_DIR`, falling back
    /// to `./data`
    pub fn from_env() -> Self {
        let dir = std::env::var(DATA_DIR_ENV).unwrap_or_else(|_| "data".to_string());
        debug!("Using data directory {dir}");
        Self::from_dir(dir)
    }

    /// Override a single city's source path
    pub fn with_source(mut self, city: City, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(city, path.into());
        self
    }

    /// The source path for a city, if one is configured
    pub fn path_for(&self, city: City) -> Option<&Path> {
        self.paths.get(&city).map(PathBuf::as_path)
    }
}

impl Default for CitySources {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Header positions of the columns a source actually carries
#[derive(Debug)]
struct ColumnMap {
    start_time: usize,
    end_time: Option<usize>,
    duration: Option<usize>,
    start_station: usize,
    end_station: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord, file: &Path) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h == name);
        let required = |name: &'static str| {
            position(name).ok_or_else(|| BikestatError::MissingColumn {
                file: file.to_path_buf(),
                column: name,
            })
        };

        let end_time = position("End Time");
        let duration = position("Trip Duration");
        if duration.is_none() && end_time.is_none() {
            // need one or the other to know how long trips took
            return Err(BikestatError::MissingColumn {
                file: file.to_path_buf(),
                column: "Trip Duration",
            });
        }

        Ok(Self {
            start_time: required("Start Time")?,
            end_time,
            duration,
            start_station: required("Start Station")?,
            end_station: required("End Station")?,
            user_type: required("User Type")?,
            gender: position("Gender"),
            birth_year: position("Birth Year"),
        })
    }

    fn schema(&self) -> CitySchema {
        CitySchema {
            has_gender: self.gender.is_some(),
            has_birth_year: self.birth_year.is_some(),
        }
    }
}

/// Loader turning a city source into a filtered [`TripTable`]
///
/// The loader owns the resolved source mapping and guards the closed city
/// set even though callers validate before reaching it.
#[derive(Debug, Clone, Default)]
pub struct TripLoader {
    sources: CitySources,
}

impl TripLoader {
    /// Create a loader over the given source mapping
    pub fn new(sources: CitySources) -> Self {
        Self { sources }
    }

    /// Load a city source, retaining only the records the filter matches
    ///
    /// Records are returned in source order. A city with no configured
    /// source fails with [`BikestatError::UnknownCity`]; a source missing a
    /// required column fails with [`BikestatError::MissingColumn`].
    pub fn load(&self, city: City, filter: &TripFilter) -> Result<TripTable> {
        let path = self
            .sources
            .path_for(city)
            .ok_or_else(|| BikestatError::UnknownCity(city.to_string()))?;

        info!("Loading {city} trips from {}", path.display());

        let mut reader = csv::Reader::from_path(path)?;
        let columns = ColumnMap::from_headers(reader.headers()?, path)?;
        let schema = columns.schema();

        let mut records = Vec::new();
        let mut total = 0u64;
        let mut dropped = 0u64;

        for (index, row) in reader.records().enumerate() {
            let row = row?;
            total += 1;
            let line = index as u64 + 1;

            match parse_record(&row, &columns, path, line) {
                Ok(record) => {
                    if filter.matches(&record) {
                        records.push(record);
                    }
                }
                Err(error) => {
                    dropped += 1;
                    warn!("Dropping row: {error}");
                }
            }
        }

        if dropped > 0 {
            warn!(
                "Dropped {dropped} of {total} rows from {} due to parse failures",
                path.display()
            );
        }
        info!(
            "Loaded {} of {total} {city} trips matching the filter",
            records.len()
        );

        Ok(TripTable::new(city, schema, records))
    }
}

/// Parse one CSV row into a trip record
fn parse_record(
    row: &StringRecord,
    columns: &ColumnMap,
    file: &Path,
    line: u64,
) -> Result<TripRecord> {
    let parse_error = |message: String| BikestatError::Parse {
        file: file.to_path_buf(),
        line,
        message,
    };
    let field = |index: usize| {
        row.get(index)
            .ok_or_else(|| parse_error(format!("row has no column {index}")))
    };

    let start_raw = field(columns.start_time)?;
    let start_time = NaiveDateTime::parse_from_str(start_raw, TIMESTAMP_FORMAT)
        .map_err(|e| parse_error(format!("bad start time {start_raw:?}: {e}")))?;

    let end_time = match columns.end_time {
        Some(index) => {
            let raw = field(index)?;
            if raw.is_empty() {
                None
            } else {
                Some(
                    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
                        .map_err(|e| parse_error(format!("bad end time {raw:?}: {e}")))?,
                )
            }
        }
        None => None,
    };

    // Prefer the explicit duration column; sources without one must carry
    // end timestamps instead.
    let duration_secs = match columns.duration {
        Some(index) => {
            let raw = field(index)?;
            raw.parse::<f64>()
                .map_err(|e| parse_error(format!("bad duration {raw:?}: {e}")))?
        }
        None => {
            let end = end_time.ok_or_else(|| parse_error("no end time for duration".into()))?;
            (end - start_time).num_seconds() as f64
        }
    };

    let user_type = UserType::from_label(field(columns.user_type)?);

    let gender = columns
        .gender
        .and_then(|index| row.get(index))
        .filter(|raw| !raw.trim().is_empty())
        .map(Gender::from_label);

    let birth_year = columns
        .birth_year
        .and_then(|index| row.get(index))
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| match raw.parse::<f64>() {
            Ok(year) => Some(year as i32),
            Err(_) => {
                debug!(
                    "Ignoring unparseable birth year {raw:?} in {} line {line}",
                    file.display()
                );
                None
            }
        });

    Ok(TripRecord::new(
        start_time,
        end_time,
        duration_secs,
        field(columns.start_station)?,
        field(columns.end_station)?,
        user_type,
        gender,
        birth_year,
    ))
}
