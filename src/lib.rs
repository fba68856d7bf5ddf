//! bikestat - Explore US bikeshare trip data from local CSV files
//!
//! This library provides functionality to:
//! - Load a city's trip CSV into an in-memory table with derived calendar fields
//! - Filter trips by month and day of week
//! - Compute four descriptive reports: travel times, station popularity,
//!   trip durations, and user demographics
//! - Render reports as tables or JSON
//!
//! # Examples
//!
//! ```no_run
//! use bikestat::{
//!     aggregation::CityReport,
//!     data_loader::{CitySources, TripLoader},
//!     filters::TripFilter,
//!     output::get_formatter,
//!     types::{City, Month},
//! };
//!
//! fn main() -> bikestat::Result<()> {
//!     let loader = TripLoader::new(CitySources::from_env());
//!     let table = loader.load(City::Chicago, &TripFilter::new().with_month(Month::June))?;
//!
//!     let report = CityReport::from_table(&table)?;
//!     println!("{}", get_formatter(false).format_city_report(&report));
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod cli;
pub mod data_loader;
pub mod error;
pub mod filters;
pub mod interactive;
pub mod output;
pub mod types;

// Re-export commonly used types
pub use error::{BikestatError, Result};
pub use filters::TripFilter;
pub use types::{City, CitySchema, Gender, Month, TripRecord, TripTable, UserType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
