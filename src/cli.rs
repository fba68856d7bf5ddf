//! CLI interface for bikestat
//!
//! This module defines the command-line interface using clap. With no
//! subcommand, bikestat drops into the interactive prompt loop; `report`
//! runs one load-and-aggregate pass non-interactively.
//!
//! # Example
//!
//! ```bash
//! # Fridays in March in Chicago, as JSON
//! bikestat report --city chicago --month march --day friday --json
//!
//! # Prompted session over a custom data directory
//! bikestat --data-dir /srv/bikeshare interactive
//! ```

use crate::error::{BikestatError, Result};
use crate::filters::TripFilter;
use crate::types::{City, Month};
use chrono::Weekday;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Explore US bikeshare trip data from local CSV files
#[derive(Parser, Debug, Clone)]
#[command(name = "bikestat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Only show warnings and errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Directory containing the city CSV files
    #[arg(long, global = true, env = "BIKESTAT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print all four reports for one city and filter
    Report {
        /// City to analyze (chicago, "new york city", washington)
        #[arg(long)]
        city: String,

        /// Month to filter by (january through june), or "all"
        #[arg(long, default_value = "all")]
        month: String,

        /// Day of week to filter by, or "all"
        #[arg(long, default_value = "all")]
        day: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Prompt for city, month, and day, with a restart loop
    Interactive,
}

/// Parse a city argument
pub fn parse_city(value: &str) -> Result<City> {
    value.parse()
}

/// Parse a month argument, where "all" means no restriction
pub fn parse_month_arg(value: &str) -> Result<Option<Month>> {
    if value.trim().eq_ignore_ascii_case("all") {
        Ok(None)
    } else {
        value.parse().map(Some)
    }
}

/// Parse a day argument, where "all" means no restriction
///
/// Full weekday names are matched case-insensitively; the standard
/// three-letter abbreviations are accepted too.
pub fn parse_day_arg(value: &str) -> Result<Option<Weekday>> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("all") {
        Ok(None)
    } else {
        value
            .parse::<Weekday>()
            .map(Some)
            .map_err(|_| BikestatError::InvalidDay(value.to_string()))
    }
}

/// Build a trip filter from month and day arguments
pub fn parse_filter(month: &str, day: &str) -> Result<TripFilter> {
    let mut filter = TripFilter::new();
    if let Some(month) = parse_month_arg(month)? {
        filter = filter.with_month(month);
    }
    if let Some(day) = parse_day_arg(day)? {
        filter = filter.with_day(day);
    }
    Ok(filter)
}
