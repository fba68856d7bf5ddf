//! Output formatting module for bikestat
//!
//! This module provides formatters for displaying the four reports:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output
//!
//! The table layout is a presentation concern only; the JSON field names
//! are the stable surface.
//!
//! # Examples
//!
//! ```
//! use bikestat::aggregation::DurationStats;
//! use bikestat::output::get_formatter;
//! use std::time::Duration;
//!
//! let stats = DurationStats {
//!     trips: 3,
//!     total_seconds: 60.0,
//!     mean_seconds: 20.0,
//!     elapsed: Duration::from_millis(2),
//! };
//!
//! let formatter = get_formatter(false);
//! println!("{}", formatter.format_durations(&stats));
//! ```

use crate::aggregation::{CityReport, DurationStats, StationStats, TimeStats, UserStats};
use prettytable::{format, row, Table};
use serde::Serialize;
use std::time::Duration;

/// Trait for output formatters
///
/// One method per report plus a combined city report. Implementations
/// return ready-to-print strings.
pub trait OutputFormatter {
    /// Format the travel time report
    fn format_time(&self, stats: &TimeStats) -> String;

    /// Format the station popularity report
    fn format_stations(&self, stats: &StationStats) -> String;

    /// Format the trip duration report
    fn format_durations(&self, stats: &DurationStats) -> String;

    /// Format the user demographics report
    fn format_users(&self, stats: &UserStats) -> String;

    /// Format all four reports for one load
    fn format_city_report(&self, report: &CityReport) -> String;
}

/// Table formatter for human-readable output
///
/// Produces ASCII tables with thousands separators on counts and the
/// per-report compute time as a footer diagnostic.
pub struct TableFormatter;

impl TableFormatter {
    /// Format a number with thousands separators
    fn format_number(n: u64) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, ch) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(ch);
        }

        result.chars().rev().collect()
    }

    /// Format a second count as hours/minutes/seconds
    fn format_hms(seconds: f64) -> String {
        let total = seconds.round() as i64;
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let secs = total % 60;
        if hours > 0 {
            format!("{hours}h {minutes}m {secs}s")
        } else if minutes > 0 {
            format!("{minutes}m {secs}s")
        } else {
            format!("{secs}s")
        }
    }

    /// Footer line with the compute-time diagnostic
    fn elapsed_line(elapsed: Duration) -> String {
        format!("computed in {:.3}s", elapsed.as_secs_f64())
    }

    fn metric_table() -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Metric", b -> "Value"]);
        table
    }
}

impl OutputFormatter for TableFormatter {
    fn format_time(&self, stats: &TimeStats) -> String {
        let mut table = Self::metric_table();
        table.add_row(row!["Most common month", stats.most_common_month]);
        table.add_row(row!["Most common day of week", stats.most_common_weekday]);
        table.add_row(row![
            "Most common start hour",
            format!("{:02}:00", stats.most_common_hour)
        ]);
        format!("{}{}\n", table, Self::elapsed_line(stats.elapsed))
    }

    fn format_stations(&self, stats: &StationStats) -> String {
        let mut table = Self::metric_table();
        table.add_row(row!["Most common start station", stats.most_common_start]);
        table.add_row(row!["Most common end station", stats.most_common_end]);
        table.add_row(row![
            "Most common trip",
            format!(
                "{} -> {}",
                stats.most_common_trip.start, stats.most_common_trip.end
            )
        ]);
        format!("{}{}\n", table, Self::elapsed_line(stats.elapsed))
    }

    fn format_durations(&self, stats: &DurationStats) -> String {
        let mut table = Self::metric_table();
        table.add_row(row!["Trips", Self::format_number(stats.trips as u64)]);
        table.add_row(row![
            "Total travel time",
            format!(
                "{} seconds ({})",
                Self::format_number(stats.total_seconds.round() as u64),
                Self::format_hms(stats.total_seconds)
            )
        ]);
        table.add_row(row![
            "Mean travel time",
            format!("{:.1} seconds", stats.mean_seconds)
        ]);
        format!("{}{}\n", table, Self::elapsed_line(stats.elapsed))
    }

    fn format_users(&self, stats: &UserStats) -> String {
        let mut table = Self::metric_table();
        for entry in &stats.user_types {
            table.add_row(row![
                format!("User type: {}", entry.value),
                Self::format_number(entry.count)
            ]);
        }
        if let Some(genders) = &stats.genders {
            for entry in genders {
                table.add_row(row![
                    format!("Gender: {}", entry.value),
                    Self::format_number(entry.count)
                ]);
            }
        }
        if let Some(years) = &stats.birth_years {
            table.add_row(row!["Earliest birth year", years.earliest]);
            table.add_row(row!["Most recent birth year", years.most_recent]);
            table.add_row(row!["Most common birth year", years.most_common]);
        }
        format!("{}{}\n", table, Self::elapsed_line(stats.elapsed))
    }

    fn format_city_report(&self, report: &CityReport) -> String {
        format!(
            "{} - {} trips\n\n\
             Most Frequent Times of Travel\n{}\n\
             Most Popular Stations and Trip\n{}\n\
             Trip Duration\n{}\n\
             User Stats\n{}",
            report.city,
            Self::format_number(report.trips as u64),
            self.format_time(&report.times),
            self.format_stations(&report.stations),
            self.format_durations(&report.durations),
            self.format_users(&report.users),
        )
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    fn to_pretty<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value)
            .unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_time(&self, stats: &TimeStats) -> String {
        Self::to_pretty(stats)
    }

    fn format_stations(&self, stats: &StationStats) -> String {
        Self::to_pretty(stats)
    }

    fn format_durations(&self, stats: &DurationStats) -> String {
        Self::to_pretty(stats)
    }

    fn format_users(&self, stats: &UserStats) -> String {
        Self::to_pretty(stats)
    }

    fn format_city_report(&self, report: &CityReport) -> String {
        Self::to_pretty(report)
    }
}

/// Get the appropriate formatter based on the output format
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::{FrequencyCount, TripEndpoints};

    #[test]
    fn test_format_number() {
        assert_eq!(TableFormatter::format_number(0), "0");
        assert_eq!(TableFormatter::format_number(999), "999");
        assert_eq!(TableFormatter::format_number(1000), "1,000");
        assert_eq!(TableFormatter::format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(TableFormatter::format_hms(42.0), "42s");
        assert_eq!(TableFormatter::format_hms(90.0), "1m 30s");
        assert_eq!(TableFormatter::format_hms(3725.0), "1h 2m 5s");
    }

    #[test]
    fn test_table_output_mentions_metrics() {
        let stats = TimeStats {
            most_common_month: "June".to_string(),
            most_common_weekday: "Friday".to_string(),
            most_common_hour: 17,
            elapsed: Duration::from_millis(1),
        };
        let rendered = TableFormatter.format_time(&stats);
        assert!(rendered.contains("June"));
        assert!(rendered.contains("Friday"));
        assert!(rendered.contains("17:00"));
        assert!(rendered.contains("computed in"));
    }

    #[test]
    fn test_json_output_field_names() {
        let stats = StationStats {
            most_common_start: "Canal St".to_string(),
            most_common_end: "State St".to_string(),
            most_common_trip: TripEndpoints {
                start: "Canal St".to_string(),
                end: "State St".to_string(),
            },
            elapsed: Duration::ZERO,
        };
        let value: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_stations(&stats)).unwrap();
        assert_eq!(value["most_common_start"], "Canal St");
        assert_eq!(value["most_common_trip"]["end"], "State St");
        // the elapsed diagnostic stays out of the stable surface
        assert!(value.get("elapsed").is_none());
    }

    #[test]
    fn test_users_table_skips_absent_sub_reports() {
        let stats = UserStats {
            user_types: vec![FrequencyCount {
                value: "Subscriber".to_string(),
                count: 2,
            }],
            genders: None,
            birth_years: None,
            elapsed: Duration::ZERO,
        };
        let rendered = TableFormatter.format_users(&stats);
        assert!(rendered.contains("Subscriber"));
        assert!(!rendered.contains("Gender"));
        assert!(!rendered.contains("birth year"));
    }
}
