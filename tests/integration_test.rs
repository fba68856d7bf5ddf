//! Integration tests for bikestat
//!
//! Exercises the filter semantics and the four reports over in-memory
//! tables; loading from real files is covered in `fixtures_test.rs`.

mod common;

use bikestat::{
    aggregation::{DurationStats, StationStats, TimeStats, UserStats},
    error::BikestatError,
    filters::TripFilter,
    types::{Month, UserType},
};
use chrono::{Datelike, Weekday};
use common::{chicago_table, TripBuilder};

/// A table spanning several months, weekdays, and hours
fn mixed_table() -> bikestat::TripTable {
    chicago_table(vec![
        TripBuilder::new().start("2017-01-02 08:00:00").build(), // Jan, Monday
        TripBuilder::new().start("2017-01-07 12:00:00").build(), // Jan, Saturday
        TripBuilder::new().start("2017-02-03 17:30:00").build(), // Feb, Friday
        TripBuilder::new().start("2017-03-06 08:15:00").build(), // Mar, Monday
        TripBuilder::new().start("2017-04-11 23:00:00").build(), // Apr, Tuesday
        TripBuilder::new().start("2017-05-01 07:45:00").build(), // May, Monday
        TripBuilder::new().start("2017-06-23 17:00:00").build(), // Jun, Friday
        TripBuilder::new().start("2017-06-26 17:05:00").build(), // Jun, Monday
    ])
}

#[test]
fn test_every_filter_combination_is_exact() {
    let table = mixed_table();
    let days = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    for month in Month::ALL {
        for day in days {
            let filter = TripFilter::new().with_month(month).with_day(day);
            let filtered = table.filter(&filter);
            for record in filtered.records() {
                assert_eq!(record.month(), month.number());
                assert_eq!(record.weekday(), day);
            }
        }
    }

    // the unrestricted filter keeps everything
    let all = table.filter(&TripFilter::new());
    assert_eq!(all.len(), table.len());
}

#[test]
fn test_filtering_is_idempotent() {
    let table = mixed_table();
    let filter = TripFilter::new().with_month(Month::June);

    let once = table.filter(&filter);
    let twice = once.filter(&filter);

    assert_eq!(once.records(), twice.records());
}

#[test]
fn test_filtering_preserves_row_order() {
    let table = mixed_table();
    let filter = TripFilter::new().with_day(Weekday::Mon);
    let filtered = table.filter(&filter);

    assert!(filtered.len() > 1);
    let starts: Vec<_> = filtered.records().iter().map(|r| r.start_time).collect();
    let mut sorted = starts.clone();
    sorted.sort();
    // mixed_table is in chronological order, so a stable subsequence is too
    assert_eq!(starts, sorted);

    // every filtered record exists in the original, same relative positions
    let mut cursor = 0;
    for record in filtered.records() {
        let position = table.records()[cursor..]
            .iter()
            .position(|r| r == record)
            .expect("filtered record missing from the original table");
        cursor += position + 1;
    }
}

#[test]
fn test_time_stats_concrete_scenario() {
    // months [1, 1, 3] -> mode is January
    let table = chicago_table(vec![
        TripBuilder::new().start("2017-01-02 08:00:00").build(),
        TripBuilder::new().start("2017-01-09 09:00:00").build(),
        TripBuilder::new().start("2017-03-06 10:00:00").build(),
    ]);

    let stats = TimeStats::from_table(&table).unwrap();
    assert_eq!(stats.most_common_month, "January");
}

#[test]
fn test_station_stats_concrete_scenario() {
    let table = chicago_table(vec![
        TripBuilder::new().stations("A", "B").build(),
        TripBuilder::new().stations("A", "B").build(),
        TripBuilder::new().stations("C", "D").build(),
    ]);

    let stats = StationStats::from_table(&table).unwrap();
    assert_eq!(stats.most_common_trip.start, "A");
    assert_eq!(stats.most_common_trip.end, "B");
}

#[test]
fn test_duration_stats_concrete_scenario() {
    let table = chicago_table(vec![
        TripBuilder::new().duration(10.0).build(),
        TripBuilder::new().duration(20.0).build(),
        TripBuilder::new().duration(30.0).build(),
    ]);

    let stats = DurationStats::from_table(&table).unwrap();
    assert_eq!(stats.total_seconds, 60.0);
    assert_eq!(stats.mean_seconds, 20.0);
}

#[test]
fn test_duration_stats_empty_table_signals_empty_data() {
    let result = DurationStats::from_table(&chicago_table(vec![]));
    assert!(matches!(result, Err(BikestatError::EmptyTable)));
}

#[test]
fn test_user_stats_concrete_scenario() {
    let table = chicago_table(vec![
        TripBuilder::new().user_type(UserType::Subscriber).build(),
        TripBuilder::new().user_type(UserType::Customer).build(),
        TripBuilder::new().user_type(UserType::Subscriber).build(),
    ]);

    let stats = UserStats::from_table(&table).unwrap();
    assert_eq!(stats.user_types[0].value, "Subscriber");
    assert_eq!(stats.user_types[0].count, 2);
    assert_eq!(stats.user_types[1].value, "Customer");
    assert_eq!(stats.user_types[1].count, 1);
}

#[test]
fn test_user_stats_counts_sum_to_row_count() {
    let table = mixed_table();
    let stats = UserStats::from_table(&table).unwrap();
    let total: u64 = stats.user_types.iter().map(|c| c.count).sum();
    assert_eq!(total as usize, table.len());
}

#[test]
fn test_schema_without_birth_year_omits_the_sub_report() {
    // Washington-shaped table: no demographic columns in the schema
    let table = chicago_table(vec![TripBuilder::new().build()]);
    let stats = UserStats::from_table(&table).unwrap();
    assert!(stats.genders.is_none());
    assert!(stats.birth_years.is_none());
}

#[test]
fn test_mode_tie_break_is_first_in_row_order() {
    // June and January each appear twice; June's rows come first
    let table = chicago_table(vec![
        TripBuilder::new().start("2017-06-05 08:00:00").build(),
        TripBuilder::new().start("2017-01-02 08:00:00").build(),
        TripBuilder::new().start("2017-06-12 08:00:00").build(),
        TripBuilder::new().start("2017-01-09 08:00:00").build(),
    ]);

    let stats = TimeStats::from_table(&table).unwrap();
    assert_eq!(stats.most_common_month, "June");
}

#[test]
fn test_filtered_months_stay_in_the_supported_window() {
    let table = mixed_table();
    for month in Month::ALL {
        let filtered = table.filter(&TripFilter::new().with_month(month));
        for record in filtered.records() {
            assert!(record.start_time.month() <= 6);
        }
    }
}
