//! Interactive prompt loop
//!
//! This module implements the prompted session: pick a city, a month filter,
//! and a day filter (re-prompting until the input is valid), print the four
//! reports, then offer to restart. The session reads from any `BufRead` and
//! writes to any `Write`, so the loop is unit-testable with in-memory
//! buffers.

use crate::aggregation::CityReport;
use crate::cli::{parse_day_arg, parse_month_arg};
use crate::data_loader::TripLoader;
use crate::error::Result;
use crate::filters::TripFilter;
use crate::output::{OutputFormatter, TableFormatter};
use crate::types::City;
use chrono::Weekday;
use colored::Colorize;
use std::io::{BufRead, Write};
use tracing::info;

/// One prompted session over a loader
pub struct InteractiveSession<R, W> {
    input: R,
    output: W,
    loader: TripLoader,
}

impl<R: BufRead, W: Write> InteractiveSession<R, W> {
    /// Create a session over the given input, output, and loader
    pub fn new(input: R, output: W, loader: TripLoader) -> Self {
        Self {
            input,
            output,
            loader,
        }
    }

    /// Run prompt rounds until the user declines a restart or input ends
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;

        loop {
            let Some(city) = self.prompt_city()? else {
                break;
            };
            let Some(month) = self.prompt_month()? else {
                break;
            };
            let Some(day) = self.prompt_day()? else {
                break;
            };

            let mut filter = TripFilter::new();
            if let Some(month) = month {
                filter = filter.with_month(month);
            }
            if let Some(day) = day {
                filter = filter.with_day(day);
            }

            info!("Running reports for {city}");
            let table = self.loader.load(city, &filter)?;

            if table.is_empty() {
                writeln!(
                    self.output,
                    "{}",
                    "No trips matched that filter. Try a wider one.".yellow()
                )?;
            } else {
                let report = CityReport::from_table(&table)?;
                writeln!(self.output, "\n{}", TableFormatter.format_city_report(&report))?;
            }

            if !self.prompt_restart()? {
                break;
            }
        }

        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    /// Read one line; `None` means input ended
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn invalid(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message.red())?;
        Ok(())
    }

    fn prompt_city(&mut self) -> Result<Option<City>> {
        loop {
            writeln!(
                self.output,
                "Which city? (Chicago, New York City, Washington)"
            )?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.parse() {
                Ok(city) => return Ok(Some(city)),
                Err(_) => self.invalid("Sorry, that's not one of the supported cities.")?,
            }
        }
    }

    fn prompt_month(&mut self) -> Result<Option<Option<crate::types::Month>>> {
        loop {
            writeln!(
                self.output,
                "Which month? (January through June, or 'all')"
            )?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match parse_month_arg(&line) {
                Ok(month) => return Ok(Some(month)),
                Err(_) => {
                    self.invalid("Sorry, only January through June (or 'all') are available.")?
                }
            }
        }
    }

    fn prompt_day(&mut self) -> Result<Option<Option<Weekday>>> {
        loop {
            writeln!(
                self.output,
                "Which day? (Monday through Sunday, or 'all')"
            )?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match parse_day_arg(&line) {
                Ok(day) => return Ok(Some(day)),
                Err(_) => self.invalid("Sorry, please enter a weekday name or 'all'.")?,
            }
        }
    }

    fn prompt_restart(&mut self) -> Result<bool> {
        writeln!(self.output, "\nWould you like to restart? Enter yes or no.")?;
        match self.read_line()? {
            Some(line) => Ok(line.eq_ignore_ascii_case("yes")),
            None => Ok(false),
        }
    }
}

/// Run an interactive session over stdin/stdout
pub fn run(loader: TripLoader) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    InteractiveSession::new(stdin.lock(), stdout.lock(), loader).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_loader::CitySources;
    use crate::types::Month;
    use std::io::Cursor;

    fn session(input: &str) -> InteractiveSession<Cursor<String>, Vec<u8>> {
        InteractiveSession::new(
            Cursor::new(input.to_string()),
            Vec::new(),
            TripLoader::new(CitySources::from_dir("/nonexistent")),
        )
    }

    #[test]
    fn test_prompt_city_retries_until_valid() {
        let mut s = session("atlantis\nnew york city\n");
        let city = s.prompt_city().unwrap();
        assert_eq!(city, Some(City::NewYorkCity));

        let transcript = String::from_utf8(s.output.clone()).unwrap();
        assert!(transcript.contains("not one of the supported cities"));
    }

    #[test]
    fn test_prompt_city_ends_on_eof() {
        let mut s = session("nowhere\n");
        // first line is invalid, then input runs dry
        assert_eq!(s.prompt_city().unwrap(), None);
    }

    #[test]
    fn test_prompt_month_accepts_all() {
        let mut s = session("all\n");
        assert_eq!(s.prompt_month().unwrap(), Some(None));

        let mut s = session("February\n");
        assert_eq!(s.prompt_month().unwrap(), Some(Some(Month::February)));
    }

    #[test]
    fn test_prompt_day_retries_until_valid() {
        let mut s = session("funday\nsaturday\n");
        assert_eq!(s.prompt_day().unwrap(), Some(Some(Weekday::Sat)));
    }

    #[test]
    fn test_prompt_restart() {
        let mut s = session("YES\n");
        assert!(s.prompt_restart().unwrap());

        let mut s = session("no\n");
        assert!(!s.prompt_restart().unwrap());

        let mut s = session("");
        assert!(!s.prompt_restart().unwrap());
    }
}
