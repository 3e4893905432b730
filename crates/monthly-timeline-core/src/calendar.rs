//! Period parsing and month calendar construction
//!
//! A [`Period`] is parsed from the `MM-YYYY` form typed at the prompt. A
//! [`MonthCalendar`] resolves the period into its length and weekend days by
//! constructing each day's date until one is rejected by the calendar, so leap
//! years fall out of the date validity check itself.

use chrono::{Datelike, Month, NaiveDate, Weekday};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// Highest day number a grid can carry
pub const MAX_DAYS: u32 = 31;

/// Display format for task start/end dates, e.g. "Monday, 02 September 2024"
pub const DATE_FORMAT: &str = "%A, %d %B %Y";

/// Error while resolving a period
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Invalid period format: {0:?} (expected MM-YYYY, e.g. 09-2024)")]
    InvalidFormat(String),

    #[error("Invalid month: {0} (expected 01-12)")]
    InvalidMonth(u32),

    #[error("Year out of range: {0}")]
    InvalidYear(i32),
}

fn period_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d{2})-(\d{4})$").expect("period pattern is valid"))
}

/// Target month of the timeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub month: u32,
    pub year: i32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(PeriodError::InvalidYear(year));
        }
        Ok(Self { month, year })
    }

    /// Full English month name ("September")
    pub fn month_name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map_or("", |m| m.name())
    }

    /// File name of the generated workbook
    pub fn output_file_name(&self) -> String {
        format!("Monthly Timeline {} {}.xlsx", self.month_name(), self.year)
    }

    /// Date of `day` in this period, if it exists
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let caps = period_pattern()
            .captures(input)
            .ok_or_else(|| PeriodError::InvalidFormat(input.to_string()))?;

        // Both groups are pure digits of fixed width, parsing cannot overflow
        let month: u32 = caps[1]
            .parse()
            .map_err(|_| PeriodError::InvalidFormat(input.to_string()))?;
        let year: i32 = caps[2]
            .parse()
            .map_err(|_| PeriodError::InvalidFormat(input.to_string()))?;

        Self::new(month, year)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.month, self.year)
    }
}

/// Calendar facts of one period: its length and which days fall on a weekend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCalendar {
    pub period: Period,
    pub days_in_month: u32,
    pub weekend_days: BTreeSet<u32>,
}

impl MonthCalendar {
    pub fn new(period: Period) -> Self {
        let mut days_in_month = 0;
        let mut weekend_days = BTreeSet::new();

        for day in 1..=MAX_DAYS {
            let Some(date) = period.date(day) else {
                break;
            };
            days_in_month = day;
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                weekend_days.insert(day);
            }
        }

        Self {
            period,
            days_in_month,
            weekend_days,
        }
    }

    pub fn is_weekend(&self, day: u32) -> bool {
        self.weekend_days.contains(&day)
    }

    pub fn contains(&self, day: u32) -> bool {
        (1..=self.days_in_month).contains(&day)
    }

    /// Long display form of `day`, or `None` when the day is outside the month
    pub fn format_day(&self, day: u32) -> Option<String> {
        if !self.contains(day) {
            return None;
        }
        self.period
            .date(day)
            .map(|date| date.format(DATE_FORMAT).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn gregorian_length(month: u32, year: i32) -> u32 {
        match month {
            4 | 6 | 9 | 11 => 30,
            2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
            2 => 28,
            _ => 31,
        }
    }

    #[test]
    fn parse_valid_period() {
        let period: Period = "09-2024".parse().unwrap();
        assert_eq!(period, Period { month: 9, year: 2024 });
    }

    #[test]
    fn parse_trims_whitespace() {
        let period: Period = "  12-1999\n".parse().unwrap();
        assert_eq!(period.month, 12);
        assert_eq!(period.year, 1999);
    }

    #[test]
    fn parse_rejects_wrong_shape() {
        for input in ["9-2024", "09/2024", "2024-09", "09-24", "09-20245", "", "ab-cdef"] {
            assert!(
                matches!(input.parse::<Period>(), Err(PeriodError::InvalidFormat(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn parse_rejects_month_out_of_range() {
        assert_eq!("13-2024".parse::<Period>(), Err(PeriodError::InvalidMonth(13)));
        assert_eq!("00-2024".parse::<Period>(), Err(PeriodError::InvalidMonth(0)));
    }

    #[test]
    fn display_round_trips_prompt_form() {
        let period = Period::new(3, 2025).unwrap();
        assert_eq!(period.to_string(), "03-2025");
    }

    #[test]
    fn output_file_name_uses_full_month_name() {
        let period = Period::new(9, 2024).unwrap();
        assert_eq!(period.output_file_name(), "Monthly Timeline September 2024.xlsx");
    }

    #[test]
    fn weekend_days_september_2024() {
        let cal = MonthCalendar::new(Period::new(9, 2024).unwrap());
        assert_eq!(cal.days_in_month, 30);
        assert_eq!(
            cal.weekend_days.iter().copied().collect::<Vec<_>>(),
            vec![1, 7, 8, 14, 15, 21, 22, 28, 29]
        );
    }

    #[test]
    fn days_in_month_matches_gregorian_calendar() {
        for year in [1900, 1999, 2000, 2023, 2024, 2100] {
            for month in 1..=12 {
                let cal = MonthCalendar::new(Period::new(month, year).unwrap());
                assert_eq!(
                    cal.days_in_month,
                    gregorian_length(month, year),
                    "{month:02}-{year}"
                );
            }
        }
    }

    #[test]
    fn weekend_set_stays_within_month() {
        for month in 1..=12 {
            let cal = MonthCalendar::new(Period::new(month, 2026).unwrap());
            for day in 1..=cal.days_in_month {
                let date = cal.period.date(day).unwrap();
                let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
                assert_eq!(cal.is_weekend(day), weekend);
            }
            assert!(cal.weekend_days.iter().all(|d| *d <= cal.days_in_month));
        }
    }

    #[test]
    fn format_day_long_form() {
        let cal = MonthCalendar::new(Period::new(9, 2024).unwrap());
        assert_eq!(cal.format_day(2).unwrap(), "Monday, 02 September 2024");
        assert_eq!(cal.format_day(31), None);
        assert_eq!(cal.format_day(0), None);
    }

    #[test]
    fn february_leap_year_has_29th() {
        let cal = MonthCalendar::new(Period::new(2, 2024).unwrap());
        assert_eq!(cal.format_day(29).unwrap(), "Thursday, 29 February 2024");
        let cal = MonthCalendar::new(Period::new(2, 2023).unwrap());
        assert_eq!(cal.format_day(29), None);
    }
}
