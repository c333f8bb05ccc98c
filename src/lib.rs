mod calendar;
mod clock;
mod config;
mod consts;
mod lightbox;
mod page;
mod prelude;
mod range;
mod types;

pub use calendar::{CalendarState, CalendarView, DayCell, GridCell, MonthGrid, RangeCalendar};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CalendarConfig, ConfigError, LightboxConfig, WidgetConfig};
pub use consts::*;
pub use lightbox::{Control, ImageList, ImageRef, Key, Lightbox, LightboxState, LightboxView};
pub use page::{Event, Page, PageElements, Target, Update};
pub use range::{DateRange, DayMark, Selection};
pub use types::{Day, Month, Weekday, Year, YearMonth, days_in_month, is_leap_year, weekday_of};

use crate::prelude::*;
use std::str::FromStr;

/// A calendar date reduced to (year, month, day).
///
/// This is the identity of a day cell: it orders chronologically and its
/// textual form is the zero-padded `YYYY-MM-DD` key stored on each cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct DateKey {
    year:  Year,
    month: Month,
    day:   Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl DateKey {
    /// Creates a date from already validated components.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if `day` does not exist in that month.
    pub fn new(year: Year, month: Month, day: Day) -> Result<Self, ParseError> {
        Day::new(day.get(), year.get(), month.get())?;
        Ok(Self { year, month, day })
    }

    /// Creates a date from raw numbers.
    ///
    /// # Errors
    /// Returns `ParseError` if any component is out of range.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        Ok(Self {
            year:  Year::new(year)?,
            month: Month::new(month)?,
            day:   Day::new(day, year, month)?,
        })
    }

    /// First day of the given month
    pub fn first_of(month: YearMonth) -> Self {
        Self {
            year:  month.year(),
            month: month.month(),
            day:   Day::FIRST,
        }
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    /// The month this date falls in
    pub const fn year_month(&self) -> YearMonth {
        YearMonth::new(self.year, self.month)
    }

    pub const fn weekday(&self) -> Weekday {
        weekday_of(self.year.get(), self.month.get(), self.day.get())
    }

    /// US short form, e.g. "Apr 20, 2024"
    pub fn short_label(&self) -> String {
        format!("{} {}, {}", self.month.short_name(), self.day, self.year)
    }

    fn parse_component<T: FromStr>(s: &str, width: usize) -> Result<T, ParseError> {
        if s.len() != width || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }
        s.parse::<T>().map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl FromStr for DateKey {
    type Err = ParseError;

    /// Parses the strict `YYYY-MM-DD` cell key
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        match parts.as_slice() {
            [year, month, day] => {
                let year = Self::parse_component::<u16>(year, 4)?;
                let month = Self::parse_component::<u8>(month, 2)?;
                let day = Self::parse_component::<u8>(day, 2)?;
                Self::from_ymd(year, month, day)
            }
            _ => Err(ParseError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {} {DATE_SEPARATOR} separators",
                parts.len() - 1
            ))),
        }
    }
}

impl TryFrom<chrono::NaiveDate> for DateKey {
    type Error = ParseError;

    fn try_from(date: chrono::NaiveDate) -> Result<Self, Self::Error> {
        use chrono::Datelike;

        let year = u16::try_from(date.year()).map_err(|_| ParseError::InvalidFormat(date.to_string()))?;
        // chrono guarantees month in 1..=12 and day in 1..=31
        let month = u8::try_from(date.month()).map_err(|_| ParseError::InvalidFormat(date.to_string()))?;
        let day = u8::try_from(date.day()).map_err(|_| ParseError::InvalidFormat(date.to_string()))?;
        Self::from_ymd(year, month, day)
    }
}

impl serde::Serialize for DateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for DateKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use super::DateKey;

    pub fn date(year: u16, month: u8, day: u8) -> DateKey {
        DateKey::from_ymd(year, month, day).unwrap()
    }
}
