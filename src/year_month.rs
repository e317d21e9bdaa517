//! Calendar year-month values.
//!
//! A [`YearMonth`] names a whole month of a specific year with no day or
//! time-of-day component. It is the decoded form of a card expiration date.
//!
//! # Example
//!
//! ```
//! use card_expiry::YearMonth;
//!
//! let ym = YearMonth::new(2024, 2).unwrap();
//! assert_eq!(ym.days_in_month(), 29);
//! assert_eq!(ym.to_string(), "2024-02");
//! assert_eq!("2024-02".parse::<YearMonth>().unwrap(), ym);
//! ```

use crate::error::ExpiryError;
use chrono::{Datelike, Days, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use std::str::FromStr;

/// Smallest representable year.
pub const MIN_YEAR: i32 = 0;

/// Largest representable year.
pub const MAX_YEAR: i32 = 9999;

/// A calendar year and month.
///
/// Ordering is chronological.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    /// Always the first day of the month.
    first_day: NaiveDate,
}

impl YearMonth {
    /// Creates a new year-month.
    ///
    /// Returns an error if the month is not 1-12 or the year is not 0-9999.
    pub fn new(year: i32, month: u32) -> Result<Self, ExpiryError> {
        if !(1..=12).contains(&month) {
            return Err(ExpiryError::InvalidMonth(month));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ExpiryError::YearOutOfRange(year));
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or(ExpiryError::YearOutOfRange(year))
    }

    /// Returns the four-digit year.
    #[inline]
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// Returns the month (1-12).
    #[inline]
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// Returns the first day of the month.
    #[inline]
    pub const fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Returns the number of days in the month.
    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// Returns the last calendar day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.next_first_day() - Days::new(1)
    }

    /// First day of the following month. Year 10000 is still a valid
    /// `NaiveDate`, so this cannot overflow.
    fn next_first_day(&self) -> NaiveDate {
        self.first_day + Months::new(1)
    }

    /// Returns the last representable local date-time within the month,
    /// one nanosecond before midnight of the following month.
    pub fn end_of_month(&self) -> NaiveDateTime {
        self.start_of_next_month() - Duration::nanoseconds(1)
    }

    /// Returns midnight at the start of the following month.
    pub(crate) fn start_of_next_month(&self) -> NaiveDateTime {
        self.next_first_day().and_time(NaiveTime::default())
    }

    /// Returns the month after this one, or `None` past year 9999.
    pub fn next(&self) -> Option<Self> {
        match self.month() {
            12 => Self::new(self.year() + 1, 1).ok(),
            m => Self::new(self.year(), m + 1).ok(),
        }
    }

    /// Returns true if `date` falls within this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Months elapsed since January of year 0.
    pub(crate) fn ordinal(&self) -> i64 {
        i64::from(self.year()) * 12 + i64::from(self.month()) - 1
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl fmt::Debug for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "YearMonth({})", self)
    }
}

/// Parses the canonical `YYYY-MM` form produced by `Display`.
impl FromStr for YearMonth {
    type Err = ExpiryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year_str, month_str) = s.trim().split_once('-').ok_or(ExpiryError::InvalidFormat)?;

        let all_digits = |part: &str, len: usize| {
            part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !all_digits(year_str, 4) || !all_digits(month_str, 2) {
            return Err(ExpiryError::InvalidFormat);
        }

        let year: i32 = year_str.parse().map_err(|_| ExpiryError::InvalidFormat)?;
        let month: u32 = month_str.parse().map_err(|_| ExpiryError::InvalidFormat)?;
        Self::new(year, month)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for YearMonth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for YearMonth {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
