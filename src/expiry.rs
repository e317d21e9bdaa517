//! Card expiration date field.
//!
//! [`ExpirationDate`] parses, validates, and reports on the expiration date
//! found in magnetic-stripe track data or entered by hand. It never fails to
//! construct: a missing or garbled field yields an entity with no value,
//! and an entity with no value counts as expired.
//!
//! # Construction
//!
//! | Source | Constructor |
//! |--------|-------------|
//! | nothing | [`ExpirationDate::none`] / `Default` |
//! | year and month | [`ExpirationDate::new`] |
//! | calendar date or date-time | [`ExpirationDate::from_date`] |
//! | raw track text | [`ExpirationDate::parse`] |
//!
//! # Example
//!
//! ```
//! use card_expiry::{ExpirationDate, RawData};
//! use card_expiry::clock::FixedClock;
//! use chrono::{TimeZone, Utc};
//!
//! let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 9, 30, 12, 0, 0).unwrap());
//!
//! let field = ExpirationDate::parse("25/09");
//! assert!(field.has_expiration_date());
//! assert_eq!(field.to_string(), "2025-09");
//! assert!(!field.is_expired_at(&clock));
//! assert!(field.exceeds_maximum_length());
//!
//! // Garbage is not an error, just absent
//! let field = ExpirationDate::parse("2513");
//! assert!(!field.has_expiration_date());
//! assert!(field.is_expired_at(&clock));
//! ```

use crate::clock::{Clock, SystemClock};
use crate::decode::{decode_expiration, encode_expiration, to_year_month, Decoded, ENCODED_DIGITS};
use crate::error::ExpiryError;
use crate::raw::{RawData, RawField};
use crate::year_month::YearMonth;
use chrono::{DateTime, Datelike, Duration, NaiveDateTime, Offset, TimeZone};
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// A card expiration date field.
///
/// Equality and hashing consider only the decoded year-month. Two fields
/// parsed from different raw text that decode to the same month are equal,
/// and any two fields without a value are equal.
#[derive(Clone, Default)]
pub struct ExpirationDate {
    raw: RawField,
    expiration_date: Option<YearMonth>,
}

impl ExpirationDate {
    /// An expiration date with no value.
    pub fn none() -> Self {
        Self::default()
    }

    /// An expiration date from an explicit year and month.
    ///
    /// Returns an error if the month is not 1-12 or the year is not 0-9999.
    ///
    /// # Example
    ///
    /// ```
    /// use card_expiry::ExpirationDate;
    ///
    /// let field = ExpirationDate::new(2030, 12).unwrap();
    /// assert_eq!(field.to_string(), "2030-12");
    /// assert!(ExpirationDate::new(2030, 13).is_err());
    /// ```
    pub fn new(year: i32, month: u32) -> Result<Self, ExpiryError> {
        YearMonth::new(year, month).map(Self::from)
    }

    /// An expiration date from a calendar date, keeping only its year and
    /// month. `None` yields an expiration date with no value.
    ///
    /// # Example
    ///
    /// ```
    /// use card_expiry::ExpirationDate;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2027, 4, 17).unwrap();
    /// let field = ExpirationDate::from_date(Some(date));
    /// assert_eq!(field, ExpirationDate::new(2027, 4).unwrap());
    /// assert!(!ExpirationDate::from_date(None::<NaiveDate>).has_expiration_date());
    /// ```
    pub fn from_date<D: Datelike>(date: Option<D>) -> Self {
        Self {
            raw: RawField::default(),
            expiration_date: date.as_ref().and_then(to_year_month),
        }
    }

    /// An expiration date parsed from raw track data in `YYMM` form.
    ///
    /// Never fails. Input that does not decode yields an expiration date
    /// with no value; the raw text is kept either way.
    pub fn parse(raw: &str) -> Self {
        Self::from(Some(raw))
    }

    /// Returns true if a year-month was decoded.
    #[inline]
    pub fn has_expiration_date(&self) -> bool {
        self.expiration_date.is_some()
    }

    /// Returns the decoded year-month, if any.
    #[inline]
    pub fn expiration_date(&self) -> Option<YearMonth> {
        self.expiration_date
    }

    /// Returns the decoded value as a [`Decoded`].
    #[inline]
    pub fn decoded(&self) -> Decoded {
        self.expiration_date.into()
    }

    /// Returns true if the card has expired according to the system clock.
    ///
    /// The current date is read on every call.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(&SystemClock)
    }

    /// Returns true if the card has expired as of `clock`'s current date.
    ///
    /// A card is valid through the last day of its expiration month. An
    /// expiration date with no value is always expired.
    pub fn is_expired_at<C: Clock>(&self, clock: &C) -> bool {
        match self.expiration_date {
            Some(ym) => ym.last_day() < clock.today(),
            None => true,
        }
    }

    /// Returns the last instant of the expiration month in the system's
    /// local time zone.
    pub fn end_of_month_instant(&self) -> Option<DateTime<chrono::Local>> {
        self.end_of_month_instant_at(&SystemClock)
    }

    /// Returns the last instant of the expiration month in `clock`'s zone.
    ///
    /// This is one nanosecond before midnight at the start of the following
    /// month, so the whole final day is still inside the month.
    ///
    /// # Example
    ///
    /// ```
    /// use card_expiry::{clock::FixedClock, ExpirationDate};
    /// use chrono::{TimeZone, Utc};
    ///
    /// let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    /// let end = ExpirationDate::new(2025, 2).unwrap().end_of_month_instant_at(&clock).unwrap();
    /// assert_eq!(end.to_rfc3339(), "2025-02-28T23:59:59.999999999+00:00");
    /// ```
    pub fn end_of_month_instant_at<C: Clock>(&self, clock: &C) -> Option<DateTime<C::Zone>> {
        let ym = self.expiration_date?;
        let zone = clock.zone();

        // When the last local nanosecond repeats, the month ends on its
        // latest occurrence; when the next month's midnight is skipped, the
        // month ends where the skipped interval begins.
        let last_local = zone.from_local_datetime(&ym.end_of_month()).latest();
        let before_next = first_instant_from(&zone, &ym.start_of_next_month())
            .map(|start| start - Duration::nanoseconds(1));

        let instant = match (last_local, before_next) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        if instant.is_none() {
            debug!(expiration = %ym, "no local instant for end of expiration month");
        }
        instant
    }

    /// Returns the number of whole months from `clock`'s current month until
    /// the expiration month.
    ///
    /// Returns 0 during or after the expiration month and `None` when there
    /// is no value.
    pub fn months_until_expiry_at<C: Clock>(&self, clock: &C) -> Option<u32> {
        let ym = self.expiration_date?;
        let today = clock.today();
        let current = i64::from(today.year()) * 12 + i64::from(today.month()) - 1;
        let remaining = (ym.ordinal() - current).max(0);
        Some(u32::try_from(remaining).unwrap_or(u32::MAX))
    }

    /// Returns the value encoded as `YYMM` track data.
    ///
    /// Returns `None` when there is no value or its year cannot be written
    /// with two digits.
    ///
    /// # Example
    ///
    /// ```
    /// use card_expiry::ExpirationDate;
    ///
    /// let field = ExpirationDate::parse("25/09");
    /// assert_eq!(field.to_track_format().as_deref(), Some("2509"));
    /// ```
    pub fn to_track_format(&self) -> Option<String> {
        self.expiration_date.and_then(encode_expiration)
    }
}

/// Returns the first instant whose local time in `zone` is at or after
/// `local`.
///
/// If `local` was skipped by a forward offset change, this is the instant
/// the change took effect.
fn first_instant_from<Tz: TimeZone>(zone: &Tz, local: &NaiveDateTime) -> Option<DateTime<Tz>> {
    if let Some(instant) = zone.from_local_datetime(local).earliest() {
        return Some(instant);
    }

    // Read with the offset from before the change, `local` lands past the
    // skipped interval; read with the offset after it, it lands before.
    let offset_at = |utc: NaiveDateTime| {
        Duration::seconds(i64::from(zone.offset_from_utc_datetime(&utc).fix().local_minus_utc()))
    };
    let mut high = *local - offset_at(*local - Duration::days(1));
    let mut low = *local - offset_at(*local + Duration::days(1));
    if low >= high {
        return None;
    }
    while high - low > Duration::nanoseconds(1) {
        let mid = low + (high - low) / 2;
        if zone.from_utc_datetime(&mid).naive_local() >= *local {
            high = mid;
        } else {
            low = mid;
        }
    }
    Some(zone.from_utc_datetime(&high))
}

impl RawData for ExpirationDate {
    fn raw_data(&self) -> &str {
        self.raw.as_str()
    }

    /// True when the trimmed raw text has more than four characters,
    /// separators included, whether or not it decoded.
    fn exceeds_maximum_length(&self) -> bool {
        self.raw.char_len() > ENCODED_DIGITS
    }
}

impl From<Option<&str>> for ExpirationDate {
    fn from(raw: Option<&str>) -> Self {
        let raw = RawField::capture(raw);
        let expiration_date = decode_expiration(raw.as_str()).year_month();
        Self {
            raw,
            expiration_date,
        }
    }
}

impl From<&str> for ExpirationDate {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<YearMonth> for ExpirationDate {
    fn from(ym: YearMonth) -> Self {
        Self {
            raw: RawField::default(),
            expiration_date: Some(ym),
        }
    }
}

impl From<Decoded> for ExpirationDate {
    fn from(decoded: Decoded) -> Self {
        Self {
            raw: RawField::default(),
            expiration_date: decoded.year_month(),
        }
    }
}

impl PartialEq for ExpirationDate {
    fn eq(&self, other: &Self) -> bool {
        self.expiration_date == other.expiration_date
    }
}

impl Eq for ExpirationDate {}

impl Hash for ExpirationDate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.expiration_date.hash(state);
    }
}

/// Canonical `YYYY-MM`, or empty when there is no value.
impl fmt::Display for ExpirationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expiration_date {
            Some(ym) => fmt::Display::fmt(&ym, f),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for ExpirationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpirationDate")
            .field("raw", &self.raw)
            .field("expiration_date", &self.expiration_date)
            .finish()
    }
}

#[cfg(feature = "serde")]
mod serialization {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use zeroize::Zeroizing;

    #[derive(Serialize)]
    struct Repr<'a> {
        raw: &'a str,
        expiration_date: Option<YearMonth>,
    }

    #[derive(Deserialize)]
    struct OwnedRepr {
        #[serde(default)]
        raw: String,
        expiration_date: Option<YearMonth>,
    }

    impl Serialize for ExpirationDate {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            Repr {
                raw: self.raw.as_str(),
                expiration_date: self.expiration_date,
            }
            .serialize(serializer)
        }
    }

    /// Raw text must decode to the stored value. Empty raw text accepts any
    /// value, since explicit and date-built fields carry no raw text.
    impl<'de> Deserialize<'de> for ExpirationDate {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let OwnedRepr {
                raw,
                expiration_date,
            } = OwnedRepr::deserialize(deserializer)?;
            let raw = RawField::capture(Some(Zeroizing::new(raw).as_str()));

            if !raw.is_empty() {
                let decoded = decode_expiration(raw.as_str()).year_month();
                if decoded != expiration_date {
                    return Err(de::Error::custom(format!(
                        "raw field '{}' does not decode to the stored expiration date",
                        crate::raw::redact(raw.as_str())
                    )));
                }
            }

            Ok(Self {
                raw,
                expiration_date,
            })
        }
    }
}
