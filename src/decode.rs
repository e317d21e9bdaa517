//! Expiration date decoding.
//!
//! Track data carries the expiration date as four digits, `YYMM`: a
//! two-digit year within the century followed by a two-digit month.
//! Decoding never fails loudly. Anything that does not decode cleanly is
//! reported as [`Decoded::Absent`].
//!
//! # Decode Rules
//!
//! 1. Trim surrounding spaces and control characters
//! 2. Drop every character that is not an ASCII digit
//! 3. Exactly four digits must remain
//! 4. The last two digits must be a month in 01-12
//! 5. The first two digits map to years 2000-2099
//!
//! # Example
//!
//! ```
//! use card_expiry::decode::{decode_expiration, Decoded};
//!
//! match decode_expiration("25/09") {
//!     Decoded::Present(ym) => assert_eq!(ym.to_string(), "2025-09"),
//!     Decoded::Absent => unreachable!(),
//! }
//! assert_eq!(decode_expiration("2513"), Decoded::Absent);
//! ```

use crate::raw::{redact, trim_field};
use crate::year_month::YearMonth;
use chrono::Datelike;
use tracing::trace;

/// First year of the century two-digit years are read in.
pub const CENTURY_BASE: i32 = 2000;

/// Number of digits in an encoded expiration date.
pub const ENCODED_DIGITS: usize = 4;

/// Outcome of decoding an expiration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decoded {
    /// The field decoded to a year-month.
    Present(YearMonth),
    /// The field was empty or did not decode.
    Absent,
}

impl Decoded {
    /// Returns true for [`Decoded::Present`].
    #[inline]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Converts to an `Option`.
    #[inline]
    pub const fn year_month(self) -> Option<YearMonth> {
        match self {
            Self::Present(ym) => Some(ym),
            Self::Absent => None,
        }
    }
}

impl From<Option<YearMonth>> for Decoded {
    fn from(value: Option<YearMonth>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }
}

impl From<Decoded> for Option<YearMonth> {
    fn from(decoded: Decoded) -> Self {
        decoded.year_month()
    }
}

/// Decodes a raw expiration field in `YYMM` form.
///
/// Separators and other non-digit characters are ignored, so `"25/09"` and
/// `"2509"` decode identically.
pub fn decode_expiration(raw: &str) -> Decoded {
    let trimmed = trim_field(raw);
    let digits: Vec<u8> = trimmed
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    let decoded = decode_digits(&digits);
    trace!(
        field = %redact(trimmed),
        digits = digits.len(),
        present = decoded.is_present(),
        "decoded expiration field"
    );
    decoded
}

/// Decodes already-extracted digit values (0-9).
///
/// # Example
///
/// ```
/// use card_expiry::decode::{decode_digits, Decoded};
///
/// assert!(decode_digits(&[3, 0, 1, 2]).is_present());
/// assert_eq!(decode_digits(&[3, 0, 1, 3]), Decoded::Absent);
/// ```
pub fn decode_digits(digits: &[u8]) -> Decoded {
    let [y1, y2, m1, m2] = match <[u8; ENCODED_DIGITS]>::try_from(digits) {
        Ok(d) => d,
        Err(_) => return Decoded::Absent,
    };
    if [y1, y2, m1, m2].iter().any(|&d| d > 9) {
        return Decoded::Absent;
    }

    let year = CENTURY_BASE + i32::from(y1 * 10 + y2);
    let month = u32::from(m1 * 10 + m2);
    YearMonth::new(year, month).ok().into()
}

/// Encodes a year-month as `YYMM` track data.
///
/// Returns `None` when the year lies outside the decodable century.
///
/// # Example
///
/// ```
/// use card_expiry::{decode::encode_expiration, YearMonth};
///
/// let ym = YearMonth::new(2025, 9).unwrap();
/// assert_eq!(encode_expiration(ym).as_deref(), Some("2509"));
/// assert_eq!(encode_expiration(YearMonth::new(1999, 9).unwrap()), None);
/// ```
pub fn encode_expiration(ym: YearMonth) -> Option<String> {
    let offset = ym.year() - CENTURY_BASE;
    if !(0..100).contains(&offset) {
        return None;
    }
    Some(format!("{:02}{:02}", offset, ym.month()))
}

/// Truncates a calendar date or date-time to its year and month.
///
/// The day and any time-of-day are discarded.
///
/// # Example
///
/// ```
/// use card_expiry::decode::to_year_month;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 9, 30).unwrap();
/// assert_eq!(to_year_month(&date).unwrap().to_string(), "2025-09");
/// ```
pub fn to_year_month<D: Datelike>(date: &D) -> Option<YearMonth> {
    YearMonth::new(date.year(), date.month()).ok()
}
