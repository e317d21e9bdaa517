//! Error types for explicit expiration date construction.
//!
//! Decoding raw track data never produces one of these: an unusable field
//! collapses to an absent value instead. Errors only come from building a
//! [`YearMonth`](crate::YearMonth) out of explicit components or from parsing
//! its canonical `YYYY-MM` text form.

use std::fmt;

/// Errors that can occur when constructing a year-month directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiryError {
    /// Month is out of range (must be 1-12).
    InvalidMonth(u32),

    /// Year is outside the four-digit range (0-9999).
    YearOutOfRange(i32),

    /// Text is not in the canonical `YYYY-MM` form.
    InvalidFormat,
}

impl fmt::Display for ExpiryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMonth(m) => write!(f, "invalid month {}: must be 1-12", m),
            Self::YearOutOfRange(y) => {
                write!(f, "year {} out of range: must be 0-9999", y)
            }
            Self::InvalidFormat => {
                write!(f, "invalid year-month format (expected YYYY-MM)")
            }
        }
    }
}

impl std::error::Error for ExpiryError {}
