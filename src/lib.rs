//! # card_expiry
//!
//! Payment card expiration date parsing for Rust.
//!
//! ## Features
//!
//! - Decodes `YYMM` expiration fields from magnetic-stripe track data
//! - Never fails on bad input: unusable fields are simply absent
//! - Expiry checks against an injectable clock
//! - End-of-month instants for validity boundary comparisons
//! - Raw field text zeroized on drop and redacted in `Debug`
//!
//! ## Quick Start
//!
//! ```rust
//! use card_expiry::{ExpirationDate, RawData, YearMonth};
//!
//! let field = ExpirationDate::parse("30/11");
//! assert!(field.has_expiration_date());
//! assert_eq!(field.expiration_date(), YearMonth::new(2030, 11).ok());
//! assert_eq!(field.to_string(), "2030-11");
//!
//! // Over-long fields are flagged even when they decode
//! assert!(field.exceeds_maximum_length());
//!
//! // Unknown expiration counts as expired
//! let missing = ExpirationDate::parse("");
//! assert!(!missing.has_expiration_date());
//! assert!(missing.is_expired());
//! ```
//!
//! ## Deterministic Checks
//!
//! ```rust
//! use card_expiry::{clock::FixedClock, ExpirationDate};
//! use chrono::{TimeZone, Utc};
//!
//! let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap());
//! assert!(ExpirationDate::parse("2509").is_expired_at(&clock));
//! assert!(!ExpirationDate::parse("2510").is_expired_at(&clock));
//! ```
//!
//! ## Decoding
//!
//! ```rust
//! use card_expiry::decode::{decode_expiration, Decoded};
//!
//! match decode_expiration("2509") {
//!     Decoded::Present(ym) => assert_eq!(ym.month(), 9),
//!     Decoded::Absent => panic!("expected a value"),
//! }
//! ```
//!
//! Two-digit years are read as 2000-2099.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialize/Deserialize for `YearMonth` and `ExpirationDate` |
//!
//! ## Security
//!
//! - Raw field text is zeroized when dropped
//! - `Debug` shows raw text with digits masked
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod clock;
pub mod decode;
pub mod error;
pub mod expiry;
pub mod raw;
pub mod year_month;

// Re-export main types at crate root
pub use clock::{Clock, FixedClock, SystemClock};
pub use decode::{decode_expiration, Decoded};
pub use error::ExpiryError;
pub use expiry::ExpirationDate;
pub use raw::{RawData, RawField};
pub use year_month::YearMonth;
