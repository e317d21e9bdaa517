//! Integration tests for card_expiry.
//!
//! These tests cover track-data edge cases, clock boundaries, and security
//! considerations of the raw field.

use card_expiry::{
    clock::{Clock, FixedClock},
    decode::{self, Decoded},
    ExpirationDate, ExpiryError, RawData, YearMonth,
};
use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use std::collections::HashSet;

// =============================================================================
// HELPERS
// =============================================================================

fn utc_clock(year: i32, month: u32, day: u32) -> FixedClock<Utc> {
    FixedClock::new(Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap())
}

fn ym(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).unwrap()
}

// =============================================================================
// TRACK DATA PARSING
// =============================================================================

mod track_fields {
    // Expiration fields as they appear after the separator on track 2
    pub const PLAIN: &str = "2512";
    pub const SLASHED: &str = "25/12";
    pub const SPACED: &str = " 25 12 ";
    pub const MONTH_ZERO: &str = "2500";
    pub const MONTH_THIRTEEN: &str = "2513";
    pub const TOO_SHORT: &str = "251";
    pub const TOO_LONG: &str = "251201";
    pub const LETTERS: &str = "YYMM";
}

#[test]
fn test_track_field_formats() {
    let expected = ExpirationDate::new(2025, 12).unwrap();
    assert_eq!(ExpirationDate::parse(track_fields::PLAIN), expected);
    assert_eq!(ExpirationDate::parse(track_fields::SLASHED), expected);
    assert_eq!(ExpirationDate::parse(track_fields::SPACED), expected);
}

#[test]
fn test_track_field_rejects() {
    for raw in [
        track_fields::MONTH_ZERO,
        track_fields::MONTH_THIRTEEN,
        track_fields::TOO_SHORT,
        track_fields::TOO_LONG,
        track_fields::LETTERS,
    ] {
        let field = ExpirationDate::parse(raw);
        assert!(!field.has_expiration_date(), "should be absent: {:?}", raw);
        assert_eq!(field.raw_data(), raw);
        assert_eq!(field.to_string(), "");
    }
}

#[test]
fn test_century_boundaries() {
    assert_eq!(ExpirationDate::parse("0001").expiration_date(), Some(ym(2000, 1)));
    assert_eq!(ExpirationDate::parse("9912").expiration_date(), Some(ym(2099, 12)));
}

#[test]
fn test_every_month_decodes() {
    for month in 1..=12u32 {
        let raw = format!("27{:02}", month);
        let field = ExpirationDate::parse(&raw);
        assert_eq!(field.expiration_date(), Some(ym(2027, month)), "{}", raw);
    }
}

#[test]
fn test_missing_input() {
    let field = ExpirationDate::from(None::<&str>);
    assert!(!field.has_expiration_date());
    assert!(field.is_expired());
    assert!(!field.has_raw_data());

    let field = ExpirationDate::parse("");
    assert!(!field.has_expiration_date());
    assert!(field.is_expired());
}

// =============================================================================
// MAXIMUM LENGTH
// =============================================================================

#[test]
fn test_maximum_length_counts_trimmed_text() {
    assert!(ExpirationDate::parse("  12345  ").exceeds_maximum_length());
    assert!(!ExpirationDate::parse("  1225  ").exceeds_maximum_length());
}

#[test]
fn test_maximum_length_independent_of_decoding() {
    // Decodes, but the separator makes it over-long
    let field = ExpirationDate::parse("12/25");
    assert!(field.has_expiration_date());
    assert!(field.exceeds_maximum_length());

    // Does not decode, but is within the limit
    let field = ExpirationDate::parse("1299");
    assert!(!field.has_expiration_date());
    assert!(!field.exceeds_maximum_length());

    // Neither decodes nor fits
    let field = ExpirationDate::parse("12345");
    assert!(!field.has_expiration_date());
    assert!(field.exceeds_maximum_length());
}

// =============================================================================
// EQUALITY
// =============================================================================

#[test]
fn test_equality_depends_only_on_value() {
    let a = ExpirationDate::parse("25/09");
    let b = ExpirationDate::parse("2509");
    let c = ExpirationDate::from_date(Some(NaiveDate::from_ymd_opt(2025, 9, 17).unwrap()));

    assert_eq!(a, a);
    assert_eq!(a, b);
    assert_eq!(b, a);
    assert_eq!(b, c);
    assert_eq!(a, c);
}

#[test]
fn test_absent_values_are_equal() {
    assert_eq!(ExpirationDate::parse("xx"), ExpirationDate::parse("2500"));
    assert_eq!(ExpirationDate::parse("xx"), ExpirationDate::none());
    assert_eq!(ExpirationDate::from_date(None::<NaiveDate>), ExpirationDate::none());
}

#[test]
fn test_hash_set_deduplicates_by_value() {
    let fields: HashSet<ExpirationDate> = ["25/09", "2509", " 2509", "2510", "bad", ""]
        .into_iter()
        .map(ExpirationDate::parse)
        .collect();
    assert_eq!(fields.len(), 3);
}

// =============================================================================
// EXPIRY
// =============================================================================

#[test]
fn test_expired_before_current_month() {
    let clock = utc_clock(2025, 6, 15);
    assert!(ExpirationDate::parse("2505").is_expired_at(&clock));
    assert!(ExpirationDate::parse("2412").is_expired_at(&clock));
}

#[test]
fn test_not_expired_current_or_later_month() {
    let clock = utc_clock(2025, 6, 15);
    assert!(!ExpirationDate::parse("2506").is_expired_at(&clock));
    assert!(!ExpirationDate::parse("2507").is_expired_at(&clock));
    assert!(!ExpirationDate::parse("3001").is_expired_at(&clock));
}

#[test]
fn test_valid_through_last_day() {
    let field = ExpirationDate::parse("2502");
    assert!(!field.is_expired_at(&utc_clock(2025, 2, 28)));
    assert!(field.is_expired_at(&utc_clock(2025, 3, 1)));
}

#[test]
fn test_absent_is_always_expired() {
    assert!(ExpirationDate::none().is_expired_at(&utc_clock(1999, 1, 1)));
    assert!(ExpirationDate::parse("2513").is_expired_at(&utc_clock(1999, 1, 1)));
}

#[test]
fn test_expiry_reads_clock_each_call() {
    struct Advancing(std::cell::Cell<u32>);

    impl Clock for Advancing {
        type Zone = Utc;

        fn now(&self) -> chrono::DateTime<Utc> {
            let month = self.0.get();
            self.0.set(month + 1);
            Utc.with_ymd_and_hms(2025, month, 1, 0, 0, 0).unwrap()
        }
    }

    let field = ExpirationDate::parse("2503");
    let clock = Advancing(std::cell::Cell::new(3));
    assert!(!field.is_expired_at(&clock));
    assert!(field.is_expired_at(&clock));
}

// =============================================================================
// END OF MONTH INSTANT
// =============================================================================

#[test]
fn test_end_of_month_february_non_leap() {
    let end = ExpirationDate::new(2025, 2)
        .unwrap()
        .end_of_month_instant_at(&utc_clock(2025, 1, 1))
        .unwrap();
    assert_eq!(end.to_rfc3339(), "2025-02-28T23:59:59.999999999+00:00");
}

#[test]
fn test_end_of_month_february_leap() {
    let end = ExpirationDate::new(2028, 2)
        .unwrap()
        .end_of_month_instant_at(&utc_clock(2025, 1, 1))
        .unwrap();
    assert_eq!(end.to_rfc3339(), "2028-02-29T23:59:59.999999999+00:00");
}

#[test]
fn test_end_of_month_uses_clock_zone() {
    let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap().with_timezone(&tokyo));
    let end = ExpirationDate::parse("2512").end_of_month_instant_at(&clock).unwrap();
    assert_eq!(end.to_rfc3339(), "2025-12-31T23:59:59.999999999+09:00");
}

#[test]
fn test_end_of_month_within_validity() {
    // The whole final day is inside the month
    let clock = utc_clock(2025, 1, 1);
    let end = ExpirationDate::parse("2504").end_of_month_instant_at(&clock).unwrap();
    let last_evening = Utc.with_ymd_and_hms(2025, 4, 30, 23, 0, 0).unwrap();
    let next_morning = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
    assert!(last_evening <= end);
    assert!(next_morning > end);
}

#[test]
fn test_end_of_month_absent() {
    assert!(ExpirationDate::none().end_of_month_instant_at(&utc_clock(2025, 1, 1)).is_none());
    assert!(ExpirationDate::parse("nope").end_of_month_instant().is_none());
}

// =============================================================================
// PROJECTIONS
// =============================================================================

#[test]
fn test_display_reparses() {
    for raw in ["0001", "2509", "9912"] {
        let field = ExpirationDate::parse(raw);
        let reparsed: YearMonth = field.to_string().parse().unwrap();
        assert_eq!(ExpirationDate::from(reparsed), field);
    }
}

#[test]
fn test_track_format_reparses() {
    let field = ExpirationDate::parse("31-07");
    let track = field.to_track_format().unwrap();
    assert_eq!(track, "3107");
    assert_eq!(ExpirationDate::parse(&track), field);
}

#[test]
fn test_decoded_is_exhaustive() {
    let describe = |field: &ExpirationDate| match field.decoded() {
        Decoded::Present(ym) => format!("expires {}", ym),
        Decoded::Absent => "no expiration".to_string(),
    };
    assert_eq!(describe(&ExpirationDate::parse("2509")), "expires 2025-09");
    assert_eq!(describe(&ExpirationDate::parse("25")), "no expiration");
}

#[test]
fn test_months_until_expiry() {
    let clock = utc_clock(2025, 11, 20);
    assert_eq!(ExpirationDate::parse("2611").months_until_expiry_at(&clock), Some(12));
    assert_eq!(ExpirationDate::parse("2511").months_until_expiry_at(&clock), Some(0));
    assert_eq!(ExpirationDate::parse("2001").months_until_expiry_at(&clock), Some(0));
    assert_eq!(ExpirationDate::parse("").months_until_expiry_at(&clock), None);
}

// =============================================================================
// EXPLICIT CONSTRUCTION
// =============================================================================

#[test]
fn test_explicit_out_of_range_rejected() {
    assert_eq!(ExpirationDate::new(2025, 0).unwrap_err(), ExpiryError::InvalidMonth(0));
    assert_eq!(ExpirationDate::new(2025, 13).unwrap_err(), ExpiryError::InvalidMonth(13));
    assert_eq!(
        ExpirationDate::new(12025, 1).unwrap_err(),
        ExpiryError::YearOutOfRange(12025)
    );
}

#[test]
fn test_legacy_date_truncation() {
    let with_time = Utc.with_ymd_and_hms(2026, 7, 31, 23, 59, 59).unwrap();
    assert_eq!(
        ExpirationDate::from_date(Some(with_time)),
        ExpirationDate::new(2026, 7).unwrap()
    );
    assert_eq!(decode::to_year_month(&with_time), Some(ym(2026, 7)));
}

// =============================================================================
// SECURITY
// =============================================================================

#[test]
fn test_debug_masks_raw_text() {
    let field = ExpirationDate::parse("2509");
    let debug = format!("{:?}", field);
    assert!(!debug.contains("2509"));
}

#[test]
fn test_redacted_hides_digits() {
    assert_eq!(ExpirationDate::parse("25/09").redacted(), "**/**");
    assert_eq!(ExpirationDate::none().redacted(), "");
}

#[test]
fn test_thread_sharing() {
    let field = std::sync::Arc::new(ExpirationDate::parse("2509"));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let field = std::sync::Arc::clone(&field);
            std::thread::spawn(move || field.to_string())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "2025-09");
    }
}

// =============================================================================
// SERIALIZATION
// =============================================================================

#[cfg(feature = "serde")]
#[test]
fn test_serde_reparse_matches() {
    for raw in ["2509", "25/09", "2513", ""] {
        let field = ExpirationDate::parse(raw);
        let json = serde_json::to_string(&field).unwrap();
        let back: ExpirationDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, field);
        assert_eq!(ExpirationDate::parse(back.raw_data()), back);
    }
}
