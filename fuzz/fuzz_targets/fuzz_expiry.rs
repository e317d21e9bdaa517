//! Fuzz target for expiration field parsing.
//!
//! Tests that parsing never panics on arbitrary input and that decoded
//! values always re-encode to themselves.

#![no_main]

use libfuzzer_sys::fuzz_target;
use card_expiry::{ExpirationDate, RawData, YearMonth};

fuzz_target!(|data: &str| {
    // These should never panic
    let field = ExpirationDate::parse(data);
    let _ = field.exceeds_maximum_length();
    let _ = field.redacted();
    let _ = field.is_expired();
    let _ = field.end_of_month_instant();
    let _ = format!("{:?}", field);
    let _ = data.parse::<YearMonth>();

    // If decoding succeeds, projections must reproduce the value
    if let Some(ym) = field.expiration_date() {
        let track = field.to_track_format().expect("decoded year is in century");
        assert_eq!(ExpirationDate::parse(&track), field);
        assert_eq!(field.to_string().parse::<YearMonth>(), Ok(ym));
    }
});
