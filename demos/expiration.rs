//! Expiration date parsing example.
//!
//! Run with: `cargo run --example expiration`
//!
//! Set `RUST_LOG=card_expiry=trace` to see decode events.

use card_expiry::{clock::FixedClock, ExpirationDate, RawData};
use chrono::{TimeZone, Utc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Card Expiration Dates ===\n");

    // -------------------------------------------------------------------------
    // Track data parsing
    // -------------------------------------------------------------------------
    println!("--- Track Data Parsing ---\n");

    let fields = [
        "2512",    // YYMM
        "25/12",   // separator is ignored
        " 3001 ",  // surrounding whitespace
        "2513",    // month out of range
        "251",     // too short
        "202512",  // too long
        "",        // missing
    ];

    for raw in fields {
        let field = ExpirationDate::parse(raw);
        let value = if field.has_expiration_date() {
            field.to_string()
        } else {
            "(none)".to_string()
        };
        println!(
            "  {:<10} -> {:<8} over-long: {:<5} expired: {}",
            format!("'{}'", field.redacted()),
            value,
            field.exceeds_maximum_length(),
            field.is_expired()
        );
    }
    println!();

    // -------------------------------------------------------------------------
    // Fixed clock
    // -------------------------------------------------------------------------
    println!("--- Fixed Clock (2025-06-15 UTC) ---\n");

    let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap());
    for raw in ["2505", "2506", "2612"] {
        let field = ExpirationDate::parse(raw);
        let end = field
            .end_of_month_instant_at(&clock)
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();
        println!(
            "  {} expired: {:<5} months left: {:<3} valid until: {}",
            field,
            field.is_expired_at(&clock),
            field.months_until_expiry_at(&clock).unwrap_or(0),
            end
        );
    }
    println!();

    // -------------------------------------------------------------------------
    // Other constructors
    // -------------------------------------------------------------------------
    println!("--- Other Constructors ---\n");

    match ExpirationDate::new(2030, 13) {
        Ok(field) => println!("  explicit: {}", field),
        Err(e) => println!("  explicit: {}", e),
    }

    let issued = Utc.with_ymd_and_hms(2027, 4, 17, 9, 30, 0).unwrap();
    let field = ExpirationDate::from_date(Some(issued));
    println!("  from date-time {}: {}", issued, field);
    println!(
        "  track format: {}",
        field.to_track_format().unwrap_or_default()
    );
}
