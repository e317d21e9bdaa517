//! Sources of the current time.
//!
//! Expiration checks read "now" at call time. [`Clock`] abstracts that read
//! so callers and tests can supply a fixed instant and time zone instead of
//! the system clock.
//!
//! # Example
//!
//! ```
//! use card_expiry::clock::{Clock, FixedClock};
//! use chrono::{TimeZone, Utc};
//!
//! let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 9, 15, 12, 0, 0).unwrap());
//! assert_eq!(clock.today().to_string(), "2025-09-15");
//! ```

use chrono::{DateTime, Local, NaiveDate, TimeZone};

/// A source of the current instant in some time zone.
pub trait Clock {
    /// The zone local dates and times are resolved in.
    type Zone: TimeZone;

    /// Returns the current instant.
    fn now(&self) -> DateTime<Self::Zone>;

    /// Returns the current calendar date in the clock's zone.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Returns the clock's time zone.
    fn zone(&self) -> Self::Zone {
        self.now().timezone()
    }
}

/// The system clock in the system's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Zone = Local;

    #[inline]
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone)]
pub struct FixedClock<Tz: TimeZone> {
    instant: DateTime<Tz>,
}

impl<Tz: TimeZone> FixedClock<Tz> {
    /// Creates a clock that always reports `instant`.
    pub fn new(instant: DateTime<Tz>) -> Self {
        Self { instant }
    }
}

impl<Tz: TimeZone> Clock for FixedClock<Tz> {
    type Zone = Tz;

    fn now(&self) -> DateTime<Tz> {
        self.instant.clone()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    type Zone = C::Zone;

    fn now(&self) -> DateTime<Self::Zone> {
        (**self).now()
    }
}
