//! Raw field capture.
//!
//! Card fields keep the text they were parsed from, exactly as received from
//! track data or manual entry. That text can carry cardholder data, so it is
//! held in a [`RawField`] which:
//!
//! - zeroes its memory on drop using the `zeroize` crate
//! - never prints its content through `Debug`
//! - offers a redacted form safe for logs
//!
//! The [`RawData`] trait is the shared policy surface every parsed card field
//! exposes.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Access to the raw text a field was parsed from.
pub trait RawData {
    /// The raw text with leading and trailing whitespace removed.
    fn raw_data(&self) -> &str;

    /// Whether the raw text is longer than this field allows.
    fn exceeds_maximum_length(&self) -> bool;

    /// Returns true if any raw text was captured.
    fn has_raw_data(&self) -> bool {
        !self.raw_data().is_empty()
    }

    /// The raw text with every digit replaced by `*`.
    ///
    /// # Example
    ///
    /// ```
    /// use card_expiry::{ExpirationDate, RawData};
    ///
    /// let field = ExpirationDate::parse("09/25");
    /// assert_eq!(field.redacted(), "**/**");
    /// ```
    fn redacted(&self) -> String {
        redact(self.raw_data())
    }
}

/// Owned raw text, trimmed on capture and zeroized on drop.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RawField {
    text: String,
}

impl RawField {
    /// Captures `raw`, trimming surrounding control characters and spaces.
    /// `None` captures nothing.
    pub fn capture(raw: Option<&str>) -> Self {
        Self {
            text: raw.map(trim_field).unwrap_or_default().to_owned(),
        }
    }

    /// The captured text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    #[inline]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns true if nothing was captured.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Debug for RawField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawField").field(&redact(&self.text)).finish()
    }
}

/// Strips leading and trailing characters at or below U+0020 (ASCII
/// control characters and space).
///
/// Other Unicode whitespace, such as a no-break space, is kept and counts
/// toward a field's length.
pub fn trim_field(input: &str) -> &str {
    input.trim_matches(|c: char| c <= ' ')
}

/// Replaces every ASCII digit in `input` with `*`.
pub fn redact(input: &str) -> String {
    input
        .chars()
        .map(|c| if c.is_ascii_digit() { '*' } else { c })
        .collect()
}
