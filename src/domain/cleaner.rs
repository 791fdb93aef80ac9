//! Price text cleaning and formatting
//!
//! Turns the raw text found in a price element ("$1,234.56", "Rs. 499",
//! "EUR 12.99.") into a numeric [`Price`].
//!
//! Stripping grammar, applied to the input text:
//! - ASCII digits are kept
//! - a `.` is kept only when the next character is an ASCII digit
//! - everything else (currency symbols, thousands separators, spaces,
//!   signs, trailing punctuation) is dropped
//!
//! The remainder must be non-empty and contain at most one `.`.
//!
//! A currency prefix ending in a dot and written without a space reads as a
//! decimal point: "Rs.499" cleans to 0.499, while "Rs. 499" cleans to 499.

use once_cell::sync::Lazy;
use regex::Regex;

use super::errors::{PriceWatchError, PriceWatchResult};
use super::pricing::Price;

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern compiles"));
static WHITESPACE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));

/// Reduce raw price text to the digits and decimal point that form the number
pub fn strip_price_text(text: &str) -> String {
    let mut stripped = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            stripped.push(c);
        } else if c == '.' && chars.peek().is_some_and(char::is_ascii_digit) {
            stripped.push(c);
        }
    }

    stripped
}

/// Parse raw price text into a [`Price`]
pub fn clean_price(text: &str) -> PriceWatchResult<Price> {
    let stripped = strip_price_text(text);

    if stripped.is_empty() {
        return Err(PriceWatchError::parse(text, "no digits found"));
    }
    if stripped.matches('.').count() > 1 {
        return Err(PriceWatchError::parse(text, "more than one decimal point"));
    }

    let value: f64 = stripped
        .parse()
        .map_err(|e| PriceWatchError::parse(text, &format!("{e}")))?;

    Price::new(value).map_err(|_| PriceWatchError::parse(text, "value out of range"))
}

/// Render a price with exactly two fractional digits
pub fn format_price(value: f64) -> String {
    format!("{value:.2}")
}

/// Strip markup fragments and collapse whitespace in a product description
pub fn clean_description(text: &str) -> String {
    let without_tags = TAG_PATTERN.replace_all(text, "");
    WHITESPACE_PATTERN.replace_all(without_tags.trim(), " ").into_owned()
}
