//! Type-safe price representation using decimal arithmetic.
//!
//! Shopify reports money as a decimal string plus an ISO 4217 code. [`Price`]
//! parses that pair once and formats it the way an `en-US` locale displays
//! currency: the currency's own symbol, its minor-unit precision, and `,`
//! thousands grouping.
//!
//! ```
//! use b2b_headless_core::{format_price, Price};
//!
//! let price = Price::parse("1234.5", "USD").unwrap();
//! assert_eq!(price.display(), "$1,234.50");
//!
//! assert_eq!(format_price(Some("10.5"), Some("USD")), "$10.50");
//! assert_eq!(format_price(None, Some("USD")), "Price unavailable");
//! ```

use core::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Placeholder shown when a price cannot be formatted.
pub const PRICE_UNAVAILABLE: &str = "Price unavailable";

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is not a plain decimal string.
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),
    /// The amount is below zero.
    #[error("amount cannot be negative: {0}")]
    Negative(Decimal),
    /// The currency code is not three ASCII letters.
    #[error("invalid currency code {0:?}")]
    InvalidCurrency(String),
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Parse a price from the string pair the Storefront API returns.
    ///
    /// The amount must be plain digits with an optional `.` fraction: no
    /// `,`/`_` separators and no exponent. Amounts that do not fit a
    /// [`Decimal`] exactly are rejected rather than rounded.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not a non-negative decimal or the
    /// currency code is malformed.
    pub fn parse(amount: &str, currency_code: &str) -> Result<Self, PriceError> {
        let currency_code = CurrencyCode::parse(currency_code)?;
        let trimmed = amount.trim();
        let invalid = || PriceError::InvalidAmount(amount.to_string());
        if !is_plain_decimal(trimmed) {
            return Err(invalid());
        }
        let amount = Decimal::from_str_exact(trimmed).map_err(|_| invalid())?;

        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }

        Ok(Self::new(amount, currency_code))
    }

    /// Format for display (e.g., `$19.99`, `¥1,200`, `CHF 10.50`).
    #[must_use]
    pub fn display(&self) -> String {
        let minor_units = self.currency_code.minor_units();
        let mut rounded = self
            .amount
            .round_dp_with_strategy(minor_units, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(minor_units);

        let digits = rounded.abs().to_string();
        let (whole, fraction) = digits
            .split_once('.')
            .map_or((digits.as_str(), None), |(w, f)| (w, Some(f)));

        let mut number = group_thousands(whole);
        if let Some(fraction) = fraction {
            number.push('.');
            number.push_str(fraction);
        }

        match self.currency_code.symbol() {
            Some(symbol) => format!("{symbol}{number}"),
            None => format!("{}\u{a0}{number}", self.currency_code.as_str()),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Format an optional amount/currency pair, falling back to
/// [`PRICE_UNAVAILABLE`] when either part is missing or malformed.
#[must_use]
pub fn format_price(amount: Option<&str>, currency_code: Option<&str>) -> String {
    match (amount, currency_code) {
        (Some(amount), Some(code)) => Price::parse(amount, code)
            .map_or_else(|_| PRICE_UNAVAILABLE.to_string(), |price| price.display()),
        _ => PRICE_UNAVAILABLE.to_string(),
    }
}

/// `-?[0-9]+(\.[0-9]+)?`
fn is_plain_decimal(amount: &str) -> bool {
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    let unsigned = amount.strip_prefix('-').unwrap_or(amount);
    match unsigned.split_once('.') {
        Some((whole, fraction)) => all_digits(whole) && all_digits(fraction),
        None => all_digits(unsigned),
    }
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// ISO 4217 currency code (three upper-case ASCII letters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    /// US dollar.
    pub const USD: Self = Self(*b"USD");

    /// Parse a currency code, upper-casing it.
    ///
    /// # Errors
    ///
    /// Returns an error unless the input is exactly three ASCII letters.
    pub fn parse(code: &str) -> Result<Self, PriceError> {
        let bytes = code.trim().as_bytes();
        match bytes {
            [a, b, c] if bytes.iter().all(u8::is_ascii_alphabetic) => Ok(Self([
                a.to_ascii_uppercase(),
                b.to_ascii_uppercase(),
                c.to_ascii_uppercase(),
            ])),
            _ => Err(PriceError::InvalidCurrency(code.to_string())),
        }
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("XXX")
    }

    /// Display symbol used by `en-US` formatting, if the currency has one.
    #[must_use]
    pub fn symbol(&self) -> Option<&'static str> {
        let symbol = match &self.0 {
            b"USD" => "$",
            b"EUR" => "€",
            b"GBP" => "£",
            b"JPY" => "¥",
            b"CAD" => "CA$",
            b"AUD" => "A$",
            b"NZD" => "NZ$",
            b"INR" => "₹",
            b"CNY" => "CN¥",
            b"MXN" => "MX$",
            b"KRW" => "₩",
            b"BRL" => "R$",
            b"HKD" => "HK$",
            _ => return None,
        };
        Some(symbol)
    }

    /// Number of digits after the decimal separator.
    #[must_use]
    pub fn minor_units(&self) -> u32 {
        match &self.0 {
            b"JPY" | b"KRW" => 0,
            _ => 2,
        }
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::USD
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = PriceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.as_str().to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads_minor_units() {
        assert_eq!(format_price(Some("10.5"), Some("USD")), "$10.50");
        assert_eq!(format_price(Some("10"), Some("USD")), "$10.00");
        assert_eq!(format_price(Some("0.0"), Some("USD")), "$0.00");
    }

    #[test]
    fn test_format_missing_parts() {
        assert_eq!(format_price(None, None), PRICE_UNAVAILABLE);
        assert_eq!(format_price(Some("10.5"), None), PRICE_UNAVAILABLE);
        assert_eq!(format_price(None, Some("USD")), PRICE_UNAVAILABLE);
    }

    #[test]
    fn test_format_uses_own_currency() {
        assert_eq!(format_price(Some("10.5"), Some("EUR")), "€10.50");
        assert_eq!(format_price(Some("10.5"), Some("GBP")), "£10.50");
        assert_eq!(format_price(Some("10.5"), Some("CAD")), "CA$10.50");
        assert_eq!(format_price(Some("10.5"), Some("CHF")), "CHF\u{a0}10.50");
    }

    #[test]
    fn test_format_zero_decimal_currency() {
        assert_eq!(format_price(Some("1200"), Some("JPY")), "¥1,200");
        assert_eq!(format_price(Some("1200.5"), Some("JPY")), "¥1,201");
    }

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(format_price(Some("1234567.891"), Some("USD")), "$1,234,567.89");
        assert_eq!(format_price(Some("999.999"), Some("USD")), "$1,000.00");
        assert_eq!(format_price(Some("100"), Some("USD")), "$100.00");
    }

    #[test]
    fn test_format_rounds_half_away_from_zero() {
        assert_eq!(format_price(Some("0.125"), Some("USD")), "$0.13");
        assert_eq!(format_price(Some("0.124"), Some("USD")), "$0.12");
    }

    #[test]
    fn test_rejects_malformed_amounts() {
        assert_eq!(format_price(Some("1,000.00"), Some("USD")), PRICE_UNAVAILABLE);
        assert_eq!(format_price(Some("ten"), Some("USD")), PRICE_UNAVAILABLE);
        assert_eq!(format_price(Some(""), Some("USD")), PRICE_UNAVAILABLE);
        assert!(matches!(
            Price::parse("-1.00", "USD"),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn test_rejects_separators_and_exponents() {
        assert_eq!(format_price(Some("1_000"), Some("USD")), PRICE_UNAVAILABLE);
        assert_eq!(format_price(Some("1e3"), Some("USD")), PRICE_UNAVAILABLE);
        assert_eq!(format_price(Some("1E3"), Some("USD")), PRICE_UNAVAILABLE);
        assert_eq!(format_price(Some("+5"), Some("USD")), PRICE_UNAVAILABLE);
        assert_eq!(format_price(Some(".5"), Some("USD")), PRICE_UNAVAILABLE);
        assert_eq!(format_price(Some("5."), Some("USD")), PRICE_UNAVAILABLE);
        assert!(matches!(
            Price::parse("1_000", "USD"),
            Err(PriceError::InvalidAmount(a)) if a == "1_000"
        ));
    }

    #[test]
    fn test_rejects_amounts_that_would_round() {
        // 30 integer digits overflow; 29 fractional digits exceed the scale.
        assert!(Price::parse("123456789012345678901234567890", "USD").is_err());
        assert!(Price::parse("0.12345678901234567890123456789", "USD").is_err());
        assert_eq!(
            format_price(Some("0.12345678901234567890123456789"), Some("USD")),
            PRICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_accepts_surrounding_whitespace() {
        assert_eq!(format_price(Some(" 10.5 "), Some("USD")), "$10.50");
    }

    #[test]
    fn test_currency_code_parse() {
        assert_eq!(CurrencyCode::parse("usd").unwrap(), CurrencyCode::USD);
        assert!(CurrencyCode::parse("US").is_err());
        assert!(CurrencyCode::parse("US1").is_err());
        assert!(CurrencyCode::parse("DOLLAR").is_err());
        assert_eq!(format_price(Some("1"), Some("dollars")), PRICE_UNAVAILABLE);
    }

    #[test]
    fn test_currency_code_serde() {
        let price = Price::parse("19.99", "EUR").unwrap();
        let json = serde_json::to_value(price).unwrap();
        assert_eq!(json["currency_code"], "EUR");

        let parsed: Price = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, price);
    }

    #[test]
    fn test_display_trait() {
        let price = Price::parse("19.99", "USD").unwrap();
        assert_eq!(price.to_string(), "$19.99");
    }
}
