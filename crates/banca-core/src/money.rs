//! # Money Module
//!
//! Monetary values as integer cents, plus locale-aware currency formatting.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    All arithmetic happens on i64 cents. Floats appear only at the       │
//! │    serde boundary, where the remote API transports sale totals as       │
//! │    decimal major units (sometimes as a number, sometimes as a string).  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Normalization
//! The product catalog sends prices as integer cents (`price_in_cents`), so
//! [`Money`] serializes transparently as its cent count. Sale endpoints send
//! and expect decimal major units instead; fields on those DTOs opt into the
//! [`lenient_major`] serde module, which accepts a JSON number **or** string
//! and normalizes either to cents before any arithmetic happens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cêntimos).
///
/// ## Design Decisions
/// - **i64 (signed)**: allows negative values for corrections/refunds
/// - **Newtype over i64**: zero-cost, serializes as a plain integer
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (kwanzas for AOA).
    #[inline]
    pub const fn major_part(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion as an absolute value (0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity to produce a line total.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Debug-friendly display using the default currency policy.
///
/// UI surfaces should go through [`CurrencyFormat::format`] explicitly; this
/// impl exists so totals read naturally in logs and assertions.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", CurrencyFormat::default().format(*self))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        Money(iter.map(|m| m.0).sum())
    }
}

// =============================================================================
// Currency Formatting
// =============================================================================

/// Locale-correct currency rendering policy.
///
/// The default matches the pt-AO locale used on receipts: Angolan kwanza with
/// `.` as the grouping separator, `,` as the decimal separator and the symbol
/// suffixed: `1.234,50 Kz`.
///
/// `parse(format(x)) == x` holds for every value within currency precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// ISO 4217 currency code.
    pub code: String,
    /// Display symbol.
    pub symbol: String,
    /// Thousands separator.
    pub grouping: char,
    /// Decimal separator.
    pub decimal: char,
    /// Whether the symbol follows the amount (true for "1.234,50 Kz").
    pub symbol_suffix: bool,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat {
            code: "AOA".to_string(),
            symbol: "Kz".to_string(),
            grouping: '.',
            decimal: ',',
            symbol_suffix: true,
        }
    }
}

impl CurrencyFormat {
    /// Formats a monetary value with grouping, decimals and symbol.
    pub fn format(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let major = amount.major_part().abs().to_string();

        // Insert the grouping separator every three digits from the right.
        let mut grouped = String::with_capacity(major.len() + major.len() / 3);
        for (i, c) in major.chars().enumerate() {
            if i > 0 && (major.len() - i) % 3 == 0 {
                grouped.push(self.grouping);
            }
            grouped.push(c);
        }

        let digits = format!("{}{}{}{:02}", sign, grouped, self.decimal, amount.minor_part());

        if self.symbol_suffix {
            format!("{} {}", digits, self.symbol)
        } else {
            format!("{} {}", self.symbol, digits)
        }
    }

    /// Parses a string previously produced by [`format`](Self::format).
    ///
    /// Also tolerates unformatted decimal input (`"1234.5"`), which shows up
    /// when operators type amounts by hand.
    pub fn parse(&self, input: &str) -> Result<Money, ValidationError> {
        let mut cleaned = input.replace(&self.symbol, "");
        cleaned.retain(|c| !c.is_whitespace() && c != '\u{a0}');
        let cleaned = cleaned.replace(self.grouping, "");
        let cleaned = cleaned.replace(self.decimal, ".");
        parse_major_decimal(&cleaned)
    }
}

/// Parses a plain decimal amount in major units (`"1234.5"`, `"-10"`) into
/// cents. Fractional digits beyond the currency precision are discarded.
pub fn parse_major_decimal(input: &str) -> Result<Money, ValidationError> {
    let input = input.trim();
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "amount",
        reason: reason.to_string(),
    };

    if input.is_empty() {
        return Err(invalid("empty amount"));
    }

    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let (major_str, minor_str) = match digits.split_once('.') {
        Some((m, f)) => (m, f),
        None => (digits, ""),
    };

    if major_str.is_empty() || !major_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("expected a decimal number"));
    }
    if !minor_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("expected decimal digits after the separator"));
    }

    let major: i64 = major_str
        .parse()
        .map_err(|_| invalid("amount out of range"))?;

    let minor = match minor_str.len() {
        0 => 0,
        1 => minor_str.parse::<i64>().map_err(|_| invalid("bad minor part"))? * 10,
        _ => minor_str[..2]
            .parse::<i64>()
            .map_err(|_| invalid("bad minor part"))?,
    };

    let cents = major
        .checked_mul(100)
        .and_then(|c| c.checked_add(minor))
        .ok_or_else(|| invalid("amount out of range"))?;

    Ok(Money::from_cents(if negative { -cents } else { cents }))
}

// =============================================================================
// Lenient Major-Unit Serde
// =============================================================================

/// Serde adapter for money fields the sale endpoints transport as decimal
/// major units. Deserialization accepts a JSON number **or** a string
/// (`1234.5` and `"1234.5"` both become 123450 cents); serialization emits a
/// plain decimal number.
pub mod lenient_major {
    use super::{parse_major_decimal, Money};
    use serde::de::{self, Deserializer, Visitor};
    use serde::Serializer;
    use std::fmt;

    pub fn serialize<S>(amount: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(amount.cents() as f64 / 100.0)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LenientVisitor;

        impl<'de> Visitor<'de> for LenientVisitor {
            type Value = Money;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a monetary amount as a number or string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
                Ok(Money::from_cents(v * 100))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
                Ok(Money::from_cents(v as i64 * 100))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
                Ok(Money::from_cents((v * 100.0).round() as i64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
                parse_major_decimal(v).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(LenientVisitor)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major_part(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!(Money::from_cents(299).multiply_quantity(3).cents(), 897);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 50].iter().map(|c| Money::from_cents(*c)).sum();
        assert_eq!(total.cents(), 400);
    }

    #[test]
    fn test_format_default_locale() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.format(Money::from_cents(123450)), "1.234,50 Kz");
        assert_eq!(fmt.format(Money::from_cents(500)), "5,00 Kz");
        assert_eq!(fmt.format(Money::from_cents(-550)), "-5,50 Kz");
        assert_eq!(fmt.format(Money::from_cents(0)), "0,00 Kz");
        assert_eq!(fmt.format(Money::from_cents(100000000)), "1.000.000,00 Kz");
    }

    #[test]
    fn test_parse_round_trips_format() {
        let fmt = CurrencyFormat::default();
        for cents in [0, 1, 99, 100, 1099, 123450, 100000000, -550] {
            let money = Money::from_cents(cents);
            assert_eq!(fmt.parse(&fmt.format(money)), Ok(money));
        }
    }

    #[test]
    fn test_parse_plain_decimal() {
        let fmt = CurrencyFormat::default();
        assert_eq!(parse_major_decimal("1234.5"), Ok(Money::from_cents(123450)));
        assert_eq!(parse_major_decimal("1234"), Ok(Money::from_cents(123400)));
        assert_eq!(parse_major_decimal("-10.25"), Ok(Money::from_cents(-1025)));
        // The formatter's own decimal separator also works.
        assert_eq!(fmt.parse("1234,5"), Ok(Money::from_cents(123450)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_major_decimal("").is_err());
        assert!(parse_major_decimal("abc").is_err());
        assert!(parse_major_decimal("12.3.4").is_err());
    }

    #[test]
    fn test_lenient_deserialization() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(with = "lenient_major")]
            total: Money,
        }

        let from_number: Wrapper = serde_json::from_str(r#"{"total": 1234.5}"#).unwrap();
        assert_eq!(from_number.total.cents(), 123450);

        let from_string: Wrapper = serde_json::from_str(r#"{"total": "1234.5"}"#).unwrap();
        assert_eq!(from_string.total.cents(), 123450);

        let from_int: Wrapper = serde_json::from_str(r#"{"total": 1234}"#).unwrap();
        assert_eq!(from_int.total.cents(), 123400);
    }

    #[test]
    fn test_lenient_serialization() {
        #[derive(Serialize)]
        struct Wrapper {
            #[serde(with = "lenient_major")]
            total: Money,
        }

        let json = serde_json::to_string(&Wrapper {
            total: Money::from_cents(123450),
        })
        .unwrap();
        assert_eq!(json, r#"{"total":1234.5}"#);
    }
}
