//! Exact price arithmetic.
//!
//! All displayed amounts are dollars with two decimals. To keep cart-total
//! assertions exact, prices are integer cents, parsed from the label
//! fragments the application renders (`"$10.00"`, `"Total: $18.00"`,
//! `"$8.00 x 2"`).

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::result::{CafeteraError, CafeteraResult};

static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\s*(\d+)(?:\.(\d{1,2}))?").unwrap());

static UNIT_DESC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"x\s*(\d+)").unwrap());

/// A dollar amount in integer cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Price(u64);

impl Price {
    /// Zero dollars
    pub const ZERO: Self = Self(0);

    /// From integer cents
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// From whole dollars
    #[must_use]
    pub const fn from_dollars(dollars: u64) -> Self {
        Self(dollars * 100)
    }

    /// Amount in cents
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Parse the first `$X.XX` amount in `text`, ignoring any prefix such
    /// as `"Total: "`.
    ///
    /// # Errors
    ///
    /// `Parse` when no dollar amount is present.
    pub fn parse(text: &str) -> CafeteraResult<Self> {
        let caps = AMOUNT_RE
            .captures(text)
            .ok_or_else(|| CafeteraError::Parse {
                what: "price",
                input: text.to_string(),
            })?;
        let dollars: u64 = caps[1].parse().map_err(|_| CafeteraError::Parse {
            what: "price",
            input: text.to_string(),
        })?;
        let cents = match caps.get(2) {
            Some(frac) if frac.as_str().len() == 1 => frac.as_str().parse::<u64>().unwrap_or(0) * 10,
            Some(frac) => frac.as_str().parse::<u64>().unwrap_or(0),
            None => 0,
        };
        Ok(Self(dollars * 100 + cents))
    }

    /// Multiply by a line quantity
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0 * quantity as u64)
    }

    /// Sum an iterator of prices
    pub fn sum(prices: impl IntoIterator<Item = Self>) -> Self {
        Self(prices.into_iter().map(|p| p.0).sum())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl std::ops::Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

/// Parse a unit-description fragment such as `"$8.00 x 2"` into
/// (unit price, quantity).
///
/// # Errors
///
/// `Parse` when either the amount or the `x N` fragment is missing.
pub fn parse_unit_desc(text: &str) -> CafeteraResult<(Price, u32)> {
    let unit_price = Price::parse(text)?;
    let quantity = UNIT_DESC_RE
        .captures(text)
        .and_then(|c| c[1].parse::<u32>().ok())
        .ok_or_else(|| CafeteraError::Parse {
            what: "quantity",
            input: text.to_string(),
        })?;
    Ok((unit_price, quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_amount() {
        assert_eq!(Price::parse("$10.00").unwrap(), Price::from_dollars(10));
        assert_eq!(Price::parse("$4.50").unwrap(), Price::from_cents(450));
    }

    #[test]
    fn test_parse_total_label() {
        assert_eq!(
            Price::parse("Total: $18.00").unwrap(),
            Price::from_dollars(18)
        );
        assert_eq!(Price::parse("Total: $0.00").unwrap(), Price::ZERO);
    }

    #[test]
    fn test_parse_single_decimal_digit() {
        assert_eq!(Price::parse("$4.5").unwrap(), Price::from_cents(450));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Price::parse("Total: free").is_err());
        assert!(Price::parse("").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        assert_eq!(Price::from_cents(1850).to_string(), "$18.50");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
        assert_eq!(Price::from_cents(7).to_string(), "$0.07");
    }

    #[test]
    fn test_arithmetic() {
        let espresso = Price::from_dollars(10);
        let mocha = Price::from_dollars(8);
        assert_eq!(espresso + mocha, Price::from_dollars(18));
        assert_eq!(mocha.times(3), Price::from_dollars(24));
        assert_eq!(
            Price::sum([espresso, mocha, mocha]),
            Price::from_dollars(26)
        );
    }

    #[test]
    fn test_parse_unit_desc() {
        let (unit, qty) = parse_unit_desc("$8.00 x 2").unwrap();
        assert_eq!(unit, Price::from_dollars(8));
        assert_eq!(qty, 2);
    }

    #[test]
    fn test_parse_unit_desc_requires_quantity() {
        assert!(parse_unit_desc("$8.00").is_err());
    }
}
