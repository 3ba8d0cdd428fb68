//! Money type for representing currency amounts
//!
//! The API sends amounts as GraphQL `Float`. They are converted once, on the way
//! in, to integer minor units (cents, paise) so sums and comparisons are exact.
//! `null` or missing amounts become zero.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount stored as minor units (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use budgetdash::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Convert an API float, rounding half away from zero to the nearest minor unit
    ///
    /// Non-finite values are treated as zero.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Self::zero();
        }
        Self((value * 100.0).round() as i64)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Minor-unit part (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Larger of this amount and zero
    pub fn clamp_non_negative(self) -> Self {
        Self(self.0.max(0))
    }

    /// Ratio of this amount to `other`, or `None` when `other` is not positive
    pub fn ratio_of(&self, other: Money) -> Option<f64> {
        if other.0 > 0 {
            Some(self.0 as f64 / other.0 as f64)
        } else {
            None
        }
    }

    /// Format with a currency symbol, using thousands separators
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            group_thousands(self.units().unsigned_abs()),
            self.cents_part()
        )
    }

    /// Plain decimal without grouping, e.g. `-1250.50`
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}.{:02}",
            sign,
            self.units().unsigned_abs(),
            self.cents_part()
        )
    }

    /// Format for an ISO currency code (known codes get their symbol)
    pub fn format_with_code(&self, code: &str) -> String {
        match currency_symbol(code) {
            Some(symbol) => self.format_with_symbol(symbol),
            None => format!("{} {}", code, self.format_with_symbol("")),
        }
    }
}

/// Symbol for the currency codes the dashboard knows about
pub fn currency_symbol(code: &str) -> Option<&'static str> {
    match code.to_ascii_uppercase().as_str() {
        "INR" => Some("₹"),
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value: Option<f64> = Option::deserialize(deserializer)?;
        Ok(value.map(Money::from_f64).unwrap_or_default())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol(""))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f64_rounds() {
        assert_eq!(Money::from_f64(10.506).cents(), 1051);
        assert_eq!(Money::from_f64(-0.016).cents(), -2);
        assert_eq!(Money::from_f64(0.1 + 0.2).cents(), 30);
        assert_eq!(Money::from_f64(1000.0), Money::from_units(1000));
        assert_eq!(Money::from_f64(f64::NAN), Money::zero());
    }

    #[test]
    fn test_deserialize_null_is_zero() {
        let m: Money = serde_json::from_str("null").unwrap();
        assert!(m.is_zero());
        let m: Money = serde_json::from_str("-480.25").unwrap();
        assert_eq!(m.cents(), -48025);
    }

    #[test]
    fn test_serialize_as_float() {
        let json = serde_json::to_string(&Money::from_cents(1050)).unwrap();
        assert_eq!(json, "10.5");
    }

    #[test]
    fn test_formatting() {
        assert_eq!(Money::from_cents(123456789).to_string(), "1,234,567.89");
        assert_eq!(Money::from_cents(-5000).format_with_code("INR"), "-₹50.00");
        assert_eq!(Money::from_cents(99).format_with_code("USD"), "$0.99");
        assert_eq!(Money::from_cents(100).format_with_code("CHF"), "CHF 1.00");
        assert_eq!(Money::from_cents(-125050).to_decimal_string(), "-1250.50");
        assert_eq!(Money::from_cents(-5).to_decimal_string(), "-0.05");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let total: Money = [Money::from_units(500), Money::from_units(500)].iter().sum();
        assert_eq!(total, Money::from_units(1000));
        assert_eq!(
            (Money::from_units(3) - Money::from_units(5)).clamp_non_negative(),
            Money::zero()
        );
        assert_eq!(-Money::from_cents(5), Money::from_cents(-5));
    }

    #[test]
    fn test_ratio_of() {
        let savings = Money::from_units(400);
        assert_eq!(savings.ratio_of(Money::from_units(1000)), Some(0.4));
        assert_eq!(savings.ratio_of(Money::zero()), None);
    }
}
