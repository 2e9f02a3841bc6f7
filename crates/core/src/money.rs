//! Monetary value objects.
//!
//! All amounts are integer minor units (cents). Percentage rates are
//! fixed-point parts-per-million, so a 9.975% provincial tax is exact.
//! Floating point never enters a calculation; rounding happens once, at the
//! cent, using half-up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::error::{DomainError, DomainResult};

/// Currency tag for monetary amounts.
///
/// Informational only: the domain assumes a single currency per dealer
/// ledger and performs no conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Cad,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Cad => "CAD",
            Currency::Usd => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A monetary amount in minor units (cents).
///
/// Signed so that derived figures (e.g. a dealer balance) can go negative;
/// entity amounts themselves are validated non-negative at their boundaries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Negative amounts collapse to zero; used where malformed upstream data
    /// must not leak into a read-only summary.
    #[inline]
    pub const fn clamp_non_negative(self) -> Self {
        if self.0 < 0 { Money(0) } else { self }
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_mul(self, qty: i64) -> Option<Money> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Subtraction floored at zero.
    #[inline]
    pub const fn saturating_sub(self, other: Money) -> Money {
        let diff = self.0 - other.0;
        if diff < 0 { Money(0) } else { Money(diff) }
    }

    /// Apply a percentage rate, rounding half-up at the cent.
    ///
    /// Intermediate math is `i128`, so large amounts cannot overflow. Callers
    /// pass non-negative bases (pricing validates its inputs first).
    pub fn apply_rate(self, rate: Rate) -> Money {
        let cents = (self.0 as i128 * rate.ppm() as i128 + 500_000) / 1_000_000;
        Money(cents as i64)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    #[inline]
    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    #[inline]
    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Money) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    #[inline]
    fn mul(self, qty: i64) -> Money {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// A percentage rate stored as parts-per-million.
///
/// `Rate::from_percent(9.975)` is exactly 99_750 ppm; nothing is lost to
/// binary floating point once the rate is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(u32);

impl Rate {
    pub const ZERO: Rate = Rate(0);

    /// 100% — the upper bound for discount rates.
    pub const ONE_HUNDRED_PERCENT: Rate = Rate(1_000_000);

    /// Construct from parts-per-million (10_000 ppm = 1%).
    #[inline]
    pub const fn from_ppm(ppm: u32) -> Self {
        Rate(ppm)
    }

    /// Construct from a percentage.
    ///
    /// Rejects non-finite and negative input. The upper bound here is only
    /// what fits the representation; discount-specific bounds belong to the
    /// pricing layer.
    pub fn from_percent(percent: f64) -> DomainResult<Self> {
        if !percent.is_finite() || percent < 0.0 {
            return Err(DomainError::validation(format!(
                "rate must be a non-negative percentage, got {percent}"
            )));
        }
        let ppm = (percent * 10_000.0).round();
        if ppm > u32::MAX as f64 {
            return Err(DomainError::validation(format!(
                "rate out of range: {percent}%"
            )));
        }
        Ok(Rate(ppm as u32))
    }

    #[inline]
    pub const fn ppm(&self) -> u32 {
        self.0
    }

    pub fn percent(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_minor_units() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn arithmetic_in_cents() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn apply_rate_rounds_half_up() {
        // 10.00 at 8.25% = 0.825 -> 0.83
        let tax = Money::from_cents(1000).apply_rate(Rate::from_percent(8.25).unwrap());
        assert_eq!(tax.cents(), 83);

        // 30.00 at 5% = 1.50 exactly
        let tax = Money::from_cents(3000).apply_rate(Rate::from_percent(5.0).unwrap());
        assert_eq!(tax.cents(), 150);

        // 10.00 at 0.05% = 0.005 -> 0.01 (the tie rounds up)
        let tax = Money::from_cents(1000).apply_rate(Rate::from_percent(0.05).unwrap());
        assert_eq!(tax.cents(), 1);
    }

    #[test]
    fn quebec_style_rate_is_exact() {
        let rate = Rate::from_percent(9.975).unwrap();
        assert_eq!(rate.ppm(), 99_750);
        assert_eq!(rate.percent(), 9.975);
    }

    #[test]
    fn rate_rejects_negative_and_non_finite() {
        assert!(Rate::from_percent(-1.0).is_err());
        assert!(Rate::from_percent(f64::NAN).is_err());
        assert!(Rate::from_percent(f64::INFINITY).is_err());
    }

    #[test]
    fn clamp_and_saturating_sub_floor_at_zero() {
        assert_eq!(Money::from_cents(-40).clamp_non_negative().cents(), 0);
        assert_eq!(Money::from_cents(40).clamp_non_negative().cents(), 40);
        let diff = Money::from_cents(100).saturating_sub(Money::from_cents(250));
        assert_eq!(diff, Money::ZERO);
    }

    #[test]
    fn currency_codes() {
        assert_eq!(Currency::Cad.to_string(), "CAD");
        assert_eq!(Currency::Usd.code(), "USD");
    }
}
