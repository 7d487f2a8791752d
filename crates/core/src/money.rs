//! Monetary value object.
//!
//! All money is integer cents. Pricing geometry is computed in `f64` square
//! feet and per-unit rates, so the engine crosses into `Money` by rounding to
//! the nearest cent (half away from zero) at every step — never only at
//! display time. That is what keeps the aggregation pipeline free of
//! compounding float drift.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Monetary amount in cents. Signed: discounts and synthetic invoice lines
/// are negative.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Convert a dollar amount to cents, rounding half away from zero.
    ///
    /// This is the single place float money enters the integer domain; every
    /// intermediate in the discount pipeline is exact two-decimal-place
    /// arithmetic from here on.
    pub fn from_dollars(dollars: f64) -> Self {
        Self((dollars * 100.0).round() as i64)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Dollar value for interchange with the accounting API, which takes
    /// two-decimal JSON numbers.
    pub fn as_dollars(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Multiply by a rate (tax rate, card-fee rate, percent/100) and round to
    /// the nearest cent immediately.
    pub fn mul_rate(&self, rate: f64) -> Self {
        Self((self.0 as f64 * rate).round() as i64)
    }

    /// Multiply by a quantity and round to the nearest cent.
    ///
    /// Quantity is `f64` because computer-time lines carry quarter-hour
    /// fractions; print counts are whole numbers that pass through exactly.
    pub fn mul_qty(&self, qty: f64) -> Self {
        Self((self.0 as f64 * qty).round() as i64)
    }

    /// Subtraction clamped at zero (discount pipelines must never push a
    /// subtotal negative).
    pub fn saturating_sub_to_zero(&self, other: Self) -> Self {
        Self((self.0 - other.0).max(0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
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
        iter.fold(Self::zero(), Add::add)
    }
}
