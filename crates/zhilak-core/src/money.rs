//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    Math.round(2499.99 * 10 / 100 * 100) / 100 drifts on some inputs    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    249999 paise × 10% = 24999.9 → 25000 paise (half away from zero)    │
//! │    One rounding step, done once, on integers                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use zhilak_core::money::Money;
//!
//! let price = Money::from_major(1000);          // ₹1000.00
//! let line = price.multiply_quantity(2);        // ₹2000.00
//! let total = line + Money::from_minor(50);     // ₹2000.50
//! assert_eq!(total.minor(), 200_050);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::types::DiscountRate;

/// Minor units (paise) per major unit (rupee).
pub const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate differences such as `subtotal - discount`
///   may go negative before being clamped
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Saturating arithmetic**: sums and products pin at the i64 bounds
///   instead of wrapping or panicking
/// - **Serde**: serialized as the bare integer count of minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use zhilak_core::money::Money;
    ///
    /// let price = Money::from_minor(109_900); // ₹1099.00
    /// assert_eq!(price.major(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole major units.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major.saturating_mul(MINOR_PER_MAJOR))
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use zhilak_core::money::Money;
    ///
    /// let unit_price = Money::from_major(1000);
    /// assert_eq!(unit_price.multiply_quantity(2), Money::from_major(2000));
    /// assert_eq!(Money::from_minor(i64::MAX / 2).multiply_quantity(3).minor(), i64::MAX);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Returns `rate` of this amount, rounded to the minor unit.
    ///
    /// ## Rounding Policy
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUND HALF AWAY FROM ZERO                                          │
    /// │                                                                     │
    /// │  exact = amount_minor × bps / 10000                                 │
    /// │    12.5 paise → 13 paise     -12.5 paise → -13 paise               │
    /// │    12.4 paise → 12 paise      12.6 paise →  13 paise               │
    /// │                                                                     │
    /// │  i128 intermediate, result clamped to the i64 range                 │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use zhilak_core::money::Money;
    /// use zhilak_core::types::DiscountRate;
    ///
    /// let subtotal = Money::from_minor(125);
    /// let half = subtotal.percentage(DiscountRate::from_percent(10));
    /// // 12.5 paise rounds to 13
    /// assert_eq!(half.minor(), 13);
    /// ```
    pub fn percentage(&self, rate: DiscountRate) -> Money {
        let numerator = self.0 as i128 * rate.bps() as i128;
        let rounded = div_round_half_away(numerator, DiscountRate::FULL_BPS as i128);
        Money::from_minor(clamp_to_i64(rounded))
    }

    /// Formats whole major units with Indian digit grouping, e.g. `₹1,00,000`.
    ///
    /// Paise are rounded half away from zero. This mirrors what the storefront
    /// renders for prices and totals.
    pub fn to_display_whole(&self) -> String {
        let rupees = div_round_half_away(self.0 as i128, MINOR_PER_MAJOR as i128);
        let sign = if rupees < 0 { "-" } else { "" };
        format!("{}₹{}", sign, group_indian(rupees.unsigned_abs()))
    }
}

/// Integer division rounding half away from zero. `denominator` must be positive.
fn div_round_half_away(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.abs() * 2 >= denominator {
        quotient + numerator.signum()
    } else {
        quotient
    }
}

fn clamp_to_i64(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

/// Groups digits as 12,34,567: last three, then pairs.
fn group_indian(value: u128) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly rendering with both units, e.g. `₹10.99`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.major().unsigned_abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
