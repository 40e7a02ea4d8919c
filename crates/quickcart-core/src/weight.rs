//! # Weight Module
//!
//! Shipping weights stored as whole grams, the same way [`Money`](crate::Money)
//! stores whole cents. Kilogram inputs are converted once at the edge.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// A package weight in grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Weight(u64);

impl Weight {
    #[inline]
    pub const fn from_grams(grams: u64) -> Self {
        Weight(grams)
    }

    /// Creates a weight from kilograms, rounded to the nearest gram.
    ///
    /// Negative and non-finite inputs clamp to zero.
    ///
    /// ```rust
    /// use quickcart_core::Weight;
    ///
    /// assert_eq!(Weight::from_kg(0.4).grams(), 400);
    /// assert_eq!(Weight::from_kg(15.5).grams(), 15_500);
    /// ```
    pub fn from_kg(kg: f64) -> Self {
        if !kg.is_finite() || kg <= 0.0 {
            return Weight(0);
        }
        Weight((kg * 1000.0).round() as u64)
    }

    #[inline]
    pub const fn grams(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Weight(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// `400g` below a kilogram, `1.5kg` / `15kg` from a kilogram up.
impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 1000 {
            return write!(f, "{}g", self.0);
        }

        let whole = self.0 / 1000;
        let frac = self.0 % 1000;
        if frac == 0 {
            write!(f, "{}kg", whole)
        } else {
            let frac = format!("{:03}", frac);
            write!(f, "{}.{}kg", whole, frac.trim_end_matches('0'))
        }
    }
}

impl Add for Weight {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Weight(self.0 + other.0)
    }
}

impl Mul<u64> for Weight {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u64) -> Self {
        Weight(self.0 * qty)
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Weight>>(iter: I) -> Self {
        iter.fold(Weight::zero(), Add::add)
    }
}
