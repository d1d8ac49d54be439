//! Type-safe price representation.
//!
//! Register prices are whole yen. Tax is applied with decimal arithmetic so
//! that `350 × 1.1` is exactly `385`, never `385.00000000000006`.

use core::fmt;
use core::iter::Sum;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Consumption tax multiplier applied at checkout (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(11, 0, 0, false, 1);

/// A price in whole yen.
///
/// Serializes as a bare JSON integer, which is what the purchase API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Zero yen.
    pub const ZERO: Self = Self(0);

    /// Create a new price.
    #[must_use]
    pub const fn new(yen: i64) -> Self {
        Self(yen)
    }

    /// Returns the amount in yen.
    #[must_use]
    pub const fn yen(self) -> i64 {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(quantity)))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}円", self.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, p| Self(acc.0.saturating_add(p.0)))
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Apply [`TAX_RATE`] to `amount`, rounding half away from zero to whole yen.
#[must_use]
pub fn tax_included(amount: Price) -> Price {
    let taxed = Decimal::from(amount.0)
        .checked_mul(TAX_RATE)
        .map(|d| d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero));

    match taxed.and_then(|d| d.to_i64()) {
        Some(yen) => Price(yen),
        None if amount.0 < 0 => Price(i64::MIN),
        None => Price(i64::MAX),
    }
}
