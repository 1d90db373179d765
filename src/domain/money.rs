//! Monetary types: exact minor-unit amounts and basis-point fee rates.
//!
//! Settlement arithmetic never touches floating point or decimals. An
//! [`Amount`] is an integer count of minor currency units and every
//! operation that could overflow, underflow or divide by zero is checked.
//! [`Decimal`] only appears at the edges, for rendering amounts in major
//! units and for parsing configuration values such as `"1.0"`.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ArithmeticError;

/// Denominator for basis-point rates (100% = 10_000 bps).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Non-negative amount in minor currency units.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u128);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Create an amount from a count of minor units.
    #[must_use]
    pub const fn new(minor: u128) -> Self {
        Self(minor)
    }

    /// Number of minor units.
    #[must_use]
    pub const fn minor(self) -> u128 {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Add two amounts, failing on overflow.
    pub fn checked_add(self, rhs: Self) -> Result<Self, ArithmeticError> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(ArithmeticError::Overflow)
    }

    /// Subtract `rhs`, failing if the result would be negative.
    pub fn checked_sub(self, rhs: Self) -> Result<Self, ArithmeticError> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or(ArithmeticError::Underflow)
    }

    /// Multiply by a count, failing on overflow.
    pub fn checked_mul(self, count: u128) -> Result<Self, ArithmeticError> {
        self.0
            .checked_mul(count)
            .map(Self)
            .ok_or(ArithmeticError::Overflow)
    }

    /// Compute `floor(self * numerator / denominator)`.
    ///
    /// The multiplication happens first so no precision is lost; the
    /// remainder of the division is discarded.
    pub fn mul_div_floor(self, numerator: u128, denominator: u128) -> Result<Self, ArithmeticError> {
        if denominator == 0 {
            return Err(ArithmeticError::DivisionByZero);
        }
        let product = self
            .0
            .checked_mul(numerator)
            .ok_or(ArithmeticError::Overflow)?;
        Ok(Self(product / denominator))
    }

    /// Render the amount in major units with `decimals` fractional digits.
    pub fn to_decimal(self, decimals: u32) -> Result<Decimal, ArithmeticError> {
        let minor = i128::try_from(self.0).map_err(|_| ArithmeticError::Overflow)?;
        Decimal::try_from_i128_with_scale(minor, decimals).map_err(|_| ArithmeticError::Overflow)
    }

    /// Parse a major-unit decimal into minor units.
    ///
    /// Rejects negative values and values carrying more fractional digits
    /// than the currency scale allows.
    pub fn from_decimal(value: Decimal, decimals: u32) -> Result<Self, ArithmeticError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ArithmeticError::Negative);
        }
        let normalized = value.normalize();
        let scale = normalized.scale();
        if scale > decimals {
            return Err(ArithmeticError::ExcessPrecision { decimals });
        }
        let factor = 10i128
            .checked_pow(decimals - scale)
            .ok_or(ArithmeticError::Overflow)?;
        let minor = normalized
            .mantissa()
            .checked_mul(factor)
            .ok_or(ArithmeticError::Overflow)?;
        u128::try_from(minor)
            .map(Self)
            .map_err(|_| ArithmeticError::Negative)
    }

    /// Human-readable major-unit rendering, falling back to minor units.
    #[must_use]
    pub fn display(self, decimals: u32) -> String {
        match self.to_decimal(decimals) {
            Ok(value) => value.to_string(),
            Err(_) => format!("{} minor", self.0),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Amount {
    fn from(minor: u128) -> Self {
        Self(minor)
    }
}

/// Protocol fee rate expressed in basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FeeRate(u32);

impl FeeRate {
    /// No fee.
    pub const ZERO: Self = Self(0);

    /// The 2% fee applied to every market by default.
    pub const DEFAULT: Self = Self(200);

    /// Create a fee rate, returning `None` above 100%.
    #[must_use]
    pub const fn from_bps(bps: u32) -> Option<Self> {
        if bps > BPS_DENOMINATOR {
            None
        } else {
            Some(Self(bps))
        }
    }

    /// The rate in basis points.
    #[must_use]
    pub const fn bps(self) -> u32 {
        self.0
    }

    /// Fee owed on `pot`: `floor(pot * bps / 10_000)`.
    pub fn fee_on(self, pot: Amount) -> Result<Amount, ArithmeticError> {
        pot.mul_div_floor(u128::from(self.0), u128::from(BPS_DENOMINATOR))
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for FeeRate {
    type Error = String;

    fn try_from(bps: u32) -> Result<Self, Self::Error> {
        Self::from_bps(bps).ok_or_else(|| format!("fee rate {bps} bps exceeds 10000"))
    }
}

impl From<FeeRate> for u32 {
    fn from(rate: FeeRate) -> Self {
        rate.0
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bps", self.0)
    }
}
