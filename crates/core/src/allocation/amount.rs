//! Amount validation for allocation inputs.
//!
//! Every amount entering the allocator must be a finite, non-negative integer
//! number of minor units that fits in an `i64`. Checks run in a fixed order:
//! finite, integer, sign, range.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use thiserror::Error;

/// Why an amount was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountViolation {
    /// NaN or infinite.
    #[error("not finite")]
    NotFinite,

    /// Has a fractional part.
    #[error("not an integer")]
    NotInteger,

    /// Below zero.
    #[error("negative")]
    Negative,

    /// Does not fit in the `i64` minor-unit range.
    #[error("out of range")]
    OutOfRange,
}

/// A numeric value that can be checked and converted to integer minor units.
pub trait AmountValue: Copy {
    /// Validates the value and returns it as minor units.
    fn to_minor_units(self) -> Result<i64, AmountViolation>;
}

impl AmountValue for Decimal {
    fn to_minor_units(self) -> Result<i64, AmountViolation> {
        if !self.fract().is_zero() {
            return Err(AmountViolation::NotInteger);
        }
        if self < Decimal::ZERO {
            return Err(AmountViolation::Negative);
        }
        self.to_i64().ok_or(AmountViolation::OutOfRange)
    }
}

impl AmountValue for f64 {
    fn to_minor_units(self) -> Result<i64, AmountViolation> {
        if !self.is_finite() {
            return Err(AmountViolation::NotFinite);
        }
        // `from_f64` flushes magnitudes below 1e-28 to zero.
        if self.fract() != 0.0 {
            return Err(AmountViolation::NotInteger);
        }
        Decimal::from_f64(self)
            .ok_or(AmountViolation::OutOfRange)?
            .to_minor_units()
    }
}

impl AmountValue for i64 {
    fn to_minor_units(self) -> Result<i64, AmountViolation> {
        if self < 0 {
            return Err(AmountViolation::Negative);
        }
        Ok(self)
    }
}

impl AmountValue for i32 {
    fn to_minor_units(self) -> Result<i64, AmountViolation> {
        i64::from(self).to_minor_units()
    }
}

impl AmountValue for u64 {
    fn to_minor_units(self) -> Result<i64, AmountViolation> {
        i64::try_from(self).map_err(|_| AmountViolation::OutOfRange)
    }
}

impl AmountValue for u32 {
    fn to_minor_units(self) -> Result<i64, AmountViolation> {
        Ok(i64::from(self))
    }
}
