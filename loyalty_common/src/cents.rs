use std::{
    fmt::Display,
    iter::Sum,
    ops::Add,
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::newtype_ops;

/// Number of minor units in one major currency unit.
pub const CURRENCY_MINOR_UNITS: i64 = 100;

//--------------------------------------        Cents        ---------------------------------------------------------
/// An amount of loyalty points in minor units (1/100 of a major unit).
///
/// The accrual oracle and the HTTP surface both speak major units as decimal numbers. Everything stored or summed
/// inside the system uses `Cents`, so that balances are exact.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Cents(i64);

newtype_ops!(Cents: Add::add, Sub::sub; assign AddAssign::add_assign, SubAssign::sub_assign; unary Neg::neg);

impl Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in cents: {0}")]
pub struct CentsConversionError(String);

impl From<i64> for Cents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Cents {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Cents {}

impl Display for Cents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = CURRENCY_MINOR_UNITS as u64;
        write!(f, "{sign}{}.{:02}", abs / units, abs % units)
    }
}

impl Cents {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Converts an amount in major units to cents by multiplying by 100 and truncating toward zero.
    ///
    /// Non-finite inputs convert to zero; out-of-range values saturate.
    pub fn from_major_units(value: f64) -> Self {
        if !value.is_finite() {
            return Self(0);
        }
        #[allow(clippy::cast_possible_truncation)]
        Self((value * CURRENCY_MINOR_UNITS as f64).trunc() as i64)
    }

    /// Like [`Cents::from_major_units`], but rejects values that are not finite or do not fit in an `i64`.
    pub fn try_from_major_units(value: f64) -> Result<Self, CentsConversionError> {
        let scaled = value * CURRENCY_MINOR_UNITS as f64;
        if !scaled.is_finite() || scaled.abs() >= i64::MAX as f64 {
            return Err(CentsConversionError(format!("{value} is not a representable amount")));
        }
        Ok(Self::from_major_units(value))
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn as_major_units(&self) -> f64 {
        self.0 as f64 / CURRENCY_MINOR_UNITS as f64
    }
}
