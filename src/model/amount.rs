//! Amount type for handling monetary values in the base currency (HUF).
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles parsing values that
//! may include thousands separators or be written in scientific notation, as spreadsheet exports
//! of budget figures often are.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// The unit suffix used when amounts are shown in billions of forints.
pub const BILLION_SUFFIX: &str = "Mrd HUF";

/// The suffix used when amounts are shown in full.
const BASE_SUFFIX: &str = "HUF";

const ONE_BILLION: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Represents an amount of money in the base currency (HUF).
///
/// # Examples
///
/// Parsing with thousands separators:
/// ```
/// # use forint_o_meter::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("2,500,000,000").unwrap();
/// assert_eq!(amount.display_billions(), "2 Mrd HUF");
/// ```
///
/// Parsing scientific notation:
/// ```
/// # use forint_o_meter::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("3.5e9").unwrap();
/// assert_eq!(amount.display_billions(), "4 Mrd HUF");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }

    /// The amount divided by one billion and rounded to a whole number.
    ///
    /// Ties are rounded to the nearest even number (banker's rounding), so `2.5` becomes `2` and
    /// `3.5` becomes `4`.
    pub fn billions(&self) -> Decimal {
        (self.0 / ONE_BILLION).round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
    }

    /// The headline form shown on treemap tiles, e.g. `"12 Mrd HUF"`.
    pub fn display_billions(&self) -> String {
        format!("{} {BILLION_SUFFIX}", self.billions().normalize())
    }

    /// A lossy conversion used for geometry.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

/// An error that can occur when parsing strings into `Decimal` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Amount::default());
        }

        // Remove thousands separators
        let cleaned: String = trimmed
            .chars()
            .filter(|c| !matches!(c, ',' | '_') && !c.is_whitespace())
            .collect();

        let value = if cleaned.contains(['e', 'E']) {
            Decimal::from_scientific(&cleaned)
        } else {
            Decimal::from_str(&cleaned)
        }
        .map_err(AmountError)?;
        Ok(Amount(value))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {BASE_SUFFIX}",
            format_num::format_num!(",.2", self.0.to_f64().unwrap_or_default())
        )
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.normalize().to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}
