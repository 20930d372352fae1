//! The user's own comparison value, normalized into the base currency.

use crate::error::{ErrorType, IntoResult, Res};
use crate::model::Amount;
use crate::Result;
use anyhow::{bail, Context};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The label used when the user leaves the label empty.
pub const DEFAULT_LABEL: &str = "Az én kis milliárdom";

/// Labels longer than this many characters are truncated.
pub const MAX_LABEL_CHARS: usize = 50;

/// The magnitude the user typed their amount in.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Million,
    #[default]
    Billion,
}

serde_plain::derive_display_from_serialize!(Unit);
serde_plain::derive_fromstr_from_deserialize!(Unit);

impl Unit {
    pub fn multiplier(&self) -> Decimal {
        match self {
            Unit::Million => Decimal::from(1_000_000u64),
            Unit::Billion => Decimal::from(1_000_000_000u64),
        }
    }
}

/// The currency the user typed their amount in. Conversion to HUF uses fixed rates.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    #[default]
    Huf,
    Eur,
    Usd,
}

serde_plain::derive_display_from_serialize!(Currency);
serde_plain::derive_fromstr_from_deserialize!(Currency);

impl Currency {
    /// How many forints one unit of this currency is worth.
    pub fn rate_to_huf(&self) -> Decimal {
        match self {
            Currency::Huf => Decimal::ONE,
            Currency::Eur => Decimal::from(400),
            Currency::Usd => Decimal::from(350),
        }
    }
}

/// A single user-authored value to compare against the reference data.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CustomEntry {
    label: String,
    amount: Amount,
}

impl CustomEntry {
    /// Normalizes raw user input into a `CustomEntry`.
    ///
    /// `amount = raw_amount * unit multiplier * currency rate`. The label is trimmed, truncated
    /// to [`MAX_LABEL_CHARS`] characters, and replaced by [`DEFAULT_LABEL`] when empty.
    ///
    /// # Errors
    /// - A [`ErrorType::Validation`] error if `raw_amount` is negative, or too large to be
    ///   represented once converted to forints.
    pub fn build(raw_amount: Decimal, unit: Unit, currency: Currency, label: &str) -> Result<Self> {
        let amount = to_huf(raw_amount, unit, currency).pub_result(ErrorType::Validation)?;
        Ok(Self {
            label: normalize_label(label),
            amount: Amount::new(amount),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

fn to_huf(raw_amount: Decimal, unit: Unit, currency: Currency) -> Res<Decimal> {
    if raw_amount.is_sign_negative() && !raw_amount.is_zero() {
        bail!("The amount cannot be negative, got {raw_amount}");
    }
    raw_amount
        .checked_mul(unit.multiplier())
        .and_then(|v| v.checked_mul(currency.rate_to_huf()))
        .with_context(|| format!("The amount {raw_amount} {unit} {currency} is too large"))
}

fn normalize_label(label: &str) -> String {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return DEFAULT_LABEL.to_string();
    }
    trimmed.chars().take(MAX_LABEL_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_billion_huf() {
        let entry = CustomEntry::build(dec("1"), Unit::Billion, Currency::Huf, "X").unwrap();
        assert_eq!(entry.amount().value(), dec("1000000000"));
        assert_eq!(entry.label(), "X");
    }

    #[test]
    fn test_million_eur() {
        let entry = CustomEntry::build(dec("1"), Unit::Million, Currency::Eur, "X").unwrap();
        assert_eq!(entry.amount().value(), dec("400000000"));
    }

    #[test]
    fn test_billion_usd() {
        let entry = CustomEntry::build(dec("1"), Unit::Billion, Currency::Usd, "X").unwrap();
        assert_eq!(entry.amount().value(), dec("350000000000"));
    }

    #[test]
    fn test_fractional_amount() {
        let entry = CustomEntry::build(dec("2.5"), Unit::Million, Currency::Huf, "X").unwrap();
        assert_eq!(entry.amount().value(), dec("2500000"));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = CustomEntry::build(dec("-1"), Unit::Billion, Currency::Huf, "X").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_amount_too_large_rejected() {
        let err = CustomEntry::build(
            dec("100000000000000000000"),
            Unit::Billion,
            Currency::Eur,
            "X",
        )
        .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
        assert!(err.to_string().contains("too large"));
        assert!(CustomEntry::build(Decimal::MAX, Unit::Million, Currency::Huf, "X").is_err());
    }

    #[test]
    fn test_largest_amount_that_fits() {
        let entry =
            CustomEntry::build(dec("1000000000000000"), Unit::Billion, Currency::Usd, "X").unwrap();
        assert_eq!(entry.amount().value(), dec("350000000000000000000000000"));
    }

    #[test]
    fn test_zero_amount_accepted() {
        let entry = CustomEntry::build(Decimal::ZERO, Unit::Billion, Currency::Eur, "X").unwrap();
        assert!(entry.amount().is_zero());
    }

    #[test]
    fn test_empty_label_uses_default() {
        let entry = CustomEntry::build(dec("1"), Unit::Billion, Currency::Huf, "").unwrap();
        assert_eq!(entry.label(), DEFAULT_LABEL);
        let entry = CustomEntry::build(dec("1"), Unit::Billion, Currency::Huf, "   ").unwrap();
        assert_eq!(entry.label(), DEFAULT_LABEL);
    }

    #[test]
    fn test_long_label_truncated() {
        let long = "a".repeat(80);
        let entry = CustomEntry::build(dec("1"), Unit::Billion, Currency::Huf, &long).unwrap();
        assert_eq!(entry.label().chars().count(), MAX_LABEL_CHARS);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let long = "ő".repeat(60);
        let entry = CustomEntry::build(dec("1"), Unit::Billion, Currency::Huf, &long).unwrap();
        assert_eq!(entry.label(), "ő".repeat(50));
    }

    #[test]
    fn test_label_of_exactly_max_kept() {
        let exact = "b".repeat(MAX_LABEL_CHARS);
        let entry = CustomEntry::build(dec("1"), Unit::Billion, Currency::Huf, &exact).unwrap();
        assert_eq!(entry.label(), exact);
    }

    #[test]
    fn test_unit_and_currency_strings() {
        assert_eq!(Unit::Million.to_string(), "million");
        assert_eq!(Currency::from_str("usd").unwrap(), Currency::Usd);
        assert!(Currency::from_str("gbp").is_err());
    }
}
