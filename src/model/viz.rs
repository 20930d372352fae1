//! Composition of reference rows and the custom entry into chart-ready rows.

use crate::model::{Amount, CustomEntry, ReferenceRow};
use serde::{Deserialize, Serialize};

/// The category tag of the custom entry. No reference row may use it.
pub const USER_CATEGORY: &str = "user";

/// One leaf of the treemap.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct VizRow {
    display_label: String,
    detail_label: String,
    amount: Amount,
    category: String,
    amount_display: String,
}

impl VizRow {
    fn new(
        display_label: impl Into<String>,
        detail_label: impl Into<String>,
        amount: Amount,
        category: impl Into<String>,
    ) -> Self {
        Self {
            display_label: display_label.into(),
            detail_label: detail_label.into(),
            amount,
            category: category.into(),
            amount_display: amount.display_billions(),
        }
    }

    pub fn display_label(&self) -> &str {
        &self.display_label
    }

    pub fn detail_label(&self) -> &str {
        &self.detail_label
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// The category tag: [`USER_CATEGORY`] for the custom entry, otherwise the reference row's
    /// own category. The shipped data tags every reference row `reference`, but a data file may
    /// use finer tags, which the palette can color separately.
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount_display(&self) -> &str {
        &self.amount_display
    }

    pub fn is_user(&self) -> bool {
        self.category == USER_CATEGORY
    }

    /// The hover text of the tile.
    pub fn tooltip(&self) -> String {
        format!(
            "{}\nLeírás: {}\nÖsszeg: {}\nKategória: {}",
            self.display_label, self.detail_label, self.amount_display, self.category
        )
    }
}

impl From<&ReferenceRow> for VizRow {
    fn from(row: &ReferenceRow) -> Self {
        VizRow::new(row.short(), row.name(), row.amount(), row.category())
    }
}

impl From<&CustomEntry> for VizRow {
    fn from(entry: &CustomEntry) -> Self {
        VizRow::new(entry.label(), entry.label(), entry.amount(), USER_CATEGORY)
    }
}

/// Builds the treemap rows: the filtered reference rows in order, then the custom entry last.
///
/// Inputs are assumed valid. An empty `filtered` still yields the custom entry alone.
pub fn compose(filtered: &[ReferenceRow], entry: &CustomEntry) -> Vec<VizRow> {
    filtered
        .iter()
        .map(VizRow::from)
        .chain(std::iter::once(VizRow::from(entry)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Currency, Unit};
    use rust_decimal::Decimal;

    fn entry(billions: i64) -> CustomEntry {
        CustomEntry::build(Decimal::from(billions), Unit::Billion, Currency::Huf, "Mine").unwrap()
    }

    fn alpha() -> ReferenceRow {
        ReferenceRow::new(
            "Alpha",
            "A",
            Amount::new(Decimal::from(2_000_000_000i64)),
            "reference",
        )
    }

    #[test]
    fn test_compose_empty_filtered() {
        let rows = compose(&[], &entry(1));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category(), USER_CATEGORY);
        assert_eq!(rows[0].display_label(), "Mine");
        assert_eq!(rows[0].detail_label(), "Mine");
        assert!(rows[0].is_user());
    }

    #[test]
    fn test_compose_reference_then_entry() {
        let rows = compose(&[alpha()], &entry(1));
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].display_label(), "A");
        assert_eq!(rows[0].detail_label(), "Alpha");
        assert_eq!(rows[0].category(), "reference");
        assert_eq!(rows[0].amount_display(), "2 Mrd HUF");

        assert_eq!(rows[1].display_label(), "Mine");
        assert_eq!(rows[1].amount_display(), "1 Mrd HUF");
        assert!(rows[1].is_user());
    }

    #[test]
    fn test_compose_preserves_order() {
        let b = ReferenceRow::new("Beta", "B", Amount::new(Decimal::ONE), "reference");
        let rows = compose(&[b, alpha()], &entry(0));
        let labels: Vec<_> = rows.iter().map(|r| r.display_label()).collect();
        assert_eq!(labels, vec!["B", "A", "Mine"]);
    }

    #[test]
    fn test_compose_is_idempotent() {
        let filtered = vec![alpha()];
        let e = entry(3);
        assert_eq!(compose(&filtered, &e), compose(&filtered, &e));
    }

    #[test]
    fn test_zero_entry_is_a_zero_leaf() {
        let rows = compose(&[alpha()], &entry(0));
        assert!(rows[1].amount().is_zero());
        assert_eq!(rows[1].amount_display(), "0 Mrd HUF");
    }

    #[test]
    fn test_reference_category_passes_through() {
        let sport = ReferenceRow::new("Stadionok", "S", Amount::new(Decimal::ONE), "sport");
        let rows = compose(&[sport], &entry(1));
        assert_eq!(rows[0].category(), "sport");
        assert!(!rows[0].is_user());
    }

    #[test]
    fn test_tooltip() {
        let rows = compose(&[alpha()], &entry(1));
        assert_eq!(
            rows[0].tooltip(),
            "A\nLeírás: Alpha\nÖsszeg: 2 Mrd HUF\nKategória: reference"
        );
    }
}
