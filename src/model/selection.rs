use crate::model::ReferenceRow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

/// Which reference rows the user wants to see.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Every reference row. The initial state.
    #[default]
    All,
    /// Only the rows with these short keys. May be empty.
    Only(BTreeSet<String>),
}

impl Selection {
    pub fn only<S>(keys: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<String>,
    {
        Selection::Only(keys.into_iter().map(Into::into).collect())
    }

    /// Applies the selection, keeping source order.
    pub fn apply(&self, rows: &[ReferenceRow]) -> Vec<ReferenceRow> {
        match self {
            Selection::All => rows.to_vec(),
            Selection::Only(keys) => {
                let unknown = keys
                    .iter()
                    .filter(|k| !rows.iter().any(|r| r.short() == k.as_str()));
                for key in unknown {
                    warn!("Ignoring unknown reference '{key}'");
                }
                filter(rows, keys)
            }
        }
    }
}

/// Returns the rows whose short key is in `selected`, as a subsequence of `rows`.
///
/// An empty `selected` yields an empty result, which callers treat as "nothing to render".
pub fn filter(rows: &[ReferenceRow], selected: &BTreeSet<String>) -> Vec<ReferenceRow> {
    rows.iter()
        .filter(|row| selected.contains(row.short()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use rust_decimal::Decimal;

    fn rows() -> Vec<ReferenceRow> {
        ["A", "B", "C", "D"]
            .iter()
            .enumerate()
            .map(|(i, s)| {
                ReferenceRow::new(
                    format!("Long {s}"),
                    *s,
                    Amount::new(Decimal::from(i as i64 + 1)),
                    "reference",
                )
            })
            .collect()
    }

    fn keys(rows: &[ReferenceRow]) -> Vec<&str> {
        rows.iter().map(|r| r.short()).collect()
    }

    #[test]
    fn test_filter_keeps_source_order() {
        let selected: BTreeSet<String> = ["D", "B"].iter().map(|s| s.to_string()).collect();
        let out = filter(&rows(), &selected);
        assert_eq!(keys(&out), vec!["B", "D"]);
    }

    #[test]
    fn test_filter_ignores_unknown_keys() {
        let selected: BTreeSet<String> = ["A", "Z"].iter().map(|s| s.to_string()).collect();
        let out = filter(&rows(), &selected);
        assert_eq!(keys(&out), vec!["A"]);
    }

    #[test]
    fn test_filter_empty_selection() {
        assert!(filter(&rows(), &BTreeSet::new()).is_empty());
    }

    #[test]
    fn test_selection_all() {
        assert_eq!(keys(&Selection::All.apply(&rows())), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_selection_only() {
        let out = Selection::only(["C", "A"]).apply(&rows());
        assert_eq!(keys(&out), vec!["A", "C"]);
        let none = Selection::only(Vec::<String>::new()).apply(&rows());
        assert!(none.is_empty());
    }
}
