//! The curated budget reference rows and the store that loads them from CSV.

use crate::error::{ErrorType, IntoResult, Res};
use crate::model::{Amount, USER_CATEGORY};
use crate::{utils, Result};
use anyhow::{bail, Context};
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

const NAME: &str = "name";
const SHORT: &str = "short";
const AMOUNT: &str = "amount";
const CATEGORY: &str = "category";
const USE: &str = "use";

/// A single row of reference data, e.g. the yearly budget of a ministry.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRow {
    /// The long label, shown in tooltips.
    name: String,
    /// The short label, shown on the chart. Unique among active rows.
    short: String,
    amount: Amount,
    category: String,
}

impl ReferenceRow {
    pub fn new(
        name: impl Into<String>,
        short: impl Into<String>,
        amount: Amount,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            short: short.into(),
            amount,
            category: category.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short(&self) -> &str {
        &self.short
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

/// The canonical, read-only reference table. Holds only active rows, in source order.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ReferenceStore {
    rows: Vec<ReferenceRow>,
}

impl ReferenceStore {
    /// Reads and validates the reference CSV at `path`.
    ///
    /// # Errors
    /// - A [`ErrorType::DataLoad`] error if the file is missing, unreadable or malformed.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = utils::read(path)
            .await
            .pub_result(ErrorType::DataLoad)?;
        let store = Self::parse_inner(content.as_bytes())
            .with_context(|| format!("Invalid reference data in {}", path.display()))
            .pub_result(ErrorType::DataLoad)?;
        info!(
            "Loaded {} reference rows from {}",
            store.rows.len(),
            path.display()
        );
        Ok(store)
    }

    /// Parses reference data from any reader.
    ///
    /// Rows with an empty required field are dropped. Rows whose `use` flag is not `1` are
    /// excluded. Everything else must be well-formed.
    pub fn parse(reader: impl Read) -> Result<Self> {
        Self::parse_inner(reader).pub_result(ErrorType::DataLoad)
    }

    fn parse_inner(reader: impl Read) -> Res<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let columns = Columns::new(rdr.headers().context("Unable to read the CSV header")?)?;

        let mut rows: Vec<ReferenceRow> = Vec::new();
        let mut seen = BTreeSet::new();
        for result in rdr.records() {
            let record = result.context("Unable to read a CSV record")?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let Some(raw) = columns.extract(&record) else {
                debug!("Dropping line {line} because it has an empty field");
                continue;
            };
            let Some(row) = raw.into_row(line)? else {
                continue;
            };
            if !seen.insert(row.short.clone()) {
                bail!("Duplicate short label '{}' on line {line}", row.short);
            }
            rows.push(row);
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ReferenceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All short keys in source order. This is the "select all" default.
    pub fn keys(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.short()).collect()
    }
}

impl From<Vec<ReferenceRow>> for ReferenceStore {
    fn from(rows: Vec<ReferenceRow>) -> Self {
        Self { rows }
    }
}

/// Column indexes of the required fields, found by header name.
struct Columns {
    name: usize,
    short: usize,
    amount: usize,
    category: usize,
    active: usize,
}

impl Columns {
    fn new(headers: &StringRecord) -> Res<Self> {
        let find = |header: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == header)
                .with_context(|| format!("The required column '{header}' is missing"))
        };
        Ok(Self {
            name: find(NAME)?,
            short: find(SHORT)?,
            amount: find(AMOUNT)?,
            category: find(CATEGORY)?,
            active: find(USE)?,
        })
    }

    /// Returns `None` if any required field is absent or empty.
    fn extract<'a>(&self, record: &'a StringRecord) -> Option<RawRow<'a>> {
        let get = |ix: usize| record.get(ix).filter(|v| !v.trim().is_empty());
        Some(RawRow {
            name: get(self.name)?,
            short: get(self.short)?,
            amount: get(self.amount)?,
            category: get(self.category)?,
            active: get(self.active)?,
        })
    }
}

struct RawRow<'a> {
    name: &'a str,
    short: &'a str,
    amount: &'a str,
    category: &'a str,
    active: &'a str,
}

impl RawRow<'_> {
    /// Returns `None` for rows that are not flagged for use.
    fn into_row(self, line: u64) -> Res<Option<ReferenceRow>> {
        let flag = Amount::from_str(self.active)
            .map_err(|e| anyhow::anyhow!("Invalid '{USE}' value '{}' on line {line}: {e}", self.active))?;
        if flag.value() != rust_decimal::Decimal::ONE {
            debug!("Skipping unused reference '{}' on line {line}", self.short);
            return Ok(None);
        }

        let amount = Amount::from_str(self.amount).map_err(|e| {
            anyhow::anyhow!("Invalid '{AMOUNT}' value '{}' on line {line}: {e}", self.amount)
        })?;
        if !amount.is_positive() {
            bail!("The amount of '{}' on line {line} must be positive", self.short);
        }
        if self.category == USER_CATEGORY {
            bail!("The category '{USER_CATEGORY}' on line {line} is reserved for the custom entry");
        }

        Ok(Some(ReferenceRow::new(
            self.name,
            self.short,
            amount,
            self.category,
        )))
    }
}
