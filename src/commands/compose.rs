use crate::args::{ComposeArgs, OutputFormat};
use crate::commands::{prepare, Out, NOTHING_TO_RENDER};
use crate::error::{ErrorType, IntoResult, Res};
use crate::model::VizRow;
use crate::{Config, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// Composed treemap rows in the requested output format.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rows {
    /// One block per row holding its tooltip text.
    Table(String),
    /// JSON array of objects, one per row.
    Json(serde_json::Value),
    /// CSV data with a header row.
    Csv(String),
}

impl Debug for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rows::Table(s) => write!(f, "Rows::Table({} chars)", s.len()),
            Rows::Json(v) => write!(f, "Rows::Json({:?})", v),
            Rows::Csv(s) => write!(f, "Rows::Csv({} chars)", s.len()),
        }
    }
}

impl Display for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rows::Json(v) => {
                if let Ok(s) = serde_json::to_string_pretty(v) {
                    write!(f, "{}", s)
                } else {
                    write!(f, "{:?}", v)
                }
            }
            Rows::Table(s) => write!(f, "{}", s),
            Rows::Csv(s) => write!(f, "{}", s),
        }
    }
}

impl Rows {
    fn new(rows: &[VizRow], format: OutputFormat) -> Res<Self> {
        Ok(match format {
            OutputFormat::Table => Rows::Table(
                rows.iter()
                    .map(VizRow::tooltip)
                    .collect::<Vec<_>>()
                    .join("\n\n"),
            ),
            OutputFormat::Json => {
                Rows::Json(serde_json::to_value(rows).context("Unable to serialize rows")?)
            }
            OutputFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(Vec::new());
                for row in rows {
                    wtr.serialize(row).context("Unable to write CSV row")?;
                }
                let bytes = wtr.into_inner().context("Unable to flush CSV")?;
                Rows::Csv(String::from_utf8(bytes).context("CSV output is not UTF-8")?)
            }
        })
    }
}

/// Builds the treemap rows for the selection and the custom entry.
///
/// When the selection is empty nothing is composed and the `Out` carries no structure.
pub async fn compose(config: Config, args: ComposeArgs) -> Result<Out<Rows>> {
    let Some(rows) = prepare(&config, args.entry()).await? else {
        return Ok(NOTHING_TO_RENDER.into());
    };
    let count = rows.len();
    let rendered = Rows::new(&rows, args.format()).pub_result(ErrorType::Export)?;
    Ok(Out::new(format!("Composed {count} treemap rows"), rendered))
}
