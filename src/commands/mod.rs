//! Command handlers for the forint CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod compose;
mod export;
mod init;
mod references;

use crate::args::EntryArgs;
use crate::model::{self, CustomEntry, ReferenceStore, VizRow};
use crate::{Config, Result};
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use compose::{compose, Rows};
pub use export::{export, Exported};
pub use init::init;
pub use references::references;

/// The message given when the selection leaves nothing to draw.
pub const NOTHING_TO_RENDER: &str = "Nothing to render: no reference is selected";

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Loads the reference data, applies the selection and appends the custom entry.
///
/// Returns `None` when the selection is empty, in which case there is nothing to render.
pub(crate) async fn prepare(config: &Config, args: &EntryArgs) -> Result<Option<Vec<VizRow>>> {
    let entry = CustomEntry::build(args.amount(), args.unit(), args.currency(), args.label())?;
    let store = ReferenceStore::load(&config.data_path()).await?;
    let filtered = args.selection().apply(store.rows());
    if filtered.is_empty() {
        return Ok(None);
    }
    debug!(
        "Composing {} of {} references with '{}'",
        filtered.len(),
        store.len(),
        entry.label()
    );
    Ok(Some(model::compose(&filtered, &entry)))
}

