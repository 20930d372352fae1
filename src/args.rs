//! These structs provide the CLI interface for the forint CLI.

use crate::model::{Currency, Selection, Unit};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing::level_filters::LevelFilter;

/// forint: How big is a billion forints?
///
/// This program puts an amount of money of your choosing next to the items of the Hungarian
/// government budget, and draws all of them as a treemap so that their sizes can be compared.
/// The reference figures are read from a CSV file with the columns name, short, amount, category
/// and use.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory and the configuration file.
    ///
    /// Pass the reference data with --data and it will be copied into the home directory as
    /// data.csv. Otherwise put a data.csv there yourself, or point data_path in config.json at it.
    Init(InitArgs),
    /// List the reference items that can be selected.
    References,
    /// Print the rows of the treemap: the selected references followed by your own amount.
    Compose(ComposeArgs),
    /// Draw the treemap and save it as a PDF.
    Export(ExportArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the configuration and reference data are held. Defaults to
    /// ~/forint-o-meter
    #[arg(long, env = "FORINT_HOME", default_value_t = default_home())]
    home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf) -> Self {
        Self {
            log_level,
            home: home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// (Not shown): Args for the `forint init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// A reference CSV to copy into the home directory.
    #[arg(long)]
    data: Option<PathBuf>,
}

impl InitArgs {
    pub fn new(data: Option<PathBuf>) -> Self {
        Self { data }
    }

    pub fn data(&self) -> Option<&Path> {
        self.data.as_deref()
    }
}

/// The custom amount and the reference selection, shared by `compose` and `export`.
#[derive(Debug, Parser, Clone)]
pub struct EntryArgs {
    /// Your amount, in --unit of --currency. Cannot be negative.
    #[arg(long, default_value_t = Decimal::ZERO, allow_negative_numbers = true)]
    amount: Decimal,

    /// The magnitude of --amount.
    #[arg(long, value_enum, default_value_t = Unit::Billion)]
    unit: Unit,

    /// The currency of --amount. EUR and USD are converted at fixed rates (400 and 350 HUF).
    #[arg(long, value_enum, default_value_t = Currency::Huf)]
    currency: Currency,

    /// The label of your amount, at most 50 characters. Longer labels are cut.
    #[arg(long, default_value = "")]
    label: String,

    /// The short label of a reference to show. Repeat to show several. All references are shown
    /// when this is not given.
    #[arg(long = "select", conflicts_with = "none")]
    select: Vec<String>,

    /// Show no references at all.
    #[arg(long)]
    none: bool,
}

impl EntryArgs {
    pub fn new(amount: Decimal, unit: Unit, currency: Currency, label: impl Into<String>) -> Self {
        Self {
            amount,
            unit,
            currency,
            label: label.into(),
            select: Vec::new(),
            none: false,
        }
    }

    /// Restricts the references to `keys`. An empty list selects nothing.
    pub fn with_selection<S>(mut self, keys: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<String>,
    {
        self.select = keys.into_iter().map(Into::into).collect();
        self.none = self.select.is_empty();
        self
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn selection(&self) -> Selection {
        if self.none {
            Selection::only(Vec::<String>::new())
        } else if self.select.is_empty() {
            Selection::All
        } else {
            Selection::only(self.select.iter().cloned())
        }
    }
}

#[derive(
    Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One block per row, with the tooltip text.
    #[default]
    Table,
    Json,
    Csv,
}

serde_plain::derive_display_from_serialize!(OutputFormat);
serde_plain::derive_fromstr_from_deserialize!(OutputFormat);

/// (Not shown): Args for the `forint compose` command.
#[derive(Debug, Parser, Clone)]
pub struct ComposeArgs {
    #[clap(flatten)]
    entry: EntryArgs,

    /// How to print the rows.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl ComposeArgs {
    pub fn new(entry: EntryArgs, format: OutputFormat) -> Self {
        Self { entry, format }
    }

    pub fn entry(&self) -> &EntryArgs {
        &self.entry
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// (Not shown): Args for the `forint export` command.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    #[clap(flatten)]
    entry: EntryArgs,

    /// Where to write the PDF. Defaults to $FORINT_HOME/forint-o-meter.pdf
    #[arg(long)]
    output: Option<PathBuf>,
}

impl ExportArgs {
    pub fn new(entry: EntryArgs, output: Option<PathBuf>) -> Self {
        Self { entry, output }
    }

    pub fn entry(&self) -> &EntryArgs {
        &self.entry
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

fn default_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("forint-o-meter"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or FORINT_HOME instead of relying on the default \
                home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("forint-o-meter")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
