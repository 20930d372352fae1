//! Configuration file handling for forint-o-meter.
//!
//! The configuration file is stored at `$FORINT_HOME/config.json` and says where the reference
//! data lives, what the exported PDF is called, and which colors the chart uses.

use crate::chart::{ChartOptions, Palette, Rgb};
use crate::error::{ErrorType, IntoResult, Res};
use crate::{utils, Result};
use anyhow::{bail, ensure, Context};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "forint-o-meter";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATA_CSV: &str = "data.csv";
const PDF_FILE_NAME: &str = "forint-o-meter.pdf";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$FORINT_HOME` and from there it loads `$FORINT_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory and an initial `config.json`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the home directory, e.g. `$HOME/forint-o-meter`
    /// - `data_source` - If given, this reference CSV is copied to `$FORINT_HOME/data.csv`.
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>, data_source: Option<&Path>) -> Result<Self> {
        Self::create_inner(dir.into(), data_source)
            .await
            .pub_result(ErrorType::Config)
    }

    async fn create_inner(maybe_relative: PathBuf, data_source: Option<&Path>) -> Res<Self> {
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the forint-o-meter home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_file = ConfigFile::default();
        if let Some(source) = data_source {
            utils::copy(source, root.join(&config_file.data_path)).await?;
        }

        let config_path = root.join(CONFIG_JSON);
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that the home directory exists and that the config file exists
    /// - load and validate the config file
    /// - return the loaded configuration object
    pub async fn load(home: impl Into<PathBuf>) -> Result<Self> {
        Self::load_inner(home.into())
            .await
            .pub_result(ErrorType::Config)
    }

    async fn load_inner(maybe_relative: PathBuf) -> Res<Self> {
        if !maybe_relative.is_dir() {
            bail!(
                "The home directory is missing '{}', run 'forint init' first",
                maybe_relative.display()
            )
        }
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The reference CSV. Relative paths are resolved against the home directory.
    pub fn data_path(&self) -> PathBuf {
        self.resolve(&self.config_file.data_path)
    }

    /// Where `export` writes when no output path is given.
    pub fn pdf_path(&self) -> PathBuf {
        self.root.join(&self.config_file.pdf_file_name)
    }

    pub fn palette(&self) -> Palette {
        Palette::with_overrides(&self.config_file.colors)
    }

    pub fn chart_options(&self) -> ChartOptions {
        let options = ChartOptions::default();
        match &self.config_file.title {
            Some(title) => options.with_title(title),
            None => options,
        }
    }

    fn resolve(&self, p: &Path) -> PathBuf {
        if p.is_absolute() {
            return p.to_path_buf();
        }
        self.root.join(p)
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "forint-o-meter",
///   "config_version": 1,
///   "data_path": "data.csv",
///   "pdf_file_name": "forint-o-meter.pdf",
///   "title": "Mit jelent egy milliárd forint?",
///   "colors": { "reference": "#C1D8C3", "sport": "#4F6D7A" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "forint-o-meter"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Path to the reference CSV (relative to the home directory or absolute)
    #[serde(default = "default_data_path")]
    data_path: PathBuf,

    /// File name of the exported chart inside the home directory
    #[serde(default = "default_pdf_file_name")]
    pdf_file_name: String,

    /// Overrides the chart title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    /// Extra or replacement category colors
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    colors: BTreeMap<String, Rgb>,
}

fn default_data_path() -> PathBuf {
    PathBuf::from(DATA_CSV)
}

fn default_pdf_file_name() -> String {
    PDF_FILE_NAME.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            data_path: default_data_path(),
            pdf_file_name: default_pdf_file_name(),
            title: None,
            colors: BTreeMap::new(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or was written for another app or
    /// a newer version.
    async fn load(path: impl AsRef<Path>) -> Res<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        ensure!(
            config.config_version <= CONFIG_VERSION,
            "Config version {} is unsupported. Is a newer version of forint available?",
            config.config_version
        );
        ensure!(
            !config.pdf_file_name.trim().is_empty(),
            "The pdf_file_name in the config file cannot be empty"
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Res<()> {
        utils::serialize(path.as_ref(), self)
            .await
            .context("Unable to write config file")
    }
}
