//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::Config;
use tempfile::TempDir;

/// A small reference table: three active rows, one inactive row and one row with an empty field.
pub const SAMPLE_CSV: &str = "\
name,short,amount,category,use,source
A MÁV éves állami támogatása,MÁV,250000000000,reference,1,https://example.hu/mav
Paks II bővítés,Paks II,4e12,reference,1,https://example.hu/paks
Budapest-Belgrád vasútvonal,Vasút,750000000000,reference,0,https://example.hu/vasut
Stadionépítések,Stadionok,300000000000,reference,1,
Kormányzati kommunikáció,,100000000000,reference,1,
";

/// Test environment that sets up a forint-o-meter home directory with a Config.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment whose home directory holds `SAMPLE_CSV` as its reference data.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("budget.csv");
        std::fs::write(&source, SAMPLE_CSV).unwrap();
        let config = Config::create(temp_dir.path().join("forint"), Some(source.as_path()))
            .await
            .unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Creates a test environment without any reference data.
    pub async fn without_data() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::create(temp_dir.path().join("forint"), None)
            .await
            .unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }
}
