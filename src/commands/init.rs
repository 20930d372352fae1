use crate::commands::Out;
use crate::{Config, Result};
use std::path::Path;

/// Creates the home directory and an initial `config.json` with default settings, copying
/// `data` into the home directory as `data.csv` when it is given.
///
/// # Arguments
/// - `home` - The directory that will be the home directory, e.g. `$HOME/forint-o-meter`
/// - `data` - A reference CSV with the columns name, short, amount, category and use.
///
/// # Errors
/// - Returns an error if any file operations fail.
pub async fn init(home: &Path, data: Option<&Path>) -> Result<Out<()>> {
    let config = Config::create(home, data).await?;
    Ok(format!(
        "Successfully created the forint-o-meter directory and config at {}",
        config.root().display()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::SAMPLE_CSV;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_with_data() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("budget.csv");
        std::fs::write(&source, SAMPLE_CSV).unwrap();
        let home = dir.path().join("home");

        let out = init(&home, Some(source.as_path())).await.unwrap();
        assert!(out.message().starts_with("Successfully created"));
        assert!(home.join("config.json").is_file());
        assert!(home.join("data.csv").is_file());
    }

    #[tokio::test]
    async fn test_init_missing_data_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.csv");
        assert!(init(&dir.path().join("home"), Some(missing.as_path())).await.is_err());
    }
}
