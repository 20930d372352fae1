use crate::args::ExportArgs;
use crate::chart;
use crate::commands::{prepare, Out, NOTHING_TO_RENDER};
use crate::error::{ErrorType, IntoResult};
use crate::{utils, Config, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// What `export` wrote.
#[derive(Debug, Clone, Serialize)]
pub struct Exported {
    pub path: PathBuf,
    pub rows: usize,
    pub bytes: usize,
}

/// Draws the treemap for the selection and the custom entry and writes it to a PDF.
///
/// The file goes to `args.output()` when given, otherwise to the configured PDF path in the home
/// directory. An existing file is overwritten. When the selection is empty no file is written.
pub async fn export(config: Config, args: ExportArgs) -> Result<Out<Exported>> {
    let Some(rows) = prepare(&config, args.entry()).await? else {
        return Ok(NOTHING_TO_RENDER.into());
    };

    let bytes = chart::render(&rows, &config.palette(), &config.chart_options())
        .pub_result(ErrorType::Export)?;
    let path = match args.output() {
        Some(p) => p.to_path_buf(),
        None => config.pdf_path(),
    };
    debug!("Writing {} bytes to {}", bytes.len(), path.display());
    utils::write(&path, &bytes).await.pub_result(ErrorType::Io)?;

    Ok(Out::new(
        format!("Saved the treemap to {}", path.display()),
        Exported {
            path,
            rows: rows.len(),
            bytes: bytes.len(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::EntryArgs;
    use crate::model::{Currency, Unit};
    use crate::test::TestEnv;
    use lopdf::Document;
    use rust_decimal::Decimal;

    fn entry() -> EntryArgs {
        EntryArgs::new(Decimal::from(25), Unit::Billion, Currency::Huf, "")
    }

    #[tokio::test]
    async fn test_export_default_path() {
        let env = TestEnv::new().await;
        let config = env.config();
        let out = export(config.clone(), ExportArgs::new(entry(), None))
            .await
            .unwrap();

        let exported = out.structure().unwrap();
        assert_eq!(exported.path, config.pdf_path());
        assert_eq!(exported.rows, 4);

        let bytes = tokio::fs::read(&exported.path).await.unwrap();
        assert_eq!(bytes.len(), exported.bytes);
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[tokio::test]
    async fn test_export_overwrites_output() {
        let env = TestEnv::new().await;
        let target = env.config().root().join("mine.pdf");
        utils::write(&target, "old").await.unwrap();

        let args = ExportArgs::new(entry().with_selection(["MÁV"]), Some(target.clone()));
        let out = export(env.config(), args).await.unwrap();
        assert_eq!(out.structure().unwrap().rows, 2);

        let bytes = tokio::fs::read(&target).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_export_nothing_selected() {
        let env = TestEnv::new().await;
        let config = env.config();
        let args = ExportArgs::new(entry().with_selection(Vec::<String>::new()), None);
        let out = export(config.clone(), args).await.unwrap();
        assert_eq!(out.message(), NOTHING_TO_RENDER);
        assert!(out.structure().is_none());
        assert!(!config.pdf_path().exists());
    }

    #[tokio::test]
    async fn test_export_unwritable_target() {
        let env = TestEnv::new().await;
        let target = env.config().root().join("missing").join("chart.pdf");
        let err = export(env.config(), ExportArgs::new(entry(), Some(target)))
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Io);
    }
}
