use crate::commands::Out;
use crate::model::{ReferenceRow, ReferenceStore};
use crate::{Config, Result};

/// Lists the active reference rows in source order.
pub async fn references(config: Config) -> Result<Out<Vec<ReferenceRow>>> {
    let store = ReferenceStore::load(&config.data_path()).await?;
    let mut message = format!("{} references available:", store.len());
    for row in store.rows() {
        message.push_str(&format!(
            "\n  {} | {} | {}",
            row.short(),
            row.name(),
            row.amount().display_billions()
        ));
    }
    Ok(Out::new(message, store.rows().to_vec()))
}
