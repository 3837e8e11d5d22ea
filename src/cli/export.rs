//! Export command

use anyhow::Result;
use chrono::Utc;
use std::path::Path;

use rickmorty::export::ExportDocument;

use super::{AppContext, now};

/// Print the export to stdout, or write it to `output`
pub async fn export_command(ctx: &AppContext, output: Option<&Path>) -> Result<()> {
    let tracker = ctx.load_tracker().await?;
    let doc = ExportDocument::from_tracker(&tracker, now().date(), Utc::now());

    match output {
        Some(path) => {
            doc.write_to(path)?;
            println!("Exported {} habits to {}", doc.habits.len(), path.display());
        }
        None => println!("{}", doc.to_json()?),
    }
    Ok(())
}
