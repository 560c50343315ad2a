// tempo/src/commands/load.rs
//
// USE CASE: Bulk-load the staging tables only. Assumes the schema was just
// reset (create-tables); loading on top of stale staging rows duplicates
// them.

use std::path::PathBuf;

use tempo_core::application::load_staging;

use crate::commands::bootstrap;

pub async fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let (config, warehouse) = bootstrap(&project_dir)?;

    let staged = load_staging(&warehouse, &config).await?;

    println!(
        "✨ Staging complete: {} events, {} songs.",
        staged.events, staged.songs
    );
    Ok(())
}
