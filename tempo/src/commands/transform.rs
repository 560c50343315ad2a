// tempo/src/commands/transform.rs
//
// USE CASE: Run the five staging-to-target transforms. Must follow a fresh
// staging load; each operation appends, it does not merge.

use std::path::PathBuf;

use tempo_core::application::run_transforms;
use tempo_core::domain::schema::Dialect;

use crate::commands::bootstrap;

pub async fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let (_config, warehouse) = bootstrap(&project_dir)?;

    let executed = run_transforms(&warehouse, Dialect::DuckDb).await?;

    println!("✨ {} transforms executed.", executed);
    Ok(())
}
