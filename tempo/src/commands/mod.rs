// tempo/src/commands/mod.rs

pub mod create_tables;
pub mod load;
pub mod query;
pub mod run;
pub mod transform;

use std::path::Path;

use anyhow::Context;
use tempo_core::infrastructure::adapters::duckdb::DuckDbWarehouse;
use tempo_core::infrastructure::config::{PipelineConfig, load_pipeline_config};

/// Shared bootstrap for the project-scoped commands: read tempo.yaml, open
/// the local engine it points at.
pub(crate) fn bootstrap(project_dir: &Path) -> anyhow::Result<(PipelineConfig, DuckDbWarehouse)> {
    println!("⚙️  Loading configuration...");
    let config = load_pipeline_config(project_dir)
        .with_context(|| format!("Failed to load pipeline configuration from {:?}", project_dir))?;
    println!("   Project: {} (v{})", config.name, config.version);

    // A relative database path is anchored to the project, not to whatever
    // directory the binary happens to run from.
    let database = &config.warehouse.database;
    let db_path = if database == ":memory:" || Path::new(database).is_absolute() {
        database.clone()
    } else {
        project_dir.join(database).to_string_lossy().to_string()
    };

    let warehouse = DuckDbWarehouse::new(&db_path)
        .with_context(|| format!("Failed to open DuckDB at {}", db_path))?;

    Ok((config, warehouse))
}
