// tempo/src/commands/create_tables.rs
//
// USE CASE: Reset the warehouse schema without loading anything.

use std::path::PathBuf;

use tempo_core::application::SchemaManager;
use tempo_core::domain::schema::Dialect;

use crate::commands::bootstrap;

pub async fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let (_config, warehouse) = bootstrap(&project_dir)?;

    println!("🧹 Dropping previous tables...");
    SchemaManager::drop_all(&warehouse, Dialect::DuckDb).await?;
    println!("🏗️  Creating tables...");
    SchemaManager::create_all(&warehouse, Dialect::DuckDb).await?;

    println!("✨ Schema reset: 7 tables ready.");
    Ok(())
}
