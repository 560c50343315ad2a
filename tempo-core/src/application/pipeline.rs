// tempo-core/src/application/pipeline.rs

use std::fs;
use std::path::Path;

use crate::application::loader::load_staging;
use crate::application::schema::SchemaManager;
use crate::application::transform::run_transforms;
use crate::domain::schema::Dialect;
use crate::error::TempoError;
use crate::infrastructure::config::PipelineConfig;
use crate::ports::warehouse::Warehouse;

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct RunResult {
    pub success: bool,
    pub events_staged: u64,
    pub songs_staged: u64,
    pub transforms_executed: usize,
    pub errors: Vec<String>,
}

/// One full pipeline run: drop-all → create-all → staging loads →
/// transforms in dependency order. Fail-fast: the first error aborts the
/// run and whatever warehouse state exists is left in place for
/// inspection. There is no rollback.
pub async fn run_pipeline(
    project_dir: &Path,
    config: &PipelineConfig,
    warehouse: &dyn Warehouse,
    dialect: Dialect,
) -> Result<RunResult, TempoError> {
    println!("🚀 Starting Pipeline ({} engine)...", warehouse.engine_name());
    let start_time = std::time::Instant::now();

    // 1. SETUP (run artifacts)
    let target_dir = project_dir.join(&config.target_path);
    if !target_dir.exists() {
        fs::create_dir_all(&target_dir)?;
    }

    // 2. RESET SCHEMA
    // Staging tables must land empty; dimensional DDL is IF NOT EXISTS so
    // recreating everything from scratch is equivalent and simpler.
    println!("🧹 Dropping previous tables...");
    SchemaManager::drop_all(warehouse, dialect).await?;
    println!("🏗️  Creating tables...");
    SchemaManager::create_all(warehouse, dialect).await?;

    // 3. STAGING LOADS (concurrent, independent tables)
    let staged = load_staging(warehouse, config).await?;

    // 4. TRANSFORMS (serial, dependency order)
    let transforms_executed = run_transforms(warehouse, dialect).await?;

    let duration = start_time.elapsed();
    println!(
        "✨ Done in {:.2}s. Staged {} events / {} songs, ran {} transforms.",
        duration.as_secs_f64(),
        staged.events,
        staged.songs,
        transforms_executed
    );

    let result = RunResult {
        success: true,
        events_staged: staged.events,
        songs_staged: staged.songs,
        transforms_executed,
        errors: Vec::new(),
    };

    save_json(&target_dir.join("run_results.json"), &result)?;

    Ok(result)
}

fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<(), TempoError> {
    let content = serde_json::to_string_pretty(data)
        .map_err(|e| TempoError::InternalError(format!("Serialization: {}", e)))?;
    fs::write(path, content)?;
    Ok(())
}
