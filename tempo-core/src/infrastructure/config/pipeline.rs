// tempo-core/src/infrastructure/config/pipeline.rs
//
// Pipeline configuration: source URIs, credential reference, local engine
// path. Loaded once by the driver and passed by parameter into the core;
// no process-global state.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::infrastructure::error::InfrastructureError;

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_target_path")]
    pub target_path: String,
    pub warehouse: WarehouseConfig,
    pub s3: S3Config,
    pub iam_role: IamRoleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseConfig {
    /// Local engine database path, or ":memory:".
    #[serde(default = "default_database")]
    pub database: String,
}

/// Object-storage locations of the two staging sources, plus the
/// path-mapping spec for the event JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct S3Config {
    pub log_data: String,
    pub log_jsonpath: String,
    pub song_data: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IamRoleConfig {
    pub arn: String,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_target_path() -> String {
    "target".to_string()
}

fn default_database() -> String {
    "tempo_db.duckdb".to_string()
}

// --- LOADER ---

#[instrument(skip(project_dir))] // Automatic entry/exit log for the function
pub fn load_pipeline_config(project_dir: &Path) -> Result<PipelineConfig, InfrastructureError> {
    // 1. Main file discovery
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading pipeline configuration");

    // 2. Base YAML load
    let content = fs::read_to_string(&config_path)?;
    let mut config: PipelineConfig = serde_yaml::from_str(&content).map_err(|e| {
        InfrastructureError::ConfigError(format!(
            "Failed to parse pipeline config at {:?}: {}",
            config_path, e
        ))
    })?;

    // 3. Environment overrides (layering pattern)
    // Allows: TEMPO_TARGET_PATH=/tmp/build tempo run
    apply_env_overrides(&mut config);

    Ok(config)
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    let candidates = ["tempo.yaml", "tempo.yml"];
    for filename in candidates {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "No configuration file found in {:?}. Checked: {:?}",
        root, candidates
    )))
}

fn apply_env_overrides(config: &mut PipelineConfig) {
    if let Ok(val) = std::env::var("TEMPO_TARGET_PATH") {
        info!(old = ?config.target_path, new = ?val, "Overriding target path via ENV");
        config.target_path = val;
    }
    if let Ok(val) = std::env::var("TEMPO_DATABASE") {
        info!(old = ?config.warehouse.database, new = ?val, "Overriding database via ENV");
        config.warehouse.database = val;
    }
}
