// tempo-core/src/application/loader.rs

use std::time::Instant;

use crate::domain::error::DomainError;
use crate::domain::load::{Credential, LoadFormat, LoadSpec, StagingTable};
use crate::error::TempoError;
use crate::infrastructure::config::PipelineConfig;
use crate::ports::warehouse::Warehouse;

/// Row counts reported by the two staging loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagedRows {
    pub events: u64,
    pub songs: u64,
}

/// Builds the two staging load requests from operator configuration: event
/// logs with their path-mapping spec, song metadata with auto-detection.
pub fn staging_specs(config: &PipelineConfig) -> [LoadSpec; 2] {
    let credential = Credential::IamRole(config.iam_role.arn.clone());
    [
        LoadSpec {
            table: StagingTable::Events,
            source_uri: config.s3.log_data.clone(),
            credential: credential.clone(),
            format: LoadFormat::JsonPaths(config.s3.log_jsonpath.clone()),
        },
        LoadSpec {
            table: StagingTable::Songs,
            source_uri: config.s3.song_data.clone(),
            credential,
            format: LoadFormat::JsonAuto,
        },
    ]
}

/// Loads both staging tables. The two loads have no data dependency on each
/// other, so they run concurrently; each table must have been freshly
/// recreated by the schema manager beforehand.
pub async fn load_staging(
    warehouse: &dyn Warehouse,
    config: &PipelineConfig,
) -> Result<StagedRows, TempoError> {
    println!("📦 Loading staging tables from object storage...");
    let [events, songs] = staging_specs(config);

    let (events_loaded, songs_loaded) =
        futures::future::try_join(load_one(warehouse, events), load_one(warehouse, songs)).await?;

    Ok(StagedRows {
        events: events_loaded,
        songs: songs_loaded,
    })
}

async fn load_one(warehouse: &dyn Warehouse, spec: LoadSpec) -> Result<u64, TempoError> {
    let start = Instant::now();
    let table = spec.table.table_name();

    let rows = warehouse
        .bulk_load(&spec)
        .await
        .map_err(|e| DomainError::Load {
            table: table.to_string(),
            detail: e.to_string(),
        })?;

    println!("   ✅ {}: {} rows in {:.2?}", table, rows, start.elapsed());
    Ok(rows)
}
