// tempo-core/src/infrastructure/config/mod.rs

pub mod pipeline;

pub use pipeline::{
    IamRoleConfig, PipelineConfig, S3Config, WarehouseConfig, load_pipeline_config,
};
