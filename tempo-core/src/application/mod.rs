// tempo-core/src/application/mod.rs

pub mod engine;
pub mod loader;
pub mod pipeline;
pub mod schema;
pub mod transform;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI do:
// `use tempo_core::application::{run_pipeline, SchemaManager, load_staging};`
// without knowing the internal file structure.

pub use engine::execute_query;
pub use loader::{StagedRows, load_staging};
pub use pipeline::{RunResult, run_pipeline};
pub use schema::SchemaManager;
pub use transform::run_transforms;

// --- SHARED TEST DOUBLE ---

#[cfg(test)]
pub(crate) mod testing {
    use crate::domain::load::LoadSpec;
    use crate::error::TempoError;
    use crate::ports::warehouse::Warehouse;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Records every statement and load request; optionally fails any
    /// statement containing a trigger substring.
    #[derive(Clone, Default)]
    pub struct MockWarehouse {
        pub executed: Arc<Mutex<Vec<String>>>,
        pub loads: Arc<Mutex<Vec<LoadSpec>>>,
        pub fail_on: Option<String>,
    }

    impl MockWarehouse {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_on(trigger: &str) -> Self {
            Self {
                fail_on: Some(trigger.to_string()),
                ..Self::default()
            }
        }

        pub fn statements(&self) -> Vec<String> {
            self.executed.lock().unwrap_or_else(|e| e.into_inner()).clone()
        }
    }

    #[async_trait]
    impl Warehouse for MockWarehouse {
        async fn execute(&self, statement: &str) -> Result<(), TempoError> {
            if let Some(trigger) = &self.fail_on
                && statement.contains(trigger.as_str())
            {
                return Err(TempoError::InternalError(format!(
                    "mock rejection of: {}",
                    trigger
                )));
            }
            self.executed
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(statement.to_string());
            Ok(())
        }

        async fn bulk_load(&self, spec: &LoadSpec) -> Result<u64, TempoError> {
            if let Some(trigger) = &self.fail_on
                && spec.source_uri.contains(trigger.as_str())
            {
                return Err(TempoError::InternalError(format!(
                    "mock rejection of: {}",
                    trigger
                )));
            }
            self.loads
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(spec.clone());
            Ok(42)
        }

        async fn query_scalar(&self, _query: &str) -> Result<u64, TempoError> {
            Ok(0)
        }

        fn engine_name(&self) -> &str {
            "mock"
        }
    }
}
