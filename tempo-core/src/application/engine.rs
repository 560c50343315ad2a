// tempo-core/src/application/engine.rs

use std::time::Instant;
use tracing::{debug, error, instrument};

use crate::error::TempoError;
use crate::ports::warehouse::Warehouse;

/// Executes a raw SQL statement with instrumentation (logs + timing).
/// Every ad-hoc and transform statement goes through this wrapper so query
/// performance stays observable.
#[instrument(skip(warehouse, query), fields(query.len = query.len()))]
pub async fn execute_query(warehouse: &dyn Warehouse, query: &str) -> Result<(), TempoError> {
    let start = Instant::now();
    debug!("⚡ Executing Query: {}", query);

    let result = warehouse.execute(query).await;

    let duration = start.elapsed();

    match result {
        Ok(_) => {
            debug!("✅ Query finished in {:.2?}", duration);
            Ok(())
        }
        Err(e) => {
            // Logged here to keep the timing context, even though the error
            // propagates upward as well.
            error!("❌ Query failed after {:.2?}: {}", duration, e);
            Err(e)
        }
    }
}
