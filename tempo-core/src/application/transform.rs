// tempo-core/src/application/transform.rs

use std::time::Instant;

use crate::application::engine::execute_query;
use crate::domain::error::DomainError;
use crate::domain::schema::Dialect;
use crate::domain::transform::TransformOp;
use crate::error::TempoError;
use crate::ports::warehouse::Warehouse;

/// Runs the five staging-to-target transforms serially, in foreign-key
/// dependency order, failing fast. Returns how many operations ran.
///
/// Must be called at most once per staging cycle: the operations append,
/// they do not merge.
pub async fn run_transforms(
    warehouse: &dyn Warehouse,
    dialect: Dialect,
) -> Result<usize, TempoError> {
    println!(
        "🔄 Running transforms ({} operations)...",
        TransformOp::EXECUTION_ORDER.len()
    );

    let mut executed = 0;
    for op in TransformOp::EXECUTION_ORDER {
        let start = Instant::now();
        let statement = op.statement(dialect);

        execute_query(warehouse, &statement)
            .await
            .map_err(|e| DomainError::Transform {
                operation: op.name().to_string(),
                detail: e.to_string(),
            })?;

        println!("    ✅ {} ({:.2?})", op.name(), start.elapsed());
        executed += 1;
    }

    Ok(executed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::testing::MockWarehouse;

    #[tokio::test]
    async fn all_five_run_with_the_fact_table_last() {
        let warehouse = MockWarehouse::new();
        let executed = run_transforms(&warehouse, Dialect::Redshift).await.unwrap();
        assert_eq!(executed, 5);

        let statements = warehouse.statements();
        assert_eq!(statements.len(), 5);
        assert!(statements[0].starts_with("INSERT INTO songs"));
        assert!(statements[4].starts_with("INSERT INTO songplays"));
    }

    #[tokio::test]
    async fn a_failed_operation_aborts_and_is_named() {
        let warehouse = MockWarehouse::failing_on("INSERT INTO time");
        let err = run_transforms(&warehouse, Dialect::Redshift)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("populate_time"));
        // songs, artists, users ran; songplays never did.
        assert_eq!(warehouse.statements().len(), 3);
    }
}
