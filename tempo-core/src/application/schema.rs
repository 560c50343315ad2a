// tempo-core/src/application/schema.rs

use crate::domain::error::DomainError;
use crate::domain::schema::{Dialect, TableId};
use crate::error::TempoError;
use crate::ports::warehouse::Warehouse;

pub struct SchemaManager;

impl SchemaManager {
    /// Creates all seven tables in dependency order. Safe to re-run: every
    /// statement is CREATE TABLE IF NOT EXISTS.
    pub async fn create_all(
        warehouse: &dyn Warehouse,
        dialect: Dialect,
    ) -> Result<(), TempoError> {
        for table in TableId::CREATE_ORDER {
            Self::apply(warehouse, table, table.def().create_statements(dialect)).await?;
        }
        Ok(())
    }

    /// Drops all seven tables, fact table before its dimensions. Safe to
    /// re-run: every statement is DROP ... IF EXISTS.
    pub async fn drop_all(warehouse: &dyn Warehouse, dialect: Dialect) -> Result<(), TempoError> {
        for table in TableId::DROP_ORDER {
            Self::apply(warehouse, table, table.def().drop_statements(dialect)).await?;
        }
        Ok(())
    }

    async fn apply(
        warehouse: &dyn Warehouse,
        table: TableId,
        statements: Vec<String>,
    ) -> Result<(), TempoError> {
        for statement in statements {
            warehouse
                .execute(&statement)
                .await
                .map_err(|e| DomainError::Schema {
                    table: table.table_name().to_string(),
                    detail: e.to_string(),
                })?;
        }
        Ok(())
    }
}
