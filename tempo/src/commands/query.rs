// tempo/src/commands/query.rs
//
// USE CASE: Execute a raw SQL query (ad-hoc).

use tempo_core::application::execute_query;
use tempo_core::infrastructure::adapters::duckdb::DuckDbWarehouse;

pub async fn execute(query: String, db_path: String) -> anyhow::Result<()> {
    let warehouse = DuckDbWarehouse::new(&db_path)?;
    if let Err(e) = execute_query(&warehouse, &query).await {
        eprintln!("❌ Query failed: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
