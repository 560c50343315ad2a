// tempo-core/src/infrastructure/adapters/duckdb.rs
//
// Local warehouse adapter over an embedded DuckDB connection. Stands in for
// the production cluster: same statements, same staging/dimensional tables,
// loads taken from any source read_json_auto can reach.

use async_trait::async_trait;
use duckdb::{Config, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::load::{LoadSpec, quote_literal};
use crate::error::TempoError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::warehouse::Warehouse;

pub struct DuckDbWarehouse {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDbWarehouse {
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();
        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, TempoError> {
        self.conn.lock().map_err(|_| {
            TempoError::Infrastructure(InfrastructureError::Io(std::io::Error::other(
                "DuckDB Mutex Poisoned",
            )))
        })
    }

    fn database_error(e: duckdb::Error) -> TempoError {
        TempoError::Infrastructure(InfrastructureError::from(e))
    }
}

#[async_trait]
impl Warehouse for DuckDbWarehouse {
    async fn execute(&self, statement: &str) -> Result<(), TempoError> {
        let conn = self.conn()?;
        conn.execute(statement, [])
            .map(|_rows| ())
            .map_err(Self::database_error)
    }

    async fn bulk_load(&self, spec: &LoadSpec) -> Result<u64, TempoError> {
        // The local engine maps source fields to staging columns by name;
        // a positional path-mapping spec only matters to the production
        // COPY path, so JsonAuto and JsonPaths both land on read_json_auto.
        let statement = format!(
            "INSERT INTO {} BY NAME SELECT * FROM read_json_auto({})",
            spec.table.table_name(),
            quote_literal(&spec.source_uri)
        );

        let conn = self.conn()?;
        let rows = conn
            .execute(&statement, [])
            .map_err(Self::database_error)?;
        Ok(rows as u64)
    }

    async fn query_scalar(&self, query: &str) -> Result<u64, TempoError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(query).map_err(Self::database_error)?;
        let mut rows = stmt.query([]).map_err(Self::database_error)?;

        let row = rows
            .next()
            .map_err(Self::database_error)?
            .ok_or_else(|| TempoError::InternalError("No scalar value returned".into()))?;

        let value: u64 = row.get(0).map_err(Self::database_error)?;
        Ok(value)
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::load::{Credential, LoadFormat, StagingTable};
    use crate::domain::schema::{Dialect, TableId};
    use crate::domain::transform::TransformOp;
    use anyhow::Result;
    use std::io::Write;

    async fn create_all(warehouse: &DuckDbWarehouse) -> Result<()> {
        for table in TableId::CREATE_ORDER {
            for statement in table.def().create_statements(Dialect::DuckDb) {
                warehouse.execute(&statement).await?;
            }
        }
        Ok(())
    }

    async fn stage_fixture(warehouse: &DuckDbWarehouse) -> Result<()> {
        warehouse
            .execute(
                "INSERT INTO staging_events (artist, page, level, session_id, location, user_agent, ts, user_id) \
                 VALUES ('Abba', 'NextSong', 'free', 1, 'NY', 'UA', 1000, 7)",
            )
            .await?;
        warehouse
            .execute(
                "INSERT INTO staging_events (artist, page, level, session_id, location, user_agent, ts, user_id) \
                 VALUES ('Abba', 'Home', 'paid', 2, 'NY', 'UA', 2000, 7)",
            )
            .await?;
        warehouse
            .execute(
                "INSERT INTO staging_songs (artist_id, artist_name, duration, num_songs, song_id, title, year) \
                 VALUES ('A1', 'Abba', 180.5, 1, 'S1', 'T', 2000)",
            )
            .await?;
        Ok(())
    }

    async fn run_transforms(warehouse: &DuckDbWarehouse) -> Result<()> {
        for op in TransformOp::EXECUTION_ORDER {
            warehouse.execute(&op.statement(Dialect::DuckDb)).await?;
        }
        Ok(())
    }

    #[tokio::test]
    async fn full_local_flow() -> Result<()> {
        let warehouse = DuckDbWarehouse::new(":memory:")?;
        create_all(&warehouse).await?;
        stage_fixture(&warehouse).await?;
        run_transforms(&warehouse).await?;

        // One play event, one matching song: exactly one fact row, linked.
        assert_eq!(warehouse.query_scalar("SELECT count(*) FROM songplays").await?, 1);
        assert_eq!(
            warehouse
                .query_scalar("SELECT count(*) FROM songplays WHERE song_id = 'S1' AND artist_id = 'A1' AND user_id = 7")
                .await?,
            1
        );

        // The 'Home' event reached the user dimension (max ts wins) but not
        // the time dimension.
        assert_eq!(warehouse.query_scalar("SELECT count(*) FROM users").await?, 1);
        assert_eq!(
            warehouse
                .query_scalar("SELECT count(*) FROM users WHERE user_id = 7 AND level = 'paid'")
                .await?,
            1
        );
        assert_eq!(warehouse.query_scalar("SELECT count(*) FROM time").await?, 1);
        assert_eq!(
            warehouse
                .query_scalar("SELECT count(*) FROM time WHERE start_time = TIMESTAMP '1970-01-01 00:00:01'")
                .await?,
            1
        );

        assert_eq!(warehouse.query_scalar("SELECT count(*) FROM songs").await?, 1);
        assert_eq!(warehouse.query_scalar("SELECT count(*) FROM artists").await?, 1);
        assert_eq!(
            warehouse
                .query_scalar("SELECT count(*) FROM artists WHERE location IS NULL")
                .await?,
            1
        );
        Ok(())
    }

    #[tokio::test]
    async fn unmatched_artist_keeps_the_play_with_null_linkage() -> Result<()> {
        let warehouse = DuckDbWarehouse::new(":memory:")?;
        create_all(&warehouse).await?;
        warehouse
            .execute(
                "INSERT INTO staging_events (artist, page, level, session_id, ts, user_id) \
                 VALUES ('Abba', 'NextSong', 'free', 1, 1000, 7)",
            )
            .await?;
        // No staged song by that artist.
        run_transforms(&warehouse).await?;

        assert_eq!(warehouse.query_scalar("SELECT count(*) FROM songplays").await?, 1);
        assert_eq!(
            warehouse
                .query_scalar(
                    "SELECT count(*) FROM songplays WHERE song_id IS NULL AND artist_id IS NULL"
                )
                .await?,
            1
        );
        Ok(())
    }

    #[tokio::test]
    async fn rerunning_a_transform_duplicates_rows() -> Result<()> {
        // There is no merge key: re-running an operation within one staging
        // cycle appends a second copy. Expected, not a bug.
        let warehouse = DuckDbWarehouse::new(":memory:")?;
        create_all(&warehouse).await?;
        stage_fixture(&warehouse).await?;

        let populate_time = TransformOp::Time.statement(Dialect::DuckDb);
        warehouse.execute(&populate_time).await?;
        warehouse.execute(&populate_time).await?;

        assert_eq!(warehouse.query_scalar("SELECT count(*) FROM time").await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn bulk_load_reads_json_into_staging() -> Result<()> {
        let warehouse = DuckDbWarehouse::new(":memory:")?;
        create_all(&warehouse).await?;

        let mut source = tempfile::NamedTempFile::new()?;
        writeln!(
            source,
            r#"{{"artist_id":"A1","artist_name":"Abba","duration":180.5,"num_songs":1,"song_id":"S1","title":"T","year":2000}}"#
        )?;
        writeln!(
            source,
            r#"{{"artist_id":"A2","artist_name":"Queen","duration":200.0,"num_songs":1,"song_id":"S2","title":"U","year":1981}}"#
        )?;
        source.flush()?;

        let spec = LoadSpec {
            table: StagingTable::Songs,
            source_uri: source.path().to_string_lossy().to_string(),
            credential: Credential::IamRole("arn:aws:iam::000000000000:role/none".to_string()),
            format: LoadFormat::JsonAuto,
        };

        let rows = warehouse.bulk_load(&spec).await?;
        assert_eq!(rows, 2);
        assert_eq!(
            warehouse.query_scalar("SELECT count(*) FROM staging_songs").await?,
            2
        );
        Ok(())
    }

    #[tokio::test]
    async fn invalid_statement_surfaces_engine_error() -> Result<()> {
        let warehouse = DuckDbWarehouse::new(":memory:")?;
        let result = warehouse.execute("SELECT * FROM non_existent_table").await;
        assert!(result.is_err());
        Ok(())
    }
}
