// tempo-core/src/domain/transform/statements.rs
//
// INSERT..SELECT builders for the five transform operations. Target column
// lists come from the schema catalog, never from hand-typed strings; the
// only dialect-specific piece is the epoch-millis-to-timestamp expression.

use crate::domain::schema::{Dialect, TableId};

/// Converts an epoch-milliseconds expression to an absolute timestamp:
/// `epoch + millis/1000` seconds, truncating to whole seconds.
fn epoch_to_timestamp(dialect: Dialect, millis_expr: &str) -> String {
    match dialect {
        Dialect::Redshift => format!(
            "TIMESTAMP 'epoch' + {}/1000 * INTERVAL '1 second'",
            millis_expr
        ),
        // make_timestamp takes microseconds; `//` keeps the integer division.
        Dialect::DuckDb => format!("make_timestamp({} // 1000 * 1000000)", millis_expr),
    }
}

fn insert_into(table: TableId, columns: &[&str], select_body: &str) -> String {
    format!(
        "INSERT INTO {} ({})\n{}",
        table.table_name(),
        columns.join(", "),
        select_body
    )
}

/// Project every staged song straight into the songs dimension. No filter,
/// no dedup; rows with NULL song_id are inserted as-is.
pub fn insert_songs() -> String {
    let columns = TableId::Songs.def().insert_columns();
    let body = format!(
        "SELECT\n    {}\nFROM staging_songs",
        columns.join(",\n    ")
    );
    insert_into(TableId::Songs, &columns, &body)
}

/// Project artist fields from every staged song. The staged location is
/// deliberately dropped; duplicate artist_id values are inserted as-is.
pub fn insert_artists() -> String {
    let columns: Vec<&str> = TableId::Artists
        .def()
        .insert_columns()
        .into_iter()
        .filter(|c| *c != "location")
        .collect();
    let body = "SELECT\n    artist_id,\n    artist_name,\n    artist_latitude,\n    artist_longitude\nFROM staging_songs";
    insert_into(TableId::Artists, &columns, body)
}

/// One row per user_id: the state carried by that user's most recent event.
///
/// Ties on the maximum `ts` are broken deterministically by keeping the
/// lexicographically greatest (first_name, last_name, gender, level) tuple.
/// The DESC output order has no semantic effect on the target; it makes the
/// batch insert order reproducible.
pub fn insert_users() -> String {
    let columns = TableId::Users.def().insert_columns();
    let body = format!(
        "SELECT {cols}\n\
         FROM (\n\
         \x20   SELECT\n\
         \x20       {indented},\n\
         \x20       row_number() OVER (\n\
         \x20           PARTITION BY user_id\n\
         \x20           ORDER BY ts DESC, first_name DESC NULLS LAST, last_name DESC NULLS LAST, gender DESC NULLS LAST, level DESC NULLS LAST\n\
         \x20       ) AS recency_rank\n\
         \x20   FROM staging_events\n\
         \x20   WHERE user_id IS NOT NULL\n\
         ) AS ranked\n\
         WHERE recency_rank = 1\n\
         ORDER BY user_id DESC",
        cols = columns.join(", "),
        indented = columns.join(",\n        ")
    );
    insert_into(TableId::Users, &columns, &body)
}

/// One row per distinct play timestamp, decomposed into calendar parts.
/// Only `page = 'NextSong'` events contribute. `weekday` extracts the
/// day-of-week index (0 = Sunday).
pub fn insert_time(dialect: Dialect) -> String {
    let columns = TableId::Time.def().insert_columns();
    let body = format!(
        "SELECT DISTINCT\n\
         \x20   {start_time} AS start_time,\n\
         \x20   EXTRACT(hour FROM start_time) AS hour,\n\
         \x20   EXTRACT(day FROM start_time) AS day,\n\
         \x20   EXTRACT(week FROM start_time) AS week,\n\
         \x20   EXTRACT(month FROM start_time) AS month,\n\
         \x20   EXTRACT(year FROM start_time) AS year,\n\
         \x20   EXTRACT(dow FROM start_time) AS weekday\n\
         FROM staging_events\n\
         WHERE page = 'NextSong'",
        start_time = epoch_to_timestamp(dialect, "ts")
    );
    insert_into(TableId::Time, &columns, &body)
}

/// One fact row per qualifying play event. The LEFT JOIN keeps events whose
/// artist matches no staged song; those rows carry NULL song_id/artist_id.
pub fn insert_songplays(dialect: Dialect) -> String {
    let columns = TableId::Songplays.def().insert_columns();
    let body = format!(
        "SELECT\n\
         \x20   {start_time} AS start_time,\n\
         \x20   se.user_id,\n\
         \x20   se.level,\n\
         \x20   ss.song_id,\n\
         \x20   ss.artist_id,\n\
         \x20   se.session_id,\n\
         \x20   se.location,\n\
         \x20   se.user_agent\n\
         FROM staging_events AS se\n\
         LEFT JOIN staging_songs AS ss\n\
         \x20   ON se.artist = ss.artist_name\n\
         WHERE se.page = 'NextSong'",
        start_time = epoch_to_timestamp(dialect, "se.ts")
    );
    insert_into(TableId::Songplays, &columns, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transform::TransformOp;
    use sqlparser::dialect::{DuckDbDialect, RedshiftSqlDialect};
    use sqlparser::parser::Parser;

    #[test]
    fn every_statement_parses_in_both_dialects() {
        for op in TransformOp::EXECUTION_ORDER {
            let redshift = op.statement(Dialect::Redshift);
            Parser::parse_sql(&RedshiftSqlDialect {}, &redshift)
                .unwrap_or_else(|e| panic!("{} (redshift): {}\n{}", op.name(), e, redshift));

            let duckdb = op.statement(Dialect::DuckDb);
            Parser::parse_sql(&DuckDbDialect {}, &duckdb)
                .unwrap_or_else(|e| panic!("{} (duckdb): {}\n{}", op.name(), e, duckdb));
        }
    }

    #[test]
    fn songs_projects_every_catalog_column() {
        assert_eq!(
            insert_songs(),
            "INSERT INTO songs (song_id, title, artist_id, year, duration)\n\
             SELECT\n\
             \x20   song_id,\n\
             \x20   title,\n\
             \x20   artist_id,\n\
             \x20   year,\n\
             \x20   duration\n\
             FROM staging_songs"
        );
    }

    #[test]
    fn artists_skip_location() {
        let statement = insert_artists();
        assert!(statement.starts_with("INSERT INTO artists (artist_id, name, latitude, longitude)"));
        assert!(!statement.contains("artist_location"));
    }

    #[test]
    fn users_filter_nulls_and_keep_latest() {
        let statement = insert_users();
        assert!(statement.contains("WHERE user_id IS NOT NULL"));
        assert!(statement.contains("PARTITION BY user_id"));
        assert!(statement.contains("ORDER BY ts DESC"));
        assert!(statement.contains("WHERE recency_rank = 1"));
        assert!(statement.ends_with("ORDER BY user_id DESC"));
    }

    #[test]
    fn time_restricts_to_next_song_and_dedups() {
        let statement = insert_time(Dialect::Redshift);
        assert!(statement.contains("SELECT DISTINCT"));
        assert!(statement.contains("WHERE page = 'NextSong'"));
        assert!(statement.contains("TIMESTAMP 'epoch' + ts/1000 * INTERVAL '1 second'"));
        // weekday is a day-of-week extraction, distinct from the week column
        assert!(statement.contains("EXTRACT(dow FROM start_time) AS weekday"));
        assert!(statement.contains("EXTRACT(week FROM start_time) AS week"));
    }

    #[test]
    fn songplays_keep_unmatched_events() {
        for dialect in [Dialect::Redshift, Dialect::DuckDb] {
            let statement = insert_songplays(dialect);
            assert!(statement.contains("LEFT JOIN staging_songs"));
            assert!(statement.contains("ON se.artist = ss.artist_name"));
            assert!(statement.contains("WHERE se.page = 'NextSong'"));
        }
    }

    #[test]
    fn local_dialect_truncates_to_whole_seconds() {
        assert_eq!(
            epoch_to_timestamp(Dialect::DuckDb, "ts"),
            "make_timestamp(ts // 1000 * 1000000)"
        );
    }
}
