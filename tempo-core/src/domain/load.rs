// tempo-core/src/domain/load.rs
//
// Staging load descriptors: which landing table, which object-storage
// source, which credential, which record format. The warehouse port
// consumes these; the Redshift renderer below produces the COPY statement
// the production engine runs.

use crate::domain::schema::TableId;

/// The two staging landing zones a bulk load may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagingTable {
    Events,
    Songs,
}

impl StagingTable {
    pub fn table_id(self) -> TableId {
        match self {
            StagingTable::Events => TableId::StagingEvents,
            StagingTable::Songs => TableId::StagingSongs,
        }
    }

    pub fn table_name(self) -> &'static str {
        self.table_id().table_name()
    }
}

/// Credential reference handed to the warehouse for object-storage access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    IamRole(String),
}

/// Payload format of the staged JSON records.
///
/// Events carry a path-mapping spec translating nested source fields to
/// staging columns; songs rely on auto-detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFormat {
    JsonAuto,
    JsonPaths(String),
}

/// A complete bulk-load request: copies the entirety of the source into the
/// staging table. The table must have been freshly recreated beforehand;
/// the operation is not transactional with other loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSpec {
    pub table: StagingTable,
    pub source_uri: String,
    pub credential: Credential,
    pub format: LoadFormat,
}

impl LoadSpec {
    /// Renders the warehouse COPY statement for this load.
    ///
    /// All embedded values come from operator configuration, but they are
    /// still escaped as SQL string literals rather than spliced raw.
    pub fn copy_statement(&self) -> String {
        let Credential::IamRole(arn) = &self.credential;
        let format = match &self.format {
            LoadFormat::JsonAuto => "JSON 'auto'".to_string(),
            LoadFormat::JsonPaths(paths_uri) => format!("JSON {}", quote_literal(paths_uri)),
        };

        format!(
            "COPY {} FROM {}\nCREDENTIALS {}\n{}",
            self.table.table_name(),
            quote_literal(&self.source_uri),
            quote_literal(&format!("aws_iam_role={}", arn)),
            format
        )
    }
}

/// Escapes a value as a single-quoted SQL string literal.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events_spec() -> LoadSpec {
        LoadSpec {
            table: StagingTable::Events,
            source_uri: "s3://udacity-dend/log_data".to_string(),
            credential: Credential::IamRole("arn:aws:iam::123456789012:role/dwh".to_string()),
            format: LoadFormat::JsonPaths("s3://udacity-dend/log_json_path.json".to_string()),
        }
    }

    #[test]
    fn copy_with_path_spec() {
        assert_eq!(
            events_spec().copy_statement(),
            "COPY staging_events FROM 's3://udacity-dend/log_data'\n\
             CREDENTIALS 'aws_iam_role=arn:aws:iam::123456789012:role/dwh'\n\
             JSON 's3://udacity-dend/log_json_path.json'"
        );
    }

    #[test]
    fn copy_with_auto_detection() {
        let spec = LoadSpec {
            table: StagingTable::Songs,
            source_uri: "s3://udacity-dend/song_data".to_string(),
            credential: Credential::IamRole("arn:aws:iam::123456789012:role/dwh".to_string()),
            format: LoadFormat::JsonAuto,
        };
        let statement = spec.copy_statement();
        assert!(statement.starts_with("COPY staging_songs FROM 's3://udacity-dend/song_data'"));
        assert!(statement.ends_with("JSON 'auto'"));
    }

    #[test]
    fn literals_are_escaped() {
        let mut spec = events_spec();
        spec.source_uri = "s3://bucket/it's-data".to_string();
        assert!(spec.copy_statement().contains("'s3://bucket/it''s-data'"));
    }
}
