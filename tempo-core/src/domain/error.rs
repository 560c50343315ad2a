// tempo-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Schema statement rejected for table '{table}': {detail}")]
    #[diagnostic(
        code(tempo::domain::schema),
        help("Check warehouse permissions and the rendered DDL.")
    )]
    Schema { table: String, detail: String },

    #[error("Bulk load failed for staging table '{table}': {detail}")]
    #[diagnostic(
        code(tempo::domain::load),
        help("Check the source URI, the credential reference and the record format.")
    )]
    Load { table: String, detail: String },

    #[error("Transform '{operation}' failed: {detail}")]
    #[diagnostic(
        code(tempo::domain::transform),
        help("Dimension tables must be populated before the fact table.")
    )]
    Transform { operation: String, detail: String },
}
