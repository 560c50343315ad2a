// tempo-core/src/ports/warehouse.rs
//
// This file defines what the pipeline needs from a warehouse, without
// knowing how it's done. The application layer only ever talks to this
// trait; whether statements land on a local engine or a remote cluster is
// an adapter concern.

use crate::domain::load::LoadSpec;
use crate::error::TempoError;
use async_trait::async_trait;

#[async_trait]
pub trait Warehouse: Send + Sync {
    /// Issues one DDL or DML statement.
    async fn execute(&self, statement: &str) -> Result<(), TempoError>;

    /// Copies the entirety of an object-storage source into a staging
    /// table, returning the number of rows loaded. Not transactional with
    /// other loads.
    async fn bulk_load(&self, spec: &LoadSpec) -> Result<u64, TempoError>;

    /// Runs a query expected to return a single numeric value (row counts,
    /// sanity probes).
    async fn query_scalar(&self, query: &str) -> Result<u64, TempoError>;

    fn engine_name(&self) -> &str;
}
