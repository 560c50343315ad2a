// tempo-core/src/domain/transform/mod.rs
//
// The transform engine: five set-based operations, each "select from
// staging, insert into target". `statements` renders the warehouse SQL,
// `apply` is the row-level reference implementation pinning the semantics.

pub mod apply;
pub mod rows;
pub mod statements;

use crate::domain::schema::{Dialect, TableId};

/// One of the five staging-to-target transformations.
///
/// Every operation is idempotent-UNSAFE: there is no conflict or merge key,
/// so re-running an operation duplicates its output rows. Callers run each
/// at most once per pipeline cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformOp {
    Songs,
    Artists,
    Users,
    Time,
    Songplays,
}

impl TransformOp {
    /// Foreign-key dependency order: every dimension before the fact table.
    /// Operations other than `Songplays` have no ordering constraint among
    /// themselves.
    pub const EXECUTION_ORDER: [TransformOp; 5] = [
        TransformOp::Songs,
        TransformOp::Artists,
        TransformOp::Users,
        TransformOp::Time,
        TransformOp::Songplays,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TransformOp::Songs => "populate_songs",
            TransformOp::Artists => "populate_artists",
            TransformOp::Users => "populate_users",
            TransformOp::Time => "populate_time",
            TransformOp::Songplays => "populate_songplays",
        }
    }

    pub fn target(self) -> TableId {
        match self {
            TransformOp::Songs => TableId::Songs,
            TransformOp::Artists => TableId::Artists,
            TransformOp::Users => TableId::Users,
            TransformOp::Time => TableId::Time,
            TransformOp::Songplays => TableId::Songplays,
        }
    }

    /// The INSERT..SELECT statement implementing this operation.
    pub fn statement(self, dialect: Dialect) -> String {
        match self {
            TransformOp::Songs => statements::insert_songs(),
            TransformOp::Artists => statements::insert_artists(),
            TransformOp::Users => statements::insert_users(),
            TransformOp::Time => statements::insert_time(dialect),
            TransformOp::Songplays => statements::insert_songplays(dialect),
        }
    }
}
