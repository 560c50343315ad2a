// tempo-core/src/domain/schema/mod.rs
//
// Typed schema catalog: the seven warehouse tables as ordered column lists
// with declared keys, rendered to DDL per target dialect.

pub mod catalog;

pub use catalog::TableId;

/// SQL dialect the catalog renders for.
///
/// The production warehouse treats primary/foreign keys and the physical
/// placement hints (sort/dist keys) as informational metadata: they are part
/// of the schema contract but never enforced. The local engine would enforce
/// them, so its rendering omits them and keeps only NOT NULL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Redshift,
    DuckDb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Varchar,
    VarcharN(u16),
    SmallInt,
    Integer,
    BigInt,
    Numeric,
    Timestamp,
}

impl SqlType {
    fn render(self) -> String {
        match self {
            SqlType::Varchar => "VARCHAR".to_string(),
            SqlType::VarcharN(n) => format!("VARCHAR({})", n),
            SqlType::SmallInt => "SMALLINT".to_string(),
            SqlType::Integer => "INTEGER".to_string(),
            SqlType::BigInt => "BIGINT".to_string(),
            SqlType::Numeric => "NUMERIC".to_string(),
            SqlType::Timestamp => "TIMESTAMP".to_string(),
        }
    }
}

/// One column of the schema contract: name, semantic type, declared
/// constraints. Constructed with the const builder methods below so the
/// catalog definitions stay readable.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub not_null: bool,
    pub primary_key: bool,
    pub sort_key: bool,
    pub dist_key: bool,
    pub identity: bool,
    pub references: Option<(TableId, &'static str)>,
}

impl Column {
    pub const fn new(name: &'static str, sql_type: SqlType) -> Self {
        Self {
            name,
            sql_type,
            not_null: false,
            primary_key: false,
            sort_key: false,
            dist_key: false,
            identity: false,
            references: None,
        }
    }

    pub const fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub const fn sort_key(mut self) -> Self {
        self.sort_key = true;
        self
    }

    pub const fn dist_key(mut self) -> Self {
        self.dist_key = true;
        self
    }

    /// Auto-incrementing synthetic key. Renders as IDENTITY(0,1) on the
    /// warehouse and as a sequence-backed DEFAULT on the local engine.
    pub const fn identity(mut self) -> Self {
        self.identity = true;
        self
    }

    pub const fn references(mut self, table: TableId, column: &'static str) -> Self {
        self.references = Some((table, column));
        self
    }

    fn render(&self, table: &TableDef, dialect: Dialect) -> String {
        let mut rendered = format!("{} {}", self.name, self.sql_type.render());

        match dialect {
            Dialect::Redshift => {
                if self.identity {
                    rendered.push_str(" IDENTITY(0,1)");
                }
                if self.primary_key {
                    rendered.push_str(" PRIMARY KEY");
                }
                if self.not_null {
                    rendered.push_str(" NOT NULL");
                }
                if self.sort_key {
                    rendered.push_str(" SORTKEY");
                }
                if self.dist_key {
                    rendered.push_str(" DISTKEY");
                }
                if let Some((table_ref, column)) = self.references {
                    rendered.push_str(&format!(
                        " REFERENCES {}({})",
                        table_ref.table_name(),
                        column
                    ));
                }
            }
            Dialect::DuckDb => {
                if self.identity {
                    rendered.push_str(&format!(
                        " DEFAULT nextval('{}')",
                        table.sequence_name(self.name)
                    ));
                }
                if self.not_null {
                    rendered.push_str(" NOT NULL");
                }
            }
        }

        rendered
    }
}

/// A table of the schema contract: name plus the ordered column list.
#[derive(Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [Column],
}

impl TableDef {
    /// Idempotent DDL creating this table (CREATE TABLE IF NOT EXISTS).
    ///
    /// Returns a statement list: identity columns on the local engine need a
    /// backing sequence created first.
    pub fn create_statements(&self, dialect: Dialect) -> Vec<String> {
        let mut statements = Vec::new();

        if dialect == Dialect::DuckDb {
            for column in self.columns.iter().filter(|c| c.identity) {
                statements.push(format!(
                    "CREATE SEQUENCE IF NOT EXISTS {}",
                    self.sequence_name(column.name)
                ));
            }
        }

        let body = self
            .columns
            .iter()
            .map(|c| format!("    {}", c.render(self, dialect)))
            .collect::<Vec<_>>()
            .join(",\n");

        statements.push(format!(
            "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
            self.name, body
        ));

        statements
    }

    /// Idempotent DDL dropping this table (DROP TABLE IF EXISTS).
    pub fn drop_statements(&self, dialect: Dialect) -> Vec<String> {
        let mut statements = vec![format!("DROP TABLE IF EXISTS {}", self.name)];

        if dialect == Dialect::DuckDb {
            for column in self.columns.iter().filter(|c| c.identity) {
                statements.push(format!(
                    "DROP SEQUENCE IF EXISTS {}",
                    self.sequence_name(column.name)
                ));
            }
        }

        statements
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// Columns an INSERT must name: everything except identity columns,
    /// whose values the warehouse assigns.
    pub fn insert_columns(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|c| !c.identity)
            .map(|c| c.name)
            .collect()
    }

    fn sequence_name(&self, column: &str) -> String {
        format!("{}_{}_seq", self.name, column)
    }
}
