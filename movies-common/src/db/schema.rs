//! Table schema definitions
//!
//! Single source of truth for the store layout. The loader builds its DDL
//! from these definitions, and tests introspect the live store against
//! them.

use crate::Result;
use sqlx::{Row, SqlitePool};

/// Column definition with SQL constraints
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,
    /// SQL type (e.g., "TEXT", "INTEGER", "REAL")
    pub sql_type: String,
    /// NOT NULL constraint
    pub not_null: bool,
}

impl ColumnDefinition {
    /// Create new column definition
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            not_null: false,
        }
    }

    /// Mark column as NOT NULL
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    fn to_sql(&self) -> String {
        if self.not_null {
            format!("{} {} NOT NULL", self.name, self.sql_type)
        } else {
            format!("{} {}", self.name, self.sql_type)
        }
    }
}

/// Named secondary index over one column
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDefinition {
    pub name: &'static str,
    pub column: &'static str,
}

impl IndexDefinition {
    /// `CREATE INDEX IF NOT EXISTS` statement (idempotent)
    pub fn create_sql(&self, table: &str) -> String {
        format!(
            "CREATE INDEX IF NOT EXISTS {} ON {}({})",
            self.name, table, self.column
        )
    }
}

/// Defines expected schema for a store table
pub trait TableSchema {
    /// Table name in database
    fn table_name() -> &'static str;

    /// Column definitions (order matters for table creation and inserts)
    fn columns() -> Vec<ColumnDefinition>;

    /// Secondary indexes created after the data load
    fn indexes() -> Vec<IndexDefinition> {
        Vec::new()
    }

    /// `CREATE TABLE` statement
    fn create_table_sql() -> String {
        let columns: Vec<String> = Self::columns().iter().map(ColumnDefinition::to_sql).collect();
        format!("CREATE TABLE {} ({})", Self::table_name(), columns.join(", "))
    }

    /// `DROP TABLE IF EXISTS` statement
    fn drop_table_sql() -> String {
        format!("DROP TABLE IF EXISTS {}", Self::table_name())
    }

    /// Positional `INSERT` statement covering every column
    fn insert_sql() -> String {
        let columns = Self::columns();
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        let placeholders = vec!["?"; names.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            Self::table_name(),
            names.join(", "),
            placeholders
        )
    }
}

/// The `movies` table: one row per clean record
pub struct MoviesTable;

impl TableSchema for MoviesTable {
    fn table_name() -> &'static str {
        "movies"
    }

    fn columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("title", "TEXT").not_null(),
            ColumnDefinition::new("main_genre", "TEXT"),
            ColumnDefinition::new("budget", "REAL"),
            ColumnDefinition::new("revenue", "REAL"),
            ColumnDefinition::new("roi", "REAL"),
            ColumnDefinition::new("vote_average", "REAL"),
            ColumnDefinition::new("vote_count", "INTEGER"),
            ColumnDefinition::new("popularity", "REAL"),
            ColumnDefinition::new("runtime", "REAL"),
            // ISO-8601 date text
            ColumnDefinition::new("release_date", "TEXT"),
            ColumnDefinition::new("year", "INTEGER"),
        ]
    }

    fn indexes() -> Vec<IndexDefinition> {
        vec![
            IndexDefinition {
                name: "idx_genre",
                column: "main_genre",
            },
            IndexDefinition {
                name: "idx_year",
                column: "year",
            },
        ]
    }
}

/// Column names of a live table via PRAGMA table_info, in table order
pub async fn table_columns(pool: &SqlitePool, table_name: &str) -> Result<Vec<String>> {
    let rows = sqlx::query(&format!("PRAGMA table_info({})", table_name))
        .fetch_all(pool)
        .await?;

    // PRAGMA table_info returns: (cid, name, type, notnull, dflt_value, pk)
    Ok(rows.iter().map(|row| row.get::<String, _>("name")).collect())
}

/// Names of the explicit indexes on a live table, sorted
pub async fn index_names(pool: &SqlitePool, table_name: &str) -> Result<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(
        r#"
        SELECT name
        FROM sqlite_master
        WHERE type = 'index'
          AND tbl_name = ?
          AND name NOT LIKE 'sqlite_%'
        ORDER BY name ASC
        "#,
    )
    .bind(table_name)
    .fetch_all(pool)
    .await?;

    Ok(names)
}

/// Check if table exists
pub async fn table_exists(pool: &SqlitePool, table_name: &str) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM sqlite_master
            WHERE type = 'table' AND name = ?
        )
        "#,
    )
    .bind(table_name)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}
