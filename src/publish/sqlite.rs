//! SQLite publisher.

use std::path::Path;

use rusqlite::{Connection, params};

use crate::error::{EngineError, EngineResult};
use crate::models::BenefitRow;

use super::{COLUMN_TYPES, COLUMNS, TablePublisher, quote_identifier, text_cells};

/// Publishes into an SQLite database.
///
/// The drop, create and inserts run in one transaction, so a failed publish
/// leaves the previous table untouched.
pub struct SqlitePublisher {
    conn: Connection,
}

impl SqlitePublisher {
    /// Opens (or creates) the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| EngineError::PublishError {
            table: String::new(),
            message: format!("cannot open {}: {}", path.display(), e),
        })?;
        Ok(Self { conn })
    }

    /// Opens a private in-memory database.
    pub fn in_memory() -> EngineResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| EngineError::PublishError {
            table: String::new(),
            message: e.to_string(),
        })?;
        Ok(Self { conn })
    }

    /// The underlying connection, for readers of the published table.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Counts the rows currently in `table`.
    pub fn row_count(&self, table: &str) -> EngineResult<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(table));
        let count: i64 = self
            .conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| to_publish_error(table, e))?;
        Ok(count as usize)
    }
}

impl TablePublisher for SqlitePublisher {
    fn publish(&mut self, table: &str, rows: &[BenefitRow]) -> EngineResult<usize> {
        let quoted = quote_identifier(table);
        let columns: Vec<String> = COLUMNS.iter().map(|c| quote_identifier(c)).collect();
        let definitions: Vec<String> = columns
            .iter()
            .zip(COLUMN_TYPES)
            .map(|(name, sql_type)| format!("{} {}", name, sql_type))
            .collect();
        let placeholders: Vec<String> = (1..=COLUMNS.len()).map(|i| format!("?{}", i)).collect();

        let create_sql = format!(
            "DROP TABLE IF EXISTS {table};\nCREATE TABLE {table} ({defs});",
            table = quoted,
            defs = definitions.join(", ")
        );
        let insert_sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quoted,
            columns.join(", "),
            placeholders.join(", ")
        );

        let tx = self
            .conn
            .transaction()
            .map_err(|e| to_publish_error(table, e))?;
        tx.execute_batch(&create_sql)
            .map_err(|e| to_publish_error(table, e))?;
        {
            let mut stmt = tx
                .prepare(&insert_sql)
                .map_err(|e| to_publish_error(table, e))?;
            for row in rows {
                let worker_id = i64::try_from(row.worker_id).map_err(|_| EngineError::PublishError {
                    table: table.to_string(),
                    message: format!("worker id {} does not fit an INTEGER column", row.worker_id),
                })?;
                let [
                    _,
                    union,
                    competency,
                    _,
                    rate,
                    total,
                    employer,
                    employee,
                    state,
                    admission,
                    termination,
                    title,
                ] = text_cells(row);
                stmt.execute(params![
                    worker_id,
                    union,
                    competency,
                    row.payable_days,
                    rate,
                    total,
                    employer,
                    employee,
                    state,
                    admission,
                    termination,
                    title,
                ])
                .map_err(|e| to_publish_error(table, e))?;
            }
        }
        tx.commit().map_err(|e| to_publish_error(table, e))?;

        tracing::info!(table = %table, rows = rows.len(), "Published table to SQLite");
        Ok(rows.len())
    }
}

fn to_publish_error(table: &str, err: rusqlite::Error) -> EngineError {
    EngineError::PublishError {
        table: table.to_string(),
        message: err.to_string(),
    }
}
