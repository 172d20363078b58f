//! Publishing the benefit table.
//!
//! A run's rows replace the published table as a whole: publishers drop
//! whatever was there and write the new rows, or fail and leave the previous
//! table in place. Column names are part of the contract with downstream
//! query tools and must not change.

mod csv_export;
mod sqlite;

pub use csv_export::CsvPublisher;
pub use sqlite::SqlitePublisher;

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::BenefitRow;

/// Published column names, in table order.
pub const COLUMNS: [&str; 12] = [
    "Matrícula",
    "Sindicato do Colaborador",
    "Competência",
    "Dias",
    "VALOR DIÁRIO VR",
    "TOTAL",
    "Custo empresa",
    "Desconto profissional",
    "ESTADO_SINDICATO_SIGLA",
    "Admissão",
    "DATA DEMISSÃO",
    "TITULO DO CARGO",
];

/// SQL types of [`COLUMNS`], by position.
pub const COLUMN_TYPES: [&str; 12] = [
    "INTEGER", "TEXT", "TEXT", "INTEGER", "TEXT", "TEXT", "TEXT", "TEXT", "TEXT", "TEXT", "TEXT",
    "TEXT",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Destination of a published benefit table.
pub trait TablePublisher {
    /// Replaces `table` with `rows`. Returns the number of rows written.
    fn publish(&mut self, table: &str, rows: &[BenefitRow]) -> EngineResult<usize>;
}

/// Quotes an identifier for SQL, doubling embedded quotes.
///
/// # Example
///
/// ```
/// use vr_engine::publish::quote_identifier;
///
/// assert_eq!(quote_identifier("VALOR DIÁRIO VR"), "\"VALOR DIÁRIO VR\"");
/// assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
/// ```
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// The text form of every cell of a row, `None` for nulls.
///
/// Amounts show at least two decimals ("660.00", "29.592") and dates use
/// ISO format.
pub fn text_cells(row: &BenefitRow) -> [Option<String>; 12] {
    [
        Some(row.worker_id.to_string()),
        Some(row.union.clone()),
        Some(row.competency.clone()),
        row.payable_days.map(|d| d.to_string()),
        row.daily_rate.map(money_text),
        row.total_value.map(money_text),
        row.employer_cost.map(money_text),
        row.employee_discount.map(money_text),
        row.state_code.clone(),
        row.admission_date.map(|d| d.format(DATE_FORMAT).to_string()),
        row.termination_date.map(|d| d.format(DATE_FORMAT).to_string()),
        Some(row.job_title.clone()),
    ]
}

/// Renders an amount without trailing zeros beyond the cents.
///
/// ```
/// use rust_decimal::Decimal;
/// use vr_engine::publish::money_text;
///
/// assert_eq!(money_text(Decimal::new(660000, 3)), "660.00");
/// assert_eq!(money_text(Decimal::new(29592, 3)), "29.592");
/// ```
pub fn money_text(value: Decimal) -> String {
    let mut value = value.normalize();
    if value.scale() < 2 {
        value.rescale(2);
    }
    value.to_string()
}
