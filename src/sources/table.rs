//! Raw tabular extracts.
//!
//! A [`RawTable`] is a CSV extract held as text: normalised headers and
//! string cells. Typed readers in [`super::loader`] resolve the columns they
//! need through [`RawTable::column`], which turns an absent header into
//! [`EngineError::MissingColumn`], and convert cells with the parsers below.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%d/%m/%Y %H:%M:%S"];

/// A resolved column of a [`RawTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    index: usize,
    name: String,
}

/// One data row of a [`RawTable`], with its 1-based position.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    source_name: &'a str,
    number: usize,
    cells: &'a [String],
}

impl<'a> Row<'a> {
    /// The 1-based data row number (header excluded).
    pub fn number(&self) -> usize {
        self.number
    }

    /// The trimmed cell text, or `None` for an empty cell.
    pub fn text(&self, column: &Column) -> Option<&'a str> {
        self.cells
            .get(column.index)
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
    }

    /// The trimmed cell text; empty cells become an empty string.
    pub fn text_or_empty(&self, column: &Column) -> String {
        self.text(column).unwrap_or_default().to_string()
    }

    /// The trimmed cell text; the cell must not be empty.
    pub fn required_text(&self, column: &Column) -> EngineResult<String> {
        self.text(column)
            .map(str::to_string)
            .ok_or_else(|| self.invalid(column, ""))
    }

    /// Parses a worker id; the cell must not be empty.
    pub fn worker_id(&self, column: &Column) -> EngineResult<u64> {
        let raw = self.text(column).unwrap_or_default();
        parse_worker_id(raw).ok_or_else(|| self.invalid(column, raw))
    }

    /// Parses an optional date.
    pub fn date(&self, column: &Column) -> EngineResult<Option<NaiveDate>> {
        match self.text(column) {
            None => Ok(None),
            Some(raw) => parse_date(raw)
                .map(Some)
                .ok_or_else(|| self.invalid(column, raw)),
        }
    }

    /// Parses an optional non-negative day count.
    pub fn day_count(&self, column: &Column) -> EngineResult<Option<u32>> {
        match self.text(column) {
            None => Ok(None),
            Some(raw) => parse_day_count(raw)
                .map(Some)
                .ok_or_else(|| self.invalid(column, raw)),
        }
    }

    /// Parses a required non-negative day count.
    pub fn required_day_count(&self, column: &Column) -> EngineResult<u32> {
        self.day_count(column)?
            .ok_or_else(|| self.invalid(column, ""))
    }

    /// Parses a required decimal amount.
    pub fn amount(&self, column: &Column) -> EngineResult<Decimal> {
        let raw = self.text(column).unwrap_or_default();
        parse_amount(raw).ok_or_else(|| self.invalid(column, raw))
    }

    /// Returns true when every cell of the row is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|cell| cell.trim().is_empty())
    }

    fn invalid(&self, column: &Column, raw: &str) -> EngineError {
        EngineError::InvalidField {
            source_name: self.source_name.to_string(),
            row: self.number,
            column: column.name.clone(),
            value: raw.to_string(),
        }
    }
}

/// A CSV extract with normalised headers.
#[derive(Debug, Clone)]
pub struct RawTable {
    source_name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Reads a CSV extract from a file.
    pub fn from_path(source_name: &str, path: &Path) -> EngineResult<Self> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => EngineError::SourceNotFound {
                source_name: source_name.to_string(),
                path: path.display().to_string(),
            },
            _ => EngineError::SourceParseError {
                source_name: source_name.to_string(),
                message: format!("cannot open {}: {}", path.display(), e),
            },
        })?;
        Self::from_reader(source_name, file)
    }

    /// Reads a CSV extract from any reader.
    ///
    /// # Example
    ///
    /// ```
    /// use vr_engine::sources::RawTable;
    ///
    /// let csv = "MATRICULA ,DIAS DE FÉRIAS\n34941,10\n";
    /// let table = RawTable::from_reader("leave_days", csv.as_bytes()).unwrap();
    /// assert_eq!(table.headers(), ["MATRICULA", "DIAS DE FÉRIAS"]);
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn from_reader<R: Read>(source_name: &str, reader: R) -> EngineResult<Self> {
        let parse_error = |e: csv::Error| EngineError::SourceParseError {
            source_name: source_name.to_string(),
            message: e.to_string(),
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(parse_error)?
            .iter()
            .map(normalize_header)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(parse_error)?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self {
            source_name: source_name.to_string(),
            headers,
            rows,
        })
    }

    /// The logical name of the source.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// The normalised header names.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the extract has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolves a column by header name.
    pub fn column(&self, name: &str) -> EngineResult<Column> {
        let wanted = normalize_header(name);
        self.headers
            .iter()
            .position(|h| *h == wanted)
            .map(|index| Column {
                index,
                name: wanted.clone(),
            })
            .ok_or_else(|| EngineError::MissingColumn {
                source_name: self.source_name.clone(),
                column: wanted,
            })
    }

    /// Iterates over the non-blank data rows.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        let source_name = self.source_name.as_str();
        self.rows
            .iter()
            .enumerate()
            .map(move |(i, cells)| Row {
                source_name,
                number: i + 1,
                cells,
            })
            .filter(|row| !row.is_blank())
    }
}

/// Normalises a header: byte-order mark removed, surrounding whitespace
/// (non-breaking spaces included) trimmed.
pub fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_string()
}

/// Parses a worker id, accepting spreadsheet float renderings like "34941.0".
pub fn parse_worker_id(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    let integral = raw
        .strip_suffix(".0")
        .or_else(|| raw.strip_suffix(",0"))
        .unwrap_or(raw);
    integral.parse().ok()
}

/// Parses a date in ISO or Brazilian notation, with or without a time part.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parses a non-negative whole day count, accepting "22" and "22.0".
pub fn parse_day_count(raw: &str) -> Option<u32> {
    let value = parse_amount(raw)?;
    if value.is_sign_negative() || value.fract() != Decimal::ZERO {
        return None;
    }
    value.to_u32()
}

/// Parses a decimal amount, accepting "37.50", "37,50" and "R$ 37,50".
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned = raw.trim().trim_start_matches("R$").trim();
    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned.to_string()
    };
    Decimal::from_str(&normalized).ok()
}
