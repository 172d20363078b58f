//! CSV publisher.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};
use crate::models::BenefitRow;

use super::{COLUMNS, TablePublisher, text_cells};

/// Publishes each table as `<dir>/<table>.csv`.
///
/// Rows are written to a sibling temporary file that is renamed over the
/// target, so readers never see a half-written table.
#[derive(Debug, Clone)]
pub struct CsvPublisher {
    dir: PathBuf,
}

impl CsvPublisher {
    /// Creates a publisher writing under `dir`.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// The file a table is published to.
    pub fn path_for(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", table))
    }

    /// Writes the header and `rows` to `writer`. Nulls become empty cells.
    pub fn write_rows<W: Write>(writer: W, rows: &[BenefitRow]) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(COLUMNS)?;
        for row in rows {
            let cells = text_cells(row);
            wtr.write_record(cells.iter().map(|c| c.as_deref().unwrap_or("")))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl TablePublisher for CsvPublisher {
    fn publish(&mut self, table: &str, rows: &[BenefitRow]) -> EngineResult<usize> {
        let to_error = |message: String| EngineError::PublishError {
            table: table.to_string(),
            message,
        };

        fs::create_dir_all(&self.dir)
            .map_err(|e| to_error(format!("cannot create {}: {}", self.dir.display(), e)))?;

        let target = self.path_for(table);
        let staging = self.dir.join(format!(".{}.csv.tmp", table));
        let written = fs::File::create(&staging)
            .map_err(|e| to_error(format!("cannot create {}: {}", staging.display(), e)))
            .and_then(|file| Self::write_rows(file, rows).map_err(|e| to_error(e.to_string())))
            .and_then(|()| {
                fs::rename(&staging, &target)
                    .map_err(|e| to_error(format!("cannot replace {}: {}", target.display(), e)))
            });
        if let Err(error) = written {
            let _ = fs::remove_file(&staging);
            return Err(error);
        }

        tracing::info!(table = %table, rows = rows.len(), path = %target.display(), "Published table to CSV");
        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publish::test_support::{make_row, make_unpriced_row};

    #[test]
    fn test_write_rows_layout() {
        let mut buffer = Vec::new();
        CsvPublisher::write_rows(&mut buffer, &[make_row(7), make_unpriced_row(8)]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Matrícula,Sindicato do Colaborador,Competência,Dias"));
        assert!(lines[1].starts_with("7,SINDPD SP - SIND.TRAB.EM PROC DADOS,05/2025,22,37.50,825.00"));
        assert_eq!(
            lines[2],
            "8,SINDPD SP - SIND.TRAB.EM PROC DADOS,05/2025,,,,,,,,,ANALISTA"
        );
    }

    #[test]
    fn test_publish_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut publisher = CsvPublisher::new(dir.path());

        publisher
            .publish("tabela_compra_vr", &[make_row(1), make_row(2)])
            .unwrap();
        publisher.publish("tabela_compra_vr", &[make_row(3)]).unwrap();

        let text = fs::read_to_string(publisher.path_for("tabela_compra_vr")).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().nth(1).unwrap().starts_with("3,"));
        assert!(!dir.path().join(".tabela_compra_vr.csv.tmp").exists());
    }

    #[test]
    fn test_failed_publish_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut publisher = CsvPublisher::new(dir.path());
        // A directory at the target path makes the final rename fail.
        fs::create_dir(publisher.path_for("tabela_compra_vr")).unwrap();
        fs::write(dir.path().join("tabela_compra_vr.csv").join("keep"), "x").unwrap();

        let result = publisher.publish("tabela_compra_vr", &[make_row(1)]);

        assert!(matches!(result, Err(EngineError::PublishError { .. })));
        assert!(!dir.path().join(".tabela_compra_vr.csv.tmp").exists());
        assert!(dir.path().join("tabela_compra_vr.csv").join("keep").exists());
    }
}
