//! Source extract loading.
//!
//! This module provides the [`SourceLoader`] type, which reads every
//! extract named in `sources.yaml` from a directory, and the typed readers
//! that turn a [`RawTable`] into source records. Every reader resolves all
//! of its columns before touching a row, so a missing column fails the run
//! even when the extract has no data.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{
    ActiveWorkersColumns, AdmissionColumns, LeaveDaysColumns, NotedListColumns, SourceLayout,
    SourcesConfig, StateRateColumns, StateWorkdaysColumns, TerminationColumns,
};
use crate::error::EngineResult;

use super::records::{
    ActiveWorker, AdmissionEntry, LeaveDaysEntry, NotedWorker, SourceTables, StateRateEntry,
    StateWorkdaysEntry, TerminationEntry,
};
use super::table::RawTable;
use super::{
    ACTIVE_WORKERS, ADMISSIONS, LEAVE_DAYS, LEAVE_OF_ABSENCE, OVERSEAS, STATE_RATES,
    STATE_WORKDAYS, TERMINATIONS,
};

/// Reads the configured extracts from a source directory.
///
/// # Example
///
/// ```no_run
/// use vr_engine::config::ConfigLoader;
/// use vr_engine::sources::SourceLoader;
///
/// let loader = ConfigLoader::load("./config/vr")?;
/// let tables = SourceLoader::new("./data", loader.config().sources()).load()?;
/// println!("{} active workers", tables.active_workers.len());
/// # Ok::<(), vr_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SourceLoader<'a> {
    dir: PathBuf,
    layouts: &'a SourcesConfig,
}

impl<'a> SourceLoader<'a> {
    /// Creates a loader for the extracts under `dir`.
    pub fn new<P: AsRef<Path>>(dir: P, layouts: &'a SourcesConfig) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            layouts,
        }
    }

    /// Reads and types every extract. Any failure aborts the whole load.
    pub fn load(&self) -> EngineResult<SourceTables> {
        let layouts = self.layouts;

        let tables = SourceTables {
            active_workers: read_active_workers(
                &self.raw(ACTIVE_WORKERS, &layouts.active_workers)?,
                &layouts.active_workers.columns,
            )?,
            leave_days: read_leave_days(
                &self.raw(LEAVE_DAYS, &layouts.leave_days)?,
                &layouts.leave_days.columns,
            )?,
            terminations: read_terminations(
                &self.raw(TERMINATIONS, &layouts.terminations)?,
                &layouts.terminations.columns,
            )?,
            admissions: read_admissions(
                &self.raw(ADMISSIONS, &layouts.admissions)?,
                &layouts.admissions.columns,
            )?,
            state_rates: read_state_rates(
                &self.raw(STATE_RATES, &layouts.state_rates)?,
                &layouts.state_rates.columns,
            )?,
            state_workdays: read_state_workdays(
                &self.raw(STATE_WORKDAYS, &layouts.state_workdays)?,
                &layouts.state_workdays.columns,
            )?,
            overseas: read_noted_workers(
                &self.raw(OVERSEAS, &layouts.overseas)?,
                &layouts.overseas.columns,
            )?,
            leave_of_absence: read_noted_workers(
                &self.raw(LEAVE_OF_ABSENCE, &layouts.leave_of_absence)?,
                &layouts.leave_of_absence.columns,
            )?,
        };

        info!(
            dir = %self.dir.display(),
            active_workers = tables.active_workers.len(),
            terminations = tables.terminations.len(),
            admissions = tables.admissions.len(),
            overseas = tables.overseas.len(),
            leave_of_absence = tables.leave_of_absence.len(),
            "Loaded source extracts"
        );

        Ok(tables)
    }

    fn raw<C>(&self, source_name: &str, layout: &SourceLayout<C>) -> EngineResult<RawTable> {
        RawTable::from_path(source_name, &self.dir.join(&layout.file))
    }
}

/// Reads the active-workers extract.
pub fn read_active_workers(
    table: &RawTable,
    columns: &ActiveWorkersColumns,
) -> EngineResult<Vec<ActiveWorker>> {
    let worker_id = table.column(&columns.worker_id)?;
    let union = table.column(&columns.union)?;
    let job_title = table.column(&columns.job_title)?;

    table
        .rows()
        .map(|row| {
            Ok(ActiveWorker {
                worker_id: row.worker_id(&worker_id)?,
                union: row.text_or_empty(&union),
                job_title: row.text_or_empty(&job_title),
            })
        })
        .collect()
}

/// Reads the vacation extract; blank day counts are read as 0.
pub fn read_leave_days(
    table: &RawTable,
    columns: &LeaveDaysColumns,
) -> EngineResult<Vec<LeaveDaysEntry>> {
    let worker_id = table.column(&columns.worker_id)?;
    let leave_days = table.column(&columns.leave_days)?;

    table
        .rows()
        .map(|row| {
            Ok(LeaveDaysEntry {
                worker_id: row.worker_id(&worker_id)?,
                leave_days: row.day_count(&leave_days)?.unwrap_or(0),
            })
        })
        .collect()
}

/// Reads the terminations extract.
pub fn read_terminations(
    table: &RawTable,
    columns: &TerminationColumns,
) -> EngineResult<Vec<TerminationEntry>> {
    let worker_id = table.column(&columns.worker_id)?;
    let termination_date = table.column(&columns.termination_date)?;
    let notice_status = table.column(&columns.notice_status)?;

    table
        .rows()
        .map(|row| {
            Ok(TerminationEntry {
                worker_id: row.worker_id(&worker_id)?,
                termination_date: row.date(&termination_date)?,
                notice_status: row.text(&notice_status).map(str::to_string),
            })
        })
        .collect()
}

/// Reads the admissions extract.
pub fn read_admissions(
    table: &RawTable,
    columns: &AdmissionColumns,
) -> EngineResult<Vec<AdmissionEntry>> {
    let worker_id = table.column(&columns.worker_id)?;
    let admission_date = table.column(&columns.admission_date)?;

    table
        .rows()
        .map(|row| {
            Ok(AdmissionEntry {
                worker_id: row.worker_id(&worker_id)?,
                admission_date: row.date(&admission_date)?,
            })
        })
        .collect()
}

/// Reads the per-state daily rate extract.
pub fn read_state_rates(
    table: &RawTable,
    columns: &StateRateColumns,
) -> EngineResult<Vec<StateRateEntry>> {
    let state_name = table.column(&columns.state_name)?;
    let daily_rate = table.column(&columns.daily_rate)?;

    table
        .rows()
        .map(|row| {
            Ok(StateRateEntry {
                state_name: row.required_text(&state_name)?,
                daily_rate: row.amount(&daily_rate)?,
            })
        })
        .collect()
}

/// Reads the per-union standard working days extract.
pub fn read_state_workdays(
    table: &RawTable,
    columns: &StateWorkdaysColumns,
) -> EngineResult<Vec<StateWorkdaysEntry>> {
    let union = table.column(&columns.union)?;
    let standard_days = table.column(&columns.standard_days)?;

    table
        .rows()
        .map(|row| {
            Ok(StateWorkdaysEntry {
                union: row.required_text(&union)?,
                standard_days: row.required_day_count(&standard_days)?,
            })
        })
        .collect()
}

/// Reads an overseas or leave-of-absence list.
pub fn read_noted_workers(
    table: &RawTable,
    columns: &NotedListColumns,
) -> EngineResult<Vec<NotedWorker>> {
    let worker_id = table.column(&columns.worker_id)?;
    let note = columns
        .note
        .as_deref()
        .map(|name| table.column(name))
        .transpose()?;

    table
        .rows()
        .map(|row| {
            Ok(NotedWorker {
                worker_id: row.worker_id(&worker_id)?,
                note: note
                    .as_ref()
                    .and_then(|column| row.text(column))
                    .map(str::to_string),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::fs;

    fn table(source: &str, csv: &str) -> RawTable {
        RawTable::from_reader(source, csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_read_active_workers() {
        let csv = "MATRICULA,EMPRESA,TITULO DO CARGO,DESC. SITUACAO,Sindicato\n\
                   34941,1410,TECH RECRUITER II,Trabalhando,SINDPD SP - SIND.TRAB.EM PROC DADOS\n";
        let workers = read_active_workers(
            &table(ACTIVE_WORKERS, csv),
            &SourcesConfig::default().active_workers.columns,
        )
        .unwrap();

        assert_eq!(workers.len(), 1);
        assert_eq!(workers[0].worker_id, 34941);
        assert_eq!(workers[0].job_title, "TECH RECRUITER II");
        assert_eq!(workers[0].union, "SINDPD SP - SIND.TRAB.EM PROC DADOS");
    }

    #[test]
    fn test_missing_column_fails_even_without_rows() {
        let csv = "MATRICULA,TITULO DO CARGO\n";
        let result = read_active_workers(
            &table(ACTIVE_WORKERS, csv),
            &SourcesConfig::default().active_workers.columns,
        );
        match result {
            Err(EngineError::MissingColumn { column, .. }) => assert_eq!(column, "Sindicato"),
            other => panic!("Expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_leave_days_read_as_zero() {
        let csv = "MATRICULA,DIAS DE FÉRIAS\n1,10\n2,\n";
        let entries = read_leave_days(
            &table(LEAVE_DAYS, csv),
            &SourcesConfig::default().leave_days.columns,
        )
        .unwrap();
        assert_eq!(entries[0].leave_days, 10);
        assert_eq!(entries[1].leave_days, 0);
    }

    #[test]
    fn test_read_terminations_with_brazilian_dates() {
        let csv = "MATRICULA ,DATA DEMISSÃO,COMUNICADO DE DESLIGAMENTO\n7,20/05/2025,OK\n8,2025-05-02,\n";
        let entries = read_terminations(
            &table(TERMINATIONS, csv),
            &SourcesConfig::default().terminations.columns,
        )
        .unwrap();

        assert_eq!(
            entries[0].termination_date,
            NaiveDate::from_ymd_opt(2025, 5, 20)
        );
        assert_eq!(entries[0].notice_status.as_deref(), Some("OK"));
        assert_eq!(entries[1].notice_status, None);
    }

    #[test]
    fn test_read_state_rates_with_comma_decimal() {
        let csv = "ESTADO,VALOR\nParaná,\"35,00\"\nSão Paulo,37.5\n";
        let entries = read_state_rates(
            &table(STATE_RATES, csv),
            &SourcesConfig::default().state_rates.columns,
        )
        .unwrap();
        assert_eq!(entries[0].daily_rate, Decimal::new(3500, 2));
        assert_eq!(entries[1].state_name, "São Paulo");
    }

    #[test]
    fn test_read_state_workdays_requires_day_count() {
        let csv = "SINDICADO,DIAS UTEIS\nSITEPD PR - SIND DOS TRAB,\n";
        let result = read_state_workdays(
            &table(STATE_WORKDAYS, csv),
            &SourcesConfig::default().state_workdays.columns,
        );
        assert!(matches!(result, Err(EngineError::InvalidField { row: 1, .. })));
    }

    #[test]
    fn test_noted_list_without_note_column() {
        let columns = NotedListColumns {
            worker_id: "Cadastro".to_string(),
            note: None,
        };
        let entries = read_noted_workers(&table(OVERSEAS, "Cadastro\n11\n12\n"), &columns).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.note.is_none()));
    }

    #[test]
    fn test_source_loader_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let layouts = SourcesConfig::default();

        match SourceLoader::new(dir.path(), &layouts).load() {
            Err(EngineError::SourceNotFound { source_name, path }) => {
                assert_eq!(source_name, ACTIVE_WORKERS);
                assert!(path.ends_with("ATIVOS.csv"));
            }
            other => panic!("Expected SourceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_source_loader_reads_directory() {
        let dir = tempfile::tempdir().unwrap();
        let files = [
            ("ATIVOS.csv", "MATRICULA,TITULO DO CARGO,Sindicato\n1,ANALISTA,SINDPD SP - X\n"),
            ("FERIAS.csv", "MATRICULA,DIAS DE FÉRIAS\n"),
            ("DESLIGADOS.csv", "MATRICULA,DATA DEMISSÃO,COMUNICADO DE DESLIGAMENTO\n"),
            ("ADMISSAO.csv", "MATRICULA,Admissão\n"),
            ("SINDICATO_VALOR.csv", "ESTADO,VALOR\nSão Paulo,37.50\n"),
            ("DIAS_UTEIS.csv", "SINDICADO,DIAS UTEIS\nSINDPD SP - X,22\n"),
            ("EXTERIOR.csv", "Cadastro,OBS\n"),
            ("AFASTAMENTOS.csv", "MATRICULA,OBS\n"),
        ];
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }

        let layouts = SourcesConfig::default();
        let tables = SourceLoader::new(dir.path(), &layouts).load().unwrap();
        assert_eq!(tables.active_workers.len(), 1);
        assert_eq!(tables.state_workdays[0].standard_days, 22);
        assert!(tables.overseas.is_empty());
    }
}
