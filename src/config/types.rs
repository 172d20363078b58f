//! Configuration types for the VR benefit pipeline.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every section has a
//! default matching the extracts the engine was built around, so partial
//! files are accepted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Metadata about the configured benefit.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// Short code identifying the benefit (e.g., "VR").
    pub code: String,
    /// The human-readable name of the benefit.
    pub name: String,
    /// The version of this configuration set.
    pub version: String,
}

impl Default for EngineMetadata {
    fn default() -> Self {
        Self {
            code: "VR".to_string(),
            name: "Vale Refeição".to_string(),
            version: "unversioned".to_string(),
        }
    }
}

/// Parameters of the payable-days rules.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Notice status meaning the termination was communicated in time.
    pub notice_ok_marker: String,
    /// Last day of the month on which a notified termination zeroes the benefit.
    pub termination_cutoff_day: u32,
    /// States whose leave days are deducted from the payable days.
    pub leave_deduction_states: Vec<String>,
    /// Share of the total paid by the employer.
    pub employer_share: Decimal,
    /// Share of the total discounted from the worker.
    pub employee_share: Decimal,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            notice_ok_marker: "OK".to_string(),
            termination_cutoff_day: 15,
            leave_deduction_states: vec!["PR".to_string()],
            employer_share: Decimal::new(80, 2),
            employee_share: Decimal::new(20, 2),
        }
    }
}

/// Population exclusion parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExclusionConfig {
    /// Job titles (case-insensitive substrings) that are never eligible.
    pub job_title_denylist: Vec<String>,
    /// Marker in the overseas note meaning the worker is back in the country.
    pub overseas_returned_marker: String,
    /// Pattern in a leave-of-absence note announcing a return.
    pub leave_return_pattern: String,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            job_title_denylist: vec![
                "DIRETOR".to_string(),
                "ESTAGIÁRIO".to_string(),
                "ESTAGIARIO".to_string(),
                "APRENDIZ".to_string(),
            ],
            overseas_returned_marker: "retornou".to_string(),
            leave_return_pattern: r"(?i)\bretorno\b".to_string(),
        }
    }
}

/// Settings for the published table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Name of the table replaced on every run.
    pub table_name: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            table_name: "tabela_compra_vr".to_string(),
        }
    }
}

/// Top-level structure of `pipeline.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PipelineFile {
    /// Metadata section.
    pub engine: EngineMetadata,
    /// Rule parameters.
    pub rules: RulesConfig,
    /// Exclusion parameters.
    pub exclusions: ExclusionConfig,
    /// Publish settings.
    pub publish: PublishConfig,
}

/// Structure of `states.yaml`: two-letter code to full state name.
#[derive(Debug, Clone, Deserialize)]
pub struct StatesFile {
    /// Map of state code to state name.
    pub states: BTreeMap<String, String>,
}

/// Default code-to-name table covering the states present in the extracts.
pub fn default_states() -> BTreeMap<String, String> {
    [
        ("PR", "Paraná"),
        ("RJ", "Rio de Janeiro"),
        ("RS", "Rio Grande do Sul"),
        ("SP", "São Paulo"),
    ]
    .into_iter()
    .map(|(code, name)| (code.to_string(), name.to_string()))
    .collect()
}

/// Columns of the active-workers extract.
#[derive(Debug, Clone, Deserialize)]
pub struct ActiveWorkersColumns {
    /// Worker id column.
    pub worker_id: String,
    /// Union affiliation text column.
    pub union: String,
    /// Job title column.
    pub job_title: String,
}

/// Columns of the vacation-days extract.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveDaysColumns {
    /// Worker id column.
    pub worker_id: String,
    /// Leave-day count column.
    pub leave_days: String,
}

/// Columns of the terminations extract.
#[derive(Debug, Clone, Deserialize)]
pub struct TerminationColumns {
    /// Worker id column.
    pub worker_id: String,
    /// Termination date column.
    pub termination_date: String,
    /// Termination notice status column.
    pub notice_status: String,
}

/// Columns of the admissions extract.
#[derive(Debug, Clone, Deserialize)]
pub struct AdmissionColumns {
    /// Worker id column.
    pub worker_id: String,
    /// Admission date column.
    pub admission_date: String,
}

/// Columns of the per-state daily rate extract.
#[derive(Debug, Clone, Deserialize)]
pub struct StateRateColumns {
    /// Full state name column.
    pub state_name: String,
    /// Daily rate column.
    pub daily_rate: String,
}

/// Columns of the per-union standard working days extract.
#[derive(Debug, Clone, Deserialize)]
pub struct StateWorkdaysColumns {
    /// Union text column; the state code is its second token.
    pub union: String,
    /// Standard working days column.
    pub standard_days: String,
}

/// Columns of the overseas and leave-of-absence extracts.
#[derive(Debug, Clone, Deserialize)]
pub struct NotedListColumns {
    /// Worker id column.
    pub worker_id: String,
    /// Free-text note column.
    pub note: Option<String>,
}

/// Location and header names of one extract.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceLayout<C> {
    /// File name relative to the source directory.
    pub file: String,
    /// Header names of the columns the pipeline reads.
    pub columns: C,
}

impl<C> SourceLayout<C> {
    fn new(file: &str, columns: C) -> Self {
        Self {
            file: file.to_string(),
            columns,
        }
    }
}

/// Structure of `sources.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    /// Active workers (base population).
    pub active_workers: SourceLayout<ActiveWorkersColumns>,
    /// Vacation days per worker.
    pub leave_days: SourceLayout<LeaveDaysColumns>,
    /// Terminations.
    pub terminations: SourceLayout<TerminationColumns>,
    /// Admissions in the target month.
    pub admissions: SourceLayout<AdmissionColumns>,
    /// Daily rate per state.
    pub state_rates: SourceLayout<StateRateColumns>,
    /// Standard working days per union.
    pub state_workdays: SourceLayout<StateWorkdaysColumns>,
    /// Workers abroad.
    pub overseas: SourceLayout<NotedListColumns>,
    /// Workers on leave of absence.
    pub leave_of_absence: SourceLayout<NotedListColumns>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            active_workers: SourceLayout::new(
                "ATIVOS.csv",
                ActiveWorkersColumns {
                    worker_id: "MATRICULA".to_string(),
                    union: "Sindicato".to_string(),
                    job_title: "TITULO DO CARGO".to_string(),
                },
            ),
            leave_days: SourceLayout::new(
                "FERIAS.csv",
                LeaveDaysColumns {
                    worker_id: "MATRICULA".to_string(),
                    leave_days: "DIAS DE FÉRIAS".to_string(),
                },
            ),
            terminations: SourceLayout::new(
                "DESLIGADOS.csv",
                TerminationColumns {
                    worker_id: "MATRICULA".to_string(),
                    termination_date: "DATA DEMISSÃO".to_string(),
                    notice_status: "COMUNICADO DE DESLIGAMENTO".to_string(),
                },
            ),
            admissions: SourceLayout::new(
                "ADMISSAO.csv",
                AdmissionColumns {
                    worker_id: "MATRICULA".to_string(),
                    admission_date: "Admissão".to_string(),
                },
            ),
            state_rates: SourceLayout::new(
                "SINDICATO_VALOR.csv",
                StateRateColumns {
                    state_name: "ESTADO".to_string(),
                    daily_rate: "VALOR".to_string(),
                },
            ),
            state_workdays: SourceLayout::new(
                "DIAS_UTEIS.csv",
                StateWorkdaysColumns {
                    union: "SINDICADO".to_string(),
                    standard_days: "DIAS UTEIS".to_string(),
                },
            ),
            overseas: SourceLayout::new(
                "EXTERIOR.csv",
                NotedListColumns {
                    worker_id: "Cadastro".to_string(),
                    note: Some("OBS".to_string()),
                },
            ),
            leave_of_absence: SourceLayout::new(
                "AFASTAMENTOS.csv",
                NotedListColumns {
                    worker_id: "MATRICULA".to_string(),
                    note: Some("OBS".to_string()),
                },
            ),
        }
    }
}

/// A holiday added on top of the national calendar.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtraHoliday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
}

/// Structure of `holidays.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HolidaysFile {
    /// Holidays observed in addition to the national ones.
    #[serde(default)]
    pub holidays: Vec<ExtraHoliday>,
}

/// The complete pipeline configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    metadata: EngineMetadata,
    rules: RulesConfig,
    exclusions: ExclusionConfig,
    publish: PublishConfig,
    states: BTreeMap<String, String>,
    sources: SourcesConfig,
    extra_holidays: Vec<ExtraHoliday>,
}

impl PipelineConfig {
    /// Creates a new PipelineConfig from its component parts.
    pub fn new(
        pipeline: PipelineFile,
        states: BTreeMap<String, String>,
        sources: SourcesConfig,
        extra_holidays: Vec<ExtraHoliday>,
    ) -> Self {
        let mut sorted_holidays = extra_holidays;
        sorted_holidays.sort_by(|a, b| a.date.cmp(&b.date));
        Self {
            metadata: pipeline.engine,
            rules: pipeline.rules,
            exclusions: pipeline.exclusions,
            publish: pipeline.publish,
            states,
            sources,
            extra_holidays: sorted_holidays,
        }
    }

    /// Returns the engine metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the payable-days rule parameters.
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Returns the exclusion parameters.
    pub fn exclusions(&self) -> &ExclusionConfig {
        &self.exclusions
    }

    /// Returns the publish settings.
    pub fn publish(&self) -> &PublishConfig {
        &self.publish
    }

    /// Returns the state code to name table.
    pub fn states(&self) -> &BTreeMap<String, String> {
        &self.states
    }

    /// Returns the source layouts.
    pub fn sources(&self) -> &SourcesConfig {
        &self.sources
    }

    /// Returns the extra holidays, sorted by date.
    pub fn extra_holidays(&self) -> &[ExtraHoliday] {
        &self.extra_holidays
    }

    /// Looks up the full state name for a two-letter code.
    pub fn state_name(&self, code: &str) -> Option<&str> {
        self.states.get(code).map(String::as_str)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(
            PipelineFile::default(),
            default_states(),
            SourcesConfig::default(),
            Vec::new(),
        )
    }
}
