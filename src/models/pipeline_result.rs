//! Pipeline result models.
//!
//! This module contains the [`PipelineResult`] type and the structures that
//! accompany the published rows: data-quality warnings, stage audit steps
//! and the run summary shown to the caller before publishing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BenefitRow, Competency};

/// Kind of data-quality gap found while reconciling a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    /// Union text has fewer than two tokens; no state code could be derived.
    MissingStateCode,
    /// State code has no entry in the state table.
    UnmappedState,
    /// No daily rate is configured for the worker's state.
    MissingDailyRate,
    /// No standard working days are configured for the worker's state.
    MissingStandardDays,
    /// A leave-of-absence note announces a return; the worker is still excluded.
    LeaveReturnNoted,
    /// The monetary totals do not fit in a decimal; they are published as null.
    AmountOverflow,
}

/// Severity of a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational only.
    Low,
    /// The row was published with null values.
    Medium,
}

/// A per-row data-quality warning.
///
/// Warnings never abort a run; they surface gaps that flow through the
/// table as nulls so they can be reviewed manually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQualityWarning {
    /// What kind of gap was found.
    pub code: WarningCode,
    /// The worker the warning concerns.
    pub worker_id: u64,
    /// A human-readable description.
    pub message: String,
    /// How much attention the warning needs.
    pub severity: Severity,
}

impl DataQualityWarning {
    /// Creates a warning with the severity implied by its code.
    pub fn new(code: WarningCode, worker_id: u64, message: impl Into<String>) -> Self {
        let severity = match code {
            WarningCode::LeaveReturnNoted => Severity::Low,
            _ => Severity::Medium,
        };
        Self {
            code,
            worker_id,
            message: message.into(),
            severity,
        }
    }
}

/// A single stage of the pipeline, as recorded in the audit trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// Identifier of the stage (e.g., "exclude_job_titles").
    pub stage_id: String,
    /// Rows entering the stage.
    pub rows_in: usize,
    /// Rows leaving the stage.
    pub rows_out: usize,
    /// Human-readable explanation of what the stage did.
    pub reasoning: String,
}

/// The complete audit trace for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of stage steps.
    pub steps: Vec<AuditStep>,
    /// Data-quality warnings raised during the run.
    pub warnings: Vec<DataQualityWarning>,
    /// The total computation duration in microseconds.
    pub duration_us: u64,
}

impl AuditTrace {
    /// Appends a stage step, numbering it after the existing ones.
    pub fn record(&mut self, stage_id: &str, rows_in: usize, rows_out: usize, reasoning: String) {
        let step_number = self.steps.len() as u32 + 1;
        self.steps.push(AuditStep {
            step_number,
            stage_id: stage_id.to_string(),
            rows_in,
            rows_out,
            reasoning,
        });
    }
}

/// Counts and observed periods reported before the table is published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Rows in the active-workers extract.
    pub base_population: usize,
    /// Rows removed by the job title denylist.
    pub excluded_by_job_title: usize,
    /// Rows removed because the worker is on leave of absence.
    pub excluded_on_leave: usize,
    /// Rows removed because the worker is abroad.
    pub excluded_overseas: usize,
    /// Rows in the final table.
    pub published_rows: usize,
    /// Distinct "MM/YYYY" admission periods present in the table.
    pub admission_periods: Vec<String>,
    /// Distinct "MM/YYYY" termination periods present in the table.
    pub termination_periods: Vec<String>,
}

/// The complete result of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineResult {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the run.
    pub engine_version: String,
    /// The target competency.
    pub competency: Competency,
    /// One row per eligible worker, in base population order.
    pub rows: Vec<BenefitRow>,
    /// Counts and observed periods.
    pub summary: RunSummary,
    /// Stage steps and warnings.
    pub audit_trace: AuditTrace,
}
