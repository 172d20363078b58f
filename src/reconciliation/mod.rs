//! Reconciliation of the source extracts into one row per eligible worker.
//!
//! Stages run in a fixed order. Joins never add or remove rows; only the
//! three exclusion stages shrink the population.
//!
//! 1. base population from the active-workers extract
//! 2. vacation days (missing means 0)
//! 3. termination date and notice status
//! 4. admission date of workers admitted in the target month
//! 5. state code derived from the union text
//! 6. state name from the configured state table
//! 7. daily rate and standard working days of the state
//! 8. job title denylist
//! 9. leave of absence
//! 10. overseas workers who have not returned

mod exclusions;
mod joins;
mod quality;
mod union_state;

pub use exclusions::{
    ExclusionOutcome, exclude_job_titles, exclude_leave_of_absence, exclude_overseas,
    is_denied_title, leave_return_date, leave_return_warnings,
};
pub use joins::{
    base_population, join_admissions, join_leave_days, join_state_rates, join_state_workdays,
    join_terminations,
};
pub use quality::collect_warnings;
pub use union_state::{derive_state_code, derive_states};

use crate::config::PipelineConfig;
use crate::error::EngineResult;
use crate::models::{AuditTrace, WorkerRecord};
use crate::sources::SourceTables;

/// The reconciled population and what happened along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Eligible workers in base population order.
    pub records: Vec<WorkerRecord>,
    /// One step per stage, plus data-quality warnings.
    pub trace: AuditTrace,
    /// Rows in the active-workers extract.
    pub base_population: usize,
    /// Rows removed by the job title denylist.
    pub excluded_by_job_title: usize,
    /// Rows removed for leave of absence.
    pub excluded_on_leave: usize,
    /// Rows removed for being abroad.
    pub excluded_overseas: usize,
}

/// Runs every reconciliation stage over the loaded extracts.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::DuplicateWorkerId`] or
/// [`crate::error::EngineError::DuplicateKey`] when an extract repeats a key,
/// and [`crate::error::EngineError::InvalidConfig`] when the leave-return
/// pattern does not compile.
pub fn reconcile(tables: &SourceTables, config: &PipelineConfig) -> EngineResult<Reconciliation> {
    let mut trace = AuditTrace::default();

    let records = base_population(&tables.active_workers)?;
    let base = records.len();
    trace.record(
        "base_population",
        0,
        base,
        format!("{} active workers", base),
    );

    let records = join_leave_days(records, &tables.leave_days)?;
    trace.record(
        "join_leave_days",
        base,
        records.len(),
        format!("{} vacation entries joined", tables.leave_days.len()),
    );

    let records = join_terminations(records, &tables.terminations)?;
    let terminated = records.iter().filter(|r| r.termination_date.is_some()).count();
    trace.record(
        "join_terminations",
        base,
        records.len(),
        format!("{} workers with a termination date", terminated),
    );

    let records = join_admissions(records, &tables.admissions)?;
    let admitted = records.iter().filter(|r| r.admission_date.is_some()).count();
    trace.record(
        "join_admissions",
        base,
        records.len(),
        format!("{} workers with an admission date", admitted),
    );

    let records = derive_states(records, config);
    let unmapped = records.iter().filter(|r| r.state_name.is_none()).count();
    trace.record(
        "derive_states",
        base,
        records.len(),
        format!("{} workers without a mapped state", unmapped),
    );

    let records = join_state_rates(records, &tables.state_rates)?;
    let records = join_state_workdays(records, &tables.state_workdays)?;
    trace.record(
        "join_state_tables",
        base,
        records.len(),
        format!(
            "{} rates and {} working-day entries joined",
            tables.state_rates.len(),
            tables.state_workdays.len()
        ),
    );

    let exclusions = config.exclusions();

    let population: Vec<u64> = records.iter().map(|r| r.worker_id).collect();
    trace.warnings.extend(leave_return_warnings(
        &population,
        &tables.leave_of_absence,
        &exclusions.leave_return_pattern,
    )?);

    let by_title = exclude_job_titles(records, &exclusions.job_title_denylist);
    let rows_in = by_title.kept.len() + by_title.excluded.len();
    trace.record(
        "exclude_job_titles",
        rows_in,
        by_title.kept.len(),
        format!("{} workers with a denied job title", by_title.excluded.len()),
    );

    let on_leave = exclude_leave_of_absence(by_title.kept, &tables.leave_of_absence);
    let rows_in = on_leave.kept.len() + on_leave.excluded.len();
    trace.record(
        "exclude_leave_of_absence",
        rows_in,
        on_leave.kept.len(),
        format!("{} workers on leave of absence", on_leave.excluded.len()),
    );

    let overseas = exclude_overseas(
        on_leave.kept,
        &tables.overseas,
        &exclusions.overseas_returned_marker,
    );
    let rows_in = overseas.kept.len() + overseas.excluded.len();
    trace.record(
        "exclude_overseas",
        rows_in,
        overseas.kept.len(),
        format!("{} workers abroad", overseas.excluded.len()),
    );

    trace.warnings.extend(collect_warnings(&overseas.kept));

    tracing::debug!(
        base_population = base,
        eligible = overseas.kept.len(),
        warnings = trace.warnings.len(),
        "Reconciliation complete"
    );

    Ok(Reconciliation {
        records: overseas.kept,
        trace,
        base_population: base,
        excluded_by_job_title: by_title.excluded.len(),
        excluded_on_leave: on_leave.excluded.len(),
        excluded_overseas: overseas.excluded.len(),
    })
}
