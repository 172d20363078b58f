//! End-to-end pipeline for one competency.
//!
//! Reconciles the extracts, computes payable days and monetary totals for
//! every eligible worker and assembles the [`PipelineResult`]. Nothing here
//! touches the published store; see [`crate::publish`].

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::calculation::{BusinessCalendar, calculate_benefit_totals, calculate_payable_days};
use crate::config::PipelineConfig;
use crate::error::EngineResult;
use crate::models::{
    BenefitRow, Competency, DataQualityWarning, PipelineResult, RunSummary, WarningCode,
    WorkerRecord,
};
use crate::reconciliation::reconcile;
use crate::sources::{SourceLoader, SourceTables};

/// Runs the pipeline over already-loaded extracts.
///
/// # Example
///
/// ```
/// use vr_engine::config::PipelineConfig;
/// use vr_engine::models::Competency;
/// use vr_engine::pipeline::run_pipeline;
/// use vr_engine::sources::SourceTables;
///
/// let result = run_pipeline(
///     &SourceTables::default(),
///     &PipelineConfig::default(),
///     Competency::new(5, 2025).unwrap(),
/// )
/// .unwrap();
/// assert!(result.rows.is_empty());
/// assert_eq!(result.summary.base_population, 0);
/// ```
pub fn run_pipeline(
    tables: &SourceTables,
    config: &PipelineConfig,
    competency: Competency,
) -> EngineResult<PipelineResult> {
    let start_time = Instant::now();
    let run_id = Uuid::new_v4();
    tracing::info!(
        run_id = %run_id,
        competency = %competency,
        active_workers = tables.active_workers.len(),
        "Starting pipeline run"
    );

    let reconciled = reconcile(tables, config)?;
    let calendar = BusinessCalendar::with_extra_holidays(config.extra_holidays());
    let business_days = calendar.business_days_in_month(competency);

    let mut audit_trace = reconciled.trace;
    let rows: Vec<BenefitRow> = reconciled
        .records
        .iter()
        .map(|record| {
            let row = build_row(record, competency, &calendar, config, business_days);
            if let (None, Some(days), Some(rate)) = (row.total_value, row.payable_days, row.daily_rate) {
                audit_trace.warnings.push(DataQualityWarning::new(
                    WarningCode::AmountOverflow,
                    row.worker_id,
                    format!("{} days at {} overflows the decimal range; totals left null", days, rate),
                ));
            }
            row
        })
        .collect();

    for warning in &audit_trace.warnings {
        tracing::warn!(
            run_id = %run_id,
            worker_id = warning.worker_id,
            code = ?warning.code,
            "{}",
            warning.message
        );
    }

    let summary = RunSummary {
        base_population: reconciled.base_population,
        excluded_by_job_title: reconciled.excluded_by_job_title,
        excluded_on_leave: reconciled.excluded_on_leave,
        excluded_overseas: reconciled.excluded_overseas,
        published_rows: rows.len(),
        admission_periods: distinct_periods(rows.iter().filter_map(|r| r.admission_date)),
        termination_periods: distinct_periods(rows.iter().filter_map(|r| r.termination_date)),
    };

    audit_trace.record(
        "calculate_benefits",
        reconciled.records.len(),
        rows.len(),
        format!(
            "{} business days in {}; {} rows without payable days",
            business_days,
            competency,
            rows.iter().filter(|r| r.payable_days.is_none()).count()
        ),
    );
    audit_trace.duration_us = start_time.elapsed().as_micros() as u64;

    tracing::info!(
        run_id = %run_id,
        competency = %competency,
        rows = rows.len(),
        warnings = audit_trace.warnings.len(),
        duration_us = audit_trace.duration_us,
        "Pipeline run completed"
    );

    Ok(PipelineResult {
        run_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        competency,
        rows,
        summary,
        audit_trace,
    })
}

/// Loads the extracts from `source_dir` and runs the pipeline.
pub fn run_from_dir<P: AsRef<Path>>(
    source_dir: P,
    config: &PipelineConfig,
    competency: Competency,
) -> EngineResult<PipelineResult> {
    let tables = SourceLoader::new(source_dir.as_ref(), config.sources()).load()?;
    run_pipeline(&tables, config, competency)
}

fn build_row(
    record: &WorkerRecord,
    competency: Competency,
    calendar: &BusinessCalendar,
    config: &PipelineConfig,
    business_days_in_month: u32,
) -> BenefitRow {
    let days = calculate_payable_days(record, competency, calendar, config.rules());
    let totals = calculate_benefit_totals(days.payable_days, record.daily_rate, config.rules());

    BenefitRow {
        worker_id: record.worker_id,
        union: record.union.clone(),
        competency: competency.label(),
        payable_days: days.payable_days,
        daily_rate: record.daily_rate,
        total_value: totals.map(|t| t.total_value),
        employer_cost: totals.map(|t| t.employer_cost),
        employee_discount: totals.map(|t| t.employee_discount),
        state_code: record.state_code.clone(),
        admission_date: record.admission_date,
        termination_date: record.termination_date,
        job_title: record.job_title.clone(),
        business_days_in_month,
        admitted_this_month: days.admitted_this_month,
        rule: days.rule,
        leave_days_deducted: days.leave_days_deducted,
    }
}

/// Distinct "MM/YYYY" labels of `dates`, in chronological order.
fn distinct_periods(dates: impl Iterator<Item = NaiveDate>) -> Vec<String> {
    use chrono::Datelike;

    let periods: BTreeSet<(i32, u32)> = dates.map(|d| (d.year(), d.month())).collect();
    periods
        .into_iter()
        .map(|(year, month)| format!("{:02}/{}", month, year))
        .collect()
}
