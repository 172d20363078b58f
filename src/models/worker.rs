//! Reconciled worker record.
//!
//! A [`WorkerRecord`] is one row of the reconciled population: every
//! attribute the eligibility calculation needs, gathered from the
//! source extracts by the reconciliation stages.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One worker of the reconciled population for a competency.
///
/// Nullable attributes are `Option`s: a missing match in a left join, or a
/// derivation that could not be made, leaves them `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRecord {
    /// Worker id (matrícula), unique within the population.
    pub worker_id: u64,
    /// Union affiliation text as found in the active-workers extract.
    pub union: String,
    /// Two-letter state code derived from the union text.
    pub state_code: Option<String>,
    /// Full state name mapped from the state code.
    pub state_name: Option<String>,
    /// Job title.
    pub job_title: String,
    /// Admission date, present only for workers admitted in the target month.
    pub admission_date: Option<NaiveDate>,
    /// Termination date, when the worker appears in the terminations extract.
    pub termination_date: Option<NaiveDate>,
    /// Termination notice status (e.g., "OK").
    pub notice_status: Option<String>,
    /// Vacation days in the target month; 0 when absent from the extract.
    pub leave_days: u32,
    /// Contractual working days for the worker's state.
    pub standard_days: Option<u32>,
    /// Daily benefit value for the worker's state.
    pub daily_rate: Option<Decimal>,
}

impl WorkerRecord {
    /// Creates a record carrying only the base-population attributes.
    ///
    /// # Example
    ///
    /// ```
    /// use vr_engine::models::WorkerRecord;
    ///
    /// let record = WorkerRecord::new(34941, "SINDPD SP - SIND.TRAB.EM PROC DADOS", "ANALISTA");
    /// assert_eq!(record.leave_days, 0);
    /// assert!(record.state_code.is_none());
    /// ```
    pub fn new(worker_id: u64, union: &str, job_title: &str) -> Self {
        Self {
            worker_id,
            union: union.to_string(),
            state_code: None,
            state_name: None,
            job_title: job_title.to_string(),
            admission_date: None,
            termination_date: None,
            notice_status: None,
            leave_days: 0,
            standard_days: None,
            daily_rate: None,
        }
    }

    /// Returns true when the record carries a state code in `states`.
    pub fn is_in_state(&self, states: &[String]) -> bool {
        self.state_code
            .as_deref()
            .is_some_and(|code| states.iter().any(|s| s == code))
    }
}
