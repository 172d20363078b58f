//! Typed rows of the source extracts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A row of the active-workers extract (the base population).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveWorker {
    /// Worker id.
    pub worker_id: u64,
    /// Union affiliation text.
    pub union: String,
    /// Job title.
    pub job_title: String,
}

/// A row of the vacation extract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDaysEntry {
    /// Worker id.
    pub worker_id: u64,
    /// Vacation days in the target month.
    pub leave_days: u32,
}

/// A row of the terminations extract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationEntry {
    /// Worker id.
    pub worker_id: u64,
    /// Termination date.
    pub termination_date: Option<NaiveDate>,
    /// Notice status (e.g., "OK").
    pub notice_status: Option<String>,
}

/// A row of the admissions extract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionEntry {
    /// Worker id.
    pub worker_id: u64,
    /// Admission date.
    pub admission_date: Option<NaiveDate>,
}

/// A row of the per-state daily rate extract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRateEntry {
    /// Full state name.
    pub state_name: String,
    /// Daily benefit value.
    pub daily_rate: Decimal,
}

/// A row of the per-union standard working days extract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateWorkdaysEntry {
    /// Union text; its second token is the state code.
    pub union: String,
    /// Standard working days.
    pub standard_days: u32,
}

/// A row of the overseas or leave-of-absence lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotedWorker {
    /// Worker id.
    pub worker_id: u64,
    /// Free-text note.
    pub note: Option<String>,
}

/// Every extract the pipeline reads, already typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTables {
    /// Base population.
    pub active_workers: Vec<ActiveWorker>,
    /// Vacation days.
    pub leave_days: Vec<LeaveDaysEntry>,
    /// Terminations.
    pub terminations: Vec<TerminationEntry>,
    /// Admissions in the target month.
    pub admissions: Vec<AdmissionEntry>,
    /// Daily rate per state name.
    pub state_rates: Vec<StateRateEntry>,
    /// Standard working days per union.
    pub state_workdays: Vec<StateWorkdaysEntry>,
    /// Workers abroad.
    pub overseas: Vec<NotedWorker>,
    /// Workers on leave of absence.
    pub leave_of_absence: Vec<NotedWorker>,
}
