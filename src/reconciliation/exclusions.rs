//! Population exclusions.
//!
//! Three filters remove workers who are not entitled to the benefit:
//! denied job titles, workers on leave of absence, and workers abroad who
//! have not returned. Each filter returns the kept rows and the ids it
//! removed; row order is preserved.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::error::{EngineError, EngineResult};
use crate::models::{DataQualityWarning, WarningCode, WorkerRecord};
use crate::sources::NotedWorker;

static RETURN_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})\s*/\s*(\d{1,2})").expect("return date pattern is valid")
});

/// Rows kept by a filter and the worker ids it removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionOutcome {
    /// Rows that passed the filter.
    pub kept: Vec<WorkerRecord>,
    /// Ids of the removed rows, in population order.
    pub excluded: Vec<u64>,
}

fn partition(records: Vec<WorkerRecord>, exclude: impl Fn(&WorkerRecord) -> bool) -> ExclusionOutcome {
    let (removed, kept): (Vec<_>, Vec<_>) = records.into_iter().partition(|r| exclude(r));
    ExclusionOutcome {
        kept,
        excluded: removed.iter().map(|r| r.worker_id).collect(),
    }
}

/// Checks whether a job title contains any denied term, ignoring case.
///
/// # Example
///
/// ```
/// use vr_engine::reconciliation::is_denied_title;
///
/// let denylist = vec!["DIRETOR".to_string(), "ESTAGIÁRIO".to_string()];
/// assert!(is_denied_title("Diretor Comercial", &denylist));
/// assert!(is_denied_title("estagiário de dados", &denylist));
/// assert!(!is_denied_title("ANALISTA", &denylist));
/// ```
pub fn is_denied_title(job_title: &str, denylist: &[String]) -> bool {
    let title = job_title.to_uppercase();
    denylist
        .iter()
        .any(|term| title.contains(&term.to_uppercase()))
}

/// Removes workers whose job title matches the denylist.
pub fn exclude_job_titles(records: Vec<WorkerRecord>, denylist: &[String]) -> ExclusionOutcome {
    partition(records, |r| is_denied_title(&r.job_title, denylist))
}

/// Removes every worker present in the leave-of-absence list.
pub fn exclude_leave_of_absence(
    records: Vec<WorkerRecord>,
    on_leave: &[NotedWorker],
) -> ExclusionOutcome {
    let ids: HashSet<u64> = on_leave.iter().map(|w| w.worker_id).collect();
    partition(records, |r| ids.contains(&r.worker_id))
}

/// Removes workers listed abroad unless their note carries the returned marker.
///
/// A worker listed more than once is removed if any entry lacks the marker.
pub fn exclude_overseas(
    records: Vec<WorkerRecord>,
    overseas: &[NotedWorker],
    returned_marker: &str,
) -> ExclusionOutcome {
    let marker = returned_marker.to_lowercase();
    let abroad: HashSet<u64> = overseas
        .iter()
        .filter(|w| {
            !w.note
                .as_deref()
                .is_some_and(|note| note.to_lowercase().contains(&marker))
        })
        .map(|w| w.worker_id)
        .collect();
    partition(records, |r| abroad.contains(&r.worker_id))
}

/// Extracts the "dd/mm" return date from a leave-of-absence note.
///
/// Returns `None` unless the note matches `pattern` and contains a date.
pub fn leave_return_date(note: &str, pattern: &Regex) -> Option<String> {
    if !pattern.is_match(note) {
        return None;
    }
    RETURN_DATE
        .captures(note)
        .map(|caps| format!("{}/{}", &caps[1], &caps[2]))
}

/// Builds informational warnings for workers of `population` whose leave
/// note announces a return. The workers stay excluded.
pub fn leave_return_warnings(
    population: &[u64],
    on_leave: &[NotedWorker],
    pattern: &str,
) -> EngineResult<Vec<DataQualityWarning>> {
    let pattern = Regex::new(pattern).map_err(|e| EngineError::InvalidConfig {
        message: format!("leave_return_pattern is not a valid regex: {}", e),
    })?;
    let population: HashSet<u64> = population.iter().copied().collect();

    let mut seen = HashSet::new();
    let mut warnings = Vec::new();
    for worker in on_leave {
        if !population.contains(&worker.worker_id) || !seen.insert(worker.worker_id) {
            continue;
        }
        let Some(note) = worker.note.as_deref() else {
            continue;
        };
        if let Some(date) = leave_return_date(note, &pattern) {
            warnings.push(DataQualityWarning::new(
                WarningCode::LeaveReturnNoted,
                worker.worker_id,
                format!("leave note announces a return on {}; worker excluded", date),
            ));
        }
    }
    Ok(warnings)
}
