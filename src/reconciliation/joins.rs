//! Left joins onto the base population.
//!
//! Every stage takes the population by value and returns a new one with the
//! same rows, in the same order, enriched with the attributes of one extract.
//! Extracts keyed by worker id must not repeat a worker id; per-state tables
//! may repeat a key only with the same value.

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::{EngineError, EngineResult};
use crate::models::WorkerRecord;
use crate::sources::{
    ACTIVE_WORKERS, ADMISSIONS, ActiveWorker, AdmissionEntry, LEAVE_DAYS, LeaveDaysEntry,
    STATE_RATES, STATE_WORKDAYS, StateRateEntry, StateWorkdaysEntry, TERMINATIONS,
    TerminationEntry,
};

use super::union_state::derive_state_code;

/// Indexes entries by worker id, rejecting repeated ids.
fn index_by_worker<'a, T>(
    source_name: &str,
    entries: &'a [T],
    worker_id: impl Fn(&T) -> u64,
) -> EngineResult<HashMap<u64, &'a T>> {
    let mut index = HashMap::with_capacity(entries.len());
    for entry in entries {
        let id = worker_id(entry);
        if index.insert(id, entry).is_some() {
            return Err(EngineError::DuplicateWorkerId {
                source_name: source_name.to_string(),
                worker_id: id,
            });
        }
    }
    Ok(index)
}

/// Inserts a per-state value, accepting repeats only when they agree.
fn insert_consistent<V: PartialEq>(
    index: &mut HashMap<String, V>,
    source_name: &str,
    key: String,
    value: V,
) -> EngineResult<()> {
    match index.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
        Entry::Occupied(slot) if *slot.get() == value => Ok(()),
        Entry::Occupied(slot) => Err(EngineError::DuplicateKey {
            source_name: source_name.to_string(),
            key: slot.key().clone(),
        }),
    }
}

/// Builds the base population from the active-workers extract.
pub fn base_population(workers: &[ActiveWorker]) -> EngineResult<Vec<WorkerRecord>> {
    index_by_worker(ACTIVE_WORKERS, workers, |w| w.worker_id)?;
    Ok(workers
        .iter()
        .map(|w| WorkerRecord::new(w.worker_id, &w.union, &w.job_title))
        .collect())
}

/// Attaches vacation days; workers absent from the extract keep 0.
pub fn join_leave_days(
    records: Vec<WorkerRecord>,
    entries: &[LeaveDaysEntry],
) -> EngineResult<Vec<WorkerRecord>> {
    let index = index_by_worker(LEAVE_DAYS, entries, |e| e.worker_id)?;
    Ok(records
        .into_iter()
        .map(|record| WorkerRecord {
            leave_days: index
                .get(&record.worker_id)
                .map(|e| e.leave_days)
                .unwrap_or(0),
            ..record
        })
        .collect())
}

/// Attaches termination date and notice status.
pub fn join_terminations(
    records: Vec<WorkerRecord>,
    entries: &[TerminationEntry],
) -> EngineResult<Vec<WorkerRecord>> {
    let index = index_by_worker(TERMINATIONS, entries, |e| e.worker_id)?;
    Ok(records
        .into_iter()
        .map(|record| match index.get(&record.worker_id) {
            Some(entry) => WorkerRecord {
                termination_date: entry.termination_date,
                notice_status: entry.notice_status.clone(),
                ..record
            },
            None => record,
        })
        .collect())
}

/// Attaches the admission date of workers admitted in the target month.
pub fn join_admissions(
    records: Vec<WorkerRecord>,
    entries: &[AdmissionEntry],
) -> EngineResult<Vec<WorkerRecord>> {
    let index = index_by_worker(ADMISSIONS, entries, |e| e.worker_id)?;
    Ok(records
        .into_iter()
        .map(|record| match index.get(&record.worker_id) {
            Some(entry) => WorkerRecord {
                admission_date: entry.admission_date,
                ..record
            },
            None => record,
        })
        .collect())
}

/// Attaches the daily rate, matched on the full state name.
pub fn join_state_rates(
    records: Vec<WorkerRecord>,
    entries: &[StateRateEntry],
) -> EngineResult<Vec<WorkerRecord>> {
    let mut index: HashMap<String, Decimal> = HashMap::new();
    for entry in entries {
        insert_consistent(
            &mut index,
            STATE_RATES,
            entry.state_name.clone(),
            entry.daily_rate,
        )?;
    }

    Ok(records
        .into_iter()
        .map(|record| {
            let daily_rate = record
                .state_name
                .as_ref()
                .and_then(|name| index.get(name))
                .copied();
            WorkerRecord {
                daily_rate,
                ..record
            }
        })
        .collect())
}

/// Attaches the standard working days, matched on the state code derived
/// from the union text of the working-days extract.
pub fn join_state_workdays(
    records: Vec<WorkerRecord>,
    entries: &[StateWorkdaysEntry],
) -> EngineResult<Vec<WorkerRecord>> {
    let mut index: HashMap<String, u32> = HashMap::new();
    for entry in entries {
        match derive_state_code(&entry.union) {
            Some(code) => insert_consistent(&mut index, STATE_WORKDAYS, code, entry.standard_days)?,
            None => tracing::warn!(
                union = %entry.union,
                "Working-days row has no state code; ignored"
            ),
        }
    }

    Ok(records
        .into_iter()
        .map(|record| {
            let standard_days = record
                .state_code
                .as_ref()
                .and_then(|code| index.get(code))
                .copied();
            WorkerRecord {
                standard_days,
                ..record
            }
        })
        .collect())
}
