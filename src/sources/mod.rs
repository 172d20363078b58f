//! Source extracts.
//!
//! Reading the CSV extracts (one per concern) into typed, in-memory
//! tables. Header names and file names come from `sources.yaml`.

mod loader;
mod records;
mod table;

pub use loader::{
    SourceLoader, read_active_workers, read_admissions, read_leave_days, read_noted_workers,
    read_state_rates, read_state_workdays, read_terminations,
};
pub use records::{
    ActiveWorker, AdmissionEntry, LeaveDaysEntry, NotedWorker, SourceTables, StateRateEntry,
    StateWorkdaysEntry, TerminationEntry,
};
pub use table::{
    Column, RawTable, Row, normalize_header, parse_amount, parse_date, parse_day_count,
    parse_worker_id,
};

/// Logical name of the active-workers extract.
pub const ACTIVE_WORKERS: &str = "active_workers";
/// Logical name of the vacation extract.
pub const LEAVE_DAYS: &str = "leave_days";
/// Logical name of the terminations extract.
pub const TERMINATIONS: &str = "terminations";
/// Logical name of the admissions extract.
pub const ADMISSIONS: &str = "admissions";
/// Logical name of the per-state rate extract.
pub const STATE_RATES: &str = "state_rates";
/// Logical name of the per-union working days extract.
pub const STATE_WORKDAYS: &str = "state_workdays";
/// Logical name of the overseas list.
pub const OVERSEAS: &str = "overseas";
/// Logical name of the leave-of-absence list.
pub const LEAVE_OF_ABSENCE: &str = "leave_of_absence";
