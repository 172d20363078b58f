//! Data-quality checks on the reconciled population.

use crate::models::{DataQualityWarning, WarningCode, WorkerRecord};

/// Reports the derivation gaps of each record.
///
/// A record produces at most one warning per gap, and a gap upstream
/// suppresses the ones that follow from it: a worker with no state code is
/// not also reported for a missing rate.
pub fn collect_warnings(records: &[WorkerRecord]) -> Vec<DataQualityWarning> {
    let mut warnings = Vec::new();
    for record in records {
        let Some(code) = record.state_code.as_deref() else {
            warnings.push(DataQualityWarning::new(
                WarningCode::MissingStateCode,
                record.worker_id,
                format!("union '{}' has no state token", record.union),
            ));
            continue;
        };

        if record.state_name.is_none() {
            warnings.push(DataQualityWarning::new(
                WarningCode::UnmappedState,
                record.worker_id,
                format!("state code '{}' is not in the state table", code),
            ));
        } else if record.daily_rate.is_none() {
            warnings.push(DataQualityWarning::new(
                WarningCode::MissingDailyRate,
                record.worker_id,
                format!("no daily rate for state '{}'", code),
            ));
        }

        if record.standard_days.is_none() {
            warnings.push(DataQualityWarning::new(
                WarningCode::MissingStandardDays,
                record.worker_id,
                format!("no standard working days for state '{}'", code),
            ));
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn complete(id: u64) -> WorkerRecord {
        let mut record = WorkerRecord::new(id, "SINDPD SP - X", "ANALISTA");
        record.state_code = Some("SP".to_string());
        record.state_name = Some("São Paulo".to_string());
        record.daily_rate = Some(Decimal::new(3750, 2));
        record.standard_days = Some(22);
        record
    }

    #[test]
    fn test_complete_record_has_no_warnings() {
        assert!(collect_warnings(&[complete(1)]).is_empty());
    }

    #[test]
    fn test_missing_state_code_suppresses_others() {
        let record = WorkerRecord::new(7, "SINDPD", "ANALISTA");
        let warnings = collect_warnings(&[record]);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, WarningCode::MissingStateCode);
        assert_eq!(warnings[0].worker_id, 7);
    }

    #[test]
    fn test_unmapped_state_and_missing_days() {
        let mut record = WorkerRecord::new(8, "SINDPD MG - X", "ANALISTA");
        record.state_code = Some("MG".to_string());

        let codes: Vec<WarningCode> = collect_warnings(&[record])
            .into_iter()
            .map(|w| w.code)
            .collect();
        assert_eq!(
            codes,
            vec![WarningCode::UnmappedState, WarningCode::MissingStandardDays]
        );
    }

    #[test]
    fn test_missing_rate_for_known_state() {
        let mut record = complete(9);
        record.daily_rate = None;
        let warnings = collect_warnings(&[record]);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, WarningCode::MissingDailyRate);
    }
}
