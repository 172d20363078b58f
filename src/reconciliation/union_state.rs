//! Union-state derivation.
//!
//! Union affiliation texts look like `"SINDPD SP - SIND.TRAB.EM PROC DADOS"`;
//! the second whitespace-delimited token is the state code.

use crate::config::PipelineConfig;
use crate::models::WorkerRecord;

/// Extracts the state code from a union affiliation text.
///
/// Returns `None` when the text has fewer than two tokens.
///
/// # Example
///
/// ```
/// use vr_engine::reconciliation::derive_state_code;
///
/// assert_eq!(derive_state_code("SINDPD SP - SIND.TRAB.EM PROC DADOS"), Some("SP".to_string()));
/// assert_eq!(derive_state_code("SINDPD"), None);
/// ```
pub fn derive_state_code(union: &str) -> Option<String> {
    union.split_whitespace().nth(1).map(str::to_string)
}

/// Attaches the state code and state name to every record.
pub fn derive_states(records: Vec<WorkerRecord>, config: &PipelineConfig) -> Vec<WorkerRecord> {
    records
        .into_iter()
        .map(|record| {
            let state_code = derive_state_code(&record.union);
            let state_name = state_code
                .as_deref()
                .and_then(|code| config.state_name(code))
                .map(str::to_string);
            WorkerRecord {
                state_code,
                state_name,
                ..record
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_token_is_state_code() {
        assert_eq!(
            derive_state_code("SITEPD PR - SIND DOS TRAB EM EMPR PRIVADAS"),
            Some("PR".to_string())
        );
        assert_eq!(
            derive_state_code("SINDPPD RS - SINDICATO DOS TRAB. EM PROC."),
            Some("RS".to_string())
        );
    }

    #[test]
    fn test_repeated_whitespace_is_one_separator() {
        assert_eq!(derive_state_code("  SINDPD   RJ  -  X"), Some("RJ".to_string()));
    }

    #[test]
    fn test_too_few_tokens_gives_none() {
        assert_eq!(derive_state_code(""), None);
        assert_eq!(derive_state_code("SINDPD"), None);
    }

    #[test]
    fn test_derive_states_maps_known_codes() {
        let config = PipelineConfig::default();
        let records = vec![
            WorkerRecord::new(1, "SINDPD SP - X", "ANALISTA"),
            WorkerRecord::new(2, "SINDPD MG - X", "ANALISTA"),
            WorkerRecord::new(3, "SINDPD", "ANALISTA"),
        ];

        let derived = derive_states(records, &config);
        assert_eq!(derived[0].state_code.as_deref(), Some("SP"));
        assert_eq!(derived[0].state_name.as_deref(), Some("São Paulo"));
        assert_eq!(derived[1].state_code.as_deref(), Some("MG"));
        assert_eq!(derived[1].state_name, None);
        assert_eq!(derived[2].state_code, None);
        assert_eq!(derived[2].state_name, None);
    }
}
