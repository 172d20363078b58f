//! Published benefit row.
//!
//! A [`BenefitRow`] is one line of the published purchase table: the
//! reconciled worker attributes plus every value derived by the
//! eligibility calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The rule that produced a row's payable days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayableDaysRule {
    /// Standard working days of the worker's state.
    StateBaseline,
    /// Business days from the admission date to the end of the month.
    Admission,
    /// Termination on or before the cutoff with notice given: nothing is payable.
    NotifiedTermination,
    /// Business days from the start of the month to the termination date.
    Termination,
}

impl std::fmt::Display for PayableDaysRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayableDaysRule::StateBaseline => write!(f, "state_baseline"),
            PayableDaysRule::Admission => write!(f, "admission"),
            PayableDaysRule::NotifiedTermination => write!(f, "notified_termination"),
            PayableDaysRule::Termination => write!(f, "termination"),
        }
    }
}

/// One row of the published table.
///
/// Monetary fields are `None` whenever the daily rate or the payable days
/// could not be determined for the worker.
///
/// # Example
///
/// ```
/// use vr_engine::models::{BenefitRow, PayableDaysRule};
/// use rust_decimal::Decimal;
///
/// let row = BenefitRow {
///     worker_id: 34941,
///     union: "SINDPD SP - SIND.TRAB.EM PROC DADOS".to_string(),
///     competency: "05/2025".to_string(),
///     payable_days: Some(22),
///     daily_rate: Some(Decimal::new(3750, 2)),
///     total_value: Some(Decimal::new(82500, 2)),
///     employer_cost: Some(Decimal::new(66000, 2)),
///     employee_discount: Some(Decimal::new(16500, 2)),
///     state_code: Some("SP".to_string()),
///     admission_date: None,
///     termination_date: None,
///     job_title: "ANALISTA".to_string(),
///     business_days_in_month: 21,
///     admitted_this_month: false,
///     rule: PayableDaysRule::StateBaseline,
///     leave_days_deducted: 0,
/// };
/// assert!(row.is_balanced());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitRow {
    /// Worker id (matrícula).
    pub worker_id: u64,
    /// Union affiliation text.
    pub union: String,
    /// Competency label, "MM/YYYY".
    pub competency: String,
    /// Days for which the benefit is paid.
    pub payable_days: Option<u32>,
    /// Daily benefit value for the worker's state.
    pub daily_rate: Option<Decimal>,
    /// `payable_days * daily_rate`.
    pub total_value: Option<Decimal>,
    /// Employer share of the total.
    pub employer_cost: Option<Decimal>,
    /// Worker share of the total.
    pub employee_discount: Option<Decimal>,
    /// Two-letter state code derived from the union text.
    pub state_code: Option<String>,
    /// Admission date when the worker was admitted in the target month.
    pub admission_date: Option<NaiveDate>,
    /// Termination date, if any.
    pub termination_date: Option<NaiveDate>,
    /// Job title.
    pub job_title: String,
    /// Business days in the target month per the national calendar.
    pub business_days_in_month: u32,
    /// Whether the admission date falls in the target month.
    pub admitted_this_month: bool,
    /// The rule that set the payable days before any leave deduction.
    pub rule: PayableDaysRule,
    /// Leave days subtracted from the payable days.
    pub leave_days_deducted: u32,
}

impl BenefitRow {
    /// Checks the monetary identities of the row.
    ///
    /// `employer_cost + employee_discount == total_value`, and
    /// `total_value == payable_days * daily_rate` when both are known.
    /// Rows without monetary values are balanced trivially.
    pub fn is_balanced(&self) -> bool {
        match (self.total_value, self.employer_cost, self.employee_discount) {
            (Some(total), Some(employer), Some(employee)) => {
                let product_matches = match (self.payable_days, self.daily_rate) {
                    (Some(days), Some(rate)) => Decimal::from(days) * rate == total,
                    _ => false,
                };
                product_matches && employer + employee == total
            }
            (None, None, None) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_row() -> BenefitRow {
        BenefitRow {
            worker_id: 1,
            union: "SINDPD SP".to_string(),
            competency: "05/2025".to_string(),
            payable_days: Some(22),
            daily_rate: Some(dec("37.50")),
            total_value: Some(dec("825.00")),
            employer_cost: Some(dec("660.00")),
            employee_discount: Some(dec("165.00")),
            state_code: Some("SP".to_string()),
            admission_date: None,
            termination_date: None,
            job_title: "ANALISTA".to_string(),
            business_days_in_month: 21,
            admitted_this_month: false,
            rule: PayableDaysRule::StateBaseline,
            leave_days_deducted: 0,
        }
    }

    #[test]
    fn test_balanced_row() {
        assert!(sample_row().is_balanced());
    }

    #[test]
    fn test_unbalanced_split_detected() {
        let mut row = sample_row();
        row.employee_discount = Some(dec("165.01"));
        assert!(!row.is_balanced());
    }

    #[test]
    fn test_row_without_money_is_balanced() {
        let mut row = sample_row();
        row.daily_rate = None;
        row.total_value = None;
        row.employer_cost = None;
        row.employee_discount = None;
        assert!(row.is_balanced());
    }

    #[test]
    fn test_partial_money_is_unbalanced() {
        let mut row = sample_row();
        row.employer_cost = None;
        assert!(!row.is_balanced());
    }

    #[test]
    fn test_rule_serialization() {
        assert_eq!(
            serde_json::to_string(&PayableDaysRule::NotifiedTermination).unwrap(),
            "\"notified_termination\""
        );
        assert_eq!(PayableDaysRule::Admission.to_string(), "admission");
    }

    #[test]
    fn test_row_serializes_decimals_as_strings() {
        let json = serde_json::to_string(&sample_row()).unwrap();
        assert!(json.contains("\"total_value\":\"825.00\""));
        assert!(json.contains("\"competency\":\"05/2025\""));
        assert!(json.contains("\"rule\":\"state_baseline\""));
    }
}
