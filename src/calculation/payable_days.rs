//! Payable-days calculation.
//!
//! This module computes how many days of benefit a reconciled worker is
//! owed for the target competency. Rules are applied in a fixed order and
//! each one overwrites the result of the previous:
//!
//! 1. baseline: the standard working days of the worker's state
//! 2. admission in the target month: business days from admission to month end
//! 3. termination in the target month: zero when notified on or before the
//!    cutoff day, otherwise business days from month start to termination
//! 4. leave-deduction states: vacation days are subtracted
//! 5. the result is clamped at zero
//!
//! A worker admitted and terminated in the same month therefore ends up
//! with the termination result.

use chrono::Datelike;

use crate::config::RulesConfig;
use crate::models::{Competency, PayableDaysRule, WorkerRecord};

use super::business_days::BusinessCalendar;

/// The result of a payable-days calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayableDaysResult {
    /// Payable days after clamping, or `None` when the state baseline is
    /// unknown and no admission or termination rule replaced it.
    pub payable_days: Option<u32>,
    /// The last rule that set the day count.
    pub rule: PayableDaysRule,
    /// Whether the admission date falls in the target month.
    pub admitted_this_month: bool,
    /// Leave days subtracted from the day count.
    pub leave_days_deducted: u32,
}

/// Calculates the payable days of one worker for `competency`.
///
/// # Example
///
/// ```
/// use vr_engine::calculation::{calculate_payable_days, BusinessCalendar};
/// use vr_engine::config::RulesConfig;
/// use vr_engine::models::{Competency, PayableDaysRule, WorkerRecord};
///
/// let mut record = WorkerRecord::new(1, "SITEPD PR - SIND DOS TRAB", "ANALISTA");
/// record.state_code = Some("PR".to_string());
/// record.standard_days = Some(22);
/// record.leave_days = 3;
///
/// let result = calculate_payable_days(
///     &record,
///     Competency::new(5, 2025).unwrap(),
///     &BusinessCalendar::national(),
///     &RulesConfig::default(),
/// );
/// assert_eq!(result.payable_days, Some(19));
/// assert_eq!(result.rule, PayableDaysRule::StateBaseline);
/// ```
pub fn calculate_payable_days(
    record: &WorkerRecord,
    competency: Competency,
    calendar: &BusinessCalendar,
    rules: &RulesConfig,
) -> PayableDaysResult {
    let mut payable: Option<i64> = record.standard_days.map(i64::from);
    let mut rule = PayableDaysRule::StateBaseline;

    let admitted_this_month = record
        .admission_date
        .is_some_and(|date| competency.contains(date));

    if admitted_this_month {
        if let Some(admission) = record.admission_date {
            let days = calendar.working_days_delta(admission, competency.last_day()) + 1;
            payable = Some(i64::from(days));
            rule = PayableDaysRule::Admission;
        }
    }

    if let Some(termination) = record.termination_date {
        if competency.contains(termination) {
            if termination.day() <= rules.termination_cutoff_day
                && is_notice_ok(record.notice_status.as_deref(), &rules.notice_ok_marker)
            {
                payable = Some(0);
                rule = PayableDaysRule::NotifiedTermination;
            } else {
                let days = calendar.working_days_delta(competency.first_day(), termination) + 1;
                payable = Some(i64::from(days));
                rule = PayableDaysRule::Termination;
            }
        }
    }

    let mut leave_days_deducted = 0;
    if record.is_in_state(&rules.leave_deduction_states) {
        if let Some(days) = payable {
            payable = Some(days - i64::from(record.leave_days));
            leave_days_deducted = record.leave_days;
        }
    }

    PayableDaysResult {
        payable_days: payable.map(|days| days.max(0) as u32),
        rule,
        admitted_this_month,
        leave_days_deducted,
    }
}

fn is_notice_ok(status: Option<&str>, marker: &str) -> bool {
    status.is_some_and(|s| s.trim().to_uppercase() == marker.to_uppercase())
}
