//! Monetary totals of the benefit.
//!
//! The total is `payable_days * daily_rate`. It is split between the
//! employer and the worker by the configured shares. Decimal products are
//! exact, so the two parts add up to the total without rounding.

use rust_decimal::Decimal;

use crate::config::RulesConfig;

/// Total value and its split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenefitTotals {
    /// `payable_days * daily_rate`.
    pub total_value: Decimal,
    /// Employer share of the total.
    pub employer_cost: Decimal,
    /// Worker share of the total.
    pub employee_discount: Decimal,
}

/// Computes the totals.
///
/// Returns `None` if the days or the rate are unknown, or if a product
/// does not fit in a `Decimal`.
///
/// # Example
///
/// ```
/// use vr_engine::calculation::calculate_benefit_totals;
/// use vr_engine::config::RulesConfig;
/// use rust_decimal::Decimal;
///
/// let totals = calculate_benefit_totals(Some(22), Some(Decimal::new(3750, 2)), &RulesConfig::default())
///     .unwrap();
/// assert_eq!(totals.total_value, Decimal::new(82500, 2));
/// assert_eq!(totals.employer_cost, Decimal::new(660, 0));
/// assert_eq!(totals.employee_discount, Decimal::new(165, 0));
/// ```
pub fn calculate_benefit_totals(
    payable_days: Option<u32>,
    daily_rate: Option<Decimal>,
    rules: &RulesConfig,
) -> Option<BenefitTotals> {
    let total_value = Decimal::from(payable_days?).checked_mul(daily_rate?)?;
    let employer_cost = total_value.checked_mul(rules.employer_share)?;
    let employee_discount = total_value.checked_mul(rules.employee_share)?;

    Some(BenefitTotals {
        total_value,
        employer_cost,
        employee_discount,
    })
}
