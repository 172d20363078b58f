//! Calculation logic for the VR benefit engine.
//!
//! This module contains the calendar service (national holidays and
//! business-day counting), the payable-days rules and the monetary totals.

mod benefit_totals;
mod business_days;
mod holidays;
mod payable_days;

pub use benefit_totals::{BenefitTotals, calculate_benefit_totals};
pub use business_days::BusinessCalendar;
pub use holidays::{easter_sunday, is_national_holiday, national_holiday_name};
pub use payable_days::{PayableDaysResult, calculate_payable_days};
