//! Business-day counting.
//!
//! This module provides the [`BusinessCalendar`], which decides whether a
//! date is a business day (Monday to Friday, not a holiday) and counts
//! business days between two dates.
//!
//! The counting primitive [`BusinessCalendar::working_days_delta`] is
//! half-open: it excludes the start date and includes the end date. Callers
//! that want both endpoints add 1 themselves, and every call site in the
//! engine does so explicitly.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::BTreeSet;

use crate::config::ExtraHoliday;
use crate::models::Competency;

use super::holidays::is_national_holiday;

/// The national business-day calendar, optionally extended with extra holidays.
///
/// # Example
///
/// ```
/// use vr_engine::calculation::BusinessCalendar;
/// use chrono::NaiveDate;
///
/// let calendar = BusinessCalendar::national();
///
/// // 2025-05-01 is Labour Day, 2025-05-03 a Saturday.
/// assert!(!calendar.is_business_day(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()));
/// assert!(!calendar.is_business_day(NaiveDate::from_ymd_opt(2025, 5, 3).unwrap()));
/// assert!(calendar.is_business_day(NaiveDate::from_ymd_opt(2025, 5, 2).unwrap()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BusinessCalendar {
    extra_holidays: BTreeSet<NaiveDate>,
}

impl BusinessCalendar {
    /// A calendar with only the national holidays.
    pub fn national() -> Self {
        Self::default()
    }

    /// A calendar with the national holidays plus `extra`.
    pub fn with_extra_holidays(extra: &[ExtraHoliday]) -> Self {
        Self {
            extra_holidays: extra.iter().map(|h| h.date).collect(),
        }
    }

    /// Checks whether `date` is a national or configured holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        is_national_holiday(date) || self.extra_holidays.contains(&date)
    }

    /// Checks whether `date` is a business day.
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.is_holiday(date)
    }

    /// Counts business days in `(start, end]`.
    ///
    /// The start date is never counted; the end date is counted when it is a
    /// business day. Equal dates give 0. Reversed arguments are swapped.
    ///
    /// # Example
    ///
    /// ```
    /// use vr_engine::calculation::BusinessCalendar;
    /// use chrono::NaiveDate;
    ///
    /// let calendar = BusinessCalendar::national();
    /// let monday = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
    /// let friday = NaiveDate::from_ymd_opt(2025, 5, 9).unwrap();
    ///
    /// // Tuesday through Friday; add 1 for the inclusive count.
    /// assert_eq!(calendar.working_days_delta(monday, friday), 4);
    /// assert_eq!(calendar.working_days_delta(monday, friday) + 1, 5);
    /// ```
    pub fn working_days_delta(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        let (mut current, end) = if start <= end {
            (start, end)
        } else {
            (end, start)
        };

        let mut count = 0;
        while current < end {
            current += Duration::days(1);
            if self.is_business_day(current) {
                count += 1;
            }
        }
        count
    }

    /// Business days in the competency month, first to last day.
    pub fn business_days_in_month(&self, competency: Competency) -> u32 {
        self.working_days_delta(competency.first_day(), competency.last_day()) + 1
    }
}
