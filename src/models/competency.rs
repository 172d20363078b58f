//! Competency (target month) model.
//!
//! A [`Competency`] is the (month, year) period a benefit computation
//! applies to. It can only be built through [`Competency::new`], so every
//! instance is a valid calendar month.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{EngineError, EngineResult};

/// A validated (month, year) pair.
///
/// # Example
///
/// ```
/// use vr_engine::models::Competency;
/// use chrono::NaiveDate;
///
/// let competency = Competency::new(5, 2025).unwrap();
/// assert_eq!(competency.label(), "05/2025");
/// assert_eq!(competency.last_day(), NaiveDate::from_ymd_opt(2025, 5, 31).unwrap());
/// assert!(Competency::new(13, 2025).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Competency {
    year: i32,
    month: u32,
}

impl Competency {
    /// Builds a competency, rejecting months outside 1-12 and non-positive years.
    pub fn new(month: u32, year: i32) -> EngineResult<Self> {
        if year < 1 || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(EngineError::InvalidCompetency { month, year });
        }
        // December needs the first day of the following year to exist.
        if month == 12 && NaiveDate::from_ymd_opt(year + 1, 1, 1).is_none() {
            return Err(EngineError::InvalidCompetency { month, year });
        }
        Ok(Self { year, month })
    }

    /// The target month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The target year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The first calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("validated competency")
    }

    /// The last calendar day of the month.
    pub fn last_day(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .expect("validated competency")
    }

    /// Number of calendar days in the month.
    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// Checks whether a date falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The "MM/YYYY" label stored in the published table.
    pub fn label(&self) -> String {
        format!("{:02}/{}", self.month, self.year)
    }
}

impl std::fmt::Display for Competency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
