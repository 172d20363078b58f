//! National holiday detection.
//!
//! Fixed-date holidays of the Brazilian national calendar plus Good Friday,
//! which moves with Easter. Regional holidays are not national and are
//! added through `holidays.yaml` when needed.

use chrono::{Datelike, Duration, NaiveDate};

/// Fixed-date national holidays as (month, day, name).
const FIXED_HOLIDAYS: [(u32, u32, &str); 8] = [
    (1, 1, "Confraternização Universal"),
    (4, 21, "Tiradentes"),
    (5, 1, "Dia do Trabalho"),
    (9, 7, "Independência do Brasil"),
    (10, 12, "Nossa Senhora Aparecida"),
    (11, 2, "Finados"),
    (11, 15, "Proclamação da República"),
    (12, 25, "Natal"),
];

/// Black Consciousness Day became a national holiday in 2024.
const BLACK_CONSCIOUSNESS_FROM: i32 = 2024;

/// Computes Easter Sunday for a Gregorian year.
///
/// Uses the anonymous Gregorian algorithm (Meeus/Jones/Butcher).
///
/// # Example
///
/// ```
/// use vr_engine::calculation::easter_sunday;
/// use chrono::NaiveDate;
///
/// assert_eq!(easter_sunday(2025), NaiveDate::from_ymd_opt(2025, 4, 20));
/// ```
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// Returns the name of the national holiday on `date`, if any.
pub fn national_holiday_name(date: NaiveDate) -> Option<&'static str> {
    let (month, day) = (date.month(), date.day());

    if let Some((_, _, name)) = FIXED_HOLIDAYS
        .iter()
        .find(|(m, d, _)| *m == month && *d == day)
    {
        return Some(name);
    }

    if month == 11 && day == 20 && date.year() >= BLACK_CONSCIOUSNESS_FROM {
        return Some("Dia Nacional de Zumbi e da Consciência Negra");
    }

    let good_friday = easter_sunday(date.year()).map(|easter| easter - Duration::days(2));
    if good_friday == Some(date) {
        return Some("Sexta-feira Santa");
    }

    None
}

/// Checks whether `date` is a national holiday.
pub fn is_national_holiday(date: NaiveDate) -> bool {
    national_holiday_name(date).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_easter_known_years() {
        assert_eq!(easter_sunday(2024), Some(date(2024, 3, 31)));
        assert_eq!(easter_sunday(2025), Some(date(2025, 4, 20)));
        assert_eq!(easter_sunday(2026), Some(date(2026, 4, 5)));
        assert_eq!(easter_sunday(2000), Some(date(2000, 4, 23)));
    }

    #[test]
    fn test_fixed_holidays() {
        assert!(is_national_holiday(date(2025, 1, 1)));
        assert!(is_national_holiday(date(2025, 4, 21)));
        assert!(is_national_holiday(date(2025, 5, 1)));
        assert!(is_national_holiday(date(2025, 12, 25)));
        assert!(!is_national_holiday(date(2025, 5, 2)));
    }

    #[test]
    fn test_good_friday_moves_with_easter() {
        assert_eq!(national_holiday_name(date(2025, 4, 18)), Some("Sexta-feira Santa"));
        assert!(is_national_holiday(date(2024, 3, 29)));
        assert!(!is_national_holiday(date(2024, 4, 18)));
    }

    #[test]
    fn test_black_consciousness_only_from_2024() {
        assert!(is_national_holiday(date(2024, 11, 20)));
        assert!(!is_national_holiday(date(2023, 11, 20)));
    }
}
