use chrono::{Datelike, NaiveDate, Weekday};

/// Weekdays from `start` to `end`, both ends inclusive.
///
/// No holiday calendar is applied. An inverted range yields no days.
pub fn business_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .collect()
}
