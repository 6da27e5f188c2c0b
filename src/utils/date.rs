use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

use crate::consts::{DATE_FORMAT, DAY_BOUNDARY_OFFSET_SECS};

/// Offset that decides when one day's thread rolls over to the next.
pub(crate) fn day_boundary_offset() -> FixedOffset {
    FixedOffset::east_opt(DAY_BOUNDARY_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Calendar date of `now` at the day boundary offset.
pub(crate) fn day_of(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&day_boundary_offset()).date_naive()
}

/// `day_of(now)` formatted as `YYYY-MM-DD`.
pub(crate) fn today_string(now: DateTime<Utc>) -> String {
    day_of(now).format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse::<DateTime<Utc>>().unwrap()
    }

    #[test]
    fn offset_is_plus_nine_hours() {
        assert_eq!(day_boundary_offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn before_jst_midnight_is_same_day() {
        assert_eq!(today_string(utc("2024-01-01T14:59:59Z")), "2024-01-01");
    }

    #[test]
    fn jst_midnight_rolls_over() {
        assert_eq!(today_string(utc("2024-01-01T15:00:00Z")), "2024-01-02");
    }

    #[test]
    fn utc_early_morning_is_already_jst_day() {
        assert_eq!(today_string(utc("2024-03-10T00:30:00Z")), "2024-03-10");
        assert_eq!(today_string(utc("2024-12-31T23:00:00Z")), "2025-01-01");
    }

    #[test]
    fn day_of_returns_naive_date() {
        let d = day_of(utc("2024-02-28T20:00:00Z"));
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }
}
