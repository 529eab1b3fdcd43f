//! Calendar bucketing rules.
//!
//! Everything here is a pure mapping from a date or timestamp to the bucket
//! it belongs to. Summation lives in [`crate::resample`]; keeping the two
//! apart lets the boundary rules be tested on their own.

use std::fmt;

use time::{Date, Duration, Month, PrimitiveDateTime};

/// Calendar granularity used as an aggregation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Hour,
    Day,
    /// Monday-start week. A week that spans a month or year boundary is one bucket.
    Week,
    Month,
}

/// `date` at midnight plus `hour` hours.
pub fn floor_to_hour(date: Date, hour: u8) -> PrimitiveDateTime {
    date.midnight() + Duration::hours(i64::from(hour))
}

/// The Monday on or before `date`.
pub fn week_start(date: Date) -> Date {
    let offset = date.weekday().number_days_from_monday();
    date - Duration::days(i64::from(offset))
}

/// First day of the month containing `date`.
pub fn month_start(date: Date) -> Date {
    date - Duration::days(i64::from(date.day() - 1))
}

/// Number of days in `month` of `year` (Gregorian rules).
pub fn days_in_month(year: i32, month: Month) -> u8 {
    time::util::days_in_year_month(year, month)
}

/// True iff `date` is the last calendar day of its month.
pub fn is_month_end(date: Date) -> bool {
    date.day() == days_in_month(date.year(), date.month())
}

/// Representative timestamp of the bucket containing `ts`: the bucket's first instant.
pub fn bucket_start(ts: PrimitiveDateTime, granularity: Granularity) -> PrimitiveDateTime {
    match granularity {
        Granularity::Hour => floor_to_hour(ts.date(), ts.hour()),
        Granularity::Day => ts.date().midnight(),
        Granularity::Week => week_start(ts.date()).midnight(),
        Granularity::Month => month_start(ts.date()).midnight(),
    }
}

/// Monday-anchored week period, identified by its Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekKey(Date);

impl WeekKey {
    pub fn of(date: Date) -> Self {
        Self(week_start(date))
    }

    pub fn start(&self) -> Date {
        self.0
    }

    /// The Sunday closing the week.
    pub fn end(&self) -> Date {
        self.0 + Duration::days(6)
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start(), self.end())
    }
}

/// Calendar month period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u8,
}

impl MonthKey {
    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: u8::from(date.month()),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn month_end_matches_reference_table() {
        let cases = [
            (date!(2024-01-31), true),
            (date!(2024-01-30), false),
            (date!(2024-02-28), false),
            (date!(2024-02-29), true),
            (date!(2023-02-28), true),
            (date!(2023-02-27), false),
            (date!(2000-02-29), true),
            (date!(1900-02-28), true),
            (date!(2024-04-30), true),
            (date!(2024-04-29), false),
            (date!(2024-06-30), true),
            (date!(2024-09-30), true),
            (date!(2024-11-30), true),
            (date!(2024-12-31), true),
            (date!(2024-12-01), false),
        ];

        for (d, expected) in cases {
            assert_eq!(is_month_end(d), expected, "{d}");
        }
    }

    #[test]
    fn days_in_february_follows_leap_rule() {
        assert_eq!(days_in_month(2024, Month::February), 29);
        assert_eq!(days_in_month(2023, Month::February), 28);
        assert_eq!(days_in_month(2000, Month::February), 29);
        assert_eq!(days_in_month(2100, Month::February), 28);
    }

    #[test]
    fn week_start_is_monday_and_spans_year_boundary() {
        // 2024-01-01 is a Monday.
        assert_eq!(week_start(date!(2024-01-01)), date!(2024-01-01));
        assert_eq!(week_start(date!(2024-01-07)), date!(2024-01-01));
        assert_eq!(week_start(date!(2024-01-08)), date!(2024-01-08));
        // 2025-01-01 is a Wednesday; its week starts in December.
        assert_eq!(week_start(date!(2025-01-01)), date!(2024-12-30));
        assert_eq!(
            WeekKey::of(date!(2024-12-31)),
            WeekKey::of(date!(2025-01-05))
        );
    }

    #[test]
    fn bucket_start_for_each_granularity() {
        let ts = datetime!(2024-03-14 17:45);
        assert_eq!(bucket_start(ts, Granularity::Hour), datetime!(2024-03-14 17:00));
        assert_eq!(bucket_start(ts, Granularity::Day), datetime!(2024-03-14 00:00));
        assert_eq!(bucket_start(ts, Granularity::Week), datetime!(2024-03-11 00:00));
        assert_eq!(bucket_start(ts, Granularity::Month), datetime!(2024-03-01 00:00));
    }

    #[test]
    fn keys_render_as_periods() {
        assert_eq!(WeekKey::of(date!(2024-01-03)).to_string(), "2024-01-01/2024-01-07");
        assert_eq!(MonthKey::of(date!(2024-02-29)).to_string(), "2024-02");
    }
}
