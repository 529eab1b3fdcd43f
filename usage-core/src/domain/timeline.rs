use std::collections::BTreeMap;

use time::{Date, PrimitiveDateTime, Time};

use crate::calendar::{MonthKey, WeekKey};

/// A raw reading after normalization, annotated with its bucket keys and the
/// totals of every group it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyTimelineRow {
    pub usage_date: Date,
    pub usage_start_time: Time,
    pub usage_end_time: Time,
    pub usage_kwh: f64,
    /// `usage_date` at the top of the start-time hour.
    pub datetime: PrimitiveDateTime,
    /// Bare hour of day, 0..=23.
    pub hour: u8,
    pub day: Date,
    pub week: WeekKey,
    pub month: MonthKey,
    /// Total of every reading sharing this hour of day, across all dates.
    pub hourly_kwh: f64,
    pub daily_kwh: f64,
    pub weekly_kwh: f64,
    pub monthly_kwh: f64,
}

/// Per-reading timeline plus the group totals mapped onto it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlyTimeline {
    pub rows: Vec<HourlyTimelineRow>,
    pub hour_totals: BTreeMap<u8, f64>,
    pub day_totals: BTreeMap<Date, f64>,
    pub week_totals: BTreeMap<WeekKey, f64>,
    pub month_totals: BTreeMap<MonthKey, f64>,
}

impl HourlyTimeline {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
