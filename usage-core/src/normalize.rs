//! Raw interval readings to an hourly timeline and a time-resampled summary.
//!
//! Two independent aggregation paths are produced and both are kept:
//!
//! - the [`HourlyTimeline`] groups readings by *bare hour of day* (across all
//!   dates), calendar date, week and month, and maps each group total back
//!   onto every reading of the group;
//! - the [`SummaryTable`] resamples readings onto distinct hourly timestamps
//!   and places each day/week/month total on the first hour of that period;
//!   the remaining hours of the period carry `0.0`.
//!
//! The two `hourly_kwh` columns therefore mean different things: "typical
//! load at this hour across the data set" versus "load in this specific hour".

use time::{macros::format_description, Date, PrimitiveDateTime, Time};

use crate::calendar::{floor_to_hour, Granularity, MonthKey, WeekKey};
use crate::domain::{HourlyTimeline, HourlyTimelineRow, RawRecord, SummaryRow, SummaryTable};
use crate::error::UsageError;
use crate::reader::{USAGE_DATE, USAGE_END_TIME, USAGE_START_TIME};
use crate::resample::{group_sum, resample, resample_first};

/// A raw record with its date and time fields parsed.
#[derive(Debug, Clone, Copy)]
struct Reading {
    date: Date,
    start: Time,
    end: Time,
    kwh: f64,
    datetime: PrimitiveDateTime,
}

fn parse_usage_date(value: &str, row: usize) -> Result<Date, UsageError> {
    Date::parse(
        value,
        format_description!("[month padding:none]/[day padding:none]/[year]"),
    )
    .map_err(|e| UsageError::parse(row, USAGE_DATE, value, e))
}

fn parse_time_of_day(value: &str, field: &'static str, row: usize) -> Result<Time, UsageError> {
    let trimmed = value.trim();
    Time::parse(trimmed, format_description!("[hour padding:none]:[minute]"))
        .map_err(|e| UsageError::parse(row, field, trimmed, e))
}

fn parse_reading(record: &RawRecord, row: usize) -> Result<Reading, UsageError> {
    let date = parse_usage_date(&record.usage_date, row)?;
    let start = parse_time_of_day(&record.usage_start_time, USAGE_START_TIME, row)?;
    let end = parse_time_of_day(&record.usage_end_time, USAGE_END_TIME, row)?;

    // Minutes are dropped: every reading within a clock hour lands on the same key.
    let datetime = floor_to_hour(date, start.hour());

    Ok(Reading {
        date,
        start,
        end,
        kwh: record.usage_kwh,
        datetime,
    })
}

/// Parse and aggregate a complete batch of raw readings.
///
/// The first malformed date or time aborts the batch; no partial tables are returned.
pub fn normalize(records: &[RawRecord]) -> Result<(HourlyTimeline, SummaryTable), UsageError> {
    let readings = records
        .iter()
        .enumerate()
        .map(|(i, r)| parse_reading(r, i + 1))
        .collect::<Result<Vec<_>, _>>()?;

    let summary = build_summary(&readings);
    let timeline = build_timeline(&readings);

    tracing::debug!(
        readings = readings.len(),
        summary_hours = summary.len(),
        "normalized meter readings"
    );

    Ok((timeline, summary))
}

fn build_summary(readings: &[Reading]) -> SummaryTable {
    let hourly = resample(readings.iter().map(|r| (r.datetime, r.kwh)), Granularity::Hour);

    let index: Vec<PrimitiveDateTime> = hourly.keys().copied().collect();
    let values: Vec<f64> = hourly.values().copied().collect();

    // One total per period, on the period's representative row.
    let daily = resample_first(&index, &values, Granularity::Day);
    let weekly = resample_first(&index, &values, Granularity::Week);
    let monthly = resample_first(&index, &values, Granularity::Month);

    let rows = index
        .iter()
        .enumerate()
        .map(|(i, ts)| SummaryRow {
            daily_kwh: daily[i],
            weekly_kwh: weekly[i],
            monthly_kwh: monthly[i],
            ..SummaryRow::new(*ts, values[i])
        })
        .collect();

    SummaryTable { rows }
}

fn build_timeline(readings: &[Reading]) -> HourlyTimeline {
    let hour_totals = group_sum(readings.iter().map(|r| (r.datetime.hour(), r.kwh)));
    let day_totals = group_sum(readings.iter().map(|r| (r.date, r.kwh)));
    let week_totals = group_sum(readings.iter().map(|r| (WeekKey::of(r.date), r.kwh)));
    let month_totals = group_sum(readings.iter().map(|r| (MonthKey::of(r.date), r.kwh)));

    let rows = readings
        .iter()
        .map(|r| {
            let hour = r.datetime.hour();
            let week = WeekKey::of(r.date);
            let month = MonthKey::of(r.date);
            HourlyTimelineRow {
                usage_date: r.date,
                usage_start_time: r.start,
                usage_end_time: r.end,
                usage_kwh: r.kwh,
                datetime: r.datetime,
                hour,
                day: r.date,
                week,
                month,
                hourly_kwh: hour_totals.get(&hour).copied().unwrap_or_default(),
                daily_kwh: day_totals.get(&r.date).copied().unwrap_or_default(),
                weekly_kwh: week_totals.get(&week).copied().unwrap_or_default(),
                monthly_kwh: month_totals.get(&month).copied().unwrap_or_default(),
            }
        })
        .collect();

    HourlyTimeline {
        rows,
        hour_totals,
        day_totals,
        week_totals,
        month_totals,
    }
}
