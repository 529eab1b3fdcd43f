//! Peak/non-peak split of the hourly summary.

use crate::calendar::{is_month_end, Granularity};
use crate::domain::{PeakHours, PeakSplit, SummaryRow, SummaryTable};
use crate::resample::resample_onto;

/// Split every summary hour into peak and non-peak usage and attach the
/// daily, weekly and monthly totals of each side.
///
/// Classification depends on hour of day only. The split is always recomputed
/// from `hourly_kwh`, so applying this to its own output changes nothing.
pub fn aggregate(table: &SummaryTable, peak_hours: &PeakHours) -> SummaryTable {
    let index = table.index();

    let flags: Vec<bool> = table
        .iter()
        .map(|row| peak_hours.contains_hour(row.hour()))
        .collect();
    let peak: Vec<f64> = table
        .iter()
        .zip(&flags)
        .map(|(row, &is_peak)| if is_peak { row.hourly_kwh } else { 0.0 })
        .collect();
    let non_peak: Vec<f64> = table
        .iter()
        .zip(&flags)
        .map(|(row, &is_peak)| if is_peak { 0.0 } else { row.hourly_kwh })
        .collect();

    let daily_peak = resample_onto(&index, &peak, Granularity::Day);
    let daily_non_peak = resample_onto(&index, &non_peak, Granularity::Day);
    let weekly_peak = resample_onto(&index, &peak, Granularity::Week);
    let weekly_non_peak = resample_onto(&index, &non_peak, Granularity::Week);
    let monthly_peak = resample_onto(&index, &peak, Granularity::Month);
    let monthly_non_peak = resample_onto(&index, &non_peak, Granularity::Month);

    let rows = table
        .iter()
        .enumerate()
        .map(|(i, row)| SummaryRow {
            peak: Some(PeakSplit {
                is_peak: flags[i],
                peak_kwh: peak[i],
                non_peak_kwh: non_peak[i],
                daily_peak_kwh: daily_peak[i],
                daily_non_peak_kwh: daily_non_peak[i],
                weekly_peak_kwh: weekly_peak[i],
                weekly_non_peak_kwh: weekly_non_peak[i],
                monthly_peak_kwh: monthly_peak[i],
                monthly_non_peak_kwh: monthly_non_peak[i],
                is_month_end: is_month_end(row.datetime.date()),
            }),
            ..row.clone()
        })
        .collect();

    let peak_rows = flags.iter().filter(|f| **f).count();
    tracing::debug!(
        rows = table.len(),
        peak_rows,
        peak_hours = peak_hours.len(),
        "split summary into peak and non-peak usage"
    );

    SummaryTable { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawRecord;
    use crate::normalize::normalize;
    use std::collections::BTreeMap;
    use time::Date;

    fn full_days(dates: &[&str], kwh: f64) -> SummaryTable {
        let records: Vec<RawRecord> = dates
            .iter()
            .flat_map(|d| (0..24).map(move |h| RawRecord::new(*d, format!("{h:02}:00"), format!("{h:02}:59"), kwh)))
            .collect();
        normalize(&records).unwrap().1
    }

    fn split(row: &SummaryRow) -> PeakSplit {
        row.peak.expect("aggregated row carries a split")
    }

    #[test]
    fn three_days_with_morning_peak() {
        let summary = full_days(&["01/01/2024", "01/02/2024", "01/03/2024"], 1.0);
        let out = aggregate(&summary, &PeakHours::from([7, 8, 9]));

        assert_eq!(out.len(), 72);
        for row in out.iter() {
            let s = split(row);
            assert_eq!(s.daily_peak_kwh, 3.0);
            assert_eq!(s.daily_non_peak_kwh, 21.0);
            // 2024-01-01 is a Monday, so all three days share a week.
            assert_eq!(s.weekly_peak_kwh, 9.0);
            assert_eq!(s.weekly_non_peak_kwh, 63.0);
            assert_eq!(s.monthly_peak_kwh, 9.0);
            assert_eq!(s.monthly_non_peak_kwh, 63.0);
            assert_eq!(s.is_peak, (7..=9).contains(&row.hour()));
            assert!(!s.is_month_end);
        }
    }

    #[test]
    fn peak_and_non_peak_partition_each_hour() {
        let records = vec![
            RawRecord::new("03/30/2024", "07:00", "07:14", 0.3),
            RawRecord::new("03/30/2024", "07:15", "07:29", 0.7),
            RawRecord::new("03/31/2024", "18:00", "18:14", 1.25),
            RawRecord::new("04/01/2024", "02:00", "02:14", 2.5),
        ];
        let (_, summary) = normalize(&records).unwrap();
        let out = aggregate(&summary, &PeakHours::from([7, 18]));

        for row in out.iter() {
            let s = split(row);
            assert!((s.peak_kwh + s.non_peak_kwh - row.hourly_kwh).abs() < 1e-12);
            assert!(s.peak_kwh == 0.0 || s.non_peak_kwh == 0.0);
        }
        assert!(split(&out.rows[1]).is_month_end);
        assert!(!split(&out.rows[0]).is_month_end);
        assert_eq!(split(&out.rows[2]).monthly_peak_kwh, 0.0);
        assert_eq!(split(&out.rows[2]).monthly_non_peak_kwh, 2.5);
    }

    #[test]
    fn daily_peak_totals_conserve_peak_usage() {
        let records: Vec<RawRecord> = (1..=20)
            .flat_map(|day| {
                (0..24).map(move |h| {
                    RawRecord::new(
                        format!("02/{day:02}/2024"),
                        format!("{h:02}:30"),
                        format!("{h:02}:44"),
                        f64::from(day) * 0.5 + f64::from(h) * 0.25,
                    )
                })
            })
            .collect();
        let (_, summary) = normalize(&records).unwrap();
        let out = aggregate(&summary, &PeakHours::from([17, 18, 19, 20]));

        let mut per_day: BTreeMap<Date, f64> = BTreeMap::new();
        for row in out.iter() {
            per_day.insert(row.datetime.date(), split(row).daily_peak_kwh);
        }
        let from_days: f64 = per_day.values().sum();
        let from_rows: f64 = out.iter().map(|r| split(r).peak_kwh).sum();
        assert!((from_days - from_rows).abs() < 1e-9);
    }

    #[test]
    fn empty_peak_set_makes_everything_non_peak() {
        let records = vec![RawRecord::new("05/15/2024", "13:00", "13:14", 5.0)];
        let (_, summary) = normalize(&records).unwrap();
        let out = aggregate(&summary, &PeakHours::new());

        let row = &out.rows[0];
        let s = split(row);
        assert!(!s.is_peak);
        assert_eq!(s.peak_kwh, 0.0);
        assert_eq!(s.non_peak_kwh, 5.0);
        assert_eq!(s.daily_peak_kwh, 0.0);
        assert_eq!(s.weekly_peak_kwh, 0.0);
        assert_eq!(s.monthly_peak_kwh, 0.0);
        assert_eq!(s.daily_non_peak_kwh, row.daily_kwh);
        assert_eq!(s.weekly_non_peak_kwh, row.weekly_kwh);
        assert_eq!(s.monthly_non_peak_kwh, row.monthly_kwh);
    }

    #[test]
    fn out_of_range_peak_hours_never_match() {
        let summary = full_days(&["06/10/2024"], 2.0);
        let out = aggregate(&summary, &PeakHours::from([24, -1, 100]));
        assert!(out.iter().all(|r| !split(r).is_peak));
        assert_eq!(split(&out.rows[0]).daily_non_peak_kwh, 48.0);
    }

    #[test]
    fn aggregate_is_idempotent() {
        let summary = full_days(&["12/30/2024", "12/31/2024", "01/01/2025"], 1.5);
        let hours = PeakHours::from([8, 9, 17]);

        let once = aggregate(&summary, &hours);
        assert_eq!(aggregate(&summary, &hours), once);
        assert_eq!(aggregate(&once, &hours), once);
    }

    #[test]
    fn week_spanning_year_end_is_one_bucket() {
        // Monday 2024-12-30 through Wednesday 2025-01-01.
        let summary = full_days(&["12/30/2024", "12/31/2024", "01/01/2025"], 1.0);
        let out = aggregate(&summary, &PeakHours::from([12]));

        assert!(out.iter().all(|r| split(r).weekly_peak_kwh == 3.0));
        assert!(out.iter().all(|r| split(r).weekly_non_peak_kwh == 69.0));

        let dec = out.iter().find(|r| r.date == "2024-12-31").map(split).unwrap();
        let jan = out.iter().find(|r| r.date == "2025-01-01").map(split).unwrap();
        assert!(dec.is_month_end);
        assert_eq!(dec.monthly_peak_kwh, 2.0);
        assert_eq!(jan.monthly_peak_kwh, 1.0);
    }
}
