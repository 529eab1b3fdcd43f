//! Response shaping: row filter, column projection and the derived
//! `processed_<column>` value.

use std::str::FromStr;

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use time::PrimitiveDateTime;
use usage_core::{PeakHours, SummaryRow, SummaryTable};

/// Which period the report is projected onto.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputView {
    /// Rows with positive daily usage; daily columns.
    #[default]
    Daily,
    /// First row of each month with positive monthly usage; monthly columns.
    Monthly,
}

impl FromStr for OutputView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "monthly" => Ok(Self::Monthly),
            other => Err(format!("unknown view '{other}', expected 'daily' or 'monthly'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Integer(i128),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Numbers get `peak_sum` added; text gets `_<peak_sum>` appended.
    pub fn processed(&self, peak_sum: i128) -> CellValue {
        match self {
            CellValue::Integer(v) => CellValue::Integer(v.saturating_add(peak_sum)),
            CellValue::Number(v) => CellValue::Number(v + peak_sum as f64),
            CellValue::Text(s) => CellValue::Text(format!("{s}_{peak_sum}")),
        }
    }
}

/// One projected row. Serializes as a JSON object in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    columns: Vec<(String, CellValue)>,
}

impl OutputRow {
    fn new(columns: Vec<(String, CellValue)>) -> Self {
        Self { columns }
    }

    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    fn push_processed(&mut self, peak_sum: i128) {
        if let Some((name, value)) = self.columns.first() {
            let derived = (format!("processed_{name}"), value.processed(peak_sum));
            self.columns.push(derived);
        }
    }
}

impl Serialize for OutputRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// `YYYY-MM-DD HH:MM:SS`.
pub fn format_datetime(ts: PrimitiveDateTime) -> String {
    format!(
        "{} {:02}:{:02}:{:02}",
        ts.date(),
        ts.hour(),
        ts.minute(),
        ts.second()
    )
}

fn keep(view: OutputView, row: &SummaryRow) -> bool {
    match view {
        OutputView::Daily => row.daily_kwh > 0.0,
        OutputView::Monthly => row.monthly_kwh > 0.0,
    }
}

fn columns(view: OutputView, row: &SummaryRow) -> Vec<(String, CellValue)> {
    let split = row.peak.unwrap_or_default();
    let (total, peak, non_peak) = match view {
        OutputView::Daily => (
            ("daily_kwh", row.daily_kwh),
            ("daily_peak_kwh", split.daily_peak_kwh),
            ("daily_non_peak_kwh", split.daily_non_peak_kwh),
        ),
        OutputView::Monthly => (
            ("monthly_kwh", row.monthly_kwh),
            ("monthly_peak_kwh", split.monthly_peak_kwh),
            ("monthly_non_peak_kwh", split.monthly_non_peak_kwh),
        ),
    };

    vec![
        ("datetime".to_string(), CellValue::Text(format_datetime(row.datetime))),
        (total.0.to_string(), CellValue::Number(total.1)),
        ("date".to_string(), CellValue::Text(row.date.clone())),
        ("day".to_string(), CellValue::Integer(i128::from(row.day()))),
        (peak.0.to_string(), CellValue::Number(peak.1)),
        (non_peak.0.to_string(), CellValue::Number(non_peak.1)),
    ]
}

/// Filter and project an aggregated summary for the response.
pub fn project(summary: &SummaryTable, peak_hours: &PeakHours, view: OutputView) -> Vec<OutputRow> {
    let peak_sum = peak_hours.sum();
    summary
        .iter()
        .filter(|row| keep(view, row))
        .map(|row| {
            let mut out = OutputRow::new(columns(view, row));
            out.push_processed(peak_sum);
            out
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use usage_core::{aggregate, normalize, RawRecord};

    fn aggregated(records: &[RawRecord], hours: &PeakHours) -> SummaryTable {
        let (_, summary) = normalize(records).unwrap();
        aggregate(&summary, hours)
    }

    #[test]
    fn daily_view_projects_columns_in_order() {
        let hours = PeakHours::from([7, 8, 9]);
        let records = vec![
            RawRecord::new("01/01/2024", "07:00", "07:14", 2.0),
            RawRecord::new("01/01/2024", "20:00", "20:14", 1.0),
        ];
        let rows = project(&aggregated(&records, &hours), &hours, OutputView::Daily);

        // One row per day: the day's total sits on its first hour only.
        assert_eq!(rows.len(), 1);
        let names: Vec<&str> = rows[0].column_names().collect();
        assert_eq!(
            names,
            vec![
                "datetime",
                "daily_kwh",
                "date",
                "day",
                "daily_peak_kwh",
                "daily_non_peak_kwh",
                "processed_datetime"
            ]
        );

        let first = &rows[0];
        assert_eq!(first.get("datetime"), Some(&CellValue::Text("2024-01-01 07:00:00".into())));
        assert_eq!(first.get("daily_kwh"), Some(&CellValue::Number(3.0)));
        assert_eq!(first.get("day"), Some(&CellValue::Integer(1)));
        assert_eq!(first.get("daily_peak_kwh"), Some(&CellValue::Number(2.0)));
        assert_eq!(first.get("daily_non_peak_kwh"), Some(&CellValue::Number(1.0)));
        assert_eq!(
            first.get("processed_datetime"),
            Some(&CellValue::Text("2024-01-01 07:00:00_24".into()))
        );
    }

    #[test]
    fn days_without_usage_are_filtered_out() {
        let hours = PeakHours::new();
        let records = vec![
            RawRecord::new("01/01/2024", "07:00", "07:14", 0.0),
            RawRecord::new("01/02/2024", "07:00", "07:14", 1.0),
        ];
        let rows = project(&aggregated(&records, &hours), &hours, OutputView::Daily);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("date"), Some(&CellValue::Text("2024-01-02".into())));
        assert_eq!(
            rows[0].get("processed_datetime"),
            Some(&CellValue::Text("2024-01-02 07:00:00_0".into()))
        );
    }

    #[test]
    fn monthly_view_keeps_one_row_per_month() {
        let hours = PeakHours::from([18]);
        let records = vec![
            RawRecord::new("02/28/2024", "18:00", "18:14", 1.0),
            RawRecord::new("02/29/2024", "18:00", "18:14", 2.0),
            RawRecord::new("02/29/2024", "03:00", "03:14", 4.0),
            RawRecord::new("03/01/2024", "05:00", "05:14", 0.5),
        ];
        let rows = project(&aggregated(&records, &hours), &hours, OutputView::Monthly);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("date"), Some(&CellValue::Text("2024-02-28".into())));
        assert_eq!(rows[0].get("monthly_kwh"), Some(&CellValue::Number(7.0)));
        assert_eq!(rows[0].get("monthly_peak_kwh"), Some(&CellValue::Number(3.0)));
        assert_eq!(rows[0].get("monthly_non_peak_kwh"), Some(&CellValue::Number(4.0)));
        assert_eq!(rows[1].get("date"), Some(&CellValue::Text("2024-03-01".into())));
        assert_eq!(rows[1].get("monthly_kwh"), Some(&CellValue::Number(0.5)));
    }

    #[test]
    fn extreme_peak_hours_do_not_overflow_the_processed_value() {
        let hours = PeakHours::from([i64::MAX, 1]);
        let records = vec![RawRecord::new("01/01/2024", "07:00", "07:14", 2.0)];
        let rows = project(&aggregated(&records, &hours), &hours, OutputView::Daily);

        let expected = format!("2024-01-01 07:00:00_{}", i128::from(i64::MAX) + 1);
        assert_eq!(rows[0].get("processed_datetime"), Some(&CellValue::Text(expected)));

        assert_eq!(
            CellValue::Integer(i128::MAX).processed(1),
            CellValue::Integer(i128::MAX)
        );
    }

    #[test]
    fn processed_value_depends_on_cell_kind() {
        assert_eq!(CellValue::Number(1.5).processed(3), CellValue::Number(4.5));
        assert_eq!(CellValue::Integer(2).processed(3), CellValue::Integer(5));
        assert_eq!(CellValue::Text("x".into()).processed(-1), CellValue::Text("x_-1".into()));
    }

    #[test]
    fn rows_serialize_as_ordered_objects() {
        let row = OutputRow::new(vec![
            ("datetime".into(), CellValue::Text("2024-01-01 00:00:00".into())),
            ("daily_kwh".into(), CellValue::Number(1.5)),
            ("day".into(), CellValue::Integer(1)),
        ]);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"datetime":"2024-01-01 00:00:00","daily_kwh":1.5,"day":1}"#);
    }

    #[test]
    fn view_parses_from_text() {
        assert_eq!("Daily".parse::<OutputView>(), Ok(OutputView::Daily));
        assert_eq!("monthly".parse::<OutputView>(), Ok(OutputView::Monthly));
        assert!("weekly".parse::<OutputView>().is_err());
    }
}
