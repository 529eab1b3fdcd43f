use std::path::Path;

use serde::Serialize;
use usage_core::{aggregate, normalize, HourlyTimeline, PeakHours, RawRecord};

use crate::error::ServiceError;
use crate::output::{project, OutputRow, OutputView};
use crate::sources::MeterUsageCsvFileSource;

/// Total usage at one hour of day across the whole upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourProfile {
    pub hour: u8,
    pub hourly_kwh: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub processed_data: Vec<OutputRow>,
    #[serde(skip)]
    pub hour_profile: Vec<HourProfile>,
}

fn hour_profile(timeline: &HourlyTimeline) -> Vec<HourProfile> {
    timeline
        .hour_totals
        .iter()
        .map(|(&hour, &hourly_kwh)| HourProfile { hour, hourly_kwh })
        .collect()
}

/// normalize -> aggregate -> project, over records already in memory.
pub fn build_report(
    records: &[RawRecord],
    peak_hours: &PeakHours,
    view: OutputView,
) -> Result<Report, ServiceError> {
    let (timeline, summary) = normalize(records)?;
    let aggregated = aggregate(&summary, peak_hours);
    let processed_data = project(&aggregated, peak_hours, view);

    tracing::info!(
        readings = timeline.len(),
        summary_hours = aggregated.len(),
        output_rows = processed_data.len(),
        ?view,
        "report built"
    );
    metrics::counter!("peak_reports_generated_total").increment(1);
    metrics::histogram!("peak_report_output_rows").record(processed_data.len() as f64);

    Ok(Report {
        processed_data,
        hour_profile: hour_profile(&timeline),
    })
}

/// Read a meter export from disk and build its report.
pub fn run_report(path: &Path, peak_hours: &PeakHours, view: OutputView) -> Result<Report, ServiceError> {
    let records = MeterUsageCsvFileSource::new(path).read()?;
    build_report(&records, peak_hours, view)
}
