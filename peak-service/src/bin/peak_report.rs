use anyhow::{bail, Result};
use peak_service::{observability, output::OutputView, peak_hours::parse_peak_hours, run_report};
use std::{env, path::Path};

fn main() -> Result<()> {
    observability::init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        bail!("usage: peak_report <csv_file_path> <peak_hours e.g. [7,8,9]> [daily|monthly|profile]");
    }
    let file_path = Path::new(&args[1]);
    let peak_hours = parse_peak_hours(Some(&args[2]))?;

    // `profile` prints the hour-of-day totals instead of the projected rows.
    let mode = args.get(3).map(String::as_str).unwrap_or("daily");
    let (view, profile_only) = match mode {
        "profile" => (OutputView::Daily, true),
        other => (other.parse::<OutputView>().map_err(anyhow::Error::msg)?, false),
    };

    let report = run_report(file_path, &peak_hours, view)?;

    let json = if profile_only {
        serde_json::to_string_pretty(&report.hour_profile)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{json}");

    Ok(())
}
