use std::io::Read;

use csv::StringRecord;

use crate::domain::RawRecord;
use crate::error::UsageError;

pub const USAGE_DATE: &str = "USAGE_DATE";
pub const USAGE_START_TIME: &str = "USAGE_START_TIME";
pub const USAGE_END_TIME: &str = "USAGE_END_TIME";
pub const USAGE_KWH: &str = "USAGE_KWH";

/// Columns of the meter export that are accepted and dropped.
pub const IGNORED_COLUMNS: [&str; 3] = [
    "ESTIMATED_ACTUAL",
    "REVISION_DATE",
    "CONSUMPTION_SURPLUSGENERATION",
];

/// Positions of the required columns in the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    usage_date: usize,
    usage_start_time: usize,
    usage_end_time: usize,
    usage_kwh: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, UsageError> {
        let find = |name: &'static str| -> Result<usize, UsageError> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(UsageError::Schema { column: name })
        };

        Ok(Self {
            usage_date: find(USAGE_DATE)?,
            usage_start_time: find(USAGE_START_TIME)?,
            usage_end_time: find(USAGE_END_TIME)?,
            usage_kwh: find(USAGE_KWH)?,
        })
    }
}

fn record_to_raw(record: &StringRecord, columns: ColumnIndex, row: usize) -> Result<RawRecord, UsageError> {
    let get = |idx: usize, name: &'static str| -> Result<&str, UsageError> {
        record
            .get(idx)
            .ok_or_else(|| UsageError::parse(row, name, "", "field missing from record"))
    };

    let kwh_str = get(columns.usage_kwh, USAGE_KWH)?;
    let usage_kwh: f64 = kwh_str
        .trim()
        .parse()
        .map_err(|e| UsageError::parse(row, USAGE_KWH, kwh_str, e))?;
    if !usage_kwh.is_finite() {
        return Err(UsageError::parse(row, USAGE_KWH, kwh_str, "not a finite number"));
    }

    Ok(RawRecord {
        usage_date: get(columns.usage_date, USAGE_DATE)?.to_string(),
        usage_start_time: get(columns.usage_start_time, USAGE_START_TIME)?.to_string(),
        usage_end_time: get(columns.usage_end_time, USAGE_END_TIME)?.to_string(),
        usage_kwh,
    })
}

/// Read a meter export with a header row into raw records.
///
/// Only the four usage columns are kept; any other column is ignored.
pub fn read_raw_records<R: Read>(reader: R) -> Result<Vec<RawRecord>, UsageError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;
    let dropped: Vec<&str> = headers
        .iter()
        .map(str::trim)
        .filter(|h| IGNORED_COLUMNS.contains(h))
        .collect();
    if !dropped.is_empty() {
        tracing::debug!(?dropped, "ignoring meter export columns");
    }

    let mut out = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        out.push(record_to_raw(&record, columns, i + 1)?);
    }

    tracing::debug!(records = out.len(), "read raw meter records");
    Ok(out)
}
