use std::{fs::File, io::BufReader, path::PathBuf};

use usage_core::{read_raw_records, RawRecord};

use crate::error::ServiceError;

/// CSV meter export on disk.
///
/// Expected header columns (by name):
/// - USAGE_DATE (`MM/DD/YYYY`)
/// - USAGE_START_TIME (`HH:MM`, may be padded)
/// - USAGE_END_TIME (`HH:MM`, may be padded)
/// - USAGE_KWH
///
/// ESTIMATED_ACTUAL, REVISION_DATE and CONSUMPTION_SURPLUSGENERATION are
/// tolerated and dropped, as is any other column.
pub struct MeterUsageCsvFileSource {
    path: PathBuf,
}

impl MeterUsageCsvFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn read(&self) -> Result<Vec<RawRecord>, ServiceError> {
        let file = File::open(&self.path)
            .map_err(|e| ServiceError::internal(format!("failed to open CSV file: {e}")))?;

        match read_raw_records(BufReader::new(file)) {
            Ok(records) => Ok(records),
            Err(e) => {
                metrics::counter!("meter_usage_csv_parse_errors_total").increment(1);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "USAGE_DATE,USAGE_START_TIME,USAGE_END_TIME,USAGE_KWH,ESTIMATED_ACTUAL").unwrap();
        writeln!(file, "01/01/2024,00:00,00:14,0.4,A").unwrap();

        let records = MeterUsageCsvFileSource::new(file.path()).read().unwrap();
        assert_eq!(records, vec![RawRecord::new("01/01/2024", "00:00", "00:14", 0.4)]);
    }

    #[test]
    fn schema_errors_surface_as_usage_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "DATE,KWH").unwrap();

        let err = MeterUsageCsvFileSource::new(file.path()).read().unwrap_err();
        assert!(matches!(err, ServiceError::Usage(e) if e.is_schema()));
    }

    #[test]
    fn missing_file_is_internal() {
        let err = MeterUsageCsvFileSource::new("/nonexistent/usage.csv").read().unwrap_err();
        assert!(matches!(err, ServiceError::Internal(_)));
    }
}
