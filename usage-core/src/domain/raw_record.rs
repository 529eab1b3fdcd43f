/// One sub-hourly meter reading, as exported by the utility.
///
/// Date and time fields are kept as text; they are parsed during
/// normalization so that a malformed row fails the whole batch.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// `MM/DD/YYYY`.
    pub usage_date: String,
    /// `HH:MM`, possibly padded with whitespace.
    pub usage_start_time: String,
    pub usage_end_time: String,
    pub usage_kwh: f64,
}

impl RawRecord {
    pub fn new(
        usage_date: impl Into<String>,
        usage_start_time: impl Into<String>,
        usage_end_time: impl Into<String>,
        usage_kwh: f64,
    ) -> Self {
        Self {
            usage_date: usage_date.into(),
            usage_start_time: usage_start_time.into(),
            usage_end_time: usage_end_time.into(),
            usage_kwh,
        }
    }
}
