use time::PrimitiveDateTime;

/// Peak/non-peak split of one summary hour and of its enclosing periods.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeakSplit {
    pub is_peak: bool,
    pub peak_kwh: f64,
    pub non_peak_kwh: f64,
    pub daily_peak_kwh: f64,
    pub daily_non_peak_kwh: f64,
    pub weekly_peak_kwh: f64,
    pub weekly_non_peak_kwh: f64,
    pub monthly_peak_kwh: f64,
    pub monthly_non_peak_kwh: f64,
    pub is_month_end: bool,
}

/// One distinct hourly timestamp with time-resampled totals.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub datetime: PrimitiveDateTime,
    /// `HH:MM`.
    pub time: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub hourly_kwh: f64,
    pub daily_kwh: f64,
    pub weekly_kwh: f64,
    pub monthly_kwh: f64,
    /// Set by [`crate::aggregate`].
    pub peak: Option<PeakSplit>,
}

impl SummaryRow {
    pub fn new(datetime: PrimitiveDateTime, hourly_kwh: f64) -> Self {
        Self {
            datetime,
            time: format!("{:02}:{:02}", datetime.hour(), datetime.minute()),
            date: datetime.date().to_string(),
            hourly_kwh,
            daily_kwh: 0.0,
            weekly_kwh: 0.0,
            monthly_kwh: 0.0,
            peak: None,
        }
    }

    pub fn hour(&self) -> u8 {
        self.datetime.hour()
    }

    /// Day of month.
    pub fn day(&self) -> u8 {
        self.datetime.day()
    }

    pub fn month(&self) -> u8 {
        u8::from(self.datetime.month())
    }

    pub fn year(&self) -> i32 {
        self.datetime.year()
    }
}

/// Summary rows ordered by `datetime`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryTable {
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SummaryRow> {
        self.rows.iter()
    }

    pub fn index(&self) -> Vec<PrimitiveDateTime> {
        self.rows.iter().map(|r| r.datetime).collect()
    }
}
