#[derive(thiserror::Error, Debug)]
pub enum UsageError {
    #[error("missing required column '{column}'")]
    Schema { column: &'static str },
    #[error("row {row}: invalid {field} '{value}': {reason}")]
    Parse {
        /// 1-based data row, header excluded.
        row: usize,
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("failed to read CSV record: {0}")]
    Csv(#[from] csv::Error),
}

impl UsageError {
    pub fn parse(row: usize, field: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::Parse {
            row,
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Malformed field content, including unreadable CSV records.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::Csv(_))
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }
}
