//! Normalization and peak/non-peak aggregation of metered electricity usage.
//!
//! ```text
//! raw records -> normalize -> (hourly timeline, summary) -> aggregate(peak hours) -> summary with peak split
//! ```

pub mod aggregate;
pub mod calendar;
pub mod domain;
pub mod error;
pub mod normalize;
pub mod reader;
pub mod resample;

pub use aggregate::aggregate;
pub use domain::{HourlyTimeline, HourlyTimelineRow, PeakHours, PeakSplit, RawRecord, SummaryRow, SummaryTable};
pub use error::UsageError;
pub use normalize::normalize;
pub use reader::read_raw_records;
