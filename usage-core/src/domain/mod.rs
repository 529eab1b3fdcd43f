pub mod peak_hours;
pub mod raw_record;
pub mod summary;
pub mod timeline;

pub use peak_hours::PeakHours;
pub use raw_record::RawRecord;
pub use summary::{PeakSplit, SummaryRow, SummaryTable};
pub use timeline::{HourlyTimeline, HourlyTimelineRow};
