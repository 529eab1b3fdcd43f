pub mod meter_usage_csv_file;

pub use meter_usage_csv_file::MeterUsageCsvFileSource;
