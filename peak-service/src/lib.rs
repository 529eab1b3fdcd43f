pub mod config;
pub mod error;
pub mod http;
pub mod metrics_server;
pub mod observability;
pub mod output;
pub mod peak_hours;
pub mod pipeline;
pub mod sources;
pub mod upload;

pub use error::ServiceError;
pub use pipeline::{run_report, Report};
