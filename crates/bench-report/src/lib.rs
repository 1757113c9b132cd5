//! Reporting for the lookup strategy benchmark.
//!
//! Loads the table produced by the benchmark collector, splits it by access pattern,
//! renders bandwidth and latency charts and computes the summary printed after a run.

pub mod config;
pub mod error;
pub mod export;
pub mod figure;
pub mod record;
pub mod render;
pub mod summary;
pub mod table;

pub use config::ReportConfig;
pub use error::ReportError;
pub use figure::Figure;
pub use record::{Metric, Pattern, ResultRecord, Strategy};
pub use summary::Summary;
pub use table::{ResultTable, ResultView};
