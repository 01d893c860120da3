pub mod csv_report;
pub mod dataset;
pub mod json_report;

pub use csv_report::CsvReportSink;
pub use dataset::DatasetSink;
pub use json_report::JsonReportSink;

use crate::report::MonthlyReport;

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("export I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON export error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Destination for a finished report.
pub trait ReportSink {
    fn write(&self, report: &MonthlyReport) -> Result<(), ExportError>;
}
