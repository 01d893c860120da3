use std::{io, path::PathBuf};

use crate::report::{Label, MonthlyReport};

use super::{ExportError, ReportSink};

/// Metrics table as delimited text: `key,metric,value,unit`, with the
/// selected period as the first data row.
pub struct CsvReportSink {
    path: PathBuf,
}

impl CsvReportSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

pub fn write_metrics<W: io::Write>(writer: W, report: &MonthlyReport) -> Result<(), ExportError> {
    let lang = report.language;
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(["key", "metric", "value", "unit"])?;
    wtr.write_record(["period", Label::Period.text(lang), report.period_title(), ""])?;
    for row in report.metrics_table() {
        let value = row.value.map(|v| v.to_string()).unwrap_or_default();
        wtr.write_record([row.key, row.label.text(lang), value.as_str(), row.unit])?;
    }
    wtr.flush()?;
    Ok(())
}

impl ReportSink for CsvReportSink {
    fn write(&self, report: &MonthlyReport) -> Result<(), ExportError> {
        let file = std::fs::File::create(&self.path)?;
        write_metrics(file, report)?;
        tracing::info!(path = %self.path.display(), "CSV export written");
        Ok(())
    }
}
