use std::{fs::File, io::BufWriter, path::PathBuf};

use crate::report::MonthlyReport;

use super::{ExportError, ReportSink};

/// Full report, including daily series and period summaries, as JSON.
pub struct JsonReportSink {
    path: PathBuf,
    pretty: bool,
}

impl JsonReportSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            pretty: true,
        }
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

impl ReportSink for JsonReportSink {
    fn write(&self, report: &MonthlyReport) -> Result<(), ExportError> {
        let writer = BufWriter::new(File::create(&self.path)?);
        if self.pretty {
            serde_json::to_writer_pretty(writer, report)?;
        } else {
            serde_json::to_writer(writer, report)?;
        }
        tracing::info!(path = %self.path.display(), "JSON export written");
        Ok(())
    }
}
