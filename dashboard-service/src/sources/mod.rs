pub mod sheet_csv_file;
pub mod workbook_file;

use std::path::Path;

pub use sheet_csv_file::SheetCsvFileSource;
pub use workbook_file::WorkbookFileSource;

use crate::pipeline::{Items, PipelineError, Source};
use crate::sheet::RawSheet;

/// Picks a reader from the file extension.
pub enum SheetSource {
    Workbook(WorkbookFileSource),
    Delimited(SheetCsvFileSource),
}

impl SheetSource {
    pub fn for_path(path: &Path) -> Result<Self, PipelineError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Workbook(WorkbookFileSource::new(path))),
            "csv" => Ok(Self::Delimited(SheetCsvFileSource::new(path))),
            "tsv" => Ok(Self::Delimited(SheetCsvFileSource::new(path).with_delimiter(b'\t'))),
            "dat" => Ok(Self::Delimited(SheetCsvFileSource::new(path).with_delimiter(b'|'))),
            _ => Err(PipelineError::Source(format!(
                "unsupported file type '{ext}' (expected .xlsx, .xls, .ods or .csv)"
            ))),
        }
    }
}

impl Source<RawSheet> for SheetSource {
    fn items(&mut self) -> Result<Items<'_, RawSheet>, PipelineError> {
        match self {
            Self::Workbook(s) => s.items(),
            Self::Delimited(s) => s.items(),
        }
    }
}
