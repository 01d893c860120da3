use std::path::PathBuf;

use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::pipeline::{Envelope, Items, PipelineError, Source};
use crate::sheet::{Cell, RawSheet};

/// Spreadsheet workbook (`.xlsx`, `.xlsm`, `.xls`, `.ods`), one item per sheet
/// in workbook order.
///
/// The first row of each sheet is taken as the header row. A sheet that
/// cannot be read is yielded as an error so the rest of the workbook still
/// loads.
pub struct WorkbookFileSource {
    path: PathBuf,
}

impl WorkbookFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        // Date cells keep their serial number; the normalizer decides what it means.
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}

pub(crate) fn range_to_sheet(name: &str, range: &Range<Data>) -> RawSheet {
    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default();
    let rows = rows
        .map(|r| r.iter().map(data_to_cell).collect())
        .collect();
    RawSheet::new(name, headers, rows)
}

impl Source<RawSheet> for WorkbookFileSource {
    fn items(&mut self) -> Result<Items<'_, RawSheet>, PipelineError> {
        let mut workbook = open_workbook_auto(&self.path)
            .map_err(|e| PipelineError::Source(format!("failed to open workbook: {e}")))?;
        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(PipelineError::Source("workbook has no sheets".to_string()));
        }
        tracing::debug!(sheets = sheet_names.len(), path = %self.path.display(), "workbook opened");

        Ok(Box::new(sheet_names.into_iter().map(move |name| {
            let range = workbook.worksheet_range(&name).map_err(|e| {
                metrics::counter!("dashboard_sheet_read_errors_total").increment(1);
                PipelineError::Source(format!("failed to read sheet '{name}': {e}"))
            })?;
            metrics::counter!("dashboard_sheets_read_total").increment(1);
            Ok(Envelope::new(range_to_sheet(&name, &range)))
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_row_becomes_headers() {
        let mut range: Range<Data> = Range::new((0, 0), (2, 1));
        range.set_value((0, 0), Data::String("DAY".into()));
        range.set_value((0, 1), Data::String("ELEC".into()));
        range.set_value((1, 0), Data::Int(1));
        range.set_value((1, 1), Data::Float(250.0));
        range.set_value((2, 0), Data::String("TOTAL".into()));

        let sheet = range_to_sheet("JAN", &range);
        assert_eq!(sheet.name, "JAN");
        assert_eq!(sheet.headers, vec!["DAY", "ELEC"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0], vec![Cell::Number(1.0), Cell::Number(250.0)]);
        assert_eq!(sheet.rows[1], vec![Cell::Text("TOTAL".into()), Cell::Empty]);
    }

    #[test]
    fn unreadable_file_is_a_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();

        let mut source = WorkbookFileSource::new(&path);
        assert!(matches!(source.items(), Err(PipelineError::Source(_))));
    }
}
