use std::{fs::File, path::PathBuf};

use csv::StringRecord;

use crate::pipeline::{Envelope, Items, PipelineError, Source};
use crate::sheet::{Cell, RawSheet};

/// Delimited-text export of a single worksheet.
///
/// The first record is the header row. The sheet is named after the file
/// stem, so `JAN.csv` becomes period `JAN`.
pub struct SheetCsvFileSource {
    path: PathBuf,
    delimiter: u8,
}

impl SheetCsvFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn sheet_name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "SHEET1".to_string())
    }

    fn read_sheet(&self) -> Result<RawSheet, PipelineError> {
        let file = File::open(&self.path)
            .map_err(|e| PipelineError::Source(format!("failed to open CSV file: {e}")))?;
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(file);
        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| PipelineError::Source(format!("failed to read CSV headers: {e}")))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result
                .map_err(|e| PipelineError::Source(format!("failed to read CSV record: {e}")))?;
            rows.push(record_to_cells(&record));
        }

        Ok(RawSheet::new(self.sheet_name(), headers, rows))
    }
}

fn record_to_cells(record: &StringRecord) -> Vec<Cell> {
    record.iter().map(Cell::from_field).collect()
}

impl Source<RawSheet> for SheetCsvFileSource {
    fn items(&mut self) -> Result<Items<'_, RawSheet>, PipelineError> {
        let sheet = self.read_sheet()?;
        tracing::debug!(sheet = %sheet.name, rows = sheet.rows.len(), "read CSV sheet");
        metrics::counter!("dashboard_sheets_read_total").increment(1);
        Ok(Box::new(std::iter::once(Ok(Envelope::new(sheet)))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_header_and_typed_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("JAN.csv");
        let mut f = File::create(&path).unwrap();
        writeln!(f, "Day,Elec kWh,Note").unwrap();
        writeln!(f, "1,120.5,").unwrap();
        writeln!(f, "TOTAL,120.5,sum").unwrap();
        drop(f);

        let mut source = SheetCsvFileSource::new(&path);
        let items: Vec<_> = source.items().unwrap().collect();
        assert_eq!(items.len(), 1);
        let sheet = &items[0].as_ref().unwrap().payload;
        assert_eq!(sheet.name, "JAN");
        assert_eq!(sheet.headers, vec!["Day", "Elec kWh", "Note"]);
        assert_eq!(sheet.rows[0], vec![Cell::Number(1.0), Cell::Number(120.5), Cell::Empty]);
        assert_eq!(sheet.rows[1][0], Cell::Text("TOTAL".into()));
    }

    #[test]
    fn pipe_delimited_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("FEB.dat");
        std::fs::write(&path, "DAY|LPG\n1|30\n").unwrap();

        let mut source = SheetCsvFileSource::new(&path).with_delimiter(b'|');
        let sheet = source.items().unwrap().next().unwrap().unwrap().payload;
        assert_eq!(sheet.name, "FEB");
        assert_eq!(sheet.rows[0], vec![Cell::Number(1.0), Cell::Number(30.0)]);
    }

    #[test]
    fn missing_file_is_a_source_error() {
        let mut source = SheetCsvFileSource::new("/nonexistent/MAR.csv");
        assert!(matches!(source.items(), Err(PipelineError::Source(_))));
    }
}
