use crate::pipeline::{Envelope, PipelineError, Transform};
use crate::sheet::{Cell, RawSheet};

pub const DATE_COLUMN: &str = "DATE";
const DAY_COLUMN: &str = "DAY";

/// Pure header cleanup for one sheet.
///
/// Rules:
/// - headers are trimmed and uppercased;
/// - a header that reads exactly `DAY` becomes `DATE`.
pub fn normalize_headers(mut sheet: RawSheet) -> RawSheet {
    for h in sheet.headers.iter_mut() {
        let upper = h.trim().to_uppercase();
        *h = if upper == DAY_COLUMN {
            DATE_COLUMN.to_string()
        } else {
            upper
        };
    }
    sheet
}

/// Pure row filter for one sheet.
///
/// Keeps only rows whose `DATE` cell is numeric, which drops blank rows and
/// repeated header or total rows inside the sheet. Kept date cells are
/// rewritten as numbers. A sheet with no `DATE` column is rejected.
pub fn retain_numeric_dates(mut sheet: RawSheet) -> Result<RawSheet, PipelineError> {
    let date_idx = sheet.column_index(DATE_COLUMN).ok_or_else(|| {
        PipelineError::Transform(format!("sheet '{}' has no {DATE_COLUMN} column", sheet.name))
    })?;

    let before = sheet.rows.len();
    sheet.rows.retain_mut(|row| {
        let Some(value) = row.get(date_idx).and_then(Cell::as_number) else {
            return false;
        };
        row[date_idx] = Cell::Number(value);
        true
    });

    let dropped = before - sheet.rows.len();
    if dropped > 0 {
        tracing::debug!(sheet = %sheet.name, dropped, "dropped rows without a numeric date");
        metrics::counter!("dashboard_rows_dropped_total").increment(dropped as u64);
    }

    Ok(sheet)
}

#[derive(Clone, Default)]
pub struct HeaderNormalization;

impl Transform<RawSheet, RawSheet> for HeaderNormalization {
    fn apply(&self, input: Envelope<RawSheet>) -> Result<Envelope<RawSheet>, PipelineError> {
        Ok(Envelope {
            payload: normalize_headers(input.payload),
            received_at: input.received_at,
        })
    }
}

#[derive(Clone, Default)]
pub struct NumericDateFilter;

impl Transform<RawSheet, RawSheet> for NumericDateFilter {
    fn apply(&self, input: Envelope<RawSheet>) -> Result<Envelope<RawSheet>, PipelineError> {
        match retain_numeric_dates(input.payload) {
            Ok(sheet) => Ok(Envelope {
                payload: sheet,
                received_at: input.received_at,
            }),
            Err(e) => {
                metrics::counter!("dashboard_sheets_rejected_total").increment(1);
                Err(e)
            }
        }
    }
}
