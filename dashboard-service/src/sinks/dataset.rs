use utility_domain::domain::{Dataset, Period, Reading, ReadingDate, Utility};

use crate::config::ColumnAliases;
use crate::pipeline::{Envelope, PipelineError, Sink};
use crate::resolver::{numeric_column, ResolvedColumns};
use crate::sheet::RawSheet;
use crate::transform::DATE_COLUMN;

/// Terminal stage of the sheet pipeline: resolves columns on each sheet and
/// collects the readings into a [`Dataset`], one period per sheet.
pub struct DatasetSink {
    aliases: ColumnAliases,
}

impl DatasetSink {
    pub fn new(aliases: ColumnAliases) -> Self {
        Self { aliases }
    }

    /// Convert one cleaned sheet (numeric `DATE` column, normalized headers)
    /// into a period tagged with the sheet name.
    pub fn sheet_to_period(&self, sheet: &RawSheet) -> Result<Period, PipelineError> {
        let date_idx = sheet.column_index(DATE_COLUMN).ok_or_else(|| {
            PipelineError::Sink(format!("sheet '{}' has no {DATE_COLUMN} column", sheet.name))
        })?;

        let cols = ResolvedColumns::resolve(&sheet.headers, &self.aliases);
        let missing = cols.missing();
        if !missing.is_empty() {
            let missing: Vec<&str> = missing.iter().map(|u| u.key()).collect();
            tracing::warn!(sheet = %sheet.name, ?missing, "columns not found, reading them as zero");
        }

        let electricity = numeric_column(sheet, cols.utility(Utility::Electricity));
        let lpg = numeric_column(sheet, cols.utility(Utility::Lpg));
        let water_in = numeric_column(sheet, cols.utility(Utility::WaterIn));
        let water_out = numeric_column(sheet, cols.utility(Utility::WaterOut));

        let readings = (0..sheet.rows.len())
            .map(|i| Reading {
                period: sheet.name.clone(),
                date: ReadingDate::from_numeric(sheet.cell(i, date_idx).as_number().unwrap_or(0.0)),
                electricity_kwh: electricity[i],
                lpg_kg: lpg[i],
                water_in_m3: water_in[i],
                water_out_m3: water_out[i],
                note: cols.note.and_then(|c| sheet.cell(i, c).as_text()),
            })
            .collect();

        Ok(Period::new(sheet.name.clone(), readings))
    }
}

impl Sink<RawSheet> for DatasetSink {
    type Output = Dataset;

    fn run<I>(&self, input: I) -> Result<Dataset, PipelineError>
    where
        I: Iterator<Item = Result<Envelope<RawSheet>, PipelineError>>,
    {
        let mut periods = Vec::new();

        for item in input {
            let env = match item {
                Ok(env) => env,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping sheet");
                    metrics::counter!("dashboard_sheets_skipped_total").increment(1);
                    continue;
                }
            };

            let period = match self.sheet_to_period(&env.payload) {
                Ok(p) => p,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping sheet");
                    metrics::counter!("dashboard_sheets_skipped_total").increment(1);
                    continue;
                }
            };

            if period.readings.is_empty() {
                tracing::warn!(sheet = %period.label, "sheet has no dated rows, skipping");
                metrics::counter!("dashboard_sheets_skipped_total").increment(1);
                continue;
            }

            tracing::info!(sheet = %period.label, rows = period.readings.len(), "sheet loaded");
            periods.push(period);
        }

        Ok(Dataset::new(periods))
    }
}
