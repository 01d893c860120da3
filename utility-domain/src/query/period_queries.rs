use serde::Serialize;

use crate::domain::{Dataset, Reading, ReadingDate, Selection, Utility};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("unknown period '{label}' (available: {})", .available.join(", "))]
    UnknownPeriod { label: String, available: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub label: String,
    pub rows: usize,
    pub electricity_kwh: f64,
    pub lpg_kg: f64,
    pub water_in_m3: f64,
    pub water_out_m3: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub period: String,
    pub date: ReadingDate,
    pub value: f64,
}

/// Rows for a selection, in workbook order.
pub fn select(dataset: &Dataset, selection: &Selection) -> Result<Vec<Reading>, QueryError> {
    match selection {
        Selection::All => Ok(dataset.readings().cloned().collect()),
        Selection::Period(label) => dataset
            .period(label)
            .map(|p| p.readings.clone())
            .ok_or_else(|| QueryError::UnknownPeriod {
                label: label.clone(),
                available: dataset.labels().into_iter().map(str::to_string).collect(),
            }),
    }
}

/// Per-period totals in sheet order; the full-year trend line.
pub fn period_summaries(dataset: &Dataset) -> Vec<PeriodSummary> {
    dataset
        .periods
        .iter()
        .map(|p| {
            let sum = |u: Utility| p.readings.iter().map(|r| r.value(u)).sum::<f64>();
            PeriodSummary {
                label: p.label.clone(),
                rows: p.readings.len(),
                electricity_kwh: sum(Utility::Electricity),
                lpg_kg: sum(Utility::Lpg),
                water_in_m3: sum(Utility::WaterIn),
                water_out_m3: sum(Utility::WaterOut),
            }
        })
        .collect()
}

/// Day-by-day profile of one utility.
pub fn daily_series(rows: &[Reading], utility: Utility) -> Vec<SeriesPoint> {
    rows.iter()
        .map(|r| SeriesPoint {
            period: r.period.clone(),
            date: r.date,
            value: r.value(utility),
        })
        .collect()
}
