use serde::Serialize;
use utility_domain::domain::{Reading, ReadingDate, Utility};

use super::stats;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anomaly {
    pub period: String,
    pub date: ReadingDate,
    pub utility: Utility,
    pub value: f64,
    pub threshold: f64,
    pub note: Option<String>,
}

/// `mean + sigma * sample_std`; `None` when the std is undefined.
pub fn threshold(values: &[f64], sigma: f64) -> Option<f64> {
    let m = stats::mean(values)?;
    let s = stats::sample_std(values)?;
    Some(m + sigma * s)
}

/// Rows whose value for `utility` lies strictly above the threshold.
pub fn detect(rows: &[Reading], utility: Utility, sigma: f64) -> Vec<Anomaly> {
    let values: Vec<f64> = rows.iter().map(|r| r.value(utility)).collect();
    let Some(limit) = threshold(&values, sigma) else {
        return Vec::new();
    };

    rows.iter()
        .zip(values)
        .filter(|(_, v)| *v > limit)
        .map(|(r, value)| Anomaly {
            period: r.period.clone(),
            date: r.date,
            utility,
            value,
            threshold: limit,
            note: r.note.clone(),
        })
        .collect()
}

pub fn detect_all(rows: &[Reading], utilities: &[Utility], sigma: f64) -> Vec<Anomaly> {
    let found: Vec<Anomaly> = utilities
        .iter()
        .flat_map(|u| detect(rows, *u, sigma))
        .collect();
    if !found.is_empty() {
        tracing::info!(anomalies = found.len(), "anomalies flagged");
        metrics::counter!("dashboard_anomalies_flagged_total").increment(found.len() as u64);
    }
    found
}
