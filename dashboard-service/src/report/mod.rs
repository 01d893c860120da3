//! The assembled metrics for one selection, ready for rendering or export.

pub mod labels;
pub mod text;

use serde::Serialize;
use utility_domain::domain::{Dataset, Selection, Utility};
use utility_domain::query::{self, PeriodSummary, QueryError, SeriesPoint};

use crate::analysis::{self, Anomaly, Intensity, RestDayBaseline, RestDayRule, Totals, WaterLoss};
use crate::forecast::{self, Forecast};

pub use labels::{Label, Language};

/// Where the numbers came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceInfo {
    pub file_name: String,
    /// BLAKE3 digest of the uploaded bytes, hex encoded.
    pub blake3: String,
}

impl SourceInfo {
    pub fn from_bytes(file_name: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            file_name: file_name.into(),
            blake3: blake3::hash(bytes).to_hex().to_string(),
        }
    }

    pub fn short_digest(&self) -> &str {
        &self.blake3[..self.blake3.len().min(12)]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySeries {
    pub utility: Utility,
    pub points: Vec<SeriesPoint>,
}

/// Inputs of one recomputation besides the data itself.
#[derive(Debug, Clone)]
pub struct ReportParams<'a> {
    pub production_kg: f64,
    pub days_per_month: u32,
    pub rest_rule: RestDayRule,
    pub summer_months: &'a [String],
    pub sigma: f64,
    pub anomaly_utilities: &'a [Utility],
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    /// Period label, or `ALL` for the full-year selection.
    pub selection: String,
    pub full_year: bool,
    pub language: Language,
    pub source: SourceInfo,
    pub rows: usize,
    pub production_kg: f64,
    pub avg_daily_production_kg: f64,
    pub totals: Totals,
    pub water_loss: WaterLoss,
    pub intensities: Vec<Intensity>,
    pub rest_day_baseline: RestDayBaseline,
    pub seasonal_baseline_kwh: Option<f64>,
    pub anomalies: Vec<Anomaly>,
    pub forecasts: Vec<Forecast>,
    pub period_summaries: Vec<PeriodSummary>,
    pub daily: Vec<DailySeries>,
}

impl MonthlyReport {
    /// Recompute every metric for `selection`. Nothing is cached between calls.
    pub fn build(
        dataset: &Dataset,
        selection: &Selection,
        source: &SourceInfo,
        params: &ReportParams<'_>,
    ) -> Result<Self, QueryError> {
        let rows = query::select(dataset, selection)?;
        let selection_label = match selection {
            Selection::All => selection.to_string(),
            Selection::Period(label) => dataset
                .period(label)
                .map(|p| p.label.clone())
                .unwrap_or_else(|| label.clone()),
        };

        let totals = Totals::of(&rows);
        let avg_daily_production_kg =
            analysis::avg_daily_production(params.production_kg, params.days_per_month);

        let report = Self {
            selection: selection_label,
            full_year: selection.is_all(),
            language: params.language,
            source: source.clone(),
            rows: rows.len(),
            production_kg: params.production_kg,
            avg_daily_production_kg,
            totals,
            water_loss: analysis::water_loss(&totals),
            intensities: analysis::intensities(&rows, avg_daily_production_kg),
            rest_day_baseline: analysis::rest_day_baseline(&rows, &params.rest_rule),
            seasonal_baseline_kwh: analysis::seasonal_baseline(dataset.readings(), params.summer_months),
            anomalies: analysis::detect_all(&rows, params.anomaly_utilities, params.sigma),
            forecasts: forecast::forecast(&rows, selection, params.days_per_month),
            period_summaries: query::period_summaries(dataset),
            daily: Utility::ALL
                .into_iter()
                .map(|utility| DailySeries {
                    utility,
                    points: query::daily_series(&rows, utility),
                })
                .collect(),
        };

        tracing::info!(
            selection = %report.selection,
            rows = report.rows,
            anomalies = report.anomalies.len(),
            forecasts = report.forecasts.len(),
            "report computed"
        );
        Ok(report)
    }

    pub fn intensity(&self, utility: Utility) -> Option<f64> {
        self.intensities
            .iter()
            .find(|i| i.utility == utility)
            .map(|i| i.per_kg)
    }

    pub fn forecast(&self, utility: Utility) -> Option<&Forecast> {
        self.forecasts.iter().find(|f| f.utility == utility)
    }

    /// Localized period name for headings.
    pub fn period_title(&self) -> &str {
        if self.full_year {
            Label::AllPeriods.text(self.language)
        } else {
            &self.selection
        }
    }

    /// The headline metrics table shared by the text report and CSV export.
    pub fn metrics_table(&self) -> Vec<MetricRow> {
        let mut rows = vec![
            MetricRow::new("rows", Label::Rows, Some(self.rows as f64), "days"),
            MetricRow::new("production", Label::Production, Some(self.production_kg), "kg"),
            MetricRow::new(
                "avg_daily_production",
                Label::AvgDailyProduction,
                Some(self.avg_daily_production_kg),
                "kg/day",
            ),
            MetricRow::new("total_electricity", Label::TotalElectricity, Some(self.totals.electricity_kwh), "kWh"),
            MetricRow::new("total_lpg", Label::TotalLpg, Some(self.totals.lpg_kg), "kg"),
            MetricRow::new("total_water_in", Label::TotalWaterIn, Some(self.totals.water_in_m3), "m3"),
            MetricRow::new("total_water_out", Label::TotalWaterOut, Some(self.totals.water_out_m3), "m3"),
            MetricRow::new("water_loss", Label::WaterLoss, Some(self.water_loss.loss_m3), "m3"),
            MetricRow::new("water_loss_pct", Label::WaterLossPct, Some(self.water_loss.loss_pct), "%"),
            MetricRow::new(
                "intensity_electricity",
                Label::IntensityElectricity,
                self.intensity(Utility::Electricity),
                "kWh/kg",
            ),
            MetricRow::new("intensity_lpg", Label::IntensityLpg, self.intensity(Utility::Lpg), "kg/kg"),
            MetricRow::new("intensity_water_in", Label::IntensityWaterIn, self.intensity(Utility::WaterIn), "m3/kg"),
            MetricRow::new(
                "rest_day_baseline",
                Label::RestDayBaseline,
                Some(self.rest_day_baseline.value_kwh),
                "kWh",
            ),
            MetricRow::new(
                "rest_days",
                Label::RestDays,
                Some(self.rest_day_baseline.rest_days as f64),
                "days",
            ),
            MetricRow::new("seasonal_baseline", Label::SeasonalBaseline, self.seasonal_baseline_kwh, "kWh"),
            MetricRow::new("anomalies", Label::AnomalyCount, Some(self.anomalies.len() as f64), ""),
        ];

        for f in &self.forecasts {
            rows.push(MetricRow {
                key: forecast_key(f.utility),
                label: Label::Forecast,
                value: Some(f.projected_total),
                unit: f.utility.unit(),
            });
        }
        rows
    }
}

fn forecast_key(utility: Utility) -> &'static str {
    match utility {
        Utility::Electricity => "forecast_electricity",
        Utility::Lpg => "forecast_lpg",
        Utility::WaterIn => "forecast_water_in",
        Utility::WaterOut => "forecast_water_out",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub key: &'static str,
    pub label: Label,
    pub value: Option<f64>,
    pub unit: &'static str,
}

impl MetricRow {
    fn new(key: &'static str, label: Label, value: Option<f64>, unit: &'static str) -> Self {
        Self {
            key,
            label,
            value,
            unit,
        }
    }
}
