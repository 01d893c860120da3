use std::{env, fs, path::Path};

use anyhow::{bail, Context};
use serde::Deserialize;
use time::Weekday;
use utility_domain::domain::Utility;

use crate::report::Language;

pub const CONFIG_ENV: &str = "DASHBOARD_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "dashboard-config.toml";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Header fragments per canonical field, English and Arabic.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnAliases {
    pub electricity: Vec<String>,
    pub lpg: Vec<String>,
    pub water_in: Vec<String>,
    pub water_out: Vec<String>,
    pub note: Vec<String>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            electricity: strings(&["ELEC", "KWH", "POWER", "كهرباء"]),
            lpg: strings(&["LPG", "GAS", "غاز"]),
            water_in: strings(&["RECEIV", "WATER IN", "INTAKE", "مياه واردة", "المستلمة"]),
            water_out: strings(&["SANIT", "DISCHARGE", "WATER OUT", "صرف"]),
            note: strings(&["NOTE", "EVENT", "REMARK", "ملاحظات", "حدث"]),
        }
    }
}

impl ColumnAliases {
    pub fn for_utility(&self, utility: Utility) -> &[String] {
        match utility {
            Utility::Electricity => &self.electricity,
            Utility::Lpg => &self.lpg,
            Utility::WaterIn => &self.water_in,
            Utility::WaterOut => &self.water_out,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOff {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<DayOff> for Weekday {
    fn from(d: DayOff) -> Self {
        match d {
            DayOff::Monday => Weekday::Monday,
            DayOff::Tuesday => Weekday::Tuesday,
            DayOff::Wednesday => Weekday::Wednesday,
            DayOff::Thursday => Weekday::Thursday,
            DayOff::Friday => Weekday::Friday,
            DayOff::Saturday => Weekday::Saturday,
            DayOff::Sunday => Weekday::Sunday,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    /// Fraction of mean electricity below which a day counts as a rest day.
    pub rest_day_threshold: f64,
    pub weekly_day_off: Option<DayOff>,
    pub summer_months: Vec<String>,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            rest_day_threshold: 0.40,
            weekly_day_off: Some(DayOff::Friday),
            summer_months: strings(&[
                "JUN", "JUNE", "JUL", "JULY", "AUG", "AUGUST", "يونيو", "يوليو", "أغسطس", "اغسطس",
            ]),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    pub sigma: f64,
    pub utilities: Vec<Utility>,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            sigma: 2.0,
            utilities: vec![Utility::Electricity, Utility::WaterIn],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProductionConfig {
    pub default_kg: f64,
    /// Divisor turning monthly production into an average day, and the
    /// month length forecasts project to.
    pub days_per_month: u32,
}

impl Default for ProductionConfig {
    fn default() -> Self {
        Self {
            default_kg: 150_000.0,
            days_per_month: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub language: Language,
    /// Year for sheets whose label carries only a month name.
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    pub snapshot_path: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub columns: ColumnAliases,
    pub baseline: BaselineConfig,
    pub anomaly: AnomalyConfig,
    pub production: ProductionConfig,
    pub report: ReportConfig,
    pub metrics: Option<MetricsConfig>,
}

impl AppConfig {
    /// Load from `DASHBOARD_CONFIG`, else `dashboard-config.toml` when it
    /// exists, else built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        match env::var(CONFIG_ENV) {
            Ok(path) => Self::from_path(&path),
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_path(DEFAULT_CONFIG_PATH),
            Err(_) => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let cfg = Self::from_toml_str(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        tracing::info!(path = %path.display(), "configuration loaded");
        Ok(cfg)
    }

    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let cfg: AppConfig = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let t = self.baseline.rest_day_threshold;
        if !(0.0..=1.0).contains(&t) {
            bail!("baseline.rest_day_threshold must be within [0, 1], got {t}");
        }
        if self.production.days_per_month == 0 {
            bail!("production.days_per_month must be positive");
        }
        if !(self.anomaly.sigma.is_finite() && self.anomaly.sigma >= 0.0) {
            bail!("anomaly.sigma must be a non-negative number");
        }
        if !(self.production.default_kg.is_finite() && self.production.default_kg >= 0.0) {
            bail!("production.default_kg must be a non-negative number");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = AppConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.baseline.rest_day_threshold, 0.40);
        assert_eq!(cfg.baseline.weekly_day_off, Some(DayOff::Friday));
        assert_eq!(cfg.production.days_per_month, 30);
        assert_eq!(cfg.production.default_kg, 150_000.0);
        assert_eq!(cfg.anomaly.sigma, 2.0);
        assert_eq!(cfg.report.language, Language::English);
        assert!(cfg.metrics.is_none());
        assert!(cfg.columns.electricity.iter().any(|f| f == "ELEC"));
    }

    #[test]
    fn partial_sections_override_only_named_keys() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [baseline]
            rest_day_threshold = 0.45
            weekly_day_off = "saturday"

            [anomaly]
            utilities = ["lpg"]

            [report]
            language = "ar"
            year = 2025
            "#,
        )
        .unwrap();
        assert_eq!(cfg.baseline.rest_day_threshold, 0.45);
        assert_eq!(cfg.baseline.weekly_day_off, Some(DayOff::Saturday));
        assert!(!cfg.baseline.summer_months.is_empty());
        assert_eq!(cfg.anomaly.utilities, vec![Utility::Lpg]);
        assert_eq!(cfg.anomaly.sigma, 2.0);
        assert_eq!(cfg.report.language, Language::Arabic);
        assert_eq!(cfg.report.year, Some(2025));
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let err = AppConfig::from_toml_str("[baseline]\nrest_day_threshold = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("rest_day_threshold"));
    }

    #[test]
    fn rejects_zero_days_per_month() {
        assert!(AppConfig::from_toml_str("[production]\ndays_per_month = 0\n").is_err());
    }

    #[test]
    fn day_off_maps_to_weekday() {
        assert_eq!(Weekday::from(DayOff::Friday), Weekday::Friday);
    }
}
