use std::{fs, path::Path, sync::Arc};

use utility_domain::domain::period::label_year;
use utility_domain::domain::{Dataset, Selection};
use utility_domain::query::QueryError;

use crate::analysis::RestDayRule;
use crate::config::{AppConfig, ColumnAliases};
use crate::pipeline::{Pipeline, PipelineError, Transform};
use crate::report::{Language, MonthlyReport, ReportParams, SourceInfo};
use crate::sheet::RawSheet;
use crate::sinks::DatasetSink;
use crate::sources::SheetSource;
use crate::transform::{HeaderNormalization, NumericDateFilter};

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("no readable monthly sheets in {0}")]
    Empty(String),
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Run the sheet pipeline over one file: read sheets, normalize headers,
/// drop undated rows, resolve columns and collect periods.
pub fn load_dataset(path: &Path, aliases: &ColumnAliases) -> Result<Dataset, PipelineError> {
    let transforms: Vec<Arc<dyn Transform<RawSheet, RawSheet> + Send + Sync>> =
        vec![Arc::new(HeaderNormalization), Arc::new(NumericDateFilter)];
    let pipeline = Pipeline {
        source: SheetSource::for_path(path)?,
        transforms,
        sink: DatasetSink::new(aliases.clone()),
    };
    pipeline.run()
}

/// State of one operator session: the uploaded workbook and display
/// language. Every report is recomputed from it on request.
pub struct Session {
    config: AppConfig,
    language: Language,
    source: SourceInfo,
    dataset: Dataset,
}

impl Session {
    pub fn new(config: AppConfig, source: SourceInfo, dataset: Dataset) -> Self {
        Self {
            language: config.report.language,
            config,
            source,
            dataset,
        }
    }

    pub fn open(path: &Path, config: AppConfig) -> Result<Self, SessionError> {
        let (source, dataset) = Self::ingest(path, &config.columns)?;
        Ok(Self::new(config, source, dataset))
    }

    fn ingest(path: &Path, aliases: &ColumnAliases) -> Result<(SourceInfo, Dataset), SessionError> {
        let bytes = fs::read(path).map_err(|source| SessionError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let source = SourceInfo::from_bytes(file_name, &bytes);

        let dataset = load_dataset(path, aliases)?;
        if dataset.is_empty() {
            return Err(SessionError::Empty(source.file_name));
        }

        tracing::info!(
            file = %source.file_name,
            digest = %source.short_digest(),
            periods = dataset.periods.len(),
            rows = dataset.row_count(),
            "workbook loaded"
        );
        Ok((source, dataset))
    }

    /// Swap in a newly uploaded workbook. On failure the current one stays.
    pub fn replace_workbook(&mut self, path: &Path) -> Result<(), SessionError> {
        let (source, dataset) = Self::ingest(path, &self.config.columns)?;
        self.source = source;
        self.dataset = dataset;
        Ok(())
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn source(&self) -> &SourceInfo {
        &self.source
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn toggle_language(&mut self) -> Language {
        self.language = self.language.toggled();
        self.language
    }

    /// Year for sheets labelled with a month only: configured, else a
    /// four-digit year in the workbook file name (`DAILY REPORT 2025.xlsx`).
    pub fn default_year(&self) -> Option<i32> {
        self.config
            .report
            .year
            .or_else(|| label_year(&self.source.file_name))
    }

    pub fn rest_day_rule(&self) -> RestDayRule {
        RestDayRule {
            threshold: self.config.baseline.rest_day_threshold,
            day_off: self.config.baseline.weekly_day_off.map(Into::into),
            default_year: self.default_year(),
        }
    }

    pub fn report(&self, selection: &Selection, production_kg: f64) -> Result<MonthlyReport, SessionError> {
        let params = ReportParams {
            production_kg,
            days_per_month: self.config.production.days_per_month,
            rest_rule: self.rest_day_rule(),
            summer_months: &self.config.baseline.summer_months,
            sigma: self.config.anomaly.sigma,
            anomaly_utilities: &self.config.anomaly.utilities,
            language: self.language,
        };
        Ok(MonthlyReport::build(&self.dataset, selection, &self.source, &params)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use utility_domain::domain::{Period, Reading, ReadingDate};

    fn write_csv(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn opens_csv_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "JAN.csv",
            "Day,Electricity kWh,LPG kg,Water Received,Sanitation,Notes\n\
             1,500,20,100,80,\n\
             2,500,20,100,80,\n\
             Total,1000,40,200,160,\n",
        );

        let session = Session::open(&path, AppConfig::default()).unwrap();
        assert_eq!(session.dataset().labels(), vec!["JAN"]);
        assert_eq!(session.source().file_name, "JAN.csv");

        let report = session.report(&Selection::Period("JAN".into()), 150_000.0).unwrap();
        assert_eq!(report.rows, 2);
        assert_eq!(report.totals.electricity_kwh, 1000.0);
        assert_eq!(report.water_loss.loss_m3, 40.0);
        assert_eq!(report.water_loss.loss_pct, 20.0);
    }

    #[test]
    fn sheet_without_dates_is_an_empty_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "notes.csv", "Remark,Value\nhello,1\n");
        let err = Session::open(&path, AppConfig::default()).err().unwrap();
        assert!(matches!(err, SessionError::Empty(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Session::open(Path::new("/nonexistent/daily.xlsx"), AppConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, SessionError::Read { .. }));
    }

    #[test]
    fn failed_upload_keeps_previous_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_csv(dir.path(), "FEB.csv", "DAY,ELEC\n1,10\n");
        let bad = write_csv(dir.path(), "broken.xlsx", "not a workbook");

        let mut session = Session::open(&good, AppConfig::default()).unwrap();
        assert!(session.replace_workbook(&bad).is_err());
        assert_eq!(session.dataset().labels(), vec!["FEB"]);
        assert_eq!(session.source().file_name, "FEB.csv");
    }

    fn jan_with_fridays() -> Dataset {
        // 2025-01-03 and 2025-01-10 are Fridays.
        let readings = (1..=10u8)
            .map(|day| Reading {
                period: "JAN".into(),
                date: ReadingDate::DayOfMonth(day),
                electricity_kwh: if day == 3 || day == 10 { 900.0 } else { 1000.0 },
                lpg_kg: 0.0,
                water_in_m3: 0.0,
                water_out_m3: 0.0,
                note: None,
            })
            .collect();
        Dataset::new(vec![Period::new("JAN", readings)])
    }

    #[test]
    fn year_in_file_name_enables_weekly_day_off() {
        let source = SourceInfo::from_bytes("DAILY REPORT 2025.xlsx", b"");
        let session = Session::new(AppConfig::default(), source, jan_with_fridays());
        assert_eq!(session.default_year(), Some(2025));

        let report = session.report(&Selection::Period("JAN".into()), 150_000.0).unwrap();
        assert_eq!(report.rest_day_baseline.rest_days, 2);
        assert_eq!(report.rest_day_baseline.value_kwh, 900.0);
        assert!(!report.rest_day_baseline.fallback);
    }

    #[test]
    fn configured_year_wins_over_file_name() {
        let mut config = AppConfig::default();
        config.report.year = Some(2024);
        let source = SourceInfo::from_bytes("DAILY REPORT 2025.xlsx", b"");
        let session = Session::new(config, source, jan_with_fridays());
        assert_eq!(session.default_year(), Some(2024));
    }

    #[test]
    fn without_any_year_only_the_threshold_applies() {
        let source = SourceInfo::from_bytes("daily.xlsx", b"");
        let session = Session::new(AppConfig::default(), source, jan_with_fridays());
        assert_eq!(session.default_year(), None);

        let report = session.report(&Selection::All, 150_000.0).unwrap();
        assert_eq!(report.rest_day_baseline.rest_days, 0);
        assert!(report.rest_day_baseline.fallback);
        assert_eq!(report.rest_day_baseline.value_kwh, 900.0);
    }

    #[test]
    fn huge_date_cell_is_kept_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "JAN.csv", "DAY,ELEC\n1,100\n1e15,200\n");
        let session = Session::open(&path, AppConfig::default()).unwrap();
        let readings = &session.dataset().period("JAN").unwrap().readings;
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[1].date, ReadingDate::Raw(1e15));
        assert_eq!(readings[1].electricity_kwh, 200.0);
    }

    #[test]
    fn language_is_session_scoped() {
        let mut session = Session::new(AppConfig::default(), SourceInfo::from_bytes("x", b""), Dataset::default());
        assert_eq!(session.language(), Language::English);
        assert_eq!(session.toggle_language(), Language::Arabic);
        session.set_language(Language::English);
        assert_eq!(session.language(), Language::English);
    }
}
