use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use utility_dashboard::{
    config::AppConfig,
    metrics_snapshot, observability,
    report::{text, Language},
    sinks::{CsvReportSink, JsonReportSink, ReportSink},
    Session,
};
use utility_domain::domain::Selection;

#[derive(Parser)]
#[command(name = "utility-dashboard")]
#[command(author, version, about = "Daily utilities consumption report", long_about = None)]
struct Cli {
    /// Workbook with one sheet per month (xlsx, xls, ods or csv)
    #[arg(value_name = "WORKBOOK")]
    workbook: PathBuf,

    /// Sheet label to report on; the whole workbook when omitted
    #[arg(short, long)]
    period: Option<String>,

    /// Monthly production in kg
    #[arg(long, value_parser = parse_production)]
    production_kg: Option<f64>,

    /// Report language (en, ar)
    #[arg(long, env = "DASHBOARD_LANG")]
    lang: Option<Language>,

    /// Write the metrics table as CSV
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Write the full report as JSON
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Print period labels with row counts and exit
    #[arg(long)]
    list_periods: bool,
}

fn parse_production(s: &str) -> Result<f64, String> {
    let kg: f64 = s.trim().parse().map_err(|_| format!("'{s}' is not a number"))?;
    if !kg.is_finite() || kg < 1.0 {
        return Err(format!("production must be at least 1 kg, got {s}"));
    }
    Ok(kg)
}

fn run(cli: Cli, cfg: AppConfig) -> Result<()> {
    let default_kg = cfg.production.default_kg;

    let mut session = Session::open(&cli.workbook, cfg)?;
    if let Some(lang) = cli.lang {
        session.set_language(lang);
    }

    if cli.list_periods {
        for period in &session.dataset().periods {
            println!("{}\t{}", period.label, period.readings.len());
        }
        return Ok(());
    }

    let selection = match cli.period {
        Some(label) => Selection::Period(label),
        None => Selection::All,
    };
    let report = session.report(&selection, cli.production_kg.unwrap_or(default_kg))?;

    print!("{}", text::render(&report));

    if let Some(path) = &cli.csv {
        CsvReportSink::new(path)
            .write(&report)
            .with_context(|| format!("failed to export {}", path.display()))?;
    }
    if let Some(path) = &cli.json {
        JsonReportSink::new(path)
            .write(&report)
            .with_context(|| format!("failed to export {}", path.display()))?;
    }
    Ok(())
}

fn main() -> ExitCode {
    observability::init_tracing();
    metrics_snapshot::init();

    let cli = Cli::parse();
    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    let snapshot_path = cfg.metrics.as_ref().map(|m| m.snapshot_path.clone());

    let outcome = run(cli, cfg);

    // The snapshot is written whatever the outcome.
    if let Some(path) = snapshot_path {
        if let Err(e) = metrics_snapshot::write_snapshot(path) {
            tracing::warn!(error = %e, "metrics snapshot not written");
        }
    }

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
