use std::fmt;

use super::{Label, Language, MonthlyReport};

const RULE_WIDTH: usize = 64;

fn format_value(value: Option<f64>, unit: &str, lang: Language) -> String {
    match value {
        None => Label::NotAvailable.text(lang).to_string(),
        // Per-kg intensities are small; keep enough digits to compare months.
        Some(v) if unit.ends_with("/kg") => format!("{v:.4} {unit}"),
        Some(v) => format!("{v:.2} {unit}").trim_end().to_string(),
    }
}

/// Plain-text layout of a report; `render` is the usual entry point.
pub struct TextReport<'a>(pub &'a MonthlyReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let lang = report.language;
        let rule = "-".repeat(RULE_WIDTH);

        writeln!(f, "{}", Label::Title.text(lang))?;
        writeln!(f, "{}: {}", Label::Period.text(lang), report.period_title())?;
        writeln!(
            f,
            "{}: {} ({})",
            Label::Source.text(lang),
            report.source.file_name,
            report.source.short_digest()
        )?;
        writeln!(f, "{rule}")?;

        for row in report.metrics_table() {
            let label = match row.label {
                Label::Forecast => format!("{} ({})", row.label.text(lang), row.unit),
                other => other.text(lang).to_string(),
            };
            writeln!(f, "{label:<34} {}", format_value(row.value, row.unit, lang))?;
        }

        writeln!(f, "{rule}")?;
        writeln!(f, "{}", Label::Anomalies.text(lang))?;
        if report.anomalies.is_empty() {
            writeln!(f, "  {}", Label::NoAnomalies.text(lang))?;
        }
        for a in &report.anomalies {
            write!(
                f,
                "  {} {:<12} {:<12} {:>12.2} > {:.2}",
                a.period,
                a.date.to_string(),
                a.utility.key(),
                a.value,
                a.threshold
            )?;
            match &a.note {
                Some(note) => writeln!(f, "  [{note}]")?,
                None => writeln!(f)?,
            }
        }

        if !report.full_year && report.forecasts.is_empty() {
            writeln!(f, "{}: {}", Label::Forecast.text(lang), Label::NoForecast.text(lang))?;
        }

        if report.period_summaries.len() > 1 {
            writeln!(f, "{rule}")?;
            writeln!(f, "{}", Label::PeriodSummaries.text(lang))?;
            for p in &report.period_summaries {
                writeln!(
                    f,
                    "  {:<12} {:>4} {:>14.2} {:>12.2} {:>12.2} {:>12.2}",
                    p.label, p.rows, p.electricity_kwh, p.lpg_kg, p.water_in_m3, p.water_out_m3
                )?;
            }
        }
        Ok(())
    }
}

/// Printable plain-text report for one selection.
pub fn render(report: &MonthlyReport) -> String {
    TextReport(report).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{RestDayBaseline, Totals, WaterLoss};
    use crate::report::SourceInfo;

    fn report(language: Language) -> MonthlyReport {
        MonthlyReport {
            selection: "JAN".into(),
            full_year: false,
            language,
            source: SourceInfo::from_bytes("daily.xlsx", b"x"),
            rows: 12,
            production_kg: 150_000.0,
            avg_daily_production_kg: 5_000.0,
            totals: Totals {
                electricity_kwh: 6_000.0,
                lpg_kg: 120.0,
                water_in_m3: 240.0,
                water_out_m3: 180.0,
            },
            water_loss: WaterLoss {
                loss_m3: 60.0,
                loss_pct: 25.0,
            },
            intensities: vec![],
            rest_day_baseline: RestDayBaseline {
                value_kwh: 200.0,
                rest_days: 2,
                fallback: false,
            },
            seasonal_baseline_kwh: None,
            anomalies: vec![],
            forecasts: vec![],
            period_summaries: vec![],
            daily: vec![],
        }
    }

    #[test]
    fn renders_header_and_metrics() {
        let text = render(&report(Language::English));
        assert!(text.starts_with("Utilities Consumption Report\n"));
        assert!(text.contains("Period: JAN"));
        assert!(text.contains("Total electricity"));
        assert!(text.contains("6000.00 kWh"));
        assert!(text.contains("Water loss %"));
        assert!(text.contains("25.00 %"));
        assert!(text.contains("No anomalies"));
        assert!(text.contains("Month-end forecast: No forecast"));
    }

    #[test]
    fn anomaly_lines_end_with_note_or_newline() {
        use crate::analysis::Anomaly;
        use utility_domain::domain::{ReadingDate, Utility};

        let mut r = report(Language::English);
        let spike = Anomaly {
            period: "JAN".into(),
            date: ReadingDate::DayOfMonth(5),
            utility: Utility::Electricity,
            value: 900.0,
            threshold: 537.8,
            note: Some("compressor test".into()),
        };
        r.anomalies = vec![spike.clone(), Anomaly { note: None, ..spike }];

        let text = TextReport(&r).to_string();
        assert_eq!(text, render(&r));
        let lines: Vec<&str> = text.lines().filter(|l| l.contains("900.00 > 537.80")).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[compressor test]"));
        assert!(lines[1].ends_with("537.80"));
        assert!(!text.contains("No anomalies"));
    }

    #[test]
    fn renders_in_arabic() {
        let text = render(&report(Language::Arabic));
        assert!(text.starts_with("تقرير استهلاك المرافق"));
        assert!(text.contains("الفترة: JAN"));
        assert!(text.contains("غير متاح"));
    }
}
