use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display language of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ar")]
    Arabic,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::English => Language::Arabic,
            Language::Arabic => Language::English,
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "ar" | "arabic" | "العربية" => Ok(Language::Arabic),
            other => Err(format!("unknown language '{other}' (expected en or ar)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Title,
    Period,
    AllPeriods,
    Source,
    Rows,
    Production,
    AvgDailyProduction,
    TotalElectricity,
    TotalLpg,
    TotalWaterIn,
    TotalWaterOut,
    WaterLoss,
    WaterLossPct,
    IntensityElectricity,
    IntensityLpg,
    IntensityWaterIn,
    RestDayBaseline,
    RestDays,
    SeasonalBaseline,
    AnomalyCount,
    Anomalies,
    NoAnomalies,
    Forecast,
    NoForecast,
    PeriodSummaries,
    NotAvailable,
}

impl Label {
    pub fn text(self, lang: Language) -> &'static str {
        let (en, ar) = match self {
            Label::Title => ("Utilities Consumption Report", "تقرير استهلاك المرافق"),
            Label::Period => ("Period", "الفترة"),
            Label::AllPeriods => ("All months", "كل الأشهر"),
            Label::Source => ("Source", "المصدر"),
            Label::Rows => ("Days recorded", "عدد الأيام"),
            Label::Production => ("Monthly production", "الإنتاج الشهري"),
            Label::AvgDailyProduction => ("Average daily production", "متوسط الإنتاج اليومي"),
            Label::TotalElectricity => ("Total electricity", "إجمالي الكهرباء"),
            Label::TotalLpg => ("Total LPG", "إجمالي الغاز"),
            Label::TotalWaterIn => ("Water received", "المياه الواردة"),
            Label::TotalWaterOut => ("Water discharged", "مياه الصرف"),
            Label::WaterLoss => ("Water loss", "فاقد المياه"),
            Label::WaterLossPct => ("Water loss %", "نسبة فاقد المياه"),
            Label::IntensityElectricity => ("Electricity per kg", "الكهرباء لكل كجم"),
            Label::IntensityLpg => ("LPG per kg", "الغاز لكل كجم"),
            Label::IntensityWaterIn => ("Water per kg", "المياه لكل كجم"),
            Label::RestDayBaseline => ("Rest-day baseline", "خط الأساس لأيام العطلة"),
            Label::RestDays => ("Rest days", "أيام العطلة"),
            Label::SeasonalBaseline => ("Summer baseline", "خط الأساس الصيفي"),
            Label::AnomalyCount => ("Anomalies flagged", "عدد القراءات الشاذة"),
            Label::Anomalies => ("Anomalies", "القراءات الشاذة"),
            Label::NoAnomalies => ("No anomalies", "لا توجد قراءات شاذة"),
            Label::Forecast => ("Month-end forecast", "توقع نهاية الشهر"),
            Label::NoForecast => ("No forecast", "لا يوجد توقع"),
            Label::PeriodSummaries => ("Monthly totals", "الإجماليات الشهرية"),
            Label::NotAvailable => ("n/a", "غير متاح"),
        };
        match lang {
            Language::English => en,
            Language::Arabic => ar,
        }
    }
}
