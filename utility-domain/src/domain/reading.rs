use std::fmt;

use serde::{Deserialize, Serialize};
use time::{macros::date, Date, Duration, Month};

/// Spreadsheet date serials count days from this epoch (the 1900 leap-year
/// bug is already folded into the offset).
const SERIAL_EPOCH: Date = date!(1899 - 12 - 30);

/// Serial of 9999-12-31, the last date a spreadsheet can hold.
const MAX_SERIAL: f64 = 2_958_465.0;

/// Utility columns carried by every reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Utility {
    Electricity,
    Lpg,
    WaterIn,
    WaterOut,
}

impl Utility {
    pub const ALL: [Utility; 4] = [
        Utility::Electricity,
        Utility::Lpg,
        Utility::WaterIn,
        Utility::WaterOut,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Utility::Electricity => "electricity",
            Utility::Lpg => "lpg",
            Utility::WaterIn => "water_in",
            Utility::WaterOut => "water_out",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Utility::Electricity => "kWh",
            Utility::Lpg => "kg",
            Utility::WaterIn | Utility::WaterOut => "m3",
        }
    }
}

/// The date cell of a reading after numeric coercion.
///
/// Small integral values are days of the month; larger values are
/// spreadsheet date serials. Anything else numeric is kept as-is so the
/// row still counts towards every metric that does not need a weekday.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ReadingDate {
    DayOfMonth(u8),
    Calendar(Date),
    Raw(f64),
}

impl ReadingDate {
    pub fn from_numeric(value: f64) -> Self {
        if value.fract() == 0.0 && (1.0..=31.0).contains(&value) {
            return ReadingDate::DayOfMonth(value as u8);
        }
        if value > 31.0 && value <= MAX_SERIAL {
            if let Some(d) = SERIAL_EPOCH.checked_add(Duration::days(value.floor() as i64)) {
                return ReadingDate::Calendar(d);
            }
        }
        ReadingDate::Raw(value)
    }

    /// Resolve to a calendar date. Day-of-month values need the month and
    /// year of their period.
    pub fn calendar(&self, year_month: Option<(i32, Month)>) -> Option<Date> {
        match *self {
            ReadingDate::Calendar(d) => Some(d),
            ReadingDate::DayOfMonth(day) => {
                let (year, month) = year_month?;
                Date::from_calendar_date(year, month, day).ok()
            }
            ReadingDate::Raw(_) => None,
        }
    }
}

impl fmt::Display for ReadingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadingDate::DayOfMonth(d) => write!(f, "day {d}"),
            ReadingDate::Calendar(d) => write!(f, "{d}"),
            ReadingDate::Raw(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub period: String,
    pub date: ReadingDate,
    pub electricity_kwh: f64,
    pub lpg_kg: f64,
    pub water_in_m3: f64,
    pub water_out_m3: f64,
    pub note: Option<String>,
}

impl Reading {
    pub fn value(&self, utility: Utility) -> f64 {
        match utility {
            Utility::Electricity => self.electricity_kwh,
            Utility::Lpg => self.lpg_kg,
            Utility::WaterIn => self.water_in_m3,
            Utility::WaterOut => self.water_out_m3,
        }
    }
}
