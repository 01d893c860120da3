use serde::Serialize;
use time::{Date, Weekday};
use utility_domain::domain::period::{label_month, label_year, same_label};
use utility_domain::domain::Reading;

use super::stats;

/// How rest days are recognised in a row-set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestDayRule {
    /// Fraction of mean electricity below which a day counts as rest.
    pub threshold: f64,
    pub day_off: Option<Weekday>,
    /// Year for day-of-month readings whose sheet label has none.
    pub default_year: Option<i32>,
}

impl Default for RestDayRule {
    fn default() -> Self {
        Self {
            threshold: 0.40,
            day_off: Some(Weekday::Friday),
            default_year: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RestDayBaseline {
    pub value_kwh: f64,
    pub rest_days: usize,
    /// True when no row qualified and the minimum reading was used instead.
    pub fallback: bool,
}

/// Calendar date of a reading, using its period label for month and year.
pub fn calendar_date(reading: &Reading, default_year: Option<i32>) -> Option<Date> {
    let month = label_month(&reading.period);
    let year = label_year(&reading.period).or(default_year);
    reading.date.calendar(year.zip(month))
}

pub fn is_rest_day(reading: &Reading, mean_kwh: f64, rule: &RestDayRule) -> bool {
    let on_day_off = rule.day_off.is_some_and(|day_off| {
        calendar_date(reading, rule.default_year).is_some_and(|d| d.weekday() == day_off)
    });
    on_day_off || reading.electricity_kwh < rule.threshold * mean_kwh
}

/// Mean electricity over rest days, or the row-set minimum when there are none.
pub fn rest_day_baseline(rows: &[Reading], rule: &RestDayRule) -> RestDayBaseline {
    let kwh: Vec<f64> = rows.iter().map(|r| r.electricity_kwh).collect();
    let Some(mean_kwh) = stats::mean(&kwh) else {
        return RestDayBaseline {
            value_kwh: 0.0,
            rest_days: 0,
            fallback: true,
        };
    };

    let rest: Vec<f64> = rows
        .iter()
        .filter(|r| is_rest_day(r, mean_kwh, rule))
        .map(|r| r.electricity_kwh)
        .collect();

    match stats::mean(&rest) {
        Some(value_kwh) => RestDayBaseline {
            value_kwh,
            rest_days: rest.len(),
            fallback: false,
        },
        None => RestDayBaseline {
            value_kwh: stats::min(&kwh).unwrap_or(0.0),
            rest_days: 0,
            fallback: true,
        },
    }
}

/// A period label counts as summer when it equals one of the configured
/// names or names the same calendar month.
pub fn is_summer(label: &str, summer_months: &[String]) -> bool {
    let month = label_month(label);
    summer_months.iter().any(|name| {
        same_label(name, label) || (month.is_some() && label_month(name) == month)
    })
}

/// Mean electricity over summer rows; `None` when there are none.
pub fn seasonal_baseline<'a, I>(rows: I, summer_months: &[String]) -> Option<f64>
where
    I: IntoIterator<Item = &'a Reading>,
{
    let kwh: Vec<f64> = rows
        .into_iter()
        .filter(|r| is_summer(&r.period, summer_months))
        .map(|r| r.electricity_kwh)
        .collect();
    stats::mean(&kwh)
}
