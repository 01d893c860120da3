use serde::Serialize;
use utility_domain::domain::{Reading, Selection, Utility};

use crate::analysis::Totals;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Forecast {
    pub utility: Utility,
    pub actual_total: f64,
    pub days_observed: usize,
    pub projected_total: f64,
}

/// Straight-line month-end projection: `(total / days) * month_days`.
///
/// Only defined for a partial month, `0 < days < month_days`.
pub fn project(total: f64, days: usize, month_days: u32) -> Option<f64> {
    if days == 0 || days >= month_days as usize {
        return None;
    }
    Some(total / days as f64 * month_days as f64)
}

/// Projections for every utility of a single-period selection. The
/// full-year selection, an empty month and a complete month get none.
pub fn forecast(rows: &[Reading], selection: &Selection, month_days: u32) -> Vec<Forecast> {
    if selection.is_all() {
        return Vec::new();
    }

    let totals = Totals::of(rows);
    Utility::ALL
        .into_iter()
        .filter_map(|utility| {
            let actual_total = totals.get(utility);
            project(actual_total, rows.len(), month_days).map(|projected_total| Forecast {
                utility,
                actual_total,
                days_observed: rows.len(),
                projected_total,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use utility_domain::domain::ReadingDate;

    fn rows(n: usize, kwh: f64) -> Vec<Reading> {
        (0..n)
            .map(|i| Reading {
                period: "JAN".into(),
                date: ReadingDate::DayOfMonth(i as u8 + 1),
                electricity_kwh: kwh,
                lpg_kg: 2.0,
                water_in_m3: 0.0,
                water_out_m3: 0.0,
                note: None,
            })
            .collect()
    }

    #[test]
    fn projects_partial_month_linearly() {
        assert_eq!(project(1000.0, 10, 30), Some(3000.0));
        assert_eq!(project(70.0, 7, 30), Some(300.0));
    }

    #[test]
    fn no_projection_for_empty_or_complete_month() {
        assert_eq!(project(1000.0, 0, 30), None);
        assert_eq!(project(1000.0, 30, 30), None);
        assert_eq!(project(1000.0, 31, 30), None);
    }

    #[test]
    fn month_length_is_a_parameter() {
        assert_eq!(project(100.0, 10, 31), Some(310.0));
    }

    #[test]
    fn forecasts_each_utility_for_one_period() {
        let f = forecast(&rows(10, 100.0), &Selection::Period("JAN".into()), 30);
        assert_eq!(f.len(), 4);
        assert_eq!(f[0].utility, Utility::Electricity);
        assert_eq!(f[0].actual_total, 1000.0);
        assert_eq!(f[0].projected_total, 3000.0);
        assert_eq!(f[1].projected_total, 60.0);
        assert_eq!(f[2].projected_total, 0.0);
        assert!(f.iter().all(|x| x.days_observed == 10));
    }

    #[test]
    fn no_forecast_for_full_year_or_empty_rows() {
        assert!(forecast(&rows(10, 100.0), &Selection::All, 30).is_empty());
        assert!(forecast(&[], &Selection::Period("JAN".into()), 30).is_empty());
    }
}
