use serde::Serialize;
use utility_domain::domain::{Reading, Utility};

use super::stats;

/// Utilities reported per kilogram of product.
pub const INTENSITY_UTILITIES: [Utility; 3] = [Utility::Electricity, Utility::Lpg, Utility::WaterIn];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Intensity {
    pub utility: Utility,
    /// Utility units per kg of product.
    pub per_kg: f64,
}

/// Monthly production spread over a fixed-length month.
///
/// The divisor is a parameter, not the calendar length of the month.
pub fn avg_daily_production(production_kg: f64, days_per_month: u32) -> f64 {
    if days_per_month == 0 || !production_kg.is_finite() {
        return 0.0;
    }
    production_kg / days_per_month as f64
}

/// Mean daily consumption over the implied daily production; 0 when there
/// is no production or no rows.
pub fn intensity(rows: &[Reading], utility: Utility, avg_daily_prod: f64) -> f64 {
    if avg_daily_prod <= 0.0 {
        return 0.0;
    }
    let values: Vec<f64> = rows.iter().map(|r| r.value(utility)).collect();
    stats::mean(&values).map_or(0.0, |m| m / avg_daily_prod)
}

pub fn intensities(rows: &[Reading], avg_daily_prod: f64) -> Vec<Intensity> {
    INTENSITY_UTILITIES
        .into_iter()
        .map(|utility| Intensity {
            utility,
            per_kg: intensity(rows, utility, avg_daily_prod),
        })
        .collect()
}
