//! Pure metric functions over a selected row-set.

pub mod anomaly;
pub mod baseline;
pub mod intensity;
pub mod stats;
pub mod totals;

pub use anomaly::{detect_all, Anomaly};
pub use baseline::{rest_day_baseline, seasonal_baseline, RestDayBaseline, RestDayRule};
pub use intensity::{avg_daily_production, intensities, Intensity};
pub use totals::{water_loss, Totals, WaterLoss};
