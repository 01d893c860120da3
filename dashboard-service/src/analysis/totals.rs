use serde::Serialize;
use utility_domain::domain::{Reading, Utility};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub electricity_kwh: f64,
    pub lpg_kg: f64,
    pub water_in_m3: f64,
    pub water_out_m3: f64,
}

impl Totals {
    pub fn of(rows: &[Reading]) -> Self {
        rows.iter().fold(Self::default(), |acc, r| Self {
            electricity_kwh: acc.electricity_kwh + r.electricity_kwh,
            lpg_kg: acc.lpg_kg + r.lpg_kg,
            water_in_m3: acc.water_in_m3 + r.water_in_m3,
            water_out_m3: acc.water_out_m3 + r.water_out_m3,
        })
    }

    pub fn get(&self, utility: Utility) -> f64 {
        match utility {
            Utility::Electricity => self.electricity_kwh,
            Utility::Lpg => self.lpg_kg,
            Utility::WaterIn => self.water_in_m3,
            Utility::WaterOut => self.water_out_m3,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WaterLoss {
    pub loss_m3: f64,
    /// Loss as a percentage of water received; 0 when nothing was received.
    pub loss_pct: f64,
}

pub fn water_loss(totals: &Totals) -> WaterLoss {
    let loss_m3 = totals.water_in_m3 - totals.water_out_m3;
    let loss_pct = if totals.water_in_m3 == 0.0 {
        0.0
    } else {
        loss_m3 / totals.water_in_m3 * 100.0
    };
    WaterLoss { loss_m3, loss_pct }
}
