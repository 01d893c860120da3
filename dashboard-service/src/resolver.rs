//! Maps loosely named sheet columns onto canonical fields.
//!
//! Header spelling and language vary between workbooks, so each field is
//! described by a list of fragments. The first column (in sheet order) whose
//! name contains any fragment wins. Missing fields fall back to zeros.

use utility_domain::domain::Utility;

use crate::config::ColumnAliases;
use crate::sheet::{Cell, RawSheet};

/// Index of the first header containing any of `fragments`, compared
/// case-insensitively. Empty fragments never match.
pub fn resolve<S: AsRef<str>>(headers: &[String], fragments: &[S]) -> Option<usize> {
    let fragments: Vec<String> = fragments
        .iter()
        .map(|f| f.as_ref().trim().to_uppercase())
        .filter(|f| !f.is_empty())
        .collect();

    headers.iter().position(|h| {
        let h = h.to_uppercase();
        fragments.iter().any(|f| h.contains(f.as_str()))
    })
}

/// Numeric values of a column. An unresolved column is all zeros, and any
/// cell that is not a number counts as zero.
pub fn numeric_column(sheet: &RawSheet, column: Option<usize>) -> Vec<f64> {
    let Some(col) = column else {
        return vec![0.0; sheet.rows.len()];
    };

    let mut coerced = 0u64;
    let values: Vec<f64> = (0..sheet.rows.len())
        .map(|row| {
            let cell = sheet.cell(row, col);
            cell.as_number().unwrap_or_else(|| {
                if *cell != Cell::Empty {
                    coerced += 1;
                }
                0.0
            })
        })
        .collect();

    if coerced > 0 {
        tracing::debug!(sheet = %sheet.name, column = %sheet.headers[col], coerced, "non-numeric cells read as zero");
        metrics::counter!("dashboard_cells_coerced_total").increment(coerced);
    }
    values
}

/// Column positions for every canonical field of one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolvedColumns {
    pub electricity: Option<usize>,
    pub lpg: Option<usize>,
    pub water_in: Option<usize>,
    pub water_out: Option<usize>,
    pub note: Option<usize>,
}

impl ResolvedColumns {
    pub fn resolve(headers: &[String], aliases: &ColumnAliases) -> Self {
        Self {
            electricity: resolve(headers, aliases.for_utility(Utility::Electricity)),
            lpg: resolve(headers, aliases.for_utility(Utility::Lpg)),
            water_in: resolve(headers, aliases.for_utility(Utility::WaterIn)),
            water_out: resolve(headers, aliases.for_utility(Utility::WaterOut)),
            note: resolve(headers, &aliases.note),
        }
    }

    pub fn utility(&self, utility: Utility) -> Option<usize> {
        match utility {
            Utility::Electricity => self.electricity,
            Utility::Lpg => self.lpg,
            Utility::WaterIn => self.water_in,
            Utility::WaterOut => self.water_out,
        }
    }

    pub fn missing(&self) -> Vec<Utility> {
        Utility::ALL
            .into_iter()
            .filter(|u| self.utility(*u).is_none())
            .collect()
    }
}
