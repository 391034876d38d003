//! Year-by-year income projection

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::params::{ensure_growth_rate, ensure_non_negative};

/// Per-year income, index 0 is the first year of repayment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncomeSeries(Vec<f64>);

impl IncomeSeries {
    /// Wrap already-projected values (e.g. from an external source)
    pub fn from_values(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, year: usize) -> Option<f64> {
        self.0.get(year).copied()
    }

    /// Income used for the first year
    pub fn first_year(&self) -> Option<f64> {
        self.0.first().copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }
}

/// Project income for `years` years of constant growth
///
/// `growth_rate` is a percentage (5.0 = 5% per year). When `net_transform` is
/// given it maps each gross figure to the value stored in the series.
pub fn project_income(
    start: f64,
    growth_rate: f64,
    years: i64,
    net_transform: Option<&dyn Fn(f64) -> f64>,
) -> Result<IncomeSeries> {
    if years <= 0 {
        return Err(SimulationError::invalid(
            "horizon_years",
            format!("must be positive, got {years}"),
        ));
    }
    ensure_non_negative("starting_income", start)?;
    ensure_growth_rate(growth_rate)?;

    let factor = 1.0 + growth_rate / 100.0;
    let values = (0..years)
        .map(|t| {
            let gross = start * factor.powi(t as i32);
            match net_transform {
                Some(transform) => transform(gross),
                None => gross,
            }
        })
        .collect();

    Ok(IncomeSeries(values))
}
