//! Annual discounting of repayment streams at a single flat rate

use serde::{Deserialize, Serialize};

use crate::params::DEFAULT_DISCOUNT_RATE;

/// Flat annual discount curve for present-value calculations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountCurve {
    /// Annual rate as a fraction
    pub rate: f64,
}

impl DiscountCurve {
    pub fn single_rate(rate: f64) -> Self {
        Self { rate }
    }

    /// Factor applied to a cash flow landing in year `year`
    ///
    /// Year 0 is undiscounted.
    pub fn discount_factor(&self, year: usize) -> f64 {
        (1.0 + self.rate).powi(-(year as i32))
    }

    /// Present value of a per-year stream
    pub fn present_value(&self, cashflows: &[f64]) -> f64 {
        cashflows
            .iter()
            .enumerate()
            .map(|(year, amount)| amount * self.discount_factor(year))
            .sum()
    }
}

impl Default for DiscountCurve {
    fn default() -> Self {
        Self::single_rate(DEFAULT_DISCOUNT_RATE)
    }
}
