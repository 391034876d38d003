//! Generic progressive band evaluator
//!
//! A schedule is an ordered list of `(threshold, marginal_rate)` pairs. Each
//! rate applies only to the slice of the amount between its threshold and the
//! next one, so the liability is continuous in the amount.

use serde::{Deserialize, Serialize};

/// One bracket of a progressive schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Amount at which this bracket starts
    pub threshold: f64,
    /// Marginal rate as a fraction (0.20 = 20%)
    pub rate: f64,
}

impl Band {
    pub fn new(threshold: f64, rate: f64) -> Self {
        Self { threshold, rate }
    }
}

/// Ordered progressive schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandSchedule {
    bands: Vec<Band>,
}

impl BandSchedule {
    /// Build a schedule; bands are sorted by threshold
    pub fn new(mut bands: Vec<Band>) -> Self {
        bands.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
        Self { bands }
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Total liability on `amount`
    ///
    /// Amounts at or below the first threshold owe nothing.
    pub fn liability(&self, amount: f64) -> f64 {
        let mut total = 0.0;

        for (idx, band) in self.bands.iter().enumerate() {
            if amount <= band.threshold {
                break;
            }
            let ceiling = self
                .bands
                .get(idx + 1)
                .map(|next| next.threshold)
                .unwrap_or(f64::INFINITY);
            let slice = amount.min(ceiling) - band.threshold;
            total += slice * band.rate;
        }

        total
    }

}
