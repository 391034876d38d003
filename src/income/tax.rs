//! Income tax and social-insurance levy schedule used for net income
//!
//! Defaults are the UK 2023/24 income tax and Class 1 employee National
//! Insurance figures. Every figure is a named field so a caller (or a CSV
//! table, see [`crate::config`]) can override it.

use serde::{Deserialize, Serialize};

use super::bands::{Band, BandSchedule};
use crate::error::ConfigError;

/// Named tax and levy parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSchedule {
    /// Personal allowance: income up to here is untaxed
    pub allowance_threshold: f64,
    /// Gross income where the basic band ends (for a full allowance)
    pub basic_band_ceiling: f64,
    /// Taxable income where the higher band ends
    pub higher_band_ceiling: f64,
    pub basic_rate: f64,
    pub higher_rate: f64,
    pub additional_rate: f64,
    /// Gross income above which the allowance is withdrawn
    pub allowance_taper_start: f64,
    /// Allowance lost per unit of income over the taper start
    pub allowance_taper_ratio: f64,
    pub levy_lower_threshold: f64,
    pub levy_upper_threshold: f64,
    pub levy_primary_rate: f64,
    pub levy_upper_rate: f64,
}

impl Default for TaxSchedule {
    fn default() -> Self {
        Self::uk_2023_24()
    }
}

/// Gross-to-net decomposition for one income figure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetIncomeBreakdown {
    pub gross: f64,
    pub allowance: f64,
    pub taxable: f64,
    pub income_tax: f64,
    pub levy: f64,
    pub net: f64,
}

impl TaxSchedule {
    pub fn uk_2023_24() -> Self {
        Self {
            allowance_threshold: 12_570.0,
            basic_band_ceiling: 50_270.0,
            higher_band_ceiling: 125_140.0,
            basic_rate: 0.20,
            higher_rate: 0.40,
            additional_rate: 0.45,
            allowance_taper_start: 100_000.0,
            allowance_taper_ratio: 0.5,
            levy_lower_threshold: 12_570.0,
            levy_upper_threshold: 50_270.0,
            levy_primary_rate: 0.12,
            levy_upper_rate: 0.02,
        }
    }

    /// Names accepted by [`TaxSchedule::set`]
    pub const PARAMETER_NAMES: [&'static str; 12] = [
        "allowance_threshold",
        "basic_band_ceiling",
        "higher_band_ceiling",
        "basic_rate",
        "higher_rate",
        "additional_rate",
        "allowance_taper_start",
        "allowance_taper_ratio",
        "levy_lower_threshold",
        "levy_upper_threshold",
        "levy_primary_rate",
        "levy_upper_rate",
    ];

    /// Override one named parameter
    ///
    /// Thresholds must be non-negative; rates must be fractions in [0, 1].
    pub fn set(&mut self, name: &str, value: f64) -> Result<(), ConfigError> {
        let is_rate = name.ends_with("_rate") || name == "allowance_taper_ratio";
        let in_domain = value.is_finite() && value >= 0.0 && (!is_rate || value <= 1.0);

        let slot = match name {
            "allowance_threshold" => &mut self.allowance_threshold,
            "basic_band_ceiling" => &mut self.basic_band_ceiling,
            "higher_band_ceiling" => &mut self.higher_band_ceiling,
            "basic_rate" => &mut self.basic_rate,
            "higher_rate" => &mut self.higher_rate,
            "additional_rate" => &mut self.additional_rate,
            "allowance_taper_start" => &mut self.allowance_taper_start,
            "allowance_taper_ratio" => &mut self.allowance_taper_ratio,
            "levy_lower_threshold" => &mut self.levy_lower_threshold,
            "levy_upper_threshold" => &mut self.levy_upper_threshold,
            "levy_primary_rate" => &mut self.levy_primary_rate,
            "levy_upper_rate" => &mut self.levy_upper_rate,
            other => return Err(ConfigError::UnknownParameter(other.to_string())),
        };

        if !in_domain {
            return Err(ConfigError::InvalidValue {
                name: name.to_string(),
                value: value.to_string(),
            });
        }

        *slot = value;
        Ok(())
    }

    /// Allowance left after the high-income taper
    pub fn personal_allowance(&self, gross: f64) -> f64 {
        let excess = (gross - self.allowance_taper_start).max(0.0);
        (self.allowance_threshold - excess * self.allowance_taper_ratio).max(0.0)
    }

    /// Income tax brackets expressed on taxable income (gross minus allowance)
    ///
    /// The basic band keeps its full width whatever the allowance, so a
    /// tapered allowance pulls more gross income into the higher band rather
    /// than counting the same slice twice.
    pub fn income_tax_bands(&self) -> BandSchedule {
        let basic_width = (self.basic_band_ceiling - self.allowance_threshold).max(0.0);
        let additional_start = self.higher_band_ceiling.max(basic_width);

        BandSchedule::new(vec![
            Band::new(0.0, self.basic_rate),
            Band::new(basic_width, self.higher_rate),
            Band::new(additional_start, self.additional_rate),
        ])
    }

    pub fn levy_bands(&self) -> BandSchedule {
        let upper = self.levy_upper_threshold.max(self.levy_lower_threshold);
        BandSchedule::new(vec![
            Band::new(self.levy_lower_threshold, self.levy_primary_rate),
            Band::new(upper, self.levy_upper_rate),
        ])
    }

    pub fn income_tax(&self, gross: f64) -> f64 {
        self.breakdown(gross).income_tax
    }

    pub fn levy(&self, gross: f64) -> f64 {
        self.levy_bands().liability(gross.max(0.0))
    }

    /// Gross income minus income tax minus levy
    pub fn net_income(&self, gross: f64) -> f64 {
        self.breakdown(gross).net
    }

    pub fn breakdown(&self, gross: f64) -> NetIncomeBreakdown {
        let gross = gross.max(0.0);
        let allowance = self.personal_allowance(gross);
        let taxable = (gross - allowance).max(0.0);
        let income_tax = self.income_tax_bands().liability(taxable);
        let levy = self.levy_bands().liability(gross);

        NetIncomeBreakdown {
            gross,
            allowance,
            taxable,
            income_tax,
            levy,
            net: gross - income_tax - levy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zero_gross_is_zero_net() {
        let schedule = TaxSchedule::default();
        assert_eq!(schedule.net_income(0.0), 0.0);
    }

    #[test]
    fn test_no_tax_at_allowance() {
        let schedule = TaxSchedule::default();
        assert_eq!(schedule.income_tax(schedule.allowance_threshold), 0.0);
        assert_eq!(schedule.levy(schedule.levy_lower_threshold), 0.0);
    }

    #[test]
    fn test_basic_rate_taxpayer() {
        let b = TaxSchedule::default().breakdown(30_000.0);
        assert_abs_diff_eq!(b.income_tax, 3_486.0, epsilon = 1e-6);
        assert_abs_diff_eq!(b.levy, 2_091.6, epsilon = 1e-6);
        assert_abs_diff_eq!(b.net, 24_422.4, epsilon = 1e-6);
    }

    #[test]
    fn test_top_of_basic_band() {
        let b = TaxSchedule::default().breakdown(50_270.0);
        assert_abs_diff_eq!(b.income_tax, 7_540.0, epsilon = 1e-6);
        assert_abs_diff_eq!(b.levy, 4_524.0, epsilon = 1e-6);
        assert_abs_diff_eq!(b.net, 38_206.0, epsilon = 1e-6);
    }

    #[test]
    fn test_taper_start() {
        let b = TaxSchedule::default().breakdown(100_000.0);
        assert_abs_diff_eq!(b.allowance, 12_570.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.income_tax, 27_432.0, epsilon = 1e-6);
    }

    #[test]
    fn test_allowance_fully_tapered() {
        let schedule = TaxSchedule::default();
        let b = schedule.breakdown(150_000.0);
        assert_eq!(b.allowance, 0.0);
        assert_abs_diff_eq!(b.taxable, 150_000.0, epsilon = 1e-9);
        // 37,700 @ 20% + 87,440 @ 40% + 24,860 @ 45%
        assert_abs_diff_eq!(b.income_tax, 53_703.0, epsilon = 1e-6);
        assert_abs_diff_eq!(b.levy, 6_518.6, epsilon = 1e-6);
    }

    #[test]
    fn test_continuous_at_band_boundaries() {
        let schedule = TaxSchedule::default();
        let eps = 1e-4;
        let boundaries = [
            schedule.allowance_threshold,
            schedule.allowance_taper_start,
            schedule.basic_band_ceiling,
            schedule.higher_band_ceiling,
        ];
        for boundary in boundaries {
            let below = schedule.net_income(boundary - eps);
            let above = schedule.net_income(boundary + eps);
            // Steepest marginal deduction is 62% inside the taper, so 2ε bounds the move.
            assert!(
                (above - below).abs() <= 2.0 * eps,
                "net income jumps by {} at {boundary}",
                above - below
            );
        }
    }

    #[test]
    fn test_set_overrides_named_parameter() {
        let mut schedule = TaxSchedule::default();
        schedule.set("basic_rate", 0.19).unwrap();
        assert_eq!(schedule.basic_rate, 0.19);

        assert!(matches!(
            schedule.set("surtax", 0.1),
            Err(ConfigError::UnknownParameter(_))
        ));
        assert!(matches!(
            schedule.set("higher_rate", 1.5),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            schedule.set("allowance_threshold", -1.0),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_parameter_names_are_all_settable() {
        let mut schedule = TaxSchedule::default();
        for name in TaxSchedule::PARAMETER_NAMES {
            assert!(schedule.set(name, 0.5).is_ok(), "{name} rejected");
        }
    }
}
