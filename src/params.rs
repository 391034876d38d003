//! Simulation parameters and input validation

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Lowest repayment percentage a borrower can choose
pub const MIN_REPAYMENT_RATE: f64 = 9.0;

/// Highest repayment percentage a borrower can choose
pub const MAX_REPAYMENT_RATE: f64 = 100.0;

/// Largest extra percentage offered on top of the base repayment rate
pub const MAX_EXTRA_REPAYMENT: f64 = 21.0;

/// Annual income below which nothing is owed
pub const DEFAULT_REPAYMENT_THRESHOLD: f64 = 27_295.0;

/// Discount rate used for NPV when none is given (inflation target)
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.02;

fn default_principal() -> f64 { 50_000.0 }
fn default_interest_rate() -> f64 { 7.2 }
fn default_starting_income() -> f64 { 30_000.0 }
fn default_growth_rate() -> f64 { 5.0 }
fn default_horizon_years() -> i64 { 30 }
fn default_repayment_rate() -> f64 { MIN_REPAYMENT_RATE }
fn default_threshold() -> f64 { DEFAULT_REPAYMENT_THRESHOLD }
fn default_discount_rate() -> f64 { DEFAULT_DISCOUNT_RATE }

/// Unvalidated parameter set, as read from JSON or assembled by a caller
///
/// Every field has a serde default so partial documents are accepted. Rates
/// are percentages (7.2 means 7.2%) except `discount_rate`, which is a
/// fraction (0.02 means 2%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterInput {
    #[serde(default = "default_principal")]
    pub principal: f64,

    #[serde(default = "default_interest_rate")]
    pub annual_interest_rate: f64,

    #[serde(default = "default_starting_income")]
    pub starting_income: f64,

    #[serde(default = "default_growth_rate")]
    pub annual_growth_rate: f64,

    /// Signed so that zero and negative horizons reach validation instead of
    /// failing deserialization with an opaque message
    #[serde(default = "default_horizon_years")]
    pub horizon_years: i64,

    #[serde(default = "default_repayment_rate")]
    pub repayment_rate: f64,

    #[serde(default = "default_threshold")]
    pub minimum_repayment_threshold: f64,

    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,

    #[serde(default)]
    pub use_net_income: bool,
}

impl Default for ParameterInput {
    fn default() -> Self {
        Self {
            principal: default_principal(),
            annual_interest_rate: default_interest_rate(),
            starting_income: default_starting_income(),
            annual_growth_rate: default_growth_rate(),
            horizon_years: default_horizon_years(),
            repayment_rate: default_repayment_rate(),
            minimum_repayment_threshold: default_threshold(),
            discount_rate: default_discount_rate(),
            use_net_income: false,
        }
    }
}

impl ParameterInput {
    /// Validate into an immutable parameter set
    pub fn validate(self) -> Result<SimulationParameters> {
        SimulationParameters::try_from(self)
    }
}

/// Validated inputs for one projection
///
/// Construct through [`ParameterInput::validate`] or `TryFrom`; once built the
/// values cannot change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParameterInput")]
pub struct SimulationParameters {
    principal: f64,
    annual_interest_rate: f64,
    starting_income: f64,
    annual_growth_rate: f64,
    horizon_years: usize,
    repayment_rate: f64,
    minimum_repayment_threshold: f64,
    discount_rate: f64,
    use_net_income: bool,
}

impl SimulationParameters {
    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn annual_interest_rate(&self) -> f64 {
        self.annual_interest_rate
    }

    pub fn starting_income(&self) -> f64 {
        self.starting_income
    }

    pub fn annual_growth_rate(&self) -> f64 {
        self.annual_growth_rate
    }

    pub fn horizon_years(&self) -> usize {
        self.horizon_years
    }

    pub fn repayment_rate(&self) -> f64 {
        self.repayment_rate
    }

    pub fn minimum_repayment_threshold(&self) -> f64 {
        self.minimum_repayment_threshold
    }

    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    pub fn use_net_income(&self) -> bool {
        self.use_net_income
    }

    /// Copy back into an editable input, e.g. to derive a variant scenario
    pub fn to_input(&self) -> ParameterInput {
        ParameterInput {
            principal: self.principal,
            annual_interest_rate: self.annual_interest_rate,
            starting_income: self.starting_income,
            annual_growth_rate: self.annual_growth_rate,
            horizon_years: self.horizon_years as i64,
            repayment_rate: self.repayment_rate,
            minimum_repayment_threshold: self.minimum_repayment_threshold,
            discount_rate: self.discount_rate,
            use_net_income: self.use_net_income,
        }
    }

    /// Same parameters with a different repayment rate
    pub fn with_repayment_rate(&self, repayment_rate: f64) -> Result<Self> {
        let mut input = self.to_input();
        input.repayment_rate = repayment_rate;
        input.validate()
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        let input = ParameterInput::default();
        Self {
            principal: input.principal,
            annual_interest_rate: input.annual_interest_rate,
            starting_income: input.starting_income,
            annual_growth_rate: input.annual_growth_rate,
            horizon_years: input.horizon_years as usize,
            repayment_rate: input.repayment_rate,
            minimum_repayment_threshold: input.minimum_repayment_threshold,
            discount_rate: input.discount_rate,
            use_net_income: input.use_net_income,
        }
    }
}

impl TryFrom<ParameterInput> for SimulationParameters {
    type Error = SimulationError;

    fn try_from(input: ParameterInput) -> Result<Self> {
        ensure_non_negative("principal", input.principal)?;
        ensure_non_negative("annual_interest_rate", input.annual_interest_rate)?;
        ensure_non_negative("starting_income", input.starting_income)?;
        ensure_growth_rate(input.annual_growth_rate)?;
        let horizon_years = ensure_horizon(input.horizon_years)?;
        ensure_repayment_rate("repayment_rate", input.repayment_rate)?;
        ensure_non_negative("minimum_repayment_threshold", input.minimum_repayment_threshold)?;
        ensure_discount_rate(input.discount_rate)?;

        Ok(Self {
            principal: input.principal,
            annual_interest_rate: input.annual_interest_rate,
            starting_income: input.starting_income,
            annual_growth_rate: input.annual_growth_rate,
            horizon_years,
            repayment_rate: input.repayment_rate,
            minimum_repayment_threshold: input.minimum_repayment_threshold,
            discount_rate: input.discount_rate,
            use_net_income: input.use_net_income,
        })
    }
}

pub(crate) fn ensure_finite(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::invalid(parameter, format!("must be finite, got {value}")))
    }
}

pub(crate) fn ensure_non_negative(parameter: &'static str, value: f64) -> Result<()> {
    ensure_finite(parameter, value)?;
    if value < 0.0 {
        return Err(SimulationError::invalid(
            parameter,
            format!("must not be negative, got {value}"),
        ));
    }
    Ok(())
}

pub(crate) fn ensure_growth_rate(value: f64) -> Result<()> {
    ensure_finite("annual_growth_rate", value)?;
    if value <= -100.0 {
        return Err(SimulationError::invalid(
            "annual_growth_rate",
            format!("must be above -100%, got {value}"),
        ));
    }
    Ok(())
}

pub(crate) fn ensure_horizon(years: i64) -> Result<usize> {
    if years <= 0 {
        return Err(SimulationError::invalid(
            "horizon_years",
            format!("must be positive, got {years}"),
        ));
    }
    usize::try_from(years)
        .map_err(|_| SimulationError::invalid("horizon_years", format!("too large: {years}")))
}

pub(crate) fn ensure_repayment_rate(parameter: &'static str, value: f64) -> Result<()> {
    ensure_finite(parameter, value)?;
    if !(MIN_REPAYMENT_RATE..=MAX_REPAYMENT_RATE).contains(&value) {
        return Err(SimulationError::invalid(
            parameter,
            format!("must lie in [{MIN_REPAYMENT_RATE}, {MAX_REPAYMENT_RATE}], got {value}"),
        ));
    }
    Ok(())
}

pub(crate) fn ensure_discount_rate(value: f64) -> Result<()> {
    ensure_finite("discount_rate", value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(SimulationError::invalid(
            "discount_rate",
            format!("must be a fraction in [0, 1], got {value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = ParameterInput::default().validate().unwrap();
        assert_eq!(params, SimulationParameters::default());
        assert_eq!(params.horizon_years(), 30);
        assert!((params.minimum_repayment_threshold() - 27_295.0).abs() < 1e-10);
        assert!((params.discount_rate() - 0.02).abs() < 1e-10);
    }

    #[test]
    fn test_rejects_non_positive_horizon() {
        for years in [0, -5] {
            let input = ParameterInput { horizon_years: years, ..Default::default() };
            let err = input.validate().unwrap_err();
            assert_eq!(err.parameter(), "horizon_years");
        }
    }

    #[test]
    fn test_rejects_negative_principal() {
        let input = ParameterInput { principal: -1.0, ..Default::default() };
        assert_eq!(input.validate().unwrap_err().parameter(), "principal");
    }

    #[test]
    fn test_repayment_rate_domain() {
        let low = ParameterInput { repayment_rate: 8.9, ..Default::default() };
        assert_eq!(low.validate().unwrap_err().parameter(), "repayment_rate");

        let high = ParameterInput { repayment_rate: 100.5, ..Default::default() };
        assert!(high.validate().is_err());

        let edge = ParameterInput { repayment_rate: 100.0, ..Default::default() };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_discount_rate_is_fraction() {
        let input = ParameterInput { discount_rate: 2.0, ..Default::default() };
        assert_eq!(input.validate().unwrap_err().parameter(), "discount_rate");
    }

    #[test]
    fn test_rejects_nan() {
        let input = ParameterInput { annual_interest_rate: f64::NAN, ..Default::default() };
        assert_eq!(input.validate().unwrap_err().parameter(), "annual_interest_rate");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let params: SimulationParameters =
            serde_json::from_str(r#"{"principal": 42000, "use_net_income": true}"#).unwrap();
        assert!((params.principal() - 42_000.0).abs() < 1e-10);
        assert!(params.use_net_income());
        assert!((params.annual_interest_rate() - 7.2).abs() < 1e-10);
    }

    #[test]
    fn test_json_validation_runs_on_deserialize() {
        let result: std::result::Result<SimulationParameters, _> =
            serde_json::from_str(r#"{"horizon_years": 0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_with_repayment_rate() {
        let params = SimulationParameters::default();
        let higher = params.with_repayment_rate(15.0).unwrap();
        assert!((higher.repayment_rate() - 15.0).abs() < 1e-10);
        assert!(params.with_repayment_rate(5.0).is_err());
    }
}
