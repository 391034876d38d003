//! Baseline vs elevated repayment-rate comparison

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::discount::DiscountCurve;
use crate::error::{Result, SimulationError};
use crate::income::IncomeSeries;
use crate::params::{
    ensure_discount_rate, ensure_non_negative, ensure_repayment_rate, DEFAULT_REPAYMENT_THRESHOLD,
};
use crate::repayment::{simulate_repayment, RepaymentResult};

/// Which repayment rate the numbers favour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recommendation {
    /// Both rates are the same, so there is nothing to judge
    NoComparison,
    FavorElevated,
    FavorBase,
}

impl Recommendation {
    /// Decide from the two deltas
    ///
    /// Equal rates are screened out first; otherwise the elevated rate wins
    /// only when the present-value saving strictly exceeds the extra cash.
    pub fn decide(base_rate: f64, elevated_rate: f64, delta_cash: f64, delta_npv: f64) -> Self {
        if elevated_rate == base_rate {
            Recommendation::NoComparison
        } else if delta_npv > delta_cash {
            Recommendation::FavorElevated
        } else {
            Recommendation::FavorBase
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::NoComparison => "no-comparison",
            Recommendation::FavorElevated => "favor-elevated",
            Recommendation::FavorBase => "favor-base",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the recommendation came out the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rationale {
    NothingToCompare,
    /// More nominal cash, but a larger saving in today's money
    SavesPresentValueForExtraCash,
    /// Less nominal cash and a lower present value
    SavesCashAndPresentValue,
    /// Less nominal cash overall, yet more in today's money
    SavesCashButCostsPresentValue,
    /// Extra cash up front outweighs the discounted saving
    UpfrontCashOutweighsSavings,
}

impl Rationale {
    pub fn classify(recommendation: Recommendation, delta_cash: f64, delta_npv: f64) -> Self {
        match recommendation {
            Recommendation::NoComparison => Rationale::NothingToCompare,
            Recommendation::FavorBase => Rationale::UpfrontCashOutweighsSavings,
            Recommendation::FavorElevated if delta_cash >= 0.0 => {
                Rationale::SavesPresentValueForExtraCash
            }
            Recommendation::FavorElevated if delta_npv >= 0.0 => Rationale::SavesCashAndPresentValue,
            Recommendation::FavorElevated => Rationale::SavesCashButCostsPresentValue,
        }
    }

    /// The elevated rate is favoured but the presentation should warn
    pub fn is_caution(&self) -> bool {
        matches!(self, Rationale::SavesCashButCostsPresentValue)
    }
}

/// Totals, present values and verdict for a base/elevated pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub base_rate: f64,
    pub elevated_rate: f64,
    pub discount_rate: f64,
    pub base_total: f64,
    pub high_total: f64,
    pub base_npv: f64,
    pub high_npv: f64,
    /// Extra nominal cash paid at the elevated rate (negative if it pays less)
    pub delta_cash: f64,
    /// Present-value saving of the elevated rate (positive means it is cheaper today)
    pub delta_npv: f64,
    pub recommendation: Recommendation,
    pub rationale: Rationale,
}

impl ComparisonResult {
    /// Derive the comparison from two finished simulations
    pub fn from_results(
        base: &RepaymentResult,
        high: &RepaymentResult,
        base_rate: f64,
        elevated_rate: f64,
        discount_rate: f64,
    ) -> Self {
        let curve = DiscountCurve::single_rate(discount_rate);

        let base_total = base.total();
        let high_total = high.total();
        let base_npv = curve.present_value(base.repayments());
        let high_npv = curve.present_value(high.repayments());

        let delta_cash = high_total - base_total;
        let delta_npv = base_npv - high_npv;
        let recommendation = Recommendation::decide(base_rate, elevated_rate, delta_cash, delta_npv);

        Self {
            base_rate,
            elevated_rate,
            discount_rate,
            base_total,
            high_total,
            base_npv,
            high_npv,
            delta_cash,
            delta_npv,
            recommendation,
            rationale: Rationale::classify(recommendation, delta_cash, delta_npv),
        }
    }

    /// One-line explanation for display
    pub fn message(&self) -> String {
        let high = self.elevated_rate;
        match self.rationale {
            Rationale::NothingToCompare => {
                "Both rates are equal; nothing to compare.".to_string()
            }
            Rationale::SavesPresentValueForExtraCash => format!(
                "Paying {high}% looks better: saves about £{:.0} in today's money for an extra £{:.0} of nominal cash.",
                self.delta_npv, self.delta_cash
            ),
            Rationale::SavesCashAndPresentValue => format!(
                "Paying {high}% looks better: saves about £{:.0} in today's money and reduces your total cash outlay by £{:.0}.",
                self.delta_npv,
                self.delta_cash.abs()
            ),
            Rationale::SavesCashButCostsPresentValue => format!(
                "Paying {high}% reduces your total cash outlay by £{:.0}, but costs about £{:.0} more in today's money. It may not be worth increasing your repayment rate.",
                self.delta_cash.abs(),
                self.delta_npv.abs()
            ),
            Rationale::UpfrontCashOutweighsSavings => format!(
                "Stick to {}%: the extra cash up front (£{:.0}) outweighs the discounted interest saved (£{:.0}).",
                self.base_rate, self.delta_cash, self.delta_npv
            ),
        }
    }
}

/// Compare two repayment rates over one income series
///
/// Uses the default repayment threshold; see
/// [`compare_policies_with_threshold`] to supply another.
pub fn compare_policies(
    income: &IncomeSeries,
    principal: f64,
    annual_interest_rate: f64,
    base_rate: f64,
    elevated_rate: f64,
    discount_rate: f64,
) -> Result<ComparisonResult> {
    compare_policies_with_threshold(
        income,
        principal,
        annual_interest_rate,
        base_rate,
        elevated_rate,
        discount_rate,
        DEFAULT_REPAYMENT_THRESHOLD,
    )
}

pub fn compare_policies_with_threshold(
    income: &IncomeSeries,
    principal: f64,
    annual_interest_rate: f64,
    base_rate: f64,
    elevated_rate: f64,
    discount_rate: f64,
    min_salary: f64,
) -> Result<ComparisonResult> {
    ensure_non_negative("principal", principal)?;
    ensure_non_negative("annual_interest_rate", annual_interest_rate)?;
    ensure_repayment_rate("base_rate", base_rate)?;
    ensure_repayment_rate("elevated_rate", elevated_rate)?;
    if elevated_rate < base_rate {
        return Err(SimulationError::invalid(
            "elevated_rate",
            format!("must not be below the base rate {base_rate}, got {elevated_rate}"),
        ));
    }
    ensure_discount_rate(discount_rate)?;
    ensure_non_negative("minimum_repayment_threshold", min_salary)?;

    let base = simulate_repayment(income, principal, annual_interest_rate, base_rate, min_salary);
    let high = simulate_repayment(income, principal, annual_interest_rate, elevated_rate, min_salary);

    let comparison = ComparisonResult::from_results(&base, &high, base_rate, elevated_rate, discount_rate);
    debug!(
        "{}% vs {}%: delta_cash {:.2}, delta_npv {:.2} -> {}",
        base_rate, elevated_rate, comparison.delta_cash, comparison.delta_npv, comparison.recommendation
    );

    Ok(comparison)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::income::project_income;

    fn flat_income(salary: f64) -> IncomeSeries {
        project_income(salary, 0.0, 30, None).unwrap()
    }

    #[test]
    fn test_equal_rates_is_no_comparison() {
        let income = project_income(30_000.0, 5.0, 30, None).unwrap();
        let result = compare_policies(&income, 50_000.0, 7.2, 9.0, 9.0, 0.02).unwrap();

        assert_eq!(result.delta_cash, 0.0);
        assert_eq!(result.delta_npv, 0.0);
        assert_eq!(result.recommendation, Recommendation::NoComparison);
        assert_eq!(result.rationale, Rationale::NothingToCompare);
        assert_eq!(result.message(), "Both rates are equal; nothing to compare.");
    }

    #[test]
    fn test_default_loan_nine_vs_fifteen() {
        let income = project_income(30_000.0, 5.0, 30, None).unwrap();
        let result = compare_policies(&income, 50_000.0, 7.2, 9.0, 15.0, 0.02).unwrap();

        assert!(result.delta_cash.is_finite());
        assert!(result.delta_npv.is_finite());
        assert!(matches!(
            result.recommendation,
            Recommendation::FavorElevated | Recommendation::FavorBase
        ));
        assert_eq!(
            result.recommendation == Recommendation::FavorElevated,
            result.delta_npv > result.delta_cash
        );
    }

    #[test]
    fn test_zero_discount_npv_equals_total() {
        let income = project_income(30_000.0, 5.0, 30, None).unwrap();
        let result = compare_policies(&income, 50_000.0, 7.2, 9.0, 12.0, 0.0).unwrap();
        assert_eq!(result.base_npv, result.base_total);
        assert_eq!(result.high_npv, result.high_total);
    }

    #[test]
    fn test_early_payoff_gives_negative_delta_cash() {
        // At 9% the interest outruns repayments; at 50% the loan clears in four years.
        let result = compare_policies(&flat_income(60_000.0), 50_000.0, 7.2, 9.0, 50.0, 0.02).unwrap();

        assert!(result.delta_cash < 0.0);
        assert!(result.delta_npv > 0.0);
        assert_eq!(result.recommendation, Recommendation::FavorElevated);
        assert_eq!(result.rationale, Rationale::SavesCashAndPresentValue);
    }

    #[test]
    fn test_steep_discounting_flags_caution() {
        let result = compare_policies(&flat_income(60_000.0), 50_000.0, 7.2, 9.0, 50.0, 0.5).unwrap();

        assert!(result.delta_cash < 0.0);
        assert!(result.delta_npv < 0.0);
        assert_eq!(result.recommendation, Recommendation::FavorElevated);
        assert!(result.rationale.is_caution());
    }

    #[test]
    fn test_never_repaid_either_way_favors_base() {
        let result = compare_policies(&flat_income(30_000.0), 100_000.0, 7.2, 9.0, 15.0, 0.02).unwrap();

        assert!(result.delta_cash > 0.0);
        assert!(result.delta_npv < 0.0);
        assert_eq!(result.recommendation, Recommendation::FavorBase);
        assert_eq!(result.rationale, Rationale::UpfrontCashOutweighsSavings);
        assert!(result.message().starts_with("Stick to 9%"));
    }

    #[test]
    fn test_classify_extra_cash_case() {
        let rec = Recommendation::decide(9.0, 12.0, 100.0, 250.0);
        assert_eq!(rec, Recommendation::FavorElevated);
        assert_eq!(
            Rationale::classify(rec, 100.0, 250.0),
            Rationale::SavesPresentValueForExtraCash
        );
    }

    #[test]
    fn test_tie_favors_base() {
        assert_eq!(Recommendation::decide(9.0, 12.0, 40.0, 40.0), Recommendation::FavorBase);
    }

    #[test]
    fn test_validation_happens_before_simulation() {
        let income = flat_income(30_000.0);
        let err = compare_policies(&income, 50_000.0, 7.2, 9.0, 8.0, 0.02).unwrap_err();
        assert_eq!(err.parameter(), "elevated_rate");

        let err = compare_policies(&income, 50_000.0, 7.2, 9.0, 12.0, 1.5).unwrap_err();
        assert_eq!(err.parameter(), "discount_rate");

        let err = compare_policies(&income, -10.0, 7.2, 9.0, 12.0, 0.02).unwrap_err();
        assert_eq!(err.parameter(), "principal");
    }

    #[test]
    fn test_labels_serialize_kebab_case() {
        let json = serde_json::to_string(&Recommendation::FavorElevated).unwrap();
        assert_eq!(json, "\"favor-elevated\"");
        assert_eq!(Recommendation::NoComparison.to_string(), "no-comparison");
    }
}
