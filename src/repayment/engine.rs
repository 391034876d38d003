//! Sequential amortization of an income-contingent loan

use log::{debug, warn};

use super::schedule::RepaymentResult;
use super::state::LoanState;
use crate::income::IncomeSeries;

/// Amount owed for one year of income before any cap at the balance
///
/// Income-contingent and floored at zero: earning below `min_salary` owes
/// nothing rather than producing a negative repayment.
pub fn repayment_due(income: f64, min_salary: f64, repayment_rate: f64) -> f64 {
    ((income - min_salary) * repayment_rate / 100.0).max(0.0)
}

/// Simulate repayments over the full income series
///
/// Each year: accrue interest on the opening balance, then pay the income-based
/// amount capped at the balance. Once the balance reaches zero every later year
/// records zero repayment and zero balance. Rates are percentages.
pub fn simulate_repayment(
    income: &IncomeSeries,
    principal: f64,
    annual_interest_rate: f64,
    repayment_rate: f64,
    min_salary: f64,
) -> RepaymentResult {
    let years = income.len();
    let mut result = RepaymentResult::with_capacity(years);
    let mut state = LoanState::new(principal);

    for salary in income.iter() {
        if state.is_settled() {
            break;
        }

        let due = repayment_due(salary, min_salary, repayment_rate);
        state.accrue_interest(annual_interest_rate);
        let payment = state.apply_payment(due);
        result.record(payment, state.balance);
        state.advance_year();
    }

    result.settle_remaining(years);

    debug!(
        "simulated {} years ({} outstanding) at {:.1}% repayment: interest accrued {:.2}, total repaid {:.2}, final balance {:.2}",
        years,
        state.year,
        repayment_rate,
        state.interest_accrued,
        result.total(),
        result.final_balance()
    );
    if result.final_balance() > 0.0 {
        warn!(
            "balance of {:.2} still outstanding after {} years",
            result.final_balance(),
            years
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::income::project_income;
    use crate::params::DEFAULT_REPAYMENT_THRESHOLD;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::{prop_assert, proptest};

    fn default_income() -> IncomeSeries {
        project_income(30_000.0, 5.0, 30, None).unwrap()
    }

    #[test]
    fn test_first_year_matches_hand_calculation() {
        let result = simulate_repayment(&default_income(), 50_000.0, 7.2, 9.0, DEFAULT_REPAYMENT_THRESHOLD);

        assert_eq!(result.len(), 30);
        assert_abs_diff_eq!(result.repayments()[0], 243.45, epsilon = 1e-9);
        assert_abs_diff_eq!(result.remaining_balance()[0], 53_356.55, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_principal_is_all_zero() {
        let result = simulate_repayment(&default_income(), 0.0, 7.2, 9.0, DEFAULT_REPAYMENT_THRESHOLD);
        assert_eq!(result.len(), 30);
        assert!(result.repayments().iter().all(|&r| r == 0.0));
        assert!(result.remaining_balance().iter().all(|&b| b == 0.0));
    }

    #[test]
    fn test_income_below_threshold_repays_nothing() {
        let income = project_income(20_000.0, 0.0, 5, None).unwrap();
        let result = simulate_repayment(&income, 10_000.0, 5.0, 9.0, DEFAULT_REPAYMENT_THRESHOLD);
        assert!(result.repayments().iter().all(|&r| r == 0.0));
        // Balance compounds untouched
        assert_abs_diff_eq!(result.final_balance(), 10_000.0 * 1.05_f64.powi(5), epsilon = 1e-6);
    }

    #[test]
    fn test_high_rate_pays_off_early_and_stays_settled() {
        let income = project_income(80_000.0, 3.0, 30, None).unwrap();
        let result = simulate_repayment(&income, 20_000.0, 4.0, 50.0, DEFAULT_REPAYMENT_THRESHOLD);

        let payoff = result.payoff_year().expect("loan should be repaid");
        assert!(payoff < 29);
        for t in payoff..result.len() {
            assert_eq!(result.remaining_balance()[t], 0.0);
            if t > payoff {
                assert_eq!(result.repayments()[t], 0.0);
            }
        }
    }

    #[test]
    fn test_final_payment_clears_exact_balance() {
        let income = IncomeSeries::from_values(vec![1_000_000.0, 1_000_000.0]);
        let result = simulate_repayment(&income, 1_000.0, 10.0, 9.0, 0.0);
        assert_abs_diff_eq!(result.repayments()[0], 1_100.0, epsilon = 1e-9);
        assert_eq!(result.remaining_balance(), &[0.0, 0.0]);
        assert_eq!(result.repayments()[1], 0.0);
    }

    #[test]
    fn test_empty_income_gives_empty_result() {
        let result = simulate_repayment(&IncomeSeries::from_values(Vec::new()), 1_000.0, 5.0, 9.0, 0.0);
        assert!(result.is_empty());
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_balance_never_reactivates_and_payments_are_bounded(
            principal in 0u32..200_000,
            interest_bp in 0u32..1500,
            salary in 0u32..150_000,
            growth_bp in -500i32..1000,
            rate_tenths in 90u32..1000,
            years in 1i64..60
        ) {
            let interest = interest_bp as f64 / 100.0;
            let income = project_income(salary as f64, growth_bp as f64 / 100.0, years, None).unwrap();
            let result = simulate_repayment(
                &income,
                principal as f64,
                interest,
                rate_tenths as f64 / 10.0,
                DEFAULT_REPAYMENT_THRESHOLD,
            );

            prop_assert!(result.len() == years as usize);

            let mut prior_balance = principal as f64;
            let mut settled = principal == 0;
            for t in 0..result.len() {
                let paid = result.repayments()[t];
                let balance = result.remaining_balance()[t];
                prop_assert!(paid >= 0.0 && balance >= 0.0);
                let ceiling = prior_balance * (1.0 + interest / 100.0);
                prop_assert!(paid <= ceiling * (1.0 + 1e-12) + 1e-9);
                if settled {
                    prop_assert!(paid == 0.0 && balance == 0.0);
                }
                if balance == 0.0 {
                    settled = true;
                }
                prior_balance = balance;
            }

            let bound = principal as f64 * (1.0 + interest / 100.0).powi(years as i32);
            prop_assert!(result.total() <= bound * (1.0 + 1e-9) + 1e-6);
        }
    }
}
