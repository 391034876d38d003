//! Repayment output series and presentation rows

use serde::{Deserialize, Serialize};

use super::irr::effective_annual_rate;
use crate::comparison::DiscountCurve;
use crate::income::IncomeSeries;

/// Parallel per-year repayment and closing-balance series
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RepaymentResult {
    repayments: Vec<f64>,
    remaining_balance: Vec<f64>,
}

impl RepaymentResult {
    pub fn with_capacity(years: usize) -> Self {
        Self {
            repayments: Vec::with_capacity(years),
            remaining_balance: Vec::with_capacity(years),
        }
    }

    /// Record one simulated year
    pub(crate) fn record(&mut self, repayment: f64, balance: f64) {
        self.repayments.push(repayment);
        self.remaining_balance.push(balance);
    }

    /// Pad with settled (zero) years up to `years`
    pub(crate) fn settle_remaining(&mut self, years: usize) {
        self.repayments.resize(years, 0.0);
        self.remaining_balance.resize(years, 0.0);
    }

    /// Amount paid in each year
    pub fn repayments(&self) -> &[f64] {
        &self.repayments
    }

    /// Balance after each year's interest and payment
    pub fn remaining_balance(&self) -> &[f64] {
        &self.remaining_balance
    }

    pub fn len(&self) -> usize {
        self.repayments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repayments.is_empty()
    }

    /// Nominal sum of all repayments
    pub fn total(&self) -> f64 {
        self.repayments.iter().sum()
    }

    /// Present value of the repayments at an annual `discount_rate` (fraction)
    pub fn npv(&self, discount_rate: f64) -> f64 {
        DiscountCurve::single_rate(discount_rate).present_value(&self.repayments)
    }

    /// Balance left at the horizon (written off)
    pub fn final_balance(&self) -> f64 {
        self.remaining_balance.last().copied().unwrap_or(0.0)
    }

    /// Year index in which the last payment cleared the loan
    ///
    /// `None` when the loan is still outstanding at the horizon or nothing was
    /// ever owed.
    pub fn payoff_year(&self) -> Option<usize> {
        self.repayments
            .iter()
            .zip(&self.remaining_balance)
            .position(|(&paid, &balance)| paid > 0.0 && balance == 0.0)
    }

    /// Highest closing balance over the horizon
    pub fn peak_balance(&self) -> f64 {
        self.remaining_balance.iter().copied().fold(0.0, f64::max)
    }

    /// Rows for tabular or chart output, labelled from `start_year`
    pub fn schedule_rows(&self, income: &IncomeSeries, start_year: i32) -> Vec<ScheduleRow> {
        self.repayments
            .iter()
            .zip(&self.remaining_balance)
            .enumerate()
            .map(|(idx, (&repayment, &balance))| ScheduleRow {
                year_index: idx,
                calendar_year: start_year + idx as i32,
                income: income.get(idx).unwrap_or(0.0),
                repayment,
                monthly_repayment: repayment / 12.0,
                remaining_balance: balance,
            })
            .collect()
    }

    pub fn summary(&self, principal: f64) -> RepaymentSummary {
        RepaymentSummary {
            years: self.len(),
            total_repaid: self.total(),
            final_balance: self.final_balance(),
            peak_balance: self.peak_balance().max(principal),
            payoff_year: self.payoff_year(),
            effective_annual_rate: effective_annual_rate(principal, &self.repayments),
        }
    }
}

/// One year of the repayment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub year_index: usize,
    pub calendar_year: i32,
    pub income: f64,
    pub repayment: f64,
    pub monthly_repayment: f64,
    pub remaining_balance: f64,
}

/// Headline figures for a single repayment run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepaymentSummary {
    pub years: usize,
    pub total_repaid: f64,
    pub final_balance: f64,
    pub peak_balance: f64,
    pub payoff_year: Option<usize>,
    /// Annual IRR of principal against repayments; `None` if nothing was repaid
    pub effective_annual_rate: Option<f64>,
}

impl RepaymentSummary {
    pub fn is_repaid(&self) -> bool {
        self.payoff_year.is_some()
    }
}
