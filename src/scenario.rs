//! Scenario runner tying the three stages together
//!
//! Holds one validated parameter set and tax schedule, then runs the baseline
//! projection or any number of elevated-rate comparisons against it. Sweeps
//! share a single income projection and run in parallel.

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::comparison::{compare_policies_with_threshold, ComparisonResult};
use crate::error::{Result, SimulationError};
use crate::income::{project_income, IncomeSeries, TaxSchedule};
use crate::params::{
    ensure_finite, SimulationParameters, MAX_EXTRA_REPAYMENT, MAX_REPAYMENT_RATE,
};
use crate::repayment::{simulate_repayment, RepaymentResult, RepaymentSummary, ScheduleRow};

/// Baseline projection at the configured repayment rate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionOutcome {
    pub income: IncomeSeries,
    pub repayment: RepaymentResult,
    pub summary: RepaymentSummary,
    /// Present value of the repayments at the configured discount rate
    pub npv: f64,
}

impl ProjectionOutcome {
    pub fn schedule_rows(&self, start_year: i32) -> Vec<ScheduleRow> {
        self.repayment.schedule_rows(&self.income, start_year)
    }
}

/// Runs projections and comparisons for one parameter set
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(SimulationParameters::default());
/// let outcome = runner.run()?;
/// let verdicts = runner.sweep(&[3.0, 6.0, 9.0])?;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    params: SimulationParameters,
    tax: TaxSchedule,
}

impl ScenarioRunner {
    /// Runner using the default tax schedule for net income
    pub fn new(params: SimulationParameters) -> Self {
        Self::with_tax_schedule(params, TaxSchedule::default())
    }

    pub fn with_tax_schedule(params: SimulationParameters, tax: TaxSchedule) -> Self {
        Self { params, tax }
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn tax_schedule(&self) -> &TaxSchedule {
        &self.tax
    }

    /// Income series for the configured horizon, net of tax when requested
    pub fn income(&self) -> Result<IncomeSeries> {
        let net = |gross: f64| self.tax.net_income(gross);
        let transform: Option<&dyn Fn(f64) -> f64> = if self.params.use_net_income() {
            Some(&net)
        } else {
            None
        };

        project_income(
            self.params.starting_income(),
            self.params.annual_growth_rate(),
            self.params.horizon_years() as i64,
            transform,
        )
    }

    /// Baseline projection
    pub fn run(&self) -> Result<ProjectionOutcome> {
        let income = self.income()?;
        let repayment = simulate_repayment(
            &income,
            self.params.principal(),
            self.params.annual_interest_rate(),
            self.params.repayment_rate(),
            self.params.minimum_repayment_threshold(),
        );
        let summary = repayment.summary(self.params.principal());
        let npv = repayment.npv(self.params.discount_rate());

        Ok(ProjectionOutcome {
            income,
            repayment,
            summary,
            npv,
        })
    }

    /// Compare the configured rate against it plus `extra` percentage points
    pub fn compare_extra(&self, extra: f64) -> Result<ComparisonResult> {
        let income = self.income()?;
        self.compare_on(&income, extra)
    }

    /// Compare against several extra percentages in parallel
    ///
    /// Results come back in the order of `extras`. The first invalid extra
    /// fails the whole sweep.
    pub fn sweep(&self, extras: &[f64]) -> Result<Vec<ComparisonResult>> {
        let income = self.income()?;
        info!(
            "sweeping {} extra repayment rates over {} years",
            extras.len(),
            income.len()
        );

        extras
            .par_iter()
            .map(|&extra| self.compare_on(&income, extra))
            .collect()
    }

    /// Every whole extra percentage from 0 up to the maximum offered
    ///
    /// Extras that would push the elevated rate past 100% are left out.
    pub fn full_sweep(&self) -> Result<Vec<ComparisonResult>> {
        let headroom = MAX_REPAYMENT_RATE - self.params.repayment_rate();
        let max_extra = MAX_EXTRA_REPAYMENT.min(headroom).floor() as u32;
        let extras: Vec<f64> = (0..=max_extra).map(f64::from).collect();
        self.sweep(&extras)
    }

    fn compare_on(&self, income: &IncomeSeries, extra: f64) -> Result<ComparisonResult> {
        ensure_finite("extra_repayment", extra)?;
        if !(0.0..=MAX_EXTRA_REPAYMENT).contains(&extra) {
            return Err(SimulationError::invalid(
                "extra_repayment",
                format!("must lie in [0, {MAX_EXTRA_REPAYMENT}], got {extra}"),
            ));
        }

        let base_rate = self.params.repayment_rate();
        compare_policies_with_threshold(
            income,
            self.params.principal(),
            self.params.annual_interest_rate(),
            base_rate,
            base_rate + extra,
            self.params.discount_rate(),
            self.params.minimum_repayment_threshold(),
        )
    }
}
