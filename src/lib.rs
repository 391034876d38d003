//! Loan Projection - income-contingent student loan repayment modelling
//!
//! This library provides:
//! - Income projection with optional tax and social-insurance deductions
//! - Year-by-year loan amortization against that income
//! - Present-value comparison of a baseline and an elevated repayment rate
//! - Parallel sweeps over extra repayment percentages

pub mod error;
pub mod params;
pub mod income;
pub mod repayment;
pub mod comparison;
pub mod config;
pub mod scenario;

// Re-export commonly used types
pub use error::{ConfigError, SimulationError};
pub use params::{ParameterInput, SimulationParameters};
pub use income::{project_income, IncomeSeries, TaxSchedule};
pub use repayment::{simulate_repayment, RepaymentResult, RepaymentSummary, ScheduleRow};
pub use comparison::{compare_policies, ComparisonResult, Rationale, Recommendation};
pub use scenario::{ProjectionOutcome, ScenarioRunner};
