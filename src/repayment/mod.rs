//! Income-contingent loan amortization

mod engine;
mod irr;
mod schedule;
mod state;

pub use engine::{repayment_due, simulate_repayment};
pub use irr::{effective_annual_rate, internal_rate_of_return};
pub use schedule::{RepaymentResult, RepaymentSummary, ScheduleRow};
pub use state::LoanState;
