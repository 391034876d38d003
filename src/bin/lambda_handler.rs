//! AWS Lambda handler for loan projections
//!
//! Accepts the projection parameters as JSON (any omitted field takes its
//! default) and returns the three yearly series, the summary and the
//! comparison against `extra_repayment` additional percentage points.

use loan_projection::{
    ComparisonResult, ParameterInput, RepaymentSummary, ScenarioRunner, TaxSchedule,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ProjectionRequest {
    #[serde(flatten)]
    pub params: ParameterInput,

    /// Extra repayment percentage to compare (0-21)
    #[serde(default)]
    pub extra_repayment: f64,

    /// Optional tax schedule replacing the default
    #[serde(default)]
    pub tax_schedule: Option<TaxSchedule>,
}

#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub income: Vec<f64>,
    pub repayments: Vec<f64>,
    pub remaining_balance: Vec<f64>,
    pub summary: RepaymentSummary,
    pub npv: f64,
    pub comparison: ComparisonResult,
    pub message: String,
    pub execution_time_us: u64,
}

async fn handler(event: LambdaEvent<ProjectionRequest>) -> Result<ProjectionResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    let params = request.params.validate()?;
    let runner = ScenarioRunner::with_tax_schedule(params, request.tax_schedule.unwrap_or_default());

    let outcome = runner.run()?;
    let comparison = runner.compare_extra(request.extra_repayment)?;
    let message = comparison.message();

    Ok(ProjectionResponse {
        income: outcome.income.as_slice().to_vec(),
        repayments: outcome.repayment.repayments().to_vec(),
        remaining_balance: outcome.repayment.remaining_balance().to_vec(),
        summary: outcome.summary,
        npv: outcome.npv,
        comparison,
        message,
        execution_time_us: start.elapsed().as_micros() as u64,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
