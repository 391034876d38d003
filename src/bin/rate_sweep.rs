//! Compare the base repayment rate against every extra percentage
//!
//! Outputs one CSV row per extra rate for charting the trade-off curve

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use loan_projection::config::{load_parameters, load_tax_schedule};
use loan_projection::{Recommendation, ScenarioRunner, SimulationParameters, TaxSchedule};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "rate_sweep", about = "Sweep extra repayment rates 0-21%")]
struct Args {
    /// JSON parameter file (defaults used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV of `parameter,value` tax overrides
    #[arg(long)]
    tax_table: Option<PathBuf>,

    #[arg(long, default_value = "rate_sweep_output.csv")]
    output: PathBuf,
}

#[derive(Debug, Serialize)]
struct SweepRow {
    extra: f64,
    elevated_rate: f64,
    base_total: f64,
    high_total: f64,
    base_npv: f64,
    high_npv: f64,
    delta_cash: f64,
    delta_npv: f64,
    recommendation: Recommendation,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let params = match &args.config {
        Some(path) => load_parameters(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => SimulationParameters::default(),
    };
    let tax = match &args.tax_table {
        Some(path) => load_tax_schedule(path)
            .with_context(|| format!("loading tax table from {}", path.display()))?,
        None => TaxSchedule::default(),
    };

    let start = Instant::now();
    let runner = ScenarioRunner::with_tax_schedule(params, tax);
    let results = runner.full_sweep()?;
    println!("Swept {} rates in {:?}", results.len(), start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for result in &results {
        writer.serialize(SweepRow {
            extra: result.elevated_rate - result.base_rate,
            elevated_rate: result.elevated_rate,
            base_total: result.base_total,
            high_total: result.high_total,
            base_npv: result.base_npv,
            high_npv: result.high_npv,
            delta_cash: result.delta_cash,
            delta_npv: result.delta_npv,
            recommendation: result.recommendation,
        })?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());

    let favoured: Vec<f64> = results
        .iter()
        .filter(|r| r.recommendation == Recommendation::FavorElevated)
        .map(|r| r.elevated_rate)
        .collect();
    if favoured.is_empty() {
        println!("No elevated rate beats {}%", runner.params().repayment_rate());
    } else {
        println!("Elevated rates favoured: {:?}", favoured);
    }

    Ok(())
}
