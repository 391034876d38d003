//! Loan Projection CLI
//!
//! Projects a student loan year by year and compares the chosen repayment
//! rate against an elevated one.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use chrono::Datelike;
use clap::Parser;
use loan_projection::config::{load_parameters, load_tax_schedule};
use loan_projection::{ParameterInput, ScenarioRunner, ScheduleRow, TaxSchedule};

#[derive(Debug, Parser)]
#[command(name = "loan_projection", version, about = "Student loan repayment projection")]
struct Cli {
    /// JSON parameter file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Student loan amount
    #[arg(long)]
    amount: Option<f64>,

    /// Loan interest rate (%)
    #[arg(long)]
    interest: Option<f64>,

    /// Expected starting salary
    #[arg(long)]
    salary: Option<f64>,

    /// Average pay increase (%)
    #[arg(long)]
    growth: Option<f64>,

    /// Years to project
    #[arg(long)]
    years: Option<i64>,

    /// Repayment percentage (9-100)
    #[arg(long)]
    repayment_rate: Option<f64>,

    /// Income below which nothing is repaid
    #[arg(long)]
    threshold: Option<f64>,

    /// Discount rate for NPV (%, 0-10)
    #[arg(long = "discount-rate")]
    discount_rate_pct: Option<f64>,

    /// Deduct income tax and National Insurance from salary
    #[arg(long)]
    net_income: bool,

    /// CSV of `parameter,value` tax overrides
    #[arg(long)]
    tax_table: Option<PathBuf>,

    /// Extra repayment percentage to compare against (0-21)
    #[arg(long, default_value_t = 0.0)]
    extra: f64,

    /// Write the full schedule to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Calendar year of the first repayment year (defaults to this year)
    #[arg(long)]
    start_year: Option<i32>,

    /// Schedule rows to print
    #[arg(long, default_value_t = 30)]
    rows: usize,
}

impl Cli {
    fn parameter_input(&self) -> Result<ParameterInput> {
        let mut input = match &self.config {
            Some(path) => load_parameters(path)
                .with_context(|| format!("loading parameters from {}", path.display()))?
                .to_input(),
            None => ParameterInput::default(),
        };

        if let Some(v) = self.amount { input.principal = v; }
        if let Some(v) = self.interest { input.annual_interest_rate = v; }
        if let Some(v) = self.salary { input.starting_income = v; }
        if let Some(v) = self.growth { input.annual_growth_rate = v; }
        if let Some(v) = self.years { input.horizon_years = v; }
        if let Some(v) = self.repayment_rate { input.repayment_rate = v; }
        if let Some(v) = self.threshold { input.minimum_repayment_threshold = v; }
        if let Some(pct) = self.discount_rate_pct {
            ensure!(
                (0.0..=10.0).contains(&pct),
                "discount rate must be between 0% and 10%, got {pct}%"
            );
            input.discount_rate = pct / 100.0;
        }
        if self.net_income {
            input.use_net_income = true;
        }

        Ok(input)
    }

    fn tax_schedule(&self) -> Result<TaxSchedule> {
        match &self.tax_table {
            Some(path) => load_tax_schedule(path)
                .with_context(|| format!("loading tax table from {}", path.display())),
            None => Ok(TaxSchedule::default()),
        }
    }
}

fn write_schedule(path: &Path, rows: &[ScheduleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let params = cli.parameter_input()?.validate()?;
    let runner = ScenarioRunner::with_tax_schedule(params, cli.tax_schedule()?);
    let params = runner.params();

    let outcome = runner.run()?;
    let start_year = cli.start_year.unwrap_or_else(|| chrono::Local::now().year());
    let rows = outcome.schedule_rows(start_year);

    println!("Loan Projection v{}", env!("CARGO_PKG_VERSION"));
    println!("=====================\n");
    println!("  Loan amount:      £{:.0}", params.principal());
    println!("  Interest rate:    {}%", params.annual_interest_rate());
    println!("  Repayment rate:   {}% above £{:.0}", params.repayment_rate(), params.minimum_repayment_threshold());
    if let Some(first) = outcome.income.first_year() {
        let kind = if params.use_net_income() { "net (after tax and NI)" } else { "gross" };
        println!("  First-year {kind} salary: £{first:.0}");
    }
    println!();

    println!("{:>5} {:>6} {:>12} {:>12} {:>10} {:>14}",
        "Year", "Cal", "Salary", "Repayment", "Monthly", "Balance");
    println!("{}", "-".repeat(64));
    for row in rows.iter().take(cli.rows) {
        println!("{:>5} {:>6} {:>12.2} {:>12.2} {:>10.2} {:>14.2}",
            row.year_index + 1,
            row.calendar_year,
            row.income,
            row.repayment,
            row.monthly_repayment,
            row.remaining_balance,
        );
    }
    if rows.len() > cli.rows {
        println!("... ({} more years)", rows.len() - cli.rows);
    }

    let summary = &outcome.summary;
    println!("\nSummary:");
    println!("  Total repayment over {} years: £{:.0}", summary.years, summary.total_repaid);
    println!("  NPV at {:.1}%: £{:.0}", params.discount_rate() * 100.0, outcome.npv);
    match summary.payoff_year {
        Some(year) => println!("  Repaid in year {} ({})", year + 1, start_year + year as i32),
        None => println!("  Written off at horizon: £{:.0}", summary.final_balance),
    }
    if let Some(rate) = summary.effective_annual_rate {
        println!("  Effective annual rate: {:.2}%", rate * 100.0);
    }

    println!("\nShould you increase your repayment rate?");
    let comparison = runner.compare_extra(cli.extra)?;
    if cli.extra > 0.0 {
        println!("  Base rate ({}%): £{:.0} total, NPV £{:.0}",
            comparison.base_rate, comparison.base_total, comparison.base_npv);
        println!("  Higher rate ({}%): £{:.0} total, NPV £{:.0}",
            comparison.elevated_rate, comparison.high_total, comparison.high_npv);
    }
    println!("  [{}] {}", comparison.recommendation, comparison.message());

    if let Some(path) = &cli.output {
        write_schedule(path, &rows)?;
        println!("\nFull schedule written to: {}", path.display());
    }

    Ok(())
}
