//! File-based configuration
//!
//! Parameters come from a JSON document whose missing fields take their
//! defaults. Tax tables are CSV files of `parameter,value` rows, each row
//! overriding one named figure of the default schedule.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::income::TaxSchedule;
use crate::params::{ParameterInput, SimulationParameters};

/// Row of a tax table CSV
#[derive(Debug, Deserialize)]
struct TaxRow {
    parameter: String,
    value: String,
}

/// Load and validate simulation parameters from a JSON file
pub fn load_parameters<P: AsRef<Path>>(path: P) -> Result<SimulationParameters, ConfigError> {
    let file = File::open(path.as_ref())?;
    load_parameters_from_reader(file)
}

pub fn load_parameters_from_reader<R: Read>(reader: R) -> Result<SimulationParameters, ConfigError> {
    let input: ParameterInput = serde_json::from_reader(reader)?;
    Ok(input.validate()?)
}

/// Load a tax table, starting from the default schedule
pub fn load_tax_schedule<P: AsRef<Path>>(path: P) -> Result<TaxSchedule, ConfigError> {
    let path = path.as_ref();
    let schedule = load_tax_schedule_from_reader(File::open(path)?)?;
    info!("loaded tax table from {}", path.display());
    Ok(schedule)
}

pub fn load_tax_schedule_from_reader<R: Read>(reader: R) -> Result<TaxSchedule, ConfigError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut schedule = TaxSchedule::default();

    for result in csv_reader.deserialize() {
        let row: TaxRow = result?;
        let value: f64 = row.value.parse().map_err(|_| ConfigError::InvalidValue {
            name: row.parameter.clone(),
            value: row.value.clone(),
        })?;
        schedule.set(&row.parameter, value)?;
    }

    Ok(schedule)
}
