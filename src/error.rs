//! Error types for validation and configuration loading

use thiserror::Error;

/// Raised when simulation inputs fall outside their documented domain.
///
/// Validation happens before any series is produced, so a caller never sees a
/// partially simulated result alongside one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid input for `{parameter}`: {reason}")]
    InvalidInput {
        parameter: &'static str,
        reason: String,
    },
}

impl SimulationError {
    pub fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        SimulationError::InvalidInput {
            parameter,
            reason: reason.into(),
        }
    }

    /// Name of the offending parameter
    pub fn parameter(&self) -> &'static str {
        match self {
            SimulationError::InvalidInput { parameter, .. } => parameter,
        }
    }
}

/// Errors from loading parameter files and tax tables
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown tax parameter `{0}`")]
    UnknownParameter(String),

    #[error("invalid value `{value}` for tax parameter `{name}`")]
    InvalidValue { name: String, value: String },

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

pub type Result<T, E = SimulationError> = std::result::Result<T, E>;
