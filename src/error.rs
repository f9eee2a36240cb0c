use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::MeasureKind;

#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum Error {
    #[error("Latitude '{latitude}' is out of range (valid: -90.0..=90.0)")]
    LatitudeOutOfRange { latitude: f64 },

    #[error("Longitude '{longitude}' is out of range (valid: -180.0..=180.0)")]
    LongitudeOutOfRange { longitude: f64 },

    #[error("ECEF position ({x}, {y}, {z}) cannot be converted to a geodetic coordinate")]
    DegenerateEcef { x: f64, y: f64, z: f64 },

    #[error("{kind} session is already finalized")]
    SessionFinished { kind: MeasureKind },

    #[error("{kind} session has no committed point to finalize")]
    NothingToFinalize { kind: MeasureKind },

    #[error("{kind} session finalizes on its own and does not accept a finalize signal")]
    FinalizeNotSupported { kind: MeasureKind },

    #[error("Cannot start {requested} tool while {active} tool is active")]
    ToolAlreadyActive {
        active: MeasureKind,
        requested: MeasureKind,
    },

    #[error("No measurement tool is active")]
    NoActiveTool,

    #[error("Failed to load configuration: {message}")]
    Config { message: String },
}

impl From<::config::ConfigError> for Error {
    fn from(value: ::config::ConfigError) -> Self {
        Error::Config {
            message: value.to_string(),
        }
    }
}
