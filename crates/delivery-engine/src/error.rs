//! Error types for delivery-engine edge APIs.
//!
//! The estimation pipeline itself never fails; these errors only surface from
//! strict parsing entry points (zone names, country codes, settings documents).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimateError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid holiday country: {0}")]
    InvalidCountry(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for EstimateError {
    fn from(err: serde_json::Error) -> Self {
        EstimateError::InvalidConfig(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EstimateError>;
