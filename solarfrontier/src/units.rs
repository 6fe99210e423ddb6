use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::error::{Result, SolarFrontierError};

/// A magnitude together with the unit it was given in, e.g. `5.5 kW`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub value: f64,
    pub unit: String,
}

impl std::fmt::Display for Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

impl std::str::FromStr for Measurement {
    type Err = SolarFrontierError;

    fn from_str(input: &str) -> Result<Self> {
        parse_measurement(input)
    }
}

/// Splits strings like `"10W"`, `"5.5kW"` or `"10 kW"` into value and unit.
/// The unit is kept exactly as written.
pub fn parse_measurement(input: &str) -> Result<Measurement> {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^(\d+(\.\d+)?)\s*([a-zA-Z]+)$").unwrap();
    }
    let trimmed = input.trim();
    let caps = RE
        .captures(trimmed)
        .ok_or_else(|| SolarFrontierError::InvalidMeasurement(input.to_string()))?;
    let value = caps[1]
        .parse::<f64>()
        .map_err(|_| SolarFrontierError::InvalidMeasurement(input.to_string()))?;
    Ok(Measurement {
        value,
        unit: caps[3].to_string(),
    })
}

pub fn value(input: &str) -> Result<f64> {
    parse_measurement(input).map(|m| m.value)
}

pub fn unit(input: &str) -> Result<String> {
    parse_measurement(input).map(|m| m.unit)
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-
