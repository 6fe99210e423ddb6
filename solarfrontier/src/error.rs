#[derive(thiserror::Error, Debug)]
pub enum SolarFrontierError {
    #[error("inverter request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid measurement: `{0}`")]
    InvalidMeasurement(String),
}

pub type Result<T> = std::result::Result<T, SolarFrontierError>;
