use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegionError {
    #[error("Interval end precedes start: start={0}, end={1}")]
    InvertedBounds(String, String),

    #[error("Missing {0} field in line: {1}")]
    MissingField(&'static str, String),

    #[error("Invalid coordinate `{0}`")]
    InvalidCoordinate(String),

    #[error("Error parsing region string, expected chr:start-end: {0}")]
    RegionParseError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
