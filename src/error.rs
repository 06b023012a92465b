use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeadowError {
    #[error("grid dimension {0} is not of the form 2^k + 1")]
    InvalidDimension(usize),
    #[error("half extent {0} must be positive and finite")]
    InvalidExtent(f32),
    #[error("invalid world configuration: {0}")]
    InvalidConfig(String),
    #[error("{count} objects cannot keep their spacing inside the world (at most {limit} fit)")]
    OverPacked { count: usize, limit: usize },
    #[error("failed to parse world configuration")]
    Parse(#[from] ron::error::SpannedError),
    #[error("placed {placed} of {requested} objects before giving up after {attempts} attempts")]
    PlacementExhausted {
        placed: usize,
        requested: usize,
        attempts: u32,
    },
    #[error("no shoreline found in {attempts} generated worlds")]
    NoShoreline { attempts: u32 },
}

pub type MeadowResult<T> = Result<T, MeadowError>;
