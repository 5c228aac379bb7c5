use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid cadence: cadence_months must be at least 1, got {cadence_months}")]
    InvalidCadence { cadence_months: u32 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
