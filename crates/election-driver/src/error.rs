use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error(transparent)]
    Election(#[from] election_core::ElectionError),

    #[error("height {0} has already been processed")]
    HeightAlreadyProcessed(u64),
}

pub type Result<T> = std::result::Result<T, DriverError>;
