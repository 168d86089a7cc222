use thiserror::Error;
use travian_game::driver::DriverError;
use travian_types::{GameError, ScanError};

/// Top-level error for the agent binary. `main` surfaces any of these as an
/// `anyhow::Result` error and exits non-zero.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
