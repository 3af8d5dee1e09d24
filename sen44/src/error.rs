//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] sen44_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] sen44_transport::Error),

    #[error("Type error: {0}")]
    Types(#[from] sen44_types::Error),
}
