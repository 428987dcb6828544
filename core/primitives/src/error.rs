use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoinError {
    #[error("Invalid denomination: {0:?}")]
    InvalidDenom(String),

    #[error("Duplicate denomination: {0}")]
    DuplicateDenom(String),

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Arithmetic overflow adding {0}")]
    Overflow(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}
