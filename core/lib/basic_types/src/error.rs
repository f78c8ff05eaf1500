use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AddressError {
    #[error("address must start with 0x")]
    MissingPrefix,
    #[error("address is not a valid hex string")]
    InvalidHex,
    #[error("address must decode to exactly 20 bytes")]
    InvalidLength,
}

#[derive(Debug, Error, PartialEq)]
pub enum TxHashError {
    #[error("transaction hash must start with 0x")]
    MissingPrefix,
    #[error("transaction hash is not a valid hex string")]
    InvalidHex,
    #[error("transaction hash must decode to exactly 32 bytes")]
    InvalidLength,
}
