use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SignerError {
    #[error("invalid ethereum private key")]
    InvalidPrivateKey,
    #[error("address determination error")]
    DefineAddress,
    #[error("signing failed: {0}")]
    SigningFailed(String),
}
